//! The level a player walks around: two overlaid occupancy grids and the
//! objects their tokens name.

mod grid;
mod manifest;
mod objects;
mod token;

pub use grid::Grid;
pub use manifest::{ObjectEntry, ObjectManifest};
pub use objects::{
    AnimationState, CollisionMode, ObjectRegistry, TextureId, TextureInfo, WorldObject,
};
pub use token::{EMPTY_TOKEN_NAME, Token, TokenTable};

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

/// File names inside a level directory
pub const WALL_GRID_FILE: &str = "w.csv";
pub const FLOOR_GRID_FILE: &str = "f.csv";

/// World units per grid cell
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

#[derive(Debug)]
pub enum WorldError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Manifest(String),
    Image {
        path: PathBuf,
        reason: String,
    },
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::Io { path, source } => write!(f, "could not read {:?}: {}", path, source),
            WorldError::Manifest(m) => write!(f, "bad object manifest: {}", m),
            WorldError::Image { path, reason } => {
                write!(f, "could not load image {:?}: {}", path, reason)
            }
        }
    }
}

/// Everything the renderer and movement code read. Built once at startup,
/// only the animation timers inside `objects` change afterwards.
#[derive(Debug, Clone)]
pub struct World {
    pub walls: Grid,
    pub floors: Grid,
    pub objects: ObjectRegistry,
    pub cell_size: f32,
}

impl World {
    pub fn new(walls: Grid, floors: Grid, objects: ObjectRegistry, cell_size: f32) -> Self {
        Self {
            walls,
            floors,
            objects,
            cell_size,
        }
    }

    /// Parse both grids through the registry's token table so grid tokens and
    /// object tokens agree
    pub fn from_csv(
        walls: &str,
        floors: &str,
        mut objects: ObjectRegistry,
        cell_size: f32,
    ) -> Self {
        let walls = Grid::from_csv(walls, objects.tokens_mut());
        let floors = Grid::from_csv(floors, objects.tokens_mut());
        Self::new(walls, floors, objects, cell_size)
    }

    /// Read `w.csv` and `f.csv` from `level_dir`. Objects should already be
    /// registered.
    pub fn load(
        level_dir: &Path,
        mut objects: ObjectRegistry,
        cell_size: f32,
    ) -> Result<Self, WorldError> {
        info!("Loading level from {:?}", level_dir);
        let walls = Grid::load(&level_dir.join(WALL_GRID_FILE), objects.tokens_mut())?;
        let floors = Grid::load(&level_dir.join(FLOOR_GRID_FILE), objects.tokens_mut())?;
        let world = Self::new(walls, floors, objects, cell_size);
        world.warn_unknown_tokens();
        Ok(world)
    }

    /// Tokens with no registered object are legal, they just never draw or
    /// block. Usually a typo in a level file though.
    fn warn_unknown_tokens(&self) {
        let mut seen = Vec::new();
        for grid in [&self.walls, &self.floors] {
            for token in grid.rows().flatten() {
                if token.is_empty() || seen.contains(token) || self.objects.get(*token).is_some() {
                    continue;
                }
                seen.push(*token);
                warn!(
                    "Level uses {:?} but no object has that name",
                    self.objects.tokens().name(*token).unwrap_or("?")
                );
            }
        }
    }

    /// Width and height of the wall grid in world units
    pub fn extent(&self) -> (f32, f32) {
        (
            self.walls.width() as f32 * self.cell_size,
            self.walls.height() as f32 * self.cell_size,
        )
    }
}
