//! Description of every object a level may reference. RON, or JSON when the
//! file ends in `.json`.
//!
//! ```text,ignore
//! (
//!     objects: [
//!         (name: "brick", frames: ["textures/brick.png"], collision: 2),
//!         (name: "water", frames: ["water/0.png", "water/1.png"], frame_duration: 0.25),
//!     ],
//! )
//! ```
//!
//! ```text,ignore
//! {"objects": [{"name": "brick", "frames": ["textures/brick.png"], "collision": 2}]}
//! ```
//!
//! Frame paths are relative to the manifest file. Images are decoded by the
//! render target, the world only keeps the handles it gets back.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use nanoserde::{DeJson, DeRon};

use crate::WorldError;
use crate::objects::{CollisionMode, TextureInfo, WorldObject};

#[derive(Debug, Clone, DeRon, DeJson)]
pub struct ObjectEntry {
    pub name: String,
    #[nserde(default)]
    pub frames: Vec<String>,
    /// Seconds per frame, 0 is a still image
    #[nserde(default)]
    pub frame_duration: f32,
    /// Collision mask, bit0 floor, bit1 wall
    #[nserde(default)]
    pub collision: u8,
}

impl ObjectEntry {
    pub fn collision_mode(&self) -> CollisionMode {
        CollisionMode::from_bits(self.collision)
    }

    /// Build the registry object once the frames have been turned in to
    /// textures. `frames` must be in the same order as `self.frames`.
    pub fn to_object(&self, frames: Vec<TextureInfo>) -> WorldObject {
        WorldObject::new(&self.name, frames, self.collision_mode())
            .with_frame_duration(self.frame_duration)
    }
}

/// On-disk layout
#[derive(Debug, DeRon, DeJson)]
struct ManifestFile {
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, Default, Clone)]
pub struct ObjectManifest {
    pub objects: Vec<ObjectEntry>,
    base_dir: PathBuf,
}

impl ObjectManifest {
    pub fn from_ron(src: &str) -> Result<Self, WorldError> {
        let file =
            ManifestFile::deserialize_ron(src).map_err(|e| WorldError::Manifest(e.to_string()))?;
        Ok(Self::from_file(file))
    }

    pub fn from_json(src: &str) -> Result<Self, WorldError> {
        let file =
            ManifestFile::deserialize_json(src).map_err(|e| WorldError::Manifest(e.to_string()))?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: ManifestFile) -> Self {
        Self {
            objects: file.objects,
            base_dir: PathBuf::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, WorldError> {
        let src = fs::read_to_string(path).map_err(|e| WorldError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json(&src)
        } else {
            Self::from_ron(&src)
        };
        let mut manifest = parsed
            .map_err(|e| WorldError::Manifest(format!("{}: {e}", path.display())))?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        info!(
            "Loaded object manifest {:?}: {} objects",
            path,
            manifest.objects.len()
        );
        Ok(manifest)
    }

    /// Location of a frame image on disk
    pub fn frame_path(&self, frame: &str) -> PathBuf {
        self.base_dir.join(frame)
    }
}
