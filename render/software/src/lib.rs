//! Software raycaster. Casts one ray per sample across the field of view,
//! projects the hits to wall strips and floor casts the rows under them.
//! All drawing goes through a `DrawTarget`.

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use gameplay::Player;
use gameplay::log::info;
use math::TrigLut;
use render_trait::{Colour, DrawTarget, PlayViewRenderer};
use world::World;

mod automap;
mod batch;
mod caster;
mod defs;
mod planes;
mod projection;
mod segs;

pub use automap::{draw_automap, draw_hud_sprite};
pub use batch::{Batcher, Span};
pub use caster::{RayHit, Surface, cast_ray};
pub use defs::{Column, DEFAULT_FOV, DEFAULT_FOV_STEP, NEAR_CLIP, ScreenGeometry};
pub use planes::{FloorKey, floor_distance, floor_point};
pub use projection::{WallStrip, project_column, wall_texel};
pub use segs::WallKey;

pub const BACKGROUND: Colour = [30, 0, 30, 255];

/// Everything the view renderer keeps between frames: the trig tables, the
/// screen layout and per-column scratch space that is reused every frame.
pub struct SoftwareRenderer {
    lut: TrigLut,
    geometry: ScreenGeometry,
    columns: Vec<Column>,
}

impl SoftwareRenderer {
    pub fn new(geometry: ScreenGeometry) -> Self {
        info!(
            "Software renderer: {} rays over {} degrees, {:.2}px strips",
            geometry.sample_count(),
            geometry.fov,
            geometry.strip_width()
        );
        Self {
            lut: TrigLut::new(),
            geometry,
            columns: Vec::with_capacity(geometry.sample_count()),
        }
    }

    pub fn set_geometry(&mut self, geometry: ScreenGeometry) {
        self.geometry = geometry;
        self.columns.reserve(geometry.sample_count());
    }

    /// Results of the last cast
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Cast every ray and project the hits. Fills `columns`.
    pub fn cast_columns(&mut self, player: &Player, world: &World) {
        #[cfg(feature = "hprof")]
        profile!("cast_columns");
        // The world owns the cell size
        self.geometry.cell_size = world.cell_size;
        self.columns.clear();

        let facing = player.angle.deg();
        let origin = player.center();
        for sample in 0..self.geometry.sample_count() {
            let offset = self.geometry.sample_offset(sample);
            let mut column = Column::new(sample, facing + offset, offset, &self.lut);
            if let Some(hit) = cast_ray(origin, column.ray, &self.lut, &world.walls, world.cell_size)
            {
                column.perp_distance = hit.perpendicular(&self.lut, column.theta);
                column.strip = Some(project_column(&self.geometry, sample, column.perp_distance));
                column.wall = world
                    .objects
                    .current_texture(hit.token)
                    .map(|tex| (tex, wall_texel(&hit, world.cell_size, tex.width)));
                column.hit = Some(hit);
            }
            self.columns.push(column);
        }
    }
}

impl PlayViewRenderer for SoftwareRenderer {
    fn render_player_view(&mut self, player: &Player, world: &World, target: &mut impl DrawTarget) {
        #[cfg(feature = "hprof")]
        profile!("render_player_view");
        target.fill_rect(self.geometry.viewport, &BACKGROUND);
        self.cast_columns(player, world);

        let origin = player.center();
        for column in &self.columns {
            planes::draw_column_floor(column, origin, &self.lut, &self.geometry, world, target);
        }
        segs::draw_walls(&self.columns, &self.geometry, target);
    }
}
