mod angle;
mod trig;

pub use angle::*;
pub use trig::*;

use glam::{IVec2, Vec2};

/// World point to the grid cell containing it. Floors, so points left of or
/// above the origin land in negative cells.
#[inline]
pub fn world_to_cell(point: Vec2, cell_size: f32) -> IVec2 {
    IVec2::new(
        (point.x / cell_size).floor() as i32,
        (point.y / cell_size).floor() as i32,
    )
}

/// Euclidean modulo of a world coordinate, for sampling a texture that tiles
/// every `size` units
#[inline]
pub fn wrap_texel(coord: f32, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    (coord.floor() as i64).rem_euclid(size as i64) as u32
}
