//! Turning a ray hit in to a vertical strip on screen.

use crate::caster::{RayHit, Surface};
use crate::defs::{NEAR_CLIP, ScreenGeometry};

/// Screen rectangle a wall column occupies, pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallStrip {
    pub x: f32,
    pub width: f32,
    pub top: f32,
    pub height: f32,
}

impl WallStrip {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// First pixel row of the strip. Walls and floors both snap through here
    /// so the floor starts on the row the wall stops at.
    #[inline]
    pub fn pixel_top(&self) -> i32 {
        self.top.round() as i32
    }

    /// One past the last pixel row of the strip
    #[inline]
    pub fn pixel_bottom(&self) -> i32 {
        self.bottom().round() as i32
    }
}

/// Inverse distance scaling of the wall height, centred on the horizon
#[inline]
pub fn project_column(geometry: &ScreenGeometry, sample: usize, perp_distance: f32) -> WallStrip {
    let vp = &geometry.viewport;
    let width = geometry.strip_width();
    let height = geometry.cell_size * vp.h / perp_distance.max(NEAR_CLIP);
    WallStrip {
        x: vp.x + sample as f32 * width,
        width,
        top: vp.y + (vp.h - height) / 2.0,
        height,
    }
}

/// Texture column for where along the struck edge the ray landed
#[inline]
pub fn wall_texel(hit: &RayHit, cell_size: f32, texture_width: u32) -> u32 {
    if texture_width == 0 {
        return 0;
    }
    let along = match hit.surface {
        Surface::Vertical => hit.point.y,
        Surface::Horizontal => hit.point.x,
    } / cell_size;
    let frac = along - along.floor();
    let texel = (frac * texture_width as f32).round() as u32;
    texel.min(texture_width - 1)
}

#[cfg(test)]
mod tests {
    use super::{project_column, wall_texel};
    use crate::caster::{RayHit, Surface};
    use crate::defs::{NEAR_CLIP, ScreenGeometry};
    use glam::{IVec2, Vec2};
    use render_trait::FRect;
    use world::Token;

    fn geometry() -> ScreenGeometry {
        ScreenGeometry::new(FRect::new(10.0, 20.0, 200.0, 100.0), 60.0, 0.3, 10.0)
    }

    fn hit(point: Vec2, surface: Surface) -> RayHit {
        RayHit {
            point,
            surface,
            cell: IVec2::ZERO,
            token: Token::EMPTY,
            distance: 1.0,
        }
    }

    #[test]
    fn strip_scales_with_inverse_distance() {
        let geom = geometry();
        let near = project_column(&geom, 0, 10.0);
        let far = project_column(&geom, 0, 20.0);
        assert_eq!(near.height, 100.0);
        assert_eq!(far.height, 50.0);
        // centred on the horizon at y = 20 + 50
        assert_eq!(near.top, 20.0);
        assert_eq!(far.top, 45.0);
        assert_eq!(far.bottom(), 95.0);
    }

    #[test]
    fn strip_x_is_linear_in_sample() {
        let geom = geometry();
        assert_eq!(geom.sample_count(), 200);
        let s = project_column(&geom, 50, 10.0);
        assert_eq!(s.width, 1.0);
        assert_eq!(s.x, 60.0);
    }

    #[test]
    fn zero_distance_is_clamped() {
        let geom = geometry();
        let s = project_column(&geom, 0, 0.0);
        assert!(s.height.is_finite());
        assert_eq!(s.height, 10.0 * 100.0 / NEAR_CLIP);
        let neg = project_column(&geom, 0, -3.0);
        assert_eq!(neg.height, s.height);
    }

    #[test]
    fn texel_from_edge_position() {
        assert_eq!(wall_texel(&hit(Vec2::new(20.0, 12.5), Surface::Vertical), 10.0, 64), 16);
        assert_eq!(wall_texel(&hit(Vec2::new(7.5, 30.0), Surface::Horizontal), 10.0, 64), 48);
        // Right at the far end rounds to the last column, never past it
        assert_eq!(wall_texel(&hit(Vec2::new(9.999, 0.0), Surface::Horizontal), 10.0, 64), 63);
        assert_eq!(wall_texel(&hit(Vec2::new(-2.5, 0.0), Surface::Horizontal), 10.0, 64), 48);
        assert_eq!(wall_texel(&hit(Vec2::new(5.0, 0.0), Surface::Horizontal), 10.0, 0), 0);
    }
}
