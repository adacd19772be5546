use math::{LUT_STEP_DEG, TrigLut};
use render_trait::FRect;
use world::TextureInfo;

use crate::caster::RayHit;
use crate::projection::WallStrip;

/// Perpendicular distances are clamped to at least this many world units
pub const NEAR_CLIP: f32 = 0.1;
pub const DEFAULT_FOV: f32 = 60.0;
/// One ray per LUT step by default
pub const DEFAULT_FOV_STEP: f32 = LUT_STEP_DEG;

/// Where on the screen the view is drawn and how it is sampled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub viewport: FRect,
    /// Field of view in degrees
    pub fov: f32,
    /// Degrees between neighbouring rays
    pub fov_step: f32,
    /// World units per grid cell
    pub cell_size: f32,
}

impl ScreenGeometry {
    pub fn new(viewport: FRect, fov: f32, fov_step: f32, cell_size: f32) -> Self {
        Self {
            viewport,
            fov,
            fov_step,
            cell_size,
        }
    }

    /// Number of rays cast per frame, never zero
    #[inline]
    pub fn sample_count(&self) -> usize {
        if self.fov_step <= 0.0 {
            return 1;
        }
        ((self.fov / self.fov_step).round() as usize).max(1)
    }

    /// Width of one screen strip in pixels
    #[inline]
    pub fn strip_width(&self) -> f32 {
        self.viewport.w / self.sample_count() as f32
    }

    /// Viewport-relative row of the horizon
    #[inline]
    pub fn horizon(&self) -> f32 {
        self.viewport.h / 2.0
    }

    /// Whole pixel rows in the viewport
    #[inline]
    pub fn rows(&self) -> i32 {
        self.viewport.h.floor() as i32
    }

    /// Angle of the ray for `sample` relative to the view axis
    #[inline]
    pub fn sample_offset(&self, sample: usize) -> f32 {
        -self.fov / 2.0 + sample as f32 * self.fov_step
    }
}

/// What was found for one ray this frame. Rebuilt every frame in to storage
/// owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub sample: usize,
    /// LUT index of the ray direction
    pub ray: usize,
    /// LUT index of the ray's offset from the view axis
    pub theta: usize,
    pub hit: Option<RayHit>,
    pub perp_distance: f32,
    pub strip: Option<WallStrip>,
    /// Texture and texel column for the wall, if it can be drawn
    pub wall: Option<(TextureInfo, u32)>,
}

impl Column {
    pub fn new(sample: usize, ray_deg: f32, theta_deg: f32, lut: &TrigLut) -> Self {
        Self {
            sample,
            ray: lut.index(ray_deg),
            theta: lut.index(theta_deg),
            hit: None,
            perp_distance: f32::INFINITY,
            strip: None,
            wall: None,
        }
    }
}
