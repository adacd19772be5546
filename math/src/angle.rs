use glam::Vec2;
use std::ops::AddAssign;

const FULL_TURN: f32 = 360.0;

/// A heading in degrees, always kept in `[0, 360)`
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    /// Will always wrap < 0 to > 0
    #[inline]
    pub const fn new(mut degrees: f32) -> Self {
        degrees %= FULL_TURN;
        if degrees < 0.0 {
            degrees += FULL_TURN;
        }
        // -0.0001 % 360 + 360 can round up to exactly 360
        if degrees >= FULL_TURN {
            degrees = 0.0;
        }
        Angle(degrees)
    }

    #[inline]
    const fn inner_wrap(&mut self) {
        *self = Angle::new(self.0);
    }

    #[inline]
    pub const fn deg(&self) -> f32 {
        self.0
    }

    #[inline]
    pub const fn rad(&self) -> f32 {
        self.0.to_radians()
    }

    /// Exact unit vector. Not for the hot path, use the `TrigLut` there.
    #[inline]
    pub fn unit(&self) -> Vec2 {
        let (y, x) = self.rad().sin_cos();
        Vec2::new(x, y)
    }
}

impl AddAssign<f32> for Angle {
    #[inline]
    fn add_assign(&mut self, other: f32) {
        self.0 += other;
        self.inner_wrap();
    }
}
