//! Cosine/sine lookup tables for the ray casting hot path.
//!
//! The tables cover a full rotation in `LUT_STEP_DEG` increments. Indexing is
//! always by degrees, the same unit the player heading is stored in.

use glam::Vec2;

/// Number of entries in each table, one full rotation
pub const LUT_SIZE: usize = 1200;
/// Angular resolution of the tables in degrees
pub const LUT_STEP_DEG: f32 = 360.0 / LUT_SIZE as f32;

/// Precomputed cosine and sine tables. Built once and owned by the render
/// context.
#[derive(Clone)]
pub struct TrigLut {
    cos: [f32; LUT_SIZE],
    sin: [f32; LUT_SIZE],
}

impl TrigLut {
    pub fn new() -> Self {
        let mut cos = [0.0; LUT_SIZE];
        let mut sin = [0.0; LUT_SIZE];
        for i in 0..LUT_SIZE {
            // f64 so entries such as 90 and 180 degrees land as close to the
            // true value as f32 allows
            let rad = (i as f64 * 360.0 / LUT_SIZE as f64).to_radians();
            cos[i] = rad.cos() as f32;
            sin[i] = rad.sin() as f32;
        }
        Self { cos, sin }
    }

    /// `floor(degrees / step) mod LUT_SIZE`, never negative.
    ///
    /// The multiply happens before the divide so that whole multiples of the
    /// step stay exact.
    #[inline]
    pub fn index(&self, degrees: f32) -> usize {
        lut_index(degrees)
    }

    #[inline]
    pub fn cos(&self, index: usize) -> f32 {
        self.cos[index % LUT_SIZE]
    }

    #[inline]
    pub fn sin(&self, index: usize) -> f32 {
        self.sin[index % LUT_SIZE]
    }

    /// Unit direction vector for the table index
    #[inline]
    pub fn unit(&self, index: usize) -> Vec2 {
        Vec2::new(self.cos(index), self.sin(index))
    }
}

impl Default for TrigLut {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn lut_index(degrees: f32) -> usize {
    let steps = (f64::from(degrees) * LUT_SIZE as f64 / 360.0).floor() as i64;
    steps.rem_euclid(LUT_SIZE as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::{LUT_SIZE, TrigLut, lut_index};

    #[test]
    fn index_is_periodic() {
        let lut = TrigLut::new();
        for a in [0.0f32, 12.5, 45.25, 90.0, 179.75, 359.5, -30.75, -359.5, 719.25] {
            assert_eq!(lut.index(a), lut.index(a + 360.0), "angle {a}");
            assert_eq!(lut.index(a), lut.index(a - 360.0), "angle {a}");
        }
    }

    #[test]
    fn index_never_out_of_range() {
        for i in -5000..5000 {
            let a = i as f32 * 0.37;
            assert!(lut_index(a) < LUT_SIZE);
        }
    }

    #[test]
    fn index_floors_by_step() {
        assert_eq!(lut_index(0.0), 0);
        assert_eq!(lut_index(0.29), 0);
        assert_eq!(lut_index(0.31), 1);
        assert_eq!(lut_index(90.0), 300);
        assert_eq!(lut_index(180.0), 600);
        assert_eq!(lut_index(360.0), 0);
        // floor, not truncation, for negatives
        assert_eq!(lut_index(-0.1), LUT_SIZE - 1);
        assert_eq!(lut_index(-90.0), 900);
    }

    #[test]
    fn table_values() {
        let lut = TrigLut::new();
        assert!((lut.cos(0) - 1.0).abs() < f32::EPSILON);
        assert!(lut.sin(0).abs() < f32::EPSILON);
        assert!(lut.cos(300).abs() < 1e-6);
        assert!((lut.sin(300) - 1.0).abs() < 1e-6);
        assert!((lut.cos(600) + 1.0).abs() < 1e-6);
        assert!((lut.cos(lut.index(60.0)) - 0.5).abs() < 1e-6);
        assert!((lut.sin(lut.index(-90.0)) + 1.0).abs() < 1e-6);

        let u = lut.unit(lut.index(45.0));
        assert!((u.length() - 1.0).abs() < 1e-6);
    }
}
