//! Grid DDA. Walks a ray from cell to cell, always crossing whichever cell
//! boundary is nearer, until it enters an occupied wall cell.
//!
//! Grids are expected to be closed by a solid border. A ray that leaves the
//! grid's bounding box and can never come back returns `None` so an open grid
//! costs a blank column rather than a hung frame.

use glam::{IVec2, Vec2};
use math::TrigLut;
use world::{Grid, Token};

/// Which kind of cell edge a ray struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Edge of constant x, crossed while stepping in x
    Vertical,
    /// Edge of constant y, crossed while stepping in y
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Where the ray crossed in to the occupied cell, world units
    pub point: Vec2,
    pub surface: Surface,
    pub cell: IVec2,
    pub token: Token,
    /// Euclidean length from the origin to `point`
    pub distance: f32,
}

impl RayHit {
    /// Distance along the view axis. `theta` is the LUT index of the ray's
    /// offset from the player's facing.
    #[inline]
    pub fn perpendicular(&self, lut: &TrigLut, theta: usize) -> f32 {
        self.distance * lut.cos(theta)
    }
}

/// Per-axis walk state, in cell units
#[derive(Debug, Clone, Copy)]
struct Axis {
    step: i32,
    /// Ray length between two boundaries on this axis
    delta: f32,
    /// Ray length to the next boundary on this axis
    side: f32,
}

impl Axis {
    fn new(pos: f32, cell: i32, dir: f32) -> Self {
        let step = if dir >= 0.0 { 1 } else { -1 };
        let delta = if dir == 0.0 {
            f32::INFINITY
        } else {
            (1.0 / dir).abs()
        };
        let side = if dir >= 0.0 {
            (cell as f32 + 1.0 - pos) * delta
        } else {
            (pos - cell as f32) * delta
        };
        // 0 * inf
        let side = if side.is_nan() { f32::INFINITY } else { side };
        Self { step, delta, side }
    }

    /// Never coming back inside `0..len` along this axis
    #[inline]
    fn escaped(&self, cell: i32, len: usize, dir: f32) -> bool {
        let len = len as i32;
        (cell < 0 && dir <= 0.0) || (cell >= len && dir >= 0.0)
    }
}

/// Cast from `origin` (world units) in the LUT direction `ray` against the
/// wall grid.
pub fn cast_ray(
    origin: Vec2,
    ray: usize,
    lut: &TrigLut,
    grid: &Grid,
    cell_size: f32,
) -> Option<RayHit> {
    let dir = lut.unit(ray);
    let pos = origin / cell_size;
    let mut cell = pos.floor().as_ivec2();
    let mut x = Axis::new(pos.x, cell.x, dir.x);
    let mut y = Axis::new(pos.y, cell.y, dir.y);

    loop {
        let (point, surface) = if x.side < y.side {
            // The hit is on the boundary being left, before the index moves
            let edge = if x.step > 0 { cell.x + 1 } else { cell.x };
            let hx = edge as f32 * cell_size;
            let hy = origin.y + (hx - origin.x) * dir.y / dir.x;
            x.side += x.delta;
            cell.x += x.step;
            (Vec2::new(hx, hy), Surface::Vertical)
        } else {
            if !y.side.is_finite() {
                return None;
            }
            let edge = if y.step > 0 { cell.y + 1 } else { cell.y };
            let hy = edge as f32 * cell_size;
            let hx = origin.x + (hy - origin.y) * dir.x / dir.y;
            y.side += y.delta;
            cell.y += y.step;
            (Vec2::new(hx, hy), Surface::Horizontal)
        };

        if x.escaped(cell.x, grid.width(), dir.x) || y.escaped(cell.y, grid.height(), dir.y) {
            return None;
        }

        let token = grid.cell_at(cell);
        if !token.is_empty() {
            return Some(RayHit {
                point,
                surface,
                cell,
                token,
                distance: point.distance(origin),
            });
        }
    }
}
