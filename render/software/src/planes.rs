//! Floor casting. Every pixel row under a wall strip is inverse projected back
//! on to the floor plane to find which floor cell, and which texel of its
//! texture, the row sees.

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use glam::{IVec2, Vec2};
use math::{TrigLut, world_to_cell, wrap_texel};
use render_trait::{DrawTarget, FRect};
use world::{TextureId, TextureInfo, World};

use crate::batch::{Batcher, Span};
use crate::defs::{Column, ScreenGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorKey {
    pub texture: TextureId,
    pub tx: u32,
    pub ty: u32,
}

/// Floor distance seen by a viewport row, `horizon / (row - horizon) * cell`.
/// `None` for the horizon row and everything above it.
#[inline]
pub fn floor_distance(row: i32, geometry: &ScreenGeometry) -> Option<f32> {
    let horizon = geometry.horizon();
    let dy = row as f32 - horizon;
    if dy <= 0.0 {
        return None;
    }
    Some(horizon / dy * geometry.cell_size)
}

/// World point on the floor `distance` along the view axis. `cos_theta`
/// undoes the perpendicular correction so the point lies on the actual ray.
#[inline]
pub fn floor_point(origin: Vec2, dir: Vec2, cos_theta: f32, distance: f32) -> Vec2 {
    origin + dir / cos_theta * distance
}

/// First viewport row below the wall strip, or the horizon if nothing was hit
#[inline]
pub fn floor_start_row(column: &Column, geometry: &ScreenGeometry) -> i32 {
    let start = match column.strip {
        Some(strip) => strip.pixel_bottom() - geometry.viewport.y.round() as i32,
        None => geometry.horizon().ceil() as i32,
    };
    start.clamp(0, geometry.rows())
}

/// Texture and texel for the floor at `point`, `None` if nothing is drawn there
#[inline]
pub fn floor_texel(point: Vec2, world: &World) -> Option<(IVec2, TextureInfo, u32, u32)> {
    let cell = world_to_cell(point, world.cell_size);
    let token = world.floors.cell_at(cell);
    if token.is_empty() {
        return None;
    }
    let texture = world.objects.current_texture(token)?;
    Some((
        cell,
        texture,
        wrap_texel(point.x, texture.width),
        wrap_texel(point.y, texture.height),
    ))
}

/// Draw the floor under one column, coalescing rows that sample the same
/// texel
pub fn draw_column_floor(
    column: &Column,
    origin: Vec2,
    lut: &TrigLut,
    geometry: &ScreenGeometry,
    world: &World,
    target: &mut impl DrawTarget,
) {
    #[cfg(feature = "hprof")]
    profile!("draw_column_floor");
    let dir = lut.unit(column.ray);
    let cos_theta = lut.cos(column.theta);
    if cos_theta <= 0.0 {
        return;
    }
    let vp = geometry.viewport;
    let strip_w = geometry.strip_width();

    let mut floors = Batcher::new(|span: &Span<FloorKey>| {
        target.blit(
            span.key.texture,
            FRect::new(span.key.tx as f32, span.key.ty as f32, 1.0, 1.0),
            FRect::new(
                vp.x + span.lane as f32 * strip_w,
                vp.y + span.start as f32,
                strip_w,
                span.len as f32,
            ),
        );
    });

    for row in floor_start_row(column, geometry)..geometry.rows() {
        let Some(distance) = floor_distance(row, geometry) else {
            continue;
        };
        let point = floor_point(origin, dir, cos_theta, distance);
        if let Some((_, texture, tx, ty)) = floor_texel(point, world) {
            let key = FloorKey {
                texture: texture.id,
                tx,
                ty,
            };
            floors.extend(key, column.sample as i32, row, 1);
        }
    }
    floors.finish();
}

#[cfg(test)]
mod tests {
    use super::{floor_distance, floor_point, floor_start_row, floor_texel};
    use crate::defs::{Column, ScreenGeometry};
    use crate::projection::WallStrip;
    use glam::{IVec2, Vec2};
    use math::TrigLut;
    use render_trait::FRect;
    use world::{CollisionMode, ObjectRegistry, TextureId, TextureInfo, World, WorldObject};

    fn geometry(h: f32) -> ScreenGeometry {
        ScreenGeometry::new(FRect::new(0.0, 0.0, 100.0, h), 60.0, 0.3, 10.0)
    }

    #[test]
    fn horizon_row_is_skipped() {
        let geom = geometry(600.0);
        assert_eq!(floor_distance(300, &geom), None);
        assert_eq!(floor_distance(0, &geom), None);
        assert_eq!(floor_distance(301, &geom), Some(300.0 * 10.0));
        assert_eq!(floor_distance(400, &geom), Some(3.0 * 10.0));

        // Odd heights put the horizon between two rows
        let geom = geometry(11.0);
        assert_eq!(floor_distance(5, &geom), None);
        assert_eq!(floor_distance(6, &geom), Some(5.5 / 0.5 * 10.0));
    }

    #[test]
    fn distance_falls_with_row() {
        let geom = geometry(100.0);
        let mut last = f32::INFINITY;
        for row in 51..100 {
            let d = floor_distance(row, &geom).unwrap();
            assert!(d < last);
            last = d;
        }
        assert_eq!(floor_distance(50, &geom), None);
    }

    #[test]
    fn point_follows_the_ray() {
        let lut = TrigLut::new();
        let p = floor_point(Vec2::new(5.0, 5.0), lut.unit(0), 1.0, 20.0);
        assert!((p - Vec2::new(25.0, 5.0)).length() < 1e-4);

        let theta = lut.index(60.0);
        let p = floor_point(Vec2::ZERO, lut.unit(theta), lut.cos(theta), 10.0);
        // 10 along the view axis is 20 along a ray 60 degrees off it
        assert!((p.length() - 20.0).abs() < 1e-3);
        assert!((p.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn start_row_below_strip_or_horizon() {
        let lut = TrigLut::new();
        let geom = geometry(100.0);
        let mut column = Column::new(0, 0.0, 0.0, &lut);
        assert_eq!(floor_start_row(&column, &geom), 50);

        column.strip = Some(WallStrip {
            x: 0.0,
            width: 1.0,
            top: 30.2,
            height: 39.5,
        });
        assert_eq!(floor_start_row(&column, &geom), 70);

        // Both fractions under a half, the floor still starts where the wall
        // blit stops
        let strip = WallStrip {
            x: 0.0,
            width: 1.0,
            top: 39.32,
            height: 21.35,
        };
        column.strip = Some(strip);
        assert_eq!(strip.pixel_top(), 39);
        assert_eq!(strip.pixel_bottom(), 61);
        assert_eq!(floor_start_row(&column, &geom), 61);

        column.strip = Some(WallStrip {
            x: 0.0,
            width: 1.0,
            top: -500.0,
            height: 1100.0,
        });
        assert_eq!(floor_start_row(&column, &geom), 100);
    }

    #[test]
    fn texel_wraps_and_unknown_floors_are_skipped() {
        let mut objects = ObjectRegistry::new();
        let tex = TextureInfo {
            id: TextureId(9),
            width: 8,
            height: 4,
        };
        objects.register(WorldObject::new("grass", vec![tex], CollisionMode::NONE));
        let world = World::from_csv("", "grass,grass\n,mud", objects, 10.0);

        let (cell, found, tx, ty) = floor_texel(Vec2::new(13.5, 6.0), &world).unwrap();
        assert_eq!(cell, IVec2::new(1, 0));
        assert_eq!(found, tex);
        assert_eq!((tx, ty), (5, 2));

        // empty cell, unknown object, outside the grid
        assert!(floor_texel(Vec2::new(3.0, 13.0), &world).is_none());
        assert!(floor_texel(Vec2::new(13.0, 13.0), &world).is_none());
        assert!(floor_texel(Vec2::new(-3.0, 3.0), &world).is_none());
    }
}
