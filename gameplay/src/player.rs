//! The player's box, heading and the movement/collision rules for it.
//!
//! Movement is all or nothing: a candidate position is tested at the four
//! corners of an inflated hit box and if any corner lands in a cell holding a
//! blocking object the player stays put. There is no sliding along walls.

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use glam::Vec2;
use log::trace;
use math::{Angle, world_to_cell};
use serde::{Deserialize, Serialize};
use world::{Grid, ObjectRegistry, World};

use crate::Controls;

/// Degrees turned per unit of rotation speed per second
pub const ROTATION_STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    AntiClockwise = -1,
    Clockwise = 1,
}

impl Rotation {
    #[inline]
    const fn sign(self) -> f32 {
        self as i32 as f32
    }
}

pub const FORWARDS: f32 = 1.0;
pub const BACKWARDS: f32 = -1.0;

/// Tuning for the player, loaded from the user config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// World units per second
    pub speed: f32,
    /// Added to `speed` while sprinting
    pub sprint_bonus: f32,
    /// Multiplier on `ROTATION_STEP`
    pub rotation_speed: f32,
    /// Scales the unit heading vector in to the motion vector
    pub motion_multiplier: f32,
    /// How far past the box the collision corners sit
    pub interaction_margin: f32,
    /// Side length of the square collision box
    pub size: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 120.0,
            sprint_bonus: 100.0,
            rotation_speed: 120.0,
            motion_multiplier: 1.0,
            interaction_margin: 4.0,
            size: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left of the collision box
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: Angle,
    /// Heading vector scaled by `motion_multiplier`
    pub motion: Vec2,
    pub config: MovementConfig,
}

impl Player {
    pub fn new(pos: Vec2, angle: f32, config: MovementConfig) -> Self {
        let mut player = Self {
            pos,
            size: Vec2::splat(config.size),
            angle: Angle::new(angle),
            motion: Vec2::ZERO,
            config,
        };
        player.update_motion();
        player
    }

    /// Ray origin, the middle of the box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    fn update_motion(&mut self) {
        self.motion = self.angle.unit() * self.config.motion_multiplier;
    }

    pub fn rotate(&mut self, rotation: Rotation, dt: f32) {
        self.angle += rotation.sign() * ROTATION_STEP * self.config.rotation_speed * dt;
        self.update_motion();
    }

    /// Move along the heading if nothing blocks the destination. Returns true
    /// if the player moved.
    pub fn try_move(&mut self, direction: f32, sprinting: bool, dt: f32, world: &World) -> bool {
        let speed = self.config.speed
            + if sprinting {
                self.config.sprint_bonus
            } else {
                0.0
            };
        let candidate = self.pos + direction * self.motion * speed * dt;

        if self.blocked_at(candidate, world) {
            trace!("Move to {candidate} blocked");
            return false;
        }
        self.pos = candidate;
        true
    }

    /// The four corners of the box at `pos`, pushed out by the margin
    pub fn hit_box(&self, pos: Vec2) -> [Vec2; 4] {
        let m = self.config.interaction_margin;
        let tl = pos - Vec2::splat(m);
        let br = pos + self.size + Vec2::splat(m);
        [
            tl,
            Vec2::new(br.x, tl.y),
            Vec2::new(tl.x, br.y),
            br,
        ]
    }

    fn blocked_at(&self, pos: Vec2, world: &World) -> bool {
        self.hit_box(pos).iter().any(|corner| {
            let cell = world_to_cell(*corner, world.cell_size);
            blocks(&world.walls, &world.objects, cell, |c| c.blocks_on_wall)
                || blocks(&world.floors, &world.objects, cell, |c| c.blocks_on_floor)
        })
    }

    /// Apply one frame of input
    pub fn think(&mut self, controls: &Controls, dt: f32, world: &World) {
        #[cfg(feature = "hprof")]
        profile!("player_think");
        if controls.is_idle() {
            return;
        }
        if controls.turn_left {
            self.rotate(Rotation::AntiClockwise, dt);
        }
        if controls.turn_right {
            self.rotate(Rotation::Clockwise, dt);
        }
        if controls.forward {
            self.try_move(FORWARDS, controls.sprint, dt, world);
        }
        if controls.backward {
            self.try_move(BACKWARDS, controls.sprint, dt, world);
        }
    }
}

#[inline]
fn blocks(
    grid: &Grid,
    objects: &ObjectRegistry,
    cell: glam::IVec2,
    flag: impl Fn(world::CollisionMode) -> bool,
) -> bool {
    let token = grid.cell_at(cell);
    !token.is_empty() && flag(objects.collision(token))
}
