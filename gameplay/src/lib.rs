//! Player state and the rules for moving it around a `World`.

mod controls;
pub mod player;

pub use controls::Controls;
pub use glam;
pub use log;
pub use player::{BACKWARDS, FORWARDS, MovementConfig, Player, Rotation};
