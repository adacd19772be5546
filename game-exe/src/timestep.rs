//! Frame timing. Movement and animation are scaled by the real time between
//! frames, capped so a stall doesn't teleport the player through a wall.

use std::{fmt, time::Instant};

/// Longest step handed to gameplay, in seconds
const MAX_DELTA: f32 = 0.1;

#[derive(Debug)]
pub struct TimeStep {
    last_time: Instant,
    delta_time: f32,
    frame_count: u32,
    frame_time: f32,
}

#[derive(Debug)]
pub struct FrameData {
    pub frames: u32,
    /// Average milliseconds per frame over the last second
    pub frame_ms: f32,
}

impl fmt::Display for FrameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "FrameData (per-second):\n  -  fps: {}\n  -   ms: {:.2}",
            self.frames, self.frame_ms
        ))
    }
}

impl TimeStep {
    pub fn new() -> TimeStep {
        TimeStep {
            last_time: Instant::now(),
            delta_time: 0.0,
            frame_count: 0,
            frame_time: 0.0,
        }
    }

    /// Seconds since the last call, at most `MAX_DELTA`
    pub fn delta(&mut self) -> f32 {
        let current_time = Instant::now();
        let delta = current_time.duration_since(self.last_time).as_secs_f32();
        self.last_time = current_time;
        self.delta_time = delta;
        delta.min(MAX_DELTA)
    }

    /// Call once per frame after `delta`. Returns stats once a second.
    pub fn frame_rate(&mut self) -> Option<FrameData> {
        self.frame_count += 1;
        self.frame_time += self.delta_time;
        if self.frame_time >= 1.0 {
            let data = FrameData {
                frames: self.frame_count,
                frame_ms: self.frame_time * 1000.0 / self.frame_count as f32,
            };
            self.frame_count = 0;
            self.frame_time = 0.0;
            return Some(data);
        }
        None
    }
}

impl Default for TimeStep {
    // shutup clippy!
    fn default() -> Self {
        Self::new()
    }
}
