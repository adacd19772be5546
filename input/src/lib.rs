//! All input handling. The output is a `Controls` snapshot taken once per
//! frame, plus one-shot key presses for toggles.
//!
//! Also does config options for controls.

pub mod config;

use std::collections::hash_set::HashSet;

use config::InputConfigSdl;
use gameplay::Controls;
use sdl2::EventPump;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode as Sc;

#[derive(Default, Clone)]
pub struct InputEvents {
    key_state: HashSet<Sc>,
}

impl InputEvents {
    pub fn is_kb_pressed(&self, s: Sc) -> bool {
        self.key_state.contains(&s)
    }

    fn set_kb(&mut self, b: Sc) {
        self.key_state.insert(b);
    }

    fn unset_kb(&mut self, b: Sc) {
        self.key_state.remove(&b);
    }

    pub fn build_controls(&self, cfg: &InputConfigSdl) -> Controls {
        Controls {
            forward: self.is_kb_pressed(cfg.key_up),
            backward: self.is_kb_pressed(cfg.key_down),
            turn_left: self.is_kb_pressed(cfg.key_left),
            turn_right: self.is_kb_pressed(cfg.key_right),
            sprint: self.is_kb_pressed(cfg.key_speed) || self.is_kb_pressed(cfg.key_speed_alt),
        }
    }
}

/// Fetch all input
pub struct Input {
    pump: EventPump,
    pub events: InputEvents,
    pub config: InputConfigSdl,
    quit: bool,
    resized: bool,
}

impl Input {
    pub fn new(mut pump: EventPump, config: InputConfigSdl) -> Input {
        pump.pump_events();
        Input {
            pump,
            events: InputEvents::default(),
            config,
            quit: false,
            resized: false,
        }
    }

    /// Drain the SDL event queue. Held keys stay held until their key-up
    /// arrives, so the results are valid until the next `update`.
    ///
    /// `key_once_callback` is called on key-down only (repeats excluded). If
    /// it returns true the key was consumed and is not recorded as held.
    pub fn update(&mut self, mut key_once_callback: impl FnMut(Sc) -> bool) {
        self.resized = false;
        while let Some(event) = self.pump.poll_event() {
            match event {
                Event::KeyDown {
                    scancode: Some(sc),
                    repeat,
                    ..
                } => {
                    if sc == self.config.key_quit {
                        self.quit = true;
                    }
                    if !repeat && key_once_callback(sc) {
                        self.events.unset_kb(sc);
                    } else {
                        self.events.set_kb(sc);
                    }
                }
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    self.events.unset_kb(sc);
                }
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => self.resized = true,
                Event::Quit { .. } => self.quit = true, // Early out if Quit
                _ => {}
            }
        }
    }

    /// Controls for this frame
    pub fn controls(&self) -> Controls {
        self.events.build_controls(&self.config)
    }

    pub fn get_quit(&self) -> bool {
        self.quit
    }

    /// The window changed size during the last `update`
    pub fn was_resized(&self) -> bool {
        self.resized
    }
}

#[cfg(test)]
mod tests {
    use super::InputEvents;
    use crate::config::{InputConfig, InputConfigSdl};
    use gameplay::Controls;
    use sdl2::keyboard::Scancode as Sc;

    #[test]
    fn held_keys_become_controls() {
        let cfg = InputConfigSdl::from(&InputConfig::default());
        let mut events = InputEvents::default();
        events.set_kb(Sc::Up);
        events.set_kb(Sc::Left);
        events.set_kb(Sc::RShift);
        let c = events.build_controls(&cfg);
        assert!(c.forward && c.turn_left && c.sprint);
        assert!(!c.backward && !c.turn_right);

        events.unset_kb(Sc::Up);
        events.unset_kb(Sc::Left);
        assert!(events.build_controls(&cfg).is_idle());
    }

    #[test]
    fn automap_key_is_not_a_held_control() {
        let cfg = InputConfigSdl::from(&InputConfig::default());
        let mut events = InputEvents::default();
        events.set_kb(cfg.key_automap);
        assert_eq!(events.build_controls(&cfg), Controls::default());
    }
}
