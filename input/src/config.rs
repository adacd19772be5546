use gameplay::log::warn;
use sdl2::keyboard::Scancode;
use serde::{Deserialize, Serialize};

/// Key bindings as stored in the user config, SDL scancode numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub(crate) key_right: i32,
    pub(crate) key_left: i32,
    pub(crate) key_up: i32,
    pub(crate) key_down: i32,
    pub(crate) key_speed: i32,
    pub(crate) key_speed_alt: i32,
    pub(crate) key_automap: i32,
    pub(crate) key_quit: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            key_right: Scancode::Right as i32,
            key_left: Scancode::Left as i32,
            key_up: Scancode::Up as i32,
            key_down: Scancode::Down as i32,
            key_speed: Scancode::LShift as i32,
            key_speed_alt: Scancode::RShift as i32,
            key_automap: Scancode::Tab as i32,
            key_quit: Scancode::Escape as i32,
        }
    }
}

pub struct InputConfigSdl {
    pub(crate) key_right: Scancode,
    pub(crate) key_left: Scancode,
    pub(crate) key_up: Scancode,
    pub(crate) key_down: Scancode,
    pub(crate) key_speed: Scancode,
    pub(crate) key_speed_alt: Scancode,
    pub key_automap: Scancode,
    pub key_quit: Scancode,
}

fn scancode(value: i32, fallback: Scancode, name: &str) -> Scancode {
    Scancode::from_i32(value).unwrap_or_else(|| {
        warn!("Invalid scancode {value} for {name}, using {fallback:?}");
        fallback
    })
}

impl From<&InputConfig> for InputConfigSdl {
    fn from(i: &InputConfig) -> Self {
        Self {
            key_right: scancode(i.key_right, Scancode::Right, "key_right"),
            key_left: scancode(i.key_left, Scancode::Left, "key_left"),
            key_up: scancode(i.key_up, Scancode::Up, "key_up"),
            key_down: scancode(i.key_down, Scancode::Down, "key_down"),
            key_speed: scancode(i.key_speed, Scancode::LShift, "key_speed"),
            key_speed_alt: scancode(i.key_speed_alt, Scancode::RShift, "key_speed_alt"),
            key_automap: scancode(i.key_automap, Scancode::Tab, "key_automap"),
            key_quit: scancode(i.key_quit, Scancode::Escape, "key_quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InputConfig, InputConfigSdl};
    use sdl2::keyboard::Scancode;

    #[test]
    fn bad_scancodes_fall_back() {
        let cfg = InputConfig {
            key_up: -5,
            ..InputConfig::default()
        };
        let sdl = InputConfigSdl::from(&cfg);
        assert_eq!(sdl.key_up, Scancode::Up);
        assert_eq!(sdl.key_automap, Scancode::Tab);
    }
}
