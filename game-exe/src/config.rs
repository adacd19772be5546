//! User configuration options.

use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use gameplay::MovementConfig;
use gameplay::log::{error, info, warn};
use input::config::InputConfig;
use render_soft::{DEFAULT_FOV, DEFAULT_FOV_STEP};
use serde::{Deserialize, Serialize};
use std::{
    fs::{File, OpenOptions, create_dir_all},
    io::{Read, Seek, Write},
    path::PathBuf,
};
use world::DEFAULT_CELL_SIZE;

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> Option<PathBuf> {
    let Some(mut dir) = config_dir() else {
        error!(target: LOG_TAG, "Couldn't find the user config dir");
        return None;
    };
    dir.push(BASE_DIR);
    if !dir.exists() {
        if let Err(e) = create_dir_all(&dir) {
            error!(target: LOG_TAG, "Couldn't create {:?}: {}", dir, e);
            return None;
        }
    }
    dir.push("user.toml");
    Some(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Degrees
    pub fov: f32,
    /// Degrees between rays, one ray per strip
    pub fov_step: f32,
    pub cell_size: f32,
    /// Directory holding `w.csv` and `f.csv`
    pub level: String,
    pub manifest: String,
    /// Optional overlay image, empty to disable
    pub hud_sprite: String,
    /// Top-left of the player box in world units
    pub start_x: f32,
    pub start_y: f32,
    /// Degrees, 0 faces +x
    pub start_angle: f32,
    pub movement: MovementConfig,
    pub input: InputConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            fov: DEFAULT_FOV,
            fov_step: DEFAULT_FOV_STEP,
            cell_size: DEFAULT_CELL_SIZE,
            level: "assets/level".to_string(),
            manifest: "assets/objects.ron".to_string(),
            hud_sprite: String::new(),
            start_x: DEFAULT_CELL_SIZE * 1.5,
            start_y: DEFAULT_CELL_SIZE * 1.5,
            start_angle: 0.0,
            movement: MovementConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, falling back to the defaults
    /// if it can't
    pub fn load() -> Self {
        let Some(path) = get_cfg_file() else {
            return UserConfig::default();
        };

        let mut file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) => {
                warn!(target: LOG_TAG, "Couldn't open {:?}, {}", path, e);
                return UserConfig::default();
            }
        };
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            }
            match toml::from_str(&buf) {
                Ok(data) => {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                Err(e) => warn!("Could not deserialise {:?} recreating config: {}", path, e),
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        info!("Created default user config file");
        match toml::to_string_pretty(&config) {
            Ok(data) => {
                let res = file
                    .set_len(0)
                    .and_then(|_| file.rewind())
                    .and_then(|_| file.write_all(data.as_bytes()));
                if let Err(e) = res {
                    error!(target: LOG_TAG, "Could not write default config: {}", e);
                }
            }
            Err(e) => error!(target: LOG_TAG, "Could not serialise default config: {}", e),
        }
        config
    }

    pub fn write(&self) {
        let Some(path) = get_cfg_file() else {
            return;
        };
        let data = match toml::to_string_pretty(self) {
            Ok(data) => data,
            Err(e) => {
                error!(target: LOG_TAG, "Serialise config failed: {}", e);
                return;
            }
        };
        match File::create(&path) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(data.as_bytes()) {
                    error!("Could not write config: {}", err);
                } else {
                    info!("Saved user config to {:?}", path);
                }
            }
            Err(e) => error!("Couldn't overwrite {:?}: {}", path, e),
        }
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        match cli.level.clone() {
            Some(level) => {
                if level != self.level {
                    info!("Level changed to: {}", level);
                    self.level = level;
                }
            }
            None => cli.level = Some(self.level.clone()),
        }

        match cli.manifest.clone() {
            Some(manifest) => {
                if manifest != self.manifest {
                    info!("Manifest changed to: {}", manifest);
                    self.manifest = manifest;
                }
            }
            None => cli.manifest = Some(self.manifest.clone()),
        }

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(f) = cli.fullscreen {
            if f != self.fullscreen {
                self.fullscreen = f;
            }
        } else {
            cli.fullscreen = Some(self.fullscreen);
        }

        if let Some(fov) = cli.fov {
            if fov > 0.0 && fov < 180.0 {
                self.fov = fov;
            } else {
                warn!("Ignoring field of view {fov}, must be between 0 and 180");
                cli.fov = Some(self.fov);
            }
        } else {
            cli.fov = Some(self.fov);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UserConfig;
    use crate::CLIOptions;

    fn cli() -> CLIOptions {
        CLIOptions {
            verbose: None,
            level: None,
            manifest: None,
            width: 0,
            height: 0,
            fullscreen: None,
            fov: None,
            automap: false,
        }
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = UserConfig::default();
        let mut options = CLIOptions {
            level: Some("maps/two".to_string()),
            width: 1024,
            fov: Some(90.0),
            ..cli()
        };
        config.sync_cli(&mut options);
        assert_eq!(config.level, "maps/two");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.fov, 90.0);
        assert_eq!(options.height, 600);
        assert_eq!(options.manifest.as_deref(), Some("assets/objects.ron"));
        assert_eq!(options.fullscreen, Some(false));
    }

    #[test]
    fn silly_fov_is_ignored() {
        let mut config = UserConfig::default();
        let mut options = CLIOptions {
            fov: Some(400.0),
            ..cli()
        };
        config.sync_cli(&mut options);
        assert_eq!(config.fov, UserConfig::default().fov);
        assert_eq!(options.fov, Some(config.fov));
    }

    #[test]
    fn partial_files_keep_defaults() {
        let config: UserConfig = toml::from_str("width = 320\n[movement]\nspeed = 50.0\n").unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.movement.speed, 50.0);
        assert_eq!(config.movement.size, 16.0);

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<UserConfig>(&text).unwrap(), config);
    }
}
