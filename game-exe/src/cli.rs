use argh::FromArgs;
use gameplay::log;

/// CLI options for the raycaster
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// directory holding the level's w.csv and f.csv
    #[argh(option)]
    pub level: Option<String>,
    /// path to the RON object manifest
    #[argh(option)]
    pub manifest: Option<String>,
    /// resolution width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// resolution height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// fullscreen?
    #[argh(option)]
    pub fullscreen: Option<bool>,
    /// horizontal field of view in degrees
    #[argh(option)]
    pub fov: Option<f32>,
    /// start with the automap shown
    #[argh(switch)]
    pub automap: bool,
}
