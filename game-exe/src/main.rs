//! Raycaster binary: logging, user config, SDL2 setup, asset loading and then
//! the frame loop.

mod cli;
mod config;
mod d_main;
mod timestep;

use cli::*;
use gameplay::glam::Vec2;
use gameplay::{Player, log};
use input::Input;
use mimalloc::MiMalloc;
use render_soft::SoftwareRenderer;
use render_target::RenderTarget;
use render_trait::DrawTarget;
use sdl2::image::InitFlag;
use simplelog::TermLogger;
use std::error::Error;
use std::path::Path;
use world::{ObjectManifest, TextureInfo, World};

use d_main::{Session, d_raycast_loop, view_geometry};

use crate::config::UserConfig;
use crate::log::{info, warn};

const BASE_DIR: &str = "raycaster/";

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// The main `game-exe` crate should take care of initialising a few things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(log::LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    let sdl_ctx = sdl2::init()?;
    info!("Init SDL2 main");
    let video_ctx = sdl_ctx.video()?;
    info!("Init SDL2 video");
    let _image_ctx = sdl2::image::init(InitFlag::PNG | InitFlag::JPG)?;
    info!("Init SDL2 image");
    // Texel lookups are exact, no filtering
    sdl2::hint::set("SDL_RENDER_SCALE_QUALITY", "0");

    let num_disp = video_ctx.num_video_displays()?;
    for n in 0..num_disp {
        info!("Found display {:?}", video_ctx.display_name(n)?);
    }

    let mut builder = video_ctx.window("Raycaster", user_config.width, user_config.height);
    builder.position_centered().resizable();
    if user_config.fullscreen {
        builder.fullscreen_desktop();
    }
    let window = builder.build()?;
    let canvas = window.into_canvas().accelerated().present_vsync().build()?;
    let mut target = RenderTarget::new(canvas);

    let manifest = ObjectManifest::load(Path::new(&user_config.manifest))?;
    let objects = target.load_objects(&manifest)?;
    let world = World::load(Path::new(&user_config.level), objects, user_config.cell_size)?;
    let hud_sprite = load_hud_sprite(&mut target, &user_config.hud_sprite);

    let player = Player::new(
        Vec2::new(user_config.start_x, user_config.start_y),
        user_config.start_angle,
        user_config.movement,
    );
    let renderer = SoftwareRenderer::new(view_geometry(target.size(), &user_config));
    let input = Input::new(sdl_ctx.event_pump()?, (&user_config.input).into());

    let session = Session {
        world,
        player,
        renderer,
        target,
        input,
        hud_sprite,
        show_automap: options.automap,
    };
    d_raycast_loop(session, &user_config)?;
    Ok(())
}

/// The overlay is optional, a bad path only costs the overlay
fn load_hud_sprite(target: &mut RenderTarget, path: &str) -> Option<TextureInfo> {
    if path.is_empty() {
        return None;
    }
    match target.load_texture(Path::new(path)) {
        Ok(info) => Some(info),
        Err(e) => {
            warn!("HUD sprite not loaded: {e}");
            None
        }
    }
}
