//! The main loop driver. Each pass polls input, steps the world and player by
//! the real frame time, then draws the view and overlays and presents.

use std::error::Error;

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use gameplay::{
    Player,
    glam::Vec2,
    log::{debug, info},
};
use input::Input;
use render_soft::{ScreenGeometry, SoftwareRenderer, draw_automap, draw_hud_sprite};
use render_target::RenderTarget;
use render_trait::{BufferSize, Colour, DrawTarget, FRect, PlayViewRenderer};
use world::{TextureInfo, World};

use crate::{config::UserConfig, timestep::TimeStep};

const CLEAR_COLOUR: Colour = [0, 0, 0, 255];
const HUD_SPRITE_SIZE: Vec2 = Vec2::new(400.0, 300.0);
const AUTOMAP_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
/// Share of the screen the automap may cover on each axis
const AUTOMAP_FRACTION: f32 = 0.4;

/// Everything the loop owns
pub struct Session {
    pub world: World,
    pub player: Player,
    pub renderer: SoftwareRenderer,
    pub target: RenderTarget,
    pub input: Input,
    pub hud_sprite: Option<TextureInfo>,
    pub show_automap: bool,
}

/// The whole window is the 3D view
pub fn view_geometry(size: &BufferSize, config: &UserConfig) -> ScreenGeometry {
    ScreenGeometry::new(
        FRect::new(0.0, 0.0, size.width_f32(), size.height_f32()),
        config.fov,
        config.fov_step,
        config.cell_size,
    )
}

/// Pixels per world unit so the map fits in its corner of the screen
fn automap_scale(size: &BufferSize, world: &World) -> f32 {
    let (w, h) = world.extent();
    if w <= 0.0 || h <= 0.0 {
        return 1.0;
    }
    let sx = size.width_f32() * AUTOMAP_FRACTION / w;
    let sy = size.height_f32() * AUTOMAP_FRACTION / h;
    sx.min(sy)
}

/// Runs until the window is closed or the quit key pressed
pub fn d_raycast_loop(mut session: Session, config: &UserConfig) -> Result<(), Box<dyn Error>> {
    let mut timestep = TimeStep::new();
    let automap_key = session.input.config.key_automap;

    loop {
        let mut show_automap = session.show_automap;
        session.input.update(|sc| {
            if sc == automap_key {
                show_automap = !show_automap;
                return true;
            }
            false
        });
        session.show_automap = show_automap;
        if session.input.get_quit() {
            break;
        }
        if session.input.was_resized() {
            session.target.resize();
            let geometry = view_geometry(session.target.size(), config);
            session.renderer.set_geometry(geometry);
        }

        let dt = timestep.delta();
        session.world.objects.advance_animations(dt);
        let controls = session.input.controls();
        session.player.think(&controls, dt, &session.world);

        draw_frame(&mut session);

        if let Some(fps) = timestep.frame_rate() {
            info!("{}", fps);
            debug!(
                "Player at {:?} facing {:.1}",
                session.player.pos,
                session.player.angle.deg()
            );
        }
    }

    info!("Quitting");
    #[cfg(feature = "hprof")]
    coarse_prof::write(&mut std::io::stdout())?;
    Ok(())
}

fn draw_frame(session: &mut Session) {
    #[cfg(feature = "hprof")]
    profile!("draw_frame");
    let Session {
        world,
        player,
        renderer,
        target,
        hud_sprite,
        show_automap,
        ..
    } = session;

    target.clear(&CLEAR_COLOUR);
    renderer.render_player_view(player, world, target);
    if let Some(hud) = hud_sprite {
        draw_hud_sprite(*hud, HUD_SPRITE_SIZE, target);
    }
    if *show_automap {
        let scale = automap_scale(target.size(), world);
        draw_automap(player, world, AUTOMAP_ORIGIN, scale, target);
    }
    target.present();
}
