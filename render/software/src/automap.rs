//! Top-down view of the wall grid with the player drawn over it.

use gameplay::Player;
use glam::Vec2;
use render_trait::{Colour, DrawTarget, FRect};
use world::World;

const WALL_COLOUR: Colour = [60, 60, 60, 255];
const EMPTY_COLOUR: Colour = [200, 200, 200, 255];
const PLAYER_COLOUR: Colour = [255, 200, 0, 255];
/// Fraction of a cell left as a gap on each side
const CELL_INSET: f32 = 0.1;
/// World units
const HEADING_LENGTH: f32 = 30.0;

/// Draw the map at `origin` in screen pixels, `scale` pixels per world unit
pub fn draw_automap(
    player: &Player,
    world: &World,
    origin: Vec2,
    scale: f32,
    target: &mut impl DrawTarget,
) {
    let cell = world.cell_size * scale;
    let inset = cell * CELL_INSET;
    for y in 0..world.walls.height() {
        for x in 0..world.walls.width() {
            let colour = if world.walls.cell(x as i32, y as i32).is_empty() {
                &EMPTY_COLOUR
            } else {
                &WALL_COLOUR
            };
            let rect = FRect::new(
                origin.x + x as f32 * cell + inset,
                origin.y + y as f32 * cell + inset,
                cell - inset * 2.0,
                cell - inset * 2.0,
            );
            target.fill_rect(rect, colour);
        }
    }

    let to_screen = |p: Vec2| origin + p * scale;
    let pos = to_screen(player.pos);
    let size = player.size * scale;
    target.outline_rect(FRect::new(pos.x, pos.y, size.x, size.y), &PLAYER_COLOUR);

    let center = player.center();
    let heading = center + player.angle.unit() * HEADING_LENGTH;
    target.draw_line(to_screen(center), to_screen(heading), &PLAYER_COLOUR);
}

/// Held item sprite, centred at the bottom of the screen
pub fn draw_hud_sprite(texture: world::TextureInfo, size: Vec2, target: &mut impl DrawTarget) {
    let screen = *target.size();
    let dst = FRect::new(
        (screen.width_f32() - size.x) / 2.0,
        screen.height_f32() - size.y,
        size.x,
        size.y,
    );
    let src = FRect::new(0.0, 0.0, texture.width as f32, texture.height as f32);
    target.blit(texture.id, src, dst);
}

#[cfg(test)]
mod tests {
    use super::{draw_automap, draw_hud_sprite};
    use crate::tests::{Draw, RecordingTarget};
    use gameplay::{MovementConfig, Player};
    use glam::Vec2;
    use render_trait::FRect;
    use world::{ObjectRegistry, TextureId, TextureInfo, World};

    #[test]
    fn one_rect_per_cell_then_player() {
        let world = World::from_csv("b,b,b\nb,,b\nb,b", "", ObjectRegistry::new(), 10.0);
        let player = Player::new(Vec2::new(12.0, 12.0), 0.0, MovementConfig::default());
        let mut target = RecordingTarget::new(200, 200);
        draw_automap(&player, &world, Vec2::ZERO, 2.0, &mut target);

        let fills: Vec<_> = target
            .draws
            .iter()
            .filter_map(|d| match d {
                Draw::Fill(r, c) => Some((*r, *c)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 9);
        // 20 px cells, 2 px inset
        assert_eq!(fills[0].0, FRect::new(2.0, 2.0, 16.0, 16.0));
        // middle cell and the missing end of the short row are empty
        assert_eq!(fills[4].1, fills[8].1);
        assert_ne!(fills[0].1, fills[4].1);

        assert!(matches!(target.draws[9], Draw::Outline(..)));
        match target.draws[10] {
            Draw::Line(from, to, _) => {
                assert_eq!(from, Vec2::new(40.0, 40.0));
                assert!((to - Vec2::new(100.0, 40.0)).length() < 1e-3);
            }
            ref other => panic!("expected heading line, got {other:?}"),
        }
    }

    #[test]
    fn hud_sprite_sits_bottom_centre() {
        let mut target = RecordingTarget::new(800, 600);
        let tex = TextureInfo {
            id: TextureId(4),
            width: 32,
            height: 24,
        };
        draw_hud_sprite(tex, Vec2::new(400.0, 300.0), &mut target);
        assert_eq!(
            target.draws,
            vec![Draw::Blit(
                TextureId(4),
                FRect::new(0.0, 0.0, 32.0, 24.0),
                FRect::new(200.0, 300.0, 400.0, 300.0)
            )]
        );
    }
}
