use gameplay::Player;
use glam::Vec2;
use world::{TextureId, World};

/// channels should match pixel format
pub const PIXEL_CHANNELS: usize = 4;

/// RGBA
pub type Colour = [u8; PIXEL_CHANNELS];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSize {
    width_f32: f32,
    height_f32: f32,
}

impl BufferSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width_f32: width as f32,
            height_f32: height as f32,
        }
    }

    pub const fn width_f32(&self) -> f32 {
        self.width_f32
    }

    pub const fn height_f32(&self) -> f32 {
        self.height_f32
    }
}

/// A float rectangle in screen or texture pixels
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> f32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// The display surface. Everything the renderer draws goes through this, the
/// implementor owns the window and the textures `TextureId`s refer to.
pub trait DrawTarget {
    fn size(&self) -> &BufferSize;

    fn clear(&mut self, colour: &Colour);

    fn fill_rect(&mut self, rect: FRect, colour: &Colour);

    fn outline_rect(&mut self, rect: FRect, colour: &Colour);

    /// Copy the `src` region of a texture in to `dst`, scaling to fit
    fn blit(&mut self, texture: TextureId, src: FRect, dst: FRect);

    fn draw_line(&mut self, from: Vec2, to: Vec2, colour: &Colour);

    /// Show the finished frame
    fn present(&mut self);
}

pub trait PlayViewRenderer {
    /// Cast the view from the player's eye and draw walls and floors
    fn render_player_view(&mut self, player: &Player, world: &World, target: &mut impl DrawTarget);
}

#[cfg(test)]
mod tests {
    use super::{BufferSize, FRect};

    #[test]
    fn buffer_size_as_floats() {
        let size = BufferSize::new(640, 481);
        assert_eq!(size.width_f32(), 640.0);
        assert_eq!(size.height_f32(), 481.0);
    }

    #[test]
    fn rect_edges() {
        let r = FRect::new(1.5, 2.0, 3.0, 0.0);
        assert_eq!(r.right(), 4.5);
        assert_eq!(r.bottom(), 2.0);
        assert!(r.is_empty());
    }
}
