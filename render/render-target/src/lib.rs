//! SDL2 canvas as a `DrawTarget`, plus the texture store that `TextureId`s
//! index in to.

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use gameplay::log::{error, info, warn};
use glam::Vec2;
use render_trait::{BufferSize, Colour, DrawTarget, FRect};
use sdl2::{
    image::LoadTexture,
    pixels::Color,
    rect::{Point, Rect},
    render::{Canvas, Texture, TextureCreator},
    video::{Window, WindowContext},
};
use std::path::Path;
use world::{ObjectManifest, ObjectRegistry, TextureId, TextureInfo, WorldError};

/// Pixel edges of a float rect. Each edge is rounded on its own so rects that
/// share an edge in float space share it on screen too.
#[inline]
pub fn snap_rect(rect: FRect) -> Option<Rect> {
    let x0 = rect.x.round() as i32;
    let y0 = rect.y.round() as i32;
    let x1 = rect.right().round() as i32;
    let y1 = rect.bottom().round() as i32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
}

/// Source rects index whole texels, a sliver of a texel still samples it
#[inline]
fn texel_rect(rect: FRect) -> Rect {
    let x0 = rect.x.floor() as i32;
    let y0 = rect.y.floor() as i32;
    let x1 = (rect.right().ceil() as i32).max(x0 + 1);
    let y1 = (rect.bottom().ceil() as i32).max(y0 + 1);
    Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
}

#[inline]
fn sdl_colour(c: &Colour) -> Color {
    Color::RGBA(c[0], c[1], c[2], c[3])
}

pub struct RenderTarget {
    size: BufferSize,
    canvas: Canvas<Window>,
    tex_creator: TextureCreator<WindowContext>,
    textures: Vec<Texture>,
}

impl RenderTarget {
    pub fn new(canvas: Canvas<Window>) -> Self {
        let (w, h) = canvas.output_size().unwrap_or_else(|e| {
            warn!("Could not get canvas size, using window size: {e}");
            canvas.window().size()
        });
        info!("Render target is {w}x{h}");
        let tex_creator = canvas.texture_creator();
        Self {
            size: BufferSize::new(w as usize, h as usize),
            canvas,
            tex_creator,
            textures: Vec::new(),
        }
    }

    /// Decode an image file in to a texture and hand back its id
    pub fn load_texture(&mut self, path: &Path) -> Result<TextureInfo, WorldError> {
        let texture = self
            .tex_creator
            .load_texture(path)
            .map_err(|reason| WorldError::Image {
                path: path.to_path_buf(),
                reason,
            })?;
        let query = texture.query();
        let info = TextureInfo {
            id: TextureId(self.textures.len() as u32),
            width: query.width,
            height: query.height,
        };
        self.textures.push(texture);
        info!(
            "Loaded texture {:?} as {:?}, {}x{}",
            path, info.id, info.width, info.height
        );
        Ok(info)
    }

    /// Load every frame named in the manifest and register the objects
    pub fn load_objects(&mut self, manifest: &ObjectManifest) -> Result<ObjectRegistry, WorldError> {
        let mut registry = ObjectRegistry::new();
        for entry in &manifest.objects {
            let frames = entry
                .frames
                .iter()
                .map(|frame| self.load_texture(&manifest.frame_path(frame)))
                .collect::<Result<Vec<_>, _>>()?;
            if frames.is_empty() {
                warn!("Object {:?} has no frames and will not be drawn", entry.name);
            }
            registry.register(entry.to_object(frames));
        }
        info!("Registered {} objects", registry.len());
        Ok(registry)
    }

    /// Window was resized
    pub fn resize(&mut self) {
        if let Ok((w, h)) = self.canvas.output_size() {
            self.size = BufferSize::new(w as usize, h as usize);
            info!("Render target resized to {w}x{h}");
        }
    }
}

impl DrawTarget for RenderTarget {
    fn size(&self) -> &BufferSize {
        &self.size
    }

    fn clear(&mut self, colour: &Colour) {
        self.canvas.set_draw_color(sdl_colour(colour));
        self.canvas.clear();
    }

    fn fill_rect(&mut self, rect: FRect, colour: &Colour) {
        let Some(rect) = snap_rect(rect) else {
            return;
        };
        self.canvas.set_draw_color(sdl_colour(colour));
        if let Err(e) = self.canvas.fill_rect(rect) {
            error!("fill_rect failed: {e}");
        }
    }

    fn outline_rect(&mut self, rect: FRect, colour: &Colour) {
        let Some(rect) = snap_rect(rect) else {
            return;
        };
        self.canvas.set_draw_color(sdl_colour(colour));
        if let Err(e) = self.canvas.draw_rect(rect) {
            error!("draw_rect failed: {e}");
        }
    }

    #[inline]
    fn blit(&mut self, texture: TextureId, src: FRect, dst: FRect) {
        let Some(tex) = self.textures.get(texture.0 as usize) else {
            return;
        };
        let Some(dst) = snap_rect(dst) else {
            return;
        };
        if let Err(e) = self.canvas.copy(tex, texel_rect(src), dst) {
            error!("blit of {texture:?} failed: {e}");
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, colour: &Colour) {
        self.canvas.set_draw_color(sdl_colour(colour));
        let a = Point::new(from.x.round() as i32, from.y.round() as i32);
        let b = Point::new(to.x.round() as i32, to.y.round() as i32);
        if let Err(e) = self.canvas.draw_line(a, b) {
            error!("draw_line failed: {e}");
        }
    }

    fn present(&mut self) {
        #[cfg(feature = "hprof")]
        profile!("present");
        self.canvas.present();
    }
}

#[cfg(test)]
mod tests {
    use super::{snap_rect, texel_rect};
    use render_trait::FRect;
    use sdl2::rect::Rect;

    #[test]
    fn abutting_rects_share_an_edge() {
        let a = snap_rect(FRect::new(0.0, 0.0, 3.4, 1.0)).unwrap();
        let b = snap_rect(FRect::new(3.4, 0.0, 3.4, 1.0)).unwrap();
        assert_eq!(a.right(), b.left());
        assert_eq!(a, Rect::new(0, 0, 3, 1));
        assert_eq!(b, Rect::new(3, 0, 4, 1));
    }

    #[test]
    fn slivers_vanish() {
        assert!(snap_rect(FRect::new(0.2, 0.0, 0.2, 5.0)).is_none());
    }

    #[test]
    fn texels_always_cover_a_pixel() {
        assert_eq!(texel_rect(FRect::new(5.0, 3.0, 1.0, 1.0)), Rect::new(5, 3, 1, 1));
        assert_eq!(texel_rect(FRect::new(2.0, 24.2, 1.0, 15.3)), Rect::new(2, 24, 1, 16));
        assert_eq!(texel_rect(FRect::new(2.0, 0.5, 1.0, 0.0)), Rect::new(2, 0, 1, 1));
    }
}
