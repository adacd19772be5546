//! Wall strips. One texel column of the hit texture is stretched over each
//! strip, neighbouring strips that would draw the same thing share a blit.

#[cfg(feature = "hprof")]
use coarse_prof::profile;
use render_trait::{DrawTarget, FRect};
use world::TextureInfo;

use crate::batch::{Batcher, Span};
use crate::defs::{Column, ScreenGeometry};
use crate::projection::WallStrip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallKey {
    pub texture: TextureInfo,
    pub texel: u32,
    /// Whole pixel rows of the strip, `bottom` exclusive
    pub top: i32,
    pub bottom: i32,
}

impl WallKey {
    fn new(texture: TextureInfo, texel: u32, strip: &WallStrip) -> Self {
        Self {
            texture,
            texel,
            top: strip.pixel_top(),
            bottom: strip.pixel_bottom(),
        }
    }

    #[inline]
    fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Clip a texture column stretched over `dst` to the viewport rows, cutting
/// the matching part of the source column
pub fn clip_strip(texel: u32, tex_height: u32, dst: FRect, viewport: &FRect) -> Option<(FRect, FRect)> {
    if dst.is_empty() || tex_height == 0 {
        return None;
    }
    let top = dst.y.max(viewport.y);
    let bottom = dst.bottom().min(viewport.bottom());
    if bottom <= top {
        return None;
    }
    let scale = tex_height as f32 / dst.h;
    let src = FRect::new(
        texel as f32,
        (top - dst.y) * scale,
        1.0,
        (bottom - top) * scale,
    );
    Some((src, FRect::new(dst.x, top, dst.w, bottom - top)))
}

/// Draw the wall strip of every column that hit something drawable
pub fn draw_walls(columns: &[Column], geometry: &ScreenGeometry, target: &mut impl DrawTarget) {
    #[cfg(feature = "hprof")]
    profile!("draw_walls");
    let vp = geometry.viewport;
    let strip_w = geometry.strip_width();

    let mut walls = Batcher::new(|span: &Span<WallKey>| {
        let key = &span.key;
        let dst = FRect::new(
            vp.x + span.start as f32 * strip_w,
            key.top as f32,
            span.len as f32 * strip_w,
            key.height() as f32,
        );
        if let Some((src, dst)) = clip_strip(key.texel, key.texture.height, dst, &vp) {
            target.blit(key.texture.id, src, dst);
        }
    });

    for column in columns {
        let (Some(strip), Some((texture, texel))) = (column.strip, column.wall) else {
            continue;
        };
        let key = WallKey::new(texture, texel, &strip);
        walls.extend(key, 0, column.sample as i32, 1);
    }
    walls.finish();
}
