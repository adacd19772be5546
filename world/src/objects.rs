//! Things that can occupy a grid cell: their textures, animation and how they
//! block movement.

use log::warn;

use crate::token::{Token, TokenTable};

/// Handle to a texture owned by whatever draws. The world only stores ids.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A texture handle plus the pixel size needed for texel maths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// How an object blocks movement. Built from the 3-bit manifest value:
///
/// | bit | meaning                                           |
/// |-----|---------------------------------------------------|
/// | 0   | blocks when found in the floor grid               |
/// | 1   | blocks when found in the wall grid                |
/// | 2   | "solid", only used together with both of the above |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionMode {
    pub blocks_on_floor: bool,
    pub blocks_on_wall: bool,
}

impl CollisionMode {
    pub const NONE: CollisionMode = CollisionMode {
        blocks_on_floor: false,
        blocks_on_wall: false,
    };

    pub const SOLID: CollisionMode = CollisionMode {
        blocks_on_floor: true,
        blocks_on_wall: true,
    };

    pub const fn from_bits(bits: u8) -> Self {
        Self {
            blocks_on_floor: bits & 0b001 != 0,
            blocks_on_wall: bits & 0b010 != 0,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnimationState {
    pub current_frame: usize,
    /// Seconds each frame is shown for
    pub frame_duration: f32,
    pub elapsed: f32,
}

impl AnimationState {
    pub fn new(frame_duration: f32) -> Self {
        Self {
            current_frame: 0,
            frame_duration,
            elapsed: 0.0,
        }
    }

    /// Step the timer. Wraps to the first frame after `frame_count - 1`.
    pub fn advance(&mut self, dt: f32, frame_count: usize) {
        if frame_count < 2 || self.frame_duration <= 0.0 {
            return;
        }
        self.elapsed += dt;
        if self.elapsed > self.frame_duration {
            self.elapsed = 0.0;
            self.current_frame = if self.current_frame + 1 >= frame_count {
                0
            } else {
                self.current_frame + 1
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub name: String,
    pub frames: Vec<TextureInfo>,
    pub animation: AnimationState,
    pub collision: CollisionMode,
}

impl WorldObject {
    pub fn new(name: &str, frames: Vec<TextureInfo>, collision: CollisionMode) -> Self {
        Self {
            name: name.to_owned(),
            frames,
            animation: AnimationState::default(),
            collision,
        }
    }

    pub fn with_frame_duration(mut self, seconds: f32) -> Self {
        self.animation = AnimationState::new(seconds);
        self
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1 && self.animation.frame_duration > 0.0
    }

    /// Texture for the current animation frame, if there is one
    #[inline]
    pub fn current_texture(&self) -> Option<TextureInfo> {
        self.frames.get(self.animation.current_frame).copied()
    }
}

/// All known objects, indexed directly by `Token`. Owns the `TokenTable` so
/// grids read after the registry share its ids.
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    tokens: TokenTable,
    objects: Vec<Option<WorldObject>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an object, returning its token
    pub fn register(&mut self, object: WorldObject) -> Token {
        let token = self.tokens.intern(&object.name);
        if token.is_empty() {
            warn!(
                "Object name {:?} is the empty token, it can never be drawn",
                object.name
            );
            return token;
        }
        if self.objects.len() <= token.index() {
            self.objects.resize(token.index() + 1, None);
        }
        if self.objects[token.index()].is_some() {
            warn!("Object {:?} registered twice, replacing", object.name);
        }
        self.objects[token.index()] = Some(object);
        token
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    /// Grids are parsed through this so names resolve to the same ids
    pub fn tokens_mut(&mut self) -> &mut TokenTable {
        &mut self.tokens
    }

    #[inline]
    pub fn get(&self, token: Token) -> Option<&WorldObject> {
        self.objects.get(token.index()).and_then(|o| o.as_ref())
    }

    /// Texture resolver. `None` for empty, unknown or texture-less tokens.
    #[inline]
    pub fn current_texture(&self, token: Token) -> Option<TextureInfo> {
        self.get(token).and_then(|o| o.current_texture())
    }

    /// Unknown tokens never block
    #[inline]
    pub fn collision(&self, token: Token) -> CollisionMode {
        self.get(token).map_or(CollisionMode::NONE, |o| o.collision)
    }

    /// Step every animated object's frame timer
    pub fn advance_animations(&mut self, dt: f32) {
        for object in self.objects.iter_mut().flatten().filter(|o| o.is_animated()) {
            let frames = object.frames.len();
            object.animation.advance(dt, frames);
        }
    }

    /// Count of registered objects
    pub fn len(&self) -> usize {
        self.objects.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AnimationState, CollisionMode, ObjectRegistry, TextureId, TextureInfo, WorldObject,
    };
    use crate::token::Token;

    fn tex(id: u32) -> TextureInfo {
        TextureInfo {
            id: TextureId(id),
            width: 64,
            height: 64,
        }
    }

    #[test]
    fn collision_bits() {
        assert_eq!(CollisionMode::from_bits(0b000), CollisionMode::NONE);
        let floor = CollisionMode::from_bits(0b001);
        assert!(floor.blocks_on_floor && !floor.blocks_on_wall);
        let wall = CollisionMode::from_bits(0b010);
        assert!(!wall.blocks_on_floor && wall.blocks_on_wall);
        assert_eq!(CollisionMode::from_bits(0b011), CollisionMode::SOLID);
        assert_eq!(CollisionMode::from_bits(0b111), CollisionMode::SOLID);
    }

    #[test]
    fn animation_wraps_after_last_frame() {
        let mut anim = AnimationState::new(0.1);
        anim.advance(0.05, 3);
        assert_eq!(anim.current_frame, 0);
        anim.advance(0.06, 3);
        assert_eq!(anim.current_frame, 1);
        assert_eq!(anim.elapsed, 0.0);
        anim.advance(0.11, 3);
        assert_eq!(anim.current_frame, 2);
        anim.advance(0.11, 3);
        assert_eq!(anim.current_frame, 0);
    }

    #[test]
    fn single_frame_never_advances() {
        let mut anim = AnimationState::new(0.1);
        anim.advance(10.0, 1);
        assert_eq!(anim.current_frame, 0);
    }

    #[test]
    fn registry_resolves_tokens() {
        let mut reg = ObjectRegistry::new();
        let brick = reg.register(WorldObject::new(
            "brick",
            vec![tex(1)],
            CollisionMode::from_bits(0b010),
        ));
        let bare = reg.register(WorldObject::new("bare", vec![], CollisionMode::NONE));
        let unknown = reg.tokens_mut().intern("ghost");

        assert_eq!(reg.current_texture(brick), Some(tex(1)));
        assert_eq!(reg.current_texture(bare), None);
        assert_eq!(reg.current_texture(unknown), None);
        assert_eq!(reg.current_texture(Token::EMPTY), None);
        assert!(reg.collision(brick).blocks_on_wall);
        assert_eq!(reg.collision(unknown), CollisionMode::NONE);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.tokens().get("brick"), Some(brick));
    }

    #[test]
    fn registry_advances_animated_objects() {
        let mut reg = ObjectRegistry::new();
        let water = reg.register(
            WorldObject::new("water", vec![tex(1), tex(2)], CollisionMode::NONE)
                .with_frame_duration(0.2),
        );
        assert!(reg.get(water).unwrap().is_animated());
        reg.advance_animations(0.25);
        assert_eq!(reg.current_texture(water), Some(tex(2)));
        reg.advance_animations(0.25);
        assert_eq!(reg.current_texture(water), Some(tex(1)));
    }
}
