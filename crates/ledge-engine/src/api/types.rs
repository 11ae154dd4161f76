use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Seconds elapsed for one update.
pub type TimeDelta = f32;

/// Handle to an entity in the scene.
///
/// Index selects the component slot, generation tells apart handles that
/// reused the same slot after a despawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A sound the game logic asks the service provider to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SoundId(pub u32);

impl SoundId {
    pub const NORMAL_SHOT: SoundId = SoundId(1);
    pub const LASER_SHOT: SoundId = SoundId(2);
    pub const ROCKET_SHOT: SoundId = SoundId(3);
    pub const ITEM_PICKUP: SoundId = SoundId(4);
    pub const HEALTH_PICKUP: SoundId = SoundId(5);
    pub const PLAYER_HIT: SoundId = SoundId(6);
    pub const PLAYER_DEATH: SoundId = SoundId(7);
    pub const ENEMY_DESTROYED: SoundId = SoundId(8);
    pub const JUMP_LANDED: SoundId = SoundId(9);
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
}

/// Axis-aligned rectangle on the tile grid, in whole tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileRect {
    pub top_left: IVec2,
    pub size: IVec2,
}

impl TileRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            top_left: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    /// Last column covered (inclusive).
    pub fn right(&self) -> i32 {
        self.top_left.x + self.size.x - 1
    }

    /// Last row covered (inclusive).
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.size.y - 1
    }

    pub fn translated(&self, offset: IVec2) -> Self {
        Self {
            top_left: self.top_left + offset,
            size: self.size,
        }
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Format a vector as `x, y` with two decimals, each component padded to `width`.
pub fn format_vec2(v: Vec2, width: usize) -> String {
    format!("{:>w$.2}, {:>w$.2}", v.x, v.y, w = width)
}
