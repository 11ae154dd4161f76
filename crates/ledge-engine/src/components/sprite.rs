use crate::components::layer::RenderLayer;

/// Identifies the sprite sheet an entity is drawn from.
/// The rendering backend maps sheets to textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteSheetId(pub u32);

impl SpriteSheetId {
    pub const PLAYER: SpriteSheetId = SpriteSheetId(1);
    pub const PROJECTILES: SpriteSheetId = SpriteSheetId(2);
    pub const SECURITY_CAMERA: SpriteSheetId = SpriteSheetId(3);
    pub const ELEVATOR: SpriteSheetId = SpriteSheetId(4);
    pub const ITEMS: SpriteSheetId = SpriteSheetId(5);
    pub const ENEMIES: SpriteSheetId = SpriteSheetId(6);
    pub const HAZARDS: SpriteSheetId = SpriteSheetId(7);
    pub const LEVEL_EXIT: SpriteSheetId = SpriteSheetId(8);
}

/// Sprite component. Defines how an entity appears visually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub sheet: SpriteSheetId,
    /// Frame index within the sheet.
    pub frame: u32,
    /// Invisible sprites are skipped by the renderer (used for blinking).
    pub visible: bool,
    pub layer: RenderLayer,
}

impl Sprite {
    pub fn new(sheet: SpriteSheetId, frame: u32) -> Self {
        Self {
            sheet,
            frame,
            visible: true,
            layer: RenderLayer::default(),
        }
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(SpriteSheetId::default(), 0)
    }
}
