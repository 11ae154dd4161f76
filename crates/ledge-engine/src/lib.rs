pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod modes;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Context, Difficulty, GameConfig, GameMode};
pub use api::services::{RecordingServices, ServiceCall, ServiceProvider};
pub use api::types::{Color, Entity, PixelRect, SoundId, TileRect, TimeDelta};
pub use assets::loader::{Image, JsonLevelLoader, LevelLoader, LoadError};
pub use assets::manifest::LevelManifest;
pub use components::layer::RenderLayer;
pub use components::sprite::{Sprite, SpriteSheetId};
pub use core::map::{Map, SolidEdge, SolidEdges, TileAttributes};
pub use core::player_model::{PlayerModel, Weapon};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue, Key};
pub use modes::{GameRunner, IngameMode};
pub use renderer::camera::ScrollCamera;
pub use renderer::recording::RecordingRenderer;
pub use renderer::traits::Renderer;
