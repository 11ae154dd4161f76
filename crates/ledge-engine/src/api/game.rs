use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::api::services::ServiceProvider;
use crate::api::types::TimeDelta;
use crate::input::queue::InputEvent;
use crate::renderer::traits::Renderer;

/// Game difficulty, chosen when a level is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to damage the player receives.
    pub fn damage_multiplier(self) -> i32 {
        match self {
            Difficulty::Easy | Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Engine and gameplay tuning.
///
/// Distances are in tiles, speeds in tiles per second, times in seconds.
/// Defaults approximate the classic one-tile-per-tick movement at 15 ticks/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Edge length of one tile in pixels.
    pub tile_size_px: i32,
    /// Visible map area in tiles.
    pub viewport_width_tiles: i32,
    pub viewport_height_tiles: i32,
    /// Where the in-game viewport is composited on screen, in pixels.
    pub viewport_offset_px: IVec2,
    /// Player is kept between these viewport columns by the map scroll.
    pub scroll_dead_zone_left: f32,
    pub scroll_dead_zone_right: f32,
    /// Player is kept between these viewport rows by the map scroll.
    pub scroll_dead_zone_top: f32,
    pub scroll_dead_zone_bottom: f32,
    pub walk_speed: f32,
    pub climb_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub normal_shot_speed: f32,
    pub laser_shot_speed: f32,
    pub rocket_speed: f32,
    /// Invulnerability after taking a hit.
    pub mercy_time: f32,
    /// How long the shooting pose is held.
    pub attack_time: f32,
    /// Seconds between two one-tile elevator moves.
    pub elevator_step_interval: f32,
    /// Seconds per walk animation frame.
    pub walk_frame_time: f32,
    /// Seconds per animated-tile tick. Fast tiles change every tick, slow
    /// tiles every other tick.
    pub tile_animation_interval: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            tile_size_px: 8,
            viewport_width_tiles: 32,
            viewport_height_tiles: 20,
            viewport_offset_px: IVec2::new(8, 8),
            scroll_dead_zone_left: 11.0,
            scroll_dead_zone_right: 21.0,
            scroll_dead_zone_top: 7.0,
            scroll_dead_zone_bottom: 14.0,
            walk_speed: 15.0,
            climb_speed: 15.0,
            jump_speed: 36.0,
            gravity: 126.0,
            terminal_velocity: 30.0,
            normal_shot_speed: 30.0,
            laser_shot_speed: 45.0,
            rocket_speed: 30.0,
            mercy_time: 2.0,
            attack_time: 0.2,
            elevator_step_interval: 1.0 / 15.0,
            walk_frame_time: 1.0 / 15.0,
            tile_animation_interval: 1.0 / 15.0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Size of the in-game viewport in pixels.
    pub fn viewport_size_px(&self) -> IVec2 {
        IVec2::new(
            self.viewport_width_tiles * self.tile_size_px,
            self.viewport_height_tiles * self.tile_size_px,
        )
    }
}

/// Collaborators a game mode talks to while running a frame.
pub struct Context<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub services: &'a mut dyn ServiceProvider,
}

/// A top-level mode of the game (menu, in-game, ...).
pub trait GameMode {
    /// Feed one input event from the host's event pump.
    fn handle_event(&mut self, event: &InputEvent);

    /// Advance the mode by `dt` and draw the result.
    fn update_and_render(&mut self, dt: TimeDelta, ctx: &mut Context<'_>);

    /// Whether the mode is done and its owner should move on.
    fn finished(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "walk_speed": 10.0, "tile_size_px": 16 }"#).unwrap();
        assert_eq!(config.walk_speed, 10.0);
        assert_eq!(config.tile_size_px, 16);
        assert_eq!(config.viewport_width_tiles, 32);
        assert_eq!(config.gravity, GameConfig::default().gravity);
    }

    #[test]
    fn viewport_size_in_pixels() {
        let config = GameConfig::default();
        assert_eq!(config.viewport_size_px(), IVec2::new(256, 160));
    }

    #[test]
    fn hard_doubles_damage() {
        assert_eq!(Difficulty::Easy.damage_multiplier(), 1);
        assert_eq!(Difficulty::Hard.damage_multiplier(), 2);
    }
}
