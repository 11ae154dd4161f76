use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::Entity;
use crate::core::scene::Scene;
use crate::renderer::camera::ScrollCamera;

/// Scrolls the map so the player stays inside the viewport's dead zone.
pub struct MapScrollSystem {
    player: Entity,
    dead_zone_min: Vec2,
    dead_zone_max: Vec2,
}

impl MapScrollSystem {
    /// Follows `player` with the dead zone from `config`.
    pub fn new(player: Entity, config: &GameConfig) -> Self {
        Self {
            player,
            dead_zone_min: Vec2::new(config.scroll_dead_zone_left, config.scroll_dead_zone_top),
            dead_zone_max: Vec2::new(config.scroll_dead_zone_right, config.scroll_dead_zone_bottom),
        }
    }

    /// Scroll just enough to keep the player inside the dead zone.
    pub fn update(&mut self, scene: &Scene, camera: &mut ScrollCamera) {
        let Some(player_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };
        camera.keep_in_dead_zone(&player_box, self.dead_zone_min, self.dead_zone_max);
    }

    /// Jump straight to the scroll position for the player's current spot.
    /// Used when a level starts so the first frame is already centered.
    pub fn center_on_player(&mut self, scene: &Scene, camera: &mut ScrollCamera) {
        let Some(player_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };
        let center = player_box.top_left + player_box.size / 2.0;
        camera.scroll_to(center - camera.viewport / 2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::spatial::{BoundingBox, WorldPosition};
    use glam::IVec2;

    fn setup(x: f32, y: f32) -> (Scene, Entity, ScrollCamera) {
        let mut scene = Scene::new();
        let player = scene
            .build()
            .with(WorldPosition::new(x, y))
            .with(BoundingBox::sized(3.0, 5.0))
            .id();
        let camera = ScrollCamera::new(IVec2::new(32, 20), IVec2::new(100, 50), 8);
        (scene, player, camera)
    }

    #[test]
    fn follows_player_past_the_dead_zone() {
        let (scene, player, mut camera) = setup(30.0, 5.0);
        MapScrollSystem::new(player, &GameConfig::default()).update(&scene, &mut camera);
        assert_eq!(camera.offset, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn stays_clamped_at_the_map_edge() {
        let (scene, player, mut camera) = setup(97.0, 45.0);
        MapScrollSystem::new(player, &GameConfig::default()).update(&scene, &mut camera);
        assert_eq!(camera.offset, Vec2::new(68.0, 30.0));
    }

    #[test]
    fn centering_puts_player_mid_screen() {
        let (scene, player, mut camera) = setup(50.0, 25.0);
        MapScrollSystem::new(player, &GameConfig::default()).center_on_player(&scene, &mut camera);
        assert_eq!(camera.offset, Vec2::new(35.5, 17.5));
    }
}
