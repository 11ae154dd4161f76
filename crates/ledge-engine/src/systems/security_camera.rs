use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use crate::api::types::Entity;
use crate::components::ai::{CameraDirection, SecurityCamera};
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;

/// Horizontal and vertical distance, in tiles, within which a camera
/// counts as watching the player.
const WATCH_RANGE: Vec2 = Vec2::new(16.0, 10.0);

/// Directions by 45 degree sector, clockwise from "right" (y points down).
const SECTORS: [CameraDirection; 8] = [
    CameraDirection::Right,
    CameraDirection::DownRight,
    CameraDirection::Down,
    CameraDirection::DownLeft,
    CameraDirection::Left,
    CameraDirection::UpLeft,
    CameraDirection::Up,
    CameraDirection::UpRight,
];

/// Turns every security camera towards the player.
pub struct SecurityCameraSystem {
    player: Entity,
}

impl SecurityCameraSystem {
    /// Cameras watching `player`.
    pub fn new(player: Entity) -> Self {
        Self { player }
    }

    /// Turn every camera towards the player.
    pub fn update(&mut self, scene: &mut Scene) {
        let Some(player_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };
        let target = player_box.top_left + player_box.size / 2.0;

        for camera in scene.query1::<SecurityCamera>() {
            let Some(camera_box) = scene.world_box(camera) else {
                continue;
            };
            let delta = target - (camera_box.top_left + camera_box.size / 2.0);
            let direction = direction_towards(delta);
            let tracking = delta.abs().cmple(WATCH_RANGE).all();

            let state = scene.component_mut::<SecurityCamera>(camera);
            state.direction = direction;
            state.tracking = tracking;

            if let Some(sprite) = scene.get_mut::<Sprite>(camera) {
                sprite.frame = direction.index();
            }
        }
    }
}

/// One of eight directions closest to `delta`. A zero delta looks down.
fn direction_towards(delta: Vec2) -> CameraDirection {
    if delta == Vec2::ZERO {
        return CameraDirection::Down;
    }
    let sector = (delta.y.atan2(delta.x) / FRAC_PI_4).round() as i32;
    SECTORS[sector.rem_euclid(8) as usize]
}
