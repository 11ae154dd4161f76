//! Player movement state machine.
//!
//! Runs before physics: it turns the held-down keys into a player state and
//! a velocity, and physics then moves the player against the map.

use crate::api::game::GameConfig;
use crate::api::types::{Entity, TimeDelta};
use crate::components::player::{Orientation, PlayerControlled, PlayerState};
use crate::components::spatial::{Physical, WorldBox};
use crate::core::map::Map;
use crate::core::physics::on_solid_ground;
use crate::core::scene::Scene;
use crate::input::queue::PlayerInput;

pub struct PlayerMovementSystem {
    player: Entity,
    input: PlayerInput,
    jump_was_held: bool,
    walk_speed: f32,
    climb_speed: f32,
    jump_speed: f32,
}

impl PlayerMovementSystem {
    /// Movement for `player`, with speeds from `config`.
    pub fn new(player: Entity, config: &GameConfig) -> Self {
        Self {
            player,
            input: PlayerInput::default(),
            jump_was_held: false,
            walk_speed: config.walk_speed,
            climb_speed: config.climb_speed,
            jump_speed: config.jump_speed,
        }
    }

    /// Input for the next `update`.
    pub fn set_input_state(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Advance the player state machine and set its velocity.
    pub fn update(&mut self, scene: &mut Scene, map: &Map, _dt: TimeDelta) {
        let jump_pressed = self.input.jumping && !self.jump_was_held;
        self.jump_was_held = self.input.jumping;

        let Some(world_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };
        let grounded = on_solid_ground(map, &world_box);
        let on_ladder = touches_ladder(map, &world_box);

        let input = self.input;
        let controlled = scene.players.get_mut(self.player);
        let physical = scene.physicals.get_mut(self.player);
        let (Some(controlled), Some(physical)) = (controlled, physical) else {
            panic!("{:?} is not a controllable physical entity", self.player);
        };

        if controlled.is_dead() {
            physical.velocity.x = 0.0;
            return;
        }

        let horizontal = input.horizontal();
        if horizontal < 0 {
            controlled.orientation = Orientation::Left;
        } else if horizontal > 0 {
            controlled.orientation = Orientation::Right;
        }

        if controlled.state == PlayerState::ClimbingLadder {
            self.update_climbing(controlled, physical, on_ladder, jump_pressed);
            return;
        }

        let wants_ladder = input.moving_up || (input.moving_down && !grounded);
        if on_ladder && wants_ladder {
            controlled.state = PlayerState::ClimbingLadder;
            physical.gravity_affected = false;
            physical.velocity = glam::Vec2::ZERO;
            return;
        }

        physical.gravity_affected = true;

        if grounded {
            if jump_pressed {
                physical.velocity.x = horizontal as f32 * self.walk_speed;
                physical.velocity.y = -self.jump_speed;
                controlled.state = PlayerState::Jumping;
            } else if input.moving_down {
                physical.velocity.x = 0.0;
                controlled.state = PlayerState::Crouching;
            } else if input.moving_up && horizontal == 0 {
                physical.velocity.x = 0.0;
                controlled.state = PlayerState::LookingUp;
            } else if horizontal != 0 {
                physical.velocity.x = horizontal as f32 * self.walk_speed;
                controlled.state = PlayerState::Walking;
            } else {
                physical.velocity.x = 0.0;
                controlled.state = PlayerState::Standing;
            }
        } else {
            physical.velocity.x = horizontal as f32 * self.walk_speed;
            controlled.state = if physical.velocity.y < 0.0 {
                PlayerState::Jumping
            } else {
                PlayerState::Falling
            };
        }
    }

    fn update_climbing(
        &self,
        controlled: &mut PlayerControlled,
        physical: &mut Physical,
        on_ladder: bool,
        jump_pressed: bool,
    ) {
        if !on_ladder || jump_pressed {
            physical.gravity_affected = true;
            if jump_pressed {
                physical.velocity.y = -self.jump_speed;
                controlled.state = PlayerState::Jumping;
            } else {
                controlled.state = PlayerState::Falling;
            }
            return;
        }

        let vertical = self.input.moving_down as i32 - self.input.moving_up as i32;
        physical.velocity.x = 0.0;
        physical.velocity.y = vertical as f32 * self.climb_speed;
    }
}

/// Whether the column under the middle of the box holds a ladder tile.
fn touches_ladder(map: &Map, world_box: &WorldBox) -> bool {
    let column = (world_box.min_x() + world_box.size.x / 2.0).floor() as i32;
    world_box
        .rows()
        .any(|row| map.in_bounds(column, row) && map.attributes(column, row).ladder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::spatial::{BoundingBox, WorldPosition};
    use crate::core::map::{SolidEdges, TileAttributeDict, TileAttributes, TileProperties};
    use glam::Vec2;

    const FLOOR: u16 = 1;
    const LADDER: u16 = 2;

    fn map() -> Map {
        let dict = TileAttributeDict::new(vec![
            TileProperties::default(),
            TileProperties {
                solid_edges: SolidEdges::ALL,
                ..Default::default()
            },
            TileProperties {
                attributes: TileAttributes {
                    ladder: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ]);
        let mut map = Map::new(20, 12, dict);
        for x in 0..20 {
            map.set_tile_at(0, x, 10, FLOOR);
        }
        for y in 2..10 {
            map.set_tile_at(0, 15, y, LADDER);
        }
        map
    }

    fn setup(x: f32) -> (Scene, Entity, PlayerMovementSystem) {
        let mut scene = Scene::new();
        let player = scene
            .build()
            .with(WorldPosition::new(x, 5.0))
            .with(BoundingBox::sized(3.0, 5.0))
            .with(Physical::new(Vec2::ZERO, true))
            .with(PlayerControlled::new(Orientation::Right))
            .id();
        let system = PlayerMovementSystem::new(player, &GameConfig::default());
        (scene, player, system)
    }

    fn state(scene: &Scene, player: Entity) -> PlayerState {
        scene.component::<PlayerControlled>(player).state
    }

    #[test]
    fn walking_sets_velocity_and_orientation() {
        let (mut scene, player, mut system) = setup(4.0);
        system.set_input_state(PlayerInput {
            moving_left: true,
            ..Default::default()
        });
        system.update(&mut scene, &map(), 1.0 / 60.0);

        assert_eq!(state(&scene, player), PlayerState::Walking);
        let controlled = scene.component::<PlayerControlled>(player);
        assert_eq!(controlled.orientation, Orientation::Left);
        assert_eq!(scene.component::<Physical>(player).velocity.x, -GameConfig::default().walk_speed);
    }

    #[test]
    fn jump_fires_once_per_press() {
        let (mut scene, player, mut system) = setup(4.0);
        let map = map();
        system.set_input_state(PlayerInput {
            jumping: true,
            ..Default::default()
        });
        system.update(&mut scene, &map, 1.0 / 60.0);
        assert_eq!(state(&scene, player), PlayerState::Jumping);

        // Land again without releasing the key: no second jump.
        scene.component_mut::<Physical>(player).velocity = Vec2::ZERO;
        system.update(&mut scene, &map, 1.0 / 60.0);
        assert_eq!(state(&scene, player), PlayerState::Standing);
    }

    #[test]
    fn no_ground_means_falling() {
        let (mut scene, player, mut system) = setup(4.0);
        scene.component_mut::<WorldPosition>(player).0.y = 1.0;
        system.update(&mut scene, &map(), 1.0 / 60.0);
        assert_eq!(state(&scene, player), PlayerState::Falling);
    }

    #[test]
    fn down_on_ground_crouches() {
        let (mut scene, player, mut system) = setup(4.0);
        system.set_input_state(PlayerInput {
            moving_down: true,
            ..Default::default()
        });
        system.update(&mut scene, &map(), 1.0 / 60.0);
        assert_eq!(state(&scene, player), PlayerState::Crouching);
    }

    #[test]
    fn up_on_ladder_climbs_without_gravity() {
        let (mut scene, player, mut system) = setup(14.0);
        let map = map();
        system.set_input_state(PlayerInput {
            moving_up: true,
            ..Default::default()
        });
        system.update(&mut scene, &map, 1.0 / 60.0);
        assert_eq!(state(&scene, player), PlayerState::ClimbingLadder);
        assert!(!scene.component::<Physical>(player).gravity_affected);

        system.update(&mut scene, &map, 1.0 / 60.0);
        assert!(scene.component::<Physical>(player).velocity.y < 0.0);
    }

    #[test]
    fn dead_player_ignores_input() {
        let (mut scene, player, mut system) = setup(4.0);
        scene.component_mut::<PlayerControlled>(player).state = PlayerState::Dead;
        scene.component_mut::<Physical>(player).velocity.x = 5.0;
        system.set_input_state(PlayerInput {
            moving_right: true,
            jumping: true,
            ..Default::default()
        });
        system.update(&mut scene, &map(), 1.0 / 60.0);

        assert_eq!(state(&scene, player), PlayerState::Dead);
        let physical = scene.component::<Physical>(player);
        assert_eq!(physical.velocity.x, 0.0);
        assert_eq!(physical.velocity.y, 0.0);
    }
}
