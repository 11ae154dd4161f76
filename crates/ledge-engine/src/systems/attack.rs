use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::{Entity, SoundId, TimeDelta};
use crate::components::damage::{ProjectileDirection, ProjectileType};
use crate::components::player::{Orientation, PlayerControlled, PlayerState};
use crate::components::spatial::{BoundingBox, WorldPosition};
use crate::core::commands::CommandQueue;
use crate::core::player_model::{PlayerModel, Weapon};
use crate::core::scene::Scene;
use crate::input::queue::PlayerInput;

/// Fires the player's weapon on each press of the shoot key.
pub struct AttackSystem {
    player: Entity,
    input: PlayerInput,
    shoot_was_held: bool,
    attack_time: f32,
}

impl AttackSystem {
    /// Shooting for `player`, with the attack pose time from `config`.
    pub fn new(player: Entity, config: &GameConfig) -> Self {
        Self {
            player,
            input: PlayerInput::default(),
            shoot_was_held: false,
            attack_time: config.attack_time,
        }
    }

    /// Input for the next `update`.
    pub fn set_input_state(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Fire on a fresh shoot press and queue the projectile.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        model: &mut PlayerModel,
        commands: &mut CommandQueue,
        dt: TimeDelta,
    ) {
        let shoot_pressed = self.input.shooting && !self.shoot_was_held;
        self.shoot_was_held = self.input.shooting;

        let pos = *scene.component::<WorldPosition>(self.player);
        let bbox = *scene.component::<BoundingBox>(self.player);
        let controlled = scene.component_mut::<PlayerControlled>(self.player);
        if controlled.is_dead() {
            return;
        }

        controlled.attack_time_left = (controlled.attack_time_left - dt).max(0.0);

        let can_fire = controlled.state != PlayerState::ClimbingLadder;
        if shoot_pressed && can_fire {
            if !model.has_ammo() {
                log::warn!("{:?} has no ammo left, switching to the default weapon", model.weapon());
                model.switch_weapon(Weapon::Normal);
            }

            let kind = ProjectileType::for_weapon(model.weapon());
            let direction = if controlled.state == PlayerState::LookingUp {
                ProjectileDirection::Up
            } else {
                match controlled.orientation {
                    Orientation::Left => ProjectileDirection::Left,
                    Orientation::Right => ProjectileDirection::Right,
                }
            };

            commands.spawn_projectile(kind, muzzle_position(&pos, &bbox, direction), direction);
            commands.play_sound(shot_sound(kind));
            model.use_ammo();

            if !controlled.state.is_airborne() {
                controlled.attack_time_left = self.attack_time;
            }
        }

        if controlled.attack_time_left > 0.0 && controlled.state == PlayerState::Standing {
            controlled.state = PlayerState::Attacking;
        } else if controlled.attack_time_left <= 0.0 && controlled.state == PlayerState::Attacking {
            controlled.state = PlayerState::Standing;
        }
    }
}

fn shot_sound(kind: ProjectileType) -> SoundId {
    match kind {
        ProjectileType::Normal => SoundId::NORMAL_SHOT,
        ProjectileType::Laser => SoundId::LASER_SHOT,
        ProjectileType::Rocket => SoundId::ROCKET_SHOT,
    }
}

/// Where a shot leaves the player's box.
fn muzzle_position(pos: &WorldPosition, bbox: &BoundingBox, direction: ProjectileDirection) -> WorldPosition {
    let world = bbox.to_world(pos);
    let p = match direction {
        ProjectileDirection::Left => Vec2::new(world.min_x() - 2.0, world.min_y() + 1.0),
        ProjectileDirection::Right => Vec2::new(world.max_x(), world.min_y() + 1.0),
        ProjectileDirection::Up => Vec2::new(world.min_x() + 1.0, world.min_y() - 2.0),
    };
    WorldPosition(p)
}
