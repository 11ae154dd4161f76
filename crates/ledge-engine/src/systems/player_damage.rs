use crate::api::game::{Difficulty, GameConfig};
use crate::api::types::{Entity, SoundId, TimeDelta};
use crate::components::damage::PlayerDamaging;
use crate::components::player::{PlayerControlled, PlayerState};
use crate::components::spatial::{Physical, WorldPosition};
use crate::core::commands::CommandQueue;
use crate::core::player_model::PlayerModel;
use crate::core::scene::Scene;

/// Hurts the player on contact with damaging entities.
///
/// After a hit the player is invulnerable for the mercy time. Damage is
/// scaled by the difficulty; at zero health the player becomes `Dead`.
pub struct PlayerDamageSystem {
    player: Entity,
    damage_multiplier: i32,
    mercy_time: f32,
}

impl PlayerDamageSystem {
    /// Damage taken by `player`, scaled for `difficulty`.
    pub fn new(player: Entity, difficulty: Difficulty, config: &GameConfig) -> Self {
        Self {
            player,
            damage_multiplier: difficulty.damage_multiplier(),
            mercy_time: config.mercy_time,
        }
    }

    /// Hurt the player on contact with a damaging entity, unless in mercy time.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        model: &mut PlayerModel,
        commands: &mut CommandQueue,
        dt: TimeDelta,
    ) {
        let Some(player_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };

        let controlled = scene.component_mut::<PlayerControlled>(self.player);
        if controlled.is_dead() {
            return;
        }
        controlled.mercy_time_left = (controlled.mercy_time_left - dt).max(0.0);
        if controlled.is_invincible() {
            return;
        }

        let mut hit = None;
        scene.each::<PlayerDamaging, WorldPosition>(|entity, damaging, _| {
            if hit.is_some() || entity == self.player {
                return;
            }
            let touching = scene
                .world_box(entity)
                .is_some_and(|b| b.intersects(&player_box));
            if touching {
                hit = Some(damaging.damage);
            }
        });
        let Some(damage) = hit else {
            return;
        };

        model.take_damage(damage * self.damage_multiplier);

        let controlled = scene.component_mut::<PlayerControlled>(self.player);
        if model.is_dead() {
            controlled.state = PlayerState::Dead;
            if let Some(physical) = scene.get_mut::<Physical>(self.player) {
                physical.velocity.x = 0.0;
            }
            commands.play_sound(SoundId::PLAYER_DEATH);
            log::info!("player died");
        } else {
            controlled.mercy_time_left = self.mercy_time;
            commands.play_sound(SoundId::PLAYER_HIT);
        }
    }
}
