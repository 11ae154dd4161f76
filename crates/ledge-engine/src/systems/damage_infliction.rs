use crate::api::types::SoundId;
use crate::components::damage::{DamageInflicting, Projectile, Shootable};
use crate::components::spatial::{BoundingBox, Physical, WorldPosition};
use crate::core::commands::CommandQueue;
use crate::core::player_model::PlayerModel;
use crate::core::scene::Scene;

/// Applies player shots to shootable entities.
#[derive(Debug, Default)]
pub struct DamageInflictionSystem;

impl DamageInflictionSystem {
    /// Holds no per-level state.
    pub fn new() -> Self {
        Self
    }

    /// Apply damage from inflicting entities to the shootables they touch.
    pub fn update(&mut self, scene: &mut Scene, model: &mut PlayerModel, commands: &mut CommandQueue) {
        let targets = scene.query3::<Shootable, WorldPosition, BoundingBox>();

        for inflictor in scene.query3::<DamageInflicting, WorldPosition, BoundingBox>() {
            let hit_wall = scene.has::<Projectile>(inflictor)
                && scene
                    .get::<Physical>(inflictor)
                    .is_some_and(|p| !p.contacts.is_empty());
            if hit_wall {
                commands.despawn(inflictor);
                continue;
            }

            let Some(inflictor_box) = scene.world_box(inflictor) else {
                continue;
            };
            let damage = *scene.component::<DamageInflicting>(inflictor);

            for &target in &targets {
                if target == inflictor {
                    continue;
                }
                let touching = scene
                    .world_box(target)
                    .is_some_and(|b| b.intersects(&inflictor_box));
                let shootable = scene.component_mut::<Shootable>(target);
                if !touching || shootable.health <= 0 {
                    continue;
                }

                shootable.health -= damage.damage;
                if shootable.health <= 0 {
                    model.give_score(shootable.given_score);
                    commands.play_sound(SoundId::ENEMY_DESTROYED);
                    commands.despawn(target);
                }

                if damage.destroy_on_contact {
                    commands.despawn(inflictor);
                    break;
                }
            }
        }
    }
}
