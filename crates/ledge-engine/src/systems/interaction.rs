use crate::api::types::{Entity, SoundId};
use crate::components::item::Collectable;
use crate::components::spatial::{BoundingBox, WorldPosition};
use crate::core::commands::CommandQueue;
use crate::core::player_model::PlayerModel;
use crate::core::scene::Scene;

/// Applies collectables the player touches to the player model.
pub struct PlayerInteractionSystem {
    player: Entity,
}

impl PlayerInteractionSystem {
    /// Pickups collected by `player`.
    pub fn new(player: Entity) -> Self {
        Self { player }
    }

    /// Apply and despawn every collectable the player touches.
    pub fn update(&mut self, scene: &Scene, model: &mut PlayerModel, commands: &mut CommandQueue) {
        let Some(player_box) = scene.world_box(self.player) else {
            panic!("{:?} has no position or bounding box", self.player);
        };
        if model.is_dead() {
            return;
        }

        for item in scene.query3::<Collectable, WorldPosition, BoundingBox>() {
            let Some(item_box) = scene.world_box(item) else {
                continue;
            };
            if !item_box.intersects(&player_box) {
                continue;
            }

            let collectable = scene.component::<Collectable>(item);
            if collectable.health > 0 {
                model.give_health(collectable.health);
            }
            if let Some(weapon) = collectable.weapon {
                model.switch_weapon(weapon);
            }
            model.give_score(collectable.score);

            let sound = if collectable.health > 0 {
                SoundId::HEALTH_PICKUP
            } else {
                SoundId::ITEM_PICKUP
            };
            commands.play_sound(sound);
            commands.despawn(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::Command;
    use crate::core::player_model::{Weapon, MAX_AMMO};

    fn setup() -> (Scene, PlayerInteractionSystem) {
        let mut scene = Scene::new();
        let player = scene
            .build()
            .with(WorldPosition::new(4.0, 4.0))
            .with(BoundingBox::sized(3.0, 5.0))
            .id();
        (scene, PlayerInteractionSystem::new(player))
    }

    #[test]
    fn touching_health_heals_and_scores() {
        let (mut scene, mut system) = setup();
        let item = scene
            .build()
            .with(WorldPosition::new(5.0, 6.0))
            .with(BoundingBox::sized(1.0, 1.0))
            .with(Collectable {
                health: 1,
                score: 500,
                weapon: None,
            })
            .id();
        let mut model = PlayerModel::new();
        model.take_damage(3);
        let mut commands = CommandQueue::new();

        system.update(&scene, &mut model, &mut commands);

        assert_eq!(model.health(), 7);
        assert_eq!(model.score(), 500);
        assert_eq!(
            commands.drain(),
            vec![Command::PlaySound(SoundId::HEALTH_PICKUP), Command::Despawn(item)]
        );
    }

    #[test]
    fn weapon_pickup_switches_weapon() {
        let (mut scene, mut system) = setup();
        scene
            .build()
            .with(WorldPosition::new(6.0, 8.0))
            .with(BoundingBox::sized(2.0, 1.0))
            .with(Collectable {
                health: 0,
                score: 2000,
                weapon: Some(Weapon::Rocket),
            });
        let mut model = PlayerModel::new();
        let mut commands = CommandQueue::new();

        system.update(&scene, &mut model, &mut commands);

        assert_eq!(model.weapon(), Weapon::Rocket);
        assert_eq!(model.ammo(), MAX_AMMO);
        assert!(commands.iter().any(|c| *c == Command::PlaySound(SoundId::ITEM_PICKUP)));
    }

    #[test]
    fn distant_items_are_ignored() {
        let (mut scene, mut system) = setup();
        scene
            .build()
            .with(WorldPosition::new(7.0, 4.0))
            .with(BoundingBox::sized(1.0, 1.0))
            .with(Collectable::default());
        let mut model = PlayerModel::new();
        let mut commands = CommandQueue::new();

        system.update(&scene, &mut model, &mut commands);
        assert!(commands.is_empty());
    }
}
