//! Turns level actor descriptors and runtime spawn requests into entities.

use glam::Vec2;

use crate::api::game::{Difficulty, GameConfig};
use crate::api::types::{Entity, TileRect};
use crate::components::*;
use crate::core::level::{ActorDescriptor, ActorId};
use crate::core::player_model::Weapon;
use crate::core::scene::Scene;

/// Player bounding box, in tiles.
pub const PLAYER_SIZE: Vec2 = Vec2::new(3.0, 5.0);

/// Elevator platform size used when the level does not assign an area.
const DEFAULT_ELEVATOR_AREA: (i32, i32) = (4, 1);

#[derive(Debug, Clone)]
pub struct EntityFactory {
    difficulty: Difficulty,
    config: GameConfig,
}

impl EntityFactory {
    pub fn new(difficulty: Difficulty, config: GameConfig) -> Self {
        Self { difficulty, config }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Create every actor of a level and return the player entity.
    ///
    /// Panics unless the actor list holds exactly one player.
    pub fn create_entities_for_level(
        &self,
        scene: &mut Scene,
        actors: &[ActorDescriptor],
    ) -> Entity {
        let player_count = actors.iter().filter(|a| a.id.is_player()).count();
        assert_eq!(
            player_count, 1,
            "level must place exactly one player, found {player_count}"
        );

        let mut player = None;
        for actor in actors {
            let entity = self.create_actor(scene, actor);
            if actor.id.is_player() {
                player = Some(entity);
            }
        }

        match player {
            Some(player) => player,
            None => unreachable!("player count was checked above"),
        }
    }

    fn create_actor(&self, scene: &mut Scene, actor: &ActorDescriptor) -> Entity {
        let pos = WorldPosition(actor.position.as_vec2());
        let builder = scene.build().with(pos);

        match actor.id {
            ActorId::PlayerFacingLeft | ActorId::PlayerFacingRight => {
                let orientation = if actor.id == ActorId::PlayerFacingLeft {
                    Orientation::Left
                } else {
                    Orientation::Right
                };
                builder
                    .with(BoundingBox::sized(PLAYER_SIZE.x, PLAYER_SIZE.y))
                    .with(Physical::new(Vec2::ZERO, true))
                    .with(PlayerControlled::new(orientation))
                    .with(Sprite::new(SpriteSheetId::PLAYER, 0))
                    .id()
            }

            ActorId::LevelExit => builder
                .with(Trigger::level_exit())
                .with(Sprite::new(SpriteSheetId::LEVEL_EXIT, 0).with_layer(RenderLayer::BehindMap))
                .id(),

            ActorId::SecurityCamera => builder
                .with(BoundingBox::sized(1.0, 1.0))
                .with(SecurityCamera::default())
                .with(Shootable {
                    health: 1,
                    given_score: 100,
                })
                .with(Sprite::new(SpriteSheetId::SECURITY_CAMERA, 0))
                .id(),

            ActorId::Elevator => {
                let (w, h) = actor
                    .assigned_area
                    .map(|a| (a.x, a.y))
                    .unwrap_or(DEFAULT_ELEVATOR_AREA);
                builder
                    .with(BoundingBox::sized(w as f32, h as f32))
                    .with(MapGeometryLink {
                        linked_section: TileRect::new(actor.position.x, actor.position.y, w, h),
                    })
                    .with(Elevator::default())
                    .with(SolidBody)
                    .with(Sprite::new(SpriteSheetId::ELEVATOR, 0).with_layer(RenderLayer::BehindMap))
                    .id()
            }

            ActorId::Spikes => builder
                .with(BoundingBox::sized(1.0, 1.0))
                .with(PlayerDamaging { damage: 1 })
                .with(Sprite::new(SpriteSheetId::HAZARDS, 0))
                .id(),

            ActorId::Hoverbot => builder
                .with(BoundingBox::sized(2.0, 2.0))
                .with(Physical::new(Vec2::ZERO, true))
                .with(PlayerDamaging { damage: 1 })
                .with(Shootable {
                    health: self.enemy_health(2),
                    given_score: 150,
                })
                .with(Sprite::new(SpriteSheetId::ENEMIES, 0))
                .with(Animated::looping(0, 4, 8.0))
                .id(),

            ActorId::SolidCrate => builder
                .with(BoundingBox::sized(2.0, 2.0))
                .with(SolidBody)
                .with(Shootable {
                    health: 1,
                    given_score: 100,
                })
                .with(Sprite::new(SpriteSheetId::ITEMS, 8))
                .id(),

            ActorId::HealthMolecule => builder
                .with(BoundingBox::sized(1.0, 1.0))
                .with(Collectable {
                    health: 1,
                    score: 500,
                    weapon: None,
                })
                .with(Sprite::new(SpriteSheetId::ITEMS, 0))
                .with(Animated::looping(0, 4, 6.0))
                .id(),

            ActorId::LaserWeapon => builder
                .with(BoundingBox::sized(2.0, 1.0))
                .with(Collectable {
                    health: 0,
                    score: 2000,
                    weapon: Some(Weapon::Laser),
                })
                .with(Sprite::new(SpriteSheetId::ITEMS, 4))
                .id(),

            ActorId::RocketLauncher => builder
                .with(BoundingBox::sized(2.0, 1.0))
                .with(Collectable {
                    health: 0,
                    score: 2000,
                    weapon: Some(Weapon::Rocket),
                })
                .with(Sprite::new(SpriteSheetId::ITEMS, 5))
                .id(),

            ActorId::BonusGlobe => builder
                .with(BoundingBox::sized(1.0, 1.0))
                .with(Collectable {
                    health: 0,
                    score: 500,
                    weapon: None,
                })
                .with(Sprite::new(SpriteSheetId::ITEMS, 6))
                .id(),
        }
    }

    fn enemy_health(&self, base: i32) -> i32 {
        match self.difficulty {
            Difficulty::Hard => base + 1,
            _ => base,
        }
    }

    /// Spawn a shot travelling in `direction`.
    pub fn create_projectile(
        &self,
        scene: &mut Scene,
        kind: ProjectileType,
        position: WorldPosition,
        direction: ProjectileDirection,
    ) -> Entity {
        let speed = match kind {
            ProjectileType::Normal => self.config.normal_shot_speed,
            ProjectileType::Laser => self.config.laser_shot_speed,
            ProjectileType::Rocket => self.config.rocket_speed,
        };
        let (velocity, size) = match direction {
            ProjectileDirection::Left => (Vec2::new(-speed, 0.0), Vec2::new(2.0, 1.0)),
            ProjectileDirection::Right => (Vec2::new(speed, 0.0), Vec2::new(2.0, 1.0)),
            ProjectileDirection::Up => (Vec2::new(0.0, -speed), Vec2::new(1.0, 2.0)),
        };
        let frame = projectile_frame(kind, direction);

        scene
            .build()
            .with(position)
            .with(BoundingBox::sized(size.x, size.y))
            .with(Physical::new(velocity, false))
            .with(DamageInflicting {
                damage: kind.damage(),
                destroy_on_contact: !kind.passes_through(),
            })
            .with(Projectile { kind, direction })
            .with(Sprite::new(SpriteSheetId::PROJECTILES, frame))
            .id()
    }
}

fn projectile_frame(kind: ProjectileType, direction: ProjectileDirection) -> u32 {
    let base = match kind {
        ProjectileType::Normal => 0,
        ProjectileType::Laser => 3,
        ProjectileType::Rocket => 6,
    };
    let offset = match direction {
        ProjectileDirection::Left => 0,
        ProjectileDirection::Right => 1,
        ProjectileDirection::Up => 2,
    };
    base + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> EntityFactory {
        EntityFactory::new(Difficulty::Medium, GameConfig::default())
    }

    #[test]
    fn creates_player_and_actors() {
        let mut scene = Scene::new();
        let actors = vec![
            ActorDescriptor::new(ActorId::LevelExit, 20, 5),
            ActorDescriptor::new(ActorId::PlayerFacingLeft, 4, 3),
            ActorDescriptor::new(ActorId::HealthMolecule, 8, 7),
        ];
        let player = factory().create_entities_for_level(&mut scene, &actors);

        assert_eq!(scene.len(), 3);
        let state = scene.get::<PlayerControlled>(player).unwrap();
        assert_eq!(state.state, PlayerState::Standing);
        assert_eq!(state.orientation, Orientation::Left);
        assert_eq!(scene.get::<WorldPosition>(player).unwrap().0, Vec2::new(4.0, 3.0));
        assert_eq!(scene.query::<Trigger, WorldPosition>().len(), 1);
    }

    #[test]
    #[should_panic]
    fn level_without_player_panics() {
        let mut scene = Scene::new();
        factory().create_entities_for_level(&mut scene, &[ActorDescriptor::new(ActorId::Spikes, 1, 1)]);
    }

    #[test]
    #[should_panic]
    fn level_with_two_players_panics() {
        let mut scene = Scene::new();
        factory().create_entities_for_level(
            &mut scene,
            &[
                ActorDescriptor::new(ActorId::PlayerFacingLeft, 1, 1),
                ActorDescriptor::new(ActorId::PlayerFacingRight, 5, 1),
            ],
        );
    }

    #[test]
    fn elevator_links_its_assigned_area() {
        let mut scene = Scene::new();
        let actors = vec![
            ActorDescriptor::new(ActorId::PlayerFacingRight, 0, 0),
            ActorDescriptor::new(ActorId::Elevator, 6, 10).with_area(3, 1),
        ];
        factory().create_entities_for_level(&mut scene, &actors);

        let elevators = scene.query::<Elevator, MapGeometryLink>();
        assert_eq!(elevators.len(), 1);
        let link = scene.get::<MapGeometryLink>(elevators[0]).unwrap();
        assert_eq!(link.linked_section, TileRect::new(6, 10, 3, 1));
    }

    #[test]
    fn hard_difficulty_toughens_enemies() {
        let mut scene = Scene::new();
        let actors = vec![
            ActorDescriptor::new(ActorId::PlayerFacingRight, 0, 0),
            ActorDescriptor::new(ActorId::Hoverbot, 6, 2),
        ];
        EntityFactory::new(Difficulty::Hard, GameConfig::default())
            .create_entities_for_level(&mut scene, &actors);
        let bot = scene.query::<Shootable, PlayerDamaging>()[0];
        assert_eq!(scene.get::<Shootable>(bot).unwrap().health, 3);
    }

    #[test]
    fn projectile_moves_in_its_direction() {
        let mut scene = Scene::new();
        let shot = factory().create_projectile(
            &mut scene,
            ProjectileType::Laser,
            WorldPosition::new(3.0, 3.0),
            ProjectileDirection::Left,
        );

        let physical = scene.get::<Physical>(shot).unwrap();
        assert!(physical.velocity.x < 0.0);
        assert!(!physical.gravity_affected);
        let inflicting = scene.get::<DamageInflicting>(shot).unwrap();
        assert!(!inflicting.destroy_on_contact);
        assert_eq!(inflicting.damage, 2);
    }
}
