//! Deferred cross-system effects.
//!
//! Logic systems push commands while they iterate the scene; the in-game
//! mode drains the queue once per frame after every logic pass has run.

use crate::api::types::{Entity, SoundId};
use crate::components::damage::{ProjectileDirection, ProjectileType};
use crate::components::spatial::WorldPosition;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnProjectile {
        kind: ProjectileType,
        position: WorldPosition,
        direction: ProjectileDirection,
    },
    Despawn(Entity),
    PlaySound(SoundId),
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileType,
        position: WorldPosition,
        direction: ProjectileDirection,
    ) {
        self.commands.push(Command::SpawnProjectile {
            kind,
            position,
            direction,
        });
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.commands.push(Command::Despawn(entity));
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.commands.push(Command::PlaySound(sound));
    }

    /// Take all queued commands in push order.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
