//! Fragments that decide who can hurt whom.
//!
//! Damage to the player and damage dealt by the player go through two
//! separate passes, so these stay plain data.

use crate::core::player_model::Weapon;

/// The entity hurts the player on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamaging {
    pub damage: i32,
}

impl Default for PlayerDamaging {
    fn default() -> Self {
        Self { damage: 1 }
    }
}

/// The entity damages `Shootable`s it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageInflicting {
    pub damage: i32,
    /// Despawn after the first hit.
    pub destroy_on_contact: bool,
}

/// The entity can be damaged and destroyed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shootable {
    pub health: i32,
    /// Score the player receives when this is destroyed.
    pub given_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileType {
    Normal,
    Laser,
    Rocket,
}

impl ProjectileType {
    pub fn for_weapon(weapon: Weapon) -> Self {
        match weapon {
            Weapon::Normal => ProjectileType::Normal,
            Weapon::Laser => ProjectileType::Laser,
            Weapon::Rocket => ProjectileType::Rocket,
        }
    }

    pub fn damage(self) -> i32 {
        match self {
            ProjectileType::Normal => 1,
            ProjectileType::Laser => 2,
            ProjectileType::Rocket => 8,
        }
    }

    /// Lasers go through their targets.
    pub fn passes_through(self) -> bool {
        self == ProjectileType::Laser
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileDirection {
    Left,
    Right,
    Up,
}

/// A shot fired by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub kind: ProjectileType,
    pub direction: ProjectileDirection,
}
