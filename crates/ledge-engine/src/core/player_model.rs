use serde::{Deserialize, Serialize};

/// Highest health the player can have.
pub const MAX_HEALTH: i32 = 9;

/// Ammo a special weapon comes with when picked up.
pub const MAX_AMMO: i32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    /// Unlimited ammo.
    #[default]
    Normal,
    Laser,
    Rocket,
}

/// Persistent player state: survives entity rebuilds and is restored from a
/// snapshot when the level restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerModel {
    health: i32,
    weapon: Weapon,
    ammo: i32,
    score: i32,
}

impl Default for PlayerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerModel {
    pub fn new() -> Self {
        Self {
            health: MAX_HEALTH,
            weapon: Weapon::Normal,
            ammo: 0,
            score: 0,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Lose health, never below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, MAX_HEALTH);
    }

    /// Gain health, never above `MAX_HEALTH`.
    pub fn give_health(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, MAX_HEALTH);
    }

    pub fn weapon(&self) -> Weapon {
        self.weapon
    }

    pub fn ammo(&self) -> i32 {
        self.ammo
    }

    pub fn switch_weapon(&mut self, weapon: Weapon) {
        self.weapon = weapon;
        self.ammo = if weapon == Weapon::Normal { 0 } else { MAX_AMMO };
    }

    /// True if the current weapon can fire.
    pub fn has_ammo(&self) -> bool {
        self.weapon == Weapon::Normal || self.ammo > 0
    }

    /// Spend one shot. An empty special weapon falls back to the normal one.
    pub fn use_ammo(&mut self) {
        if self.weapon == Weapon::Normal {
            return;
        }
        self.ammo = (self.ammo - 1).max(0);
        if self.ammo == 0 {
            self.switch_weapon(Weapon::Normal);
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn give_score(&mut self, amount: i32) {
        self.score += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_clamped() {
        let mut model = PlayerModel::new();
        model.give_health(5);
        assert_eq!(model.health(), MAX_HEALTH);
        model.take_damage(20);
        assert_eq!(model.health(), 0);
        assert!(model.is_dead());
    }

    #[test]
    fn special_weapon_runs_out() {
        let mut model = PlayerModel::new();
        model.switch_weapon(Weapon::Laser);
        assert_eq!(model.ammo(), MAX_AMMO);
        for _ in 0..MAX_AMMO {
            assert!(model.has_ammo());
            model.use_ammo();
        }
        assert_eq!(model.weapon(), Weapon::Normal);
        assert!(model.has_ammo());
    }

    #[test]
    fn snapshot_restores_everything() {
        let mut model = PlayerModel::new();
        let snapshot = model.clone();
        model.take_damage(3);
        model.give_score(500);
        model.switch_weapon(Weapon::Rocket);

        model = snapshot.clone();
        assert_eq!(model, snapshot);
        assert_eq!(model.health(), MAX_HEALTH);
        assert_eq!(model.weapon(), Weapon::Normal);
    }
}
