use crate::core::player_model::Weapon;

/// Something the player picks up by touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collectable {
    pub health: i32,
    pub score: i32,
    /// Switches the player to this weapon with a full magazine.
    pub weapon: Option<Weapon>,
}
