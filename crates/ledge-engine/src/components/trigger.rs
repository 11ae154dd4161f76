#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    LevelExit,
}

/// Location-based event source, evaluated against the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub kind: TriggerType,
}

impl Trigger {
    pub fn level_exit() -> Self {
        Self {
            kind: TriggerType::LevelExit,
        }
    }
}
