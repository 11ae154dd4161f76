/// Player state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Standing,
    Walking,
    Crouching,
    LookingUp,
    Jumping,
    Falling,
    ClimbingLadder,
    Attacking,
    /// Terminal for the running level instance.
    Dead,
}

impl PlayerState {
    pub fn is_airborne(self) -> bool {
        matches!(self, PlayerState::Jumping | PlayerState::Falling)
    }
}

/// Which way an entity faces horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Left,
    #[default]
    Right,
}

/// Attached to the one entity the player steers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerControlled {
    pub state: PlayerState,
    pub orientation: Orientation,
    /// Remaining invulnerability after a hit, in seconds.
    pub mercy_time_left: f32,
    /// Remaining time in the shooting pose, in seconds.
    pub attack_time_left: f32,
}

impl PlayerControlled {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn is_invincible(&self) -> bool {
        self.mercy_time_left > 0.0
    }
}
