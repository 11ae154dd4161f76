/// One of the eight directions a security camera can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CameraDirection {
    #[default]
    Up = 0,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl CameraDirection {
    pub const ALL: [CameraDirection; 8] = [
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Camera that follows the player with its lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SecurityCamera {
    pub direction: CameraDirection,
    /// Player is within the camera's watch range.
    pub tracking: bool,
}
