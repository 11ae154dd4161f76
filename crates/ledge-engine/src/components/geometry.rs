use crate::api::types::TileRect;

/// Binds an entity to a section of map geometry it moves around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGeometryLink {
    pub linked_section: TileRect,
}

/// Elevator platform the player can ride up and down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Elevator {
    /// Time accumulated towards the next one-tile step.
    pub step_timer: f32,
}
