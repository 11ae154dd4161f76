//! Position, extent and motion fragments.
//!
//! All values are in tile units. A `WorldPosition` is the top-left anchor of
//! an entity; its `BoundingBox` is an offset from that anchor plus a size.

use glam::Vec2;

use crate::core::map::SolidEdges;

/// Entity anchor in tile coordinates (fractional).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPosition(pub Vec2);

impl WorldPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Collision extent of an entity, relative to its `WorldPosition`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub offset: Vec2,
    pub size: Vec2,
}

impl BoundingBox {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// Box of the given size anchored at the entity position.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Place the box in the world.
    pub fn to_world(&self, pos: &WorldPosition) -> WorldBox {
        WorldBox {
            top_left: pos.0 + self.offset,
            size: self.size,
        }
    }
}

/// A bounding box placed in world space.
///
/// `right()` and `bottom()` follow the tile convention: a box at x=9 that is
/// 3 tiles wide has `right() == 11`, the last column it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl WorldBox {
    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    pub fn right(&self) -> f32 {
        self.top_left.x + self.size.x - 1.0
    }

    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.size.y - 1.0
    }

    /// Left edge of the box as a continuous coordinate.
    pub fn min_x(&self) -> f32 {
        self.top_left.x
    }

    /// Right edge of the box as a continuous coordinate.
    pub fn max_x(&self) -> f32 {
        self.top_left.x + self.size.x
    }

    pub fn min_y(&self) -> f32 {
        self.top_left.y
    }

    pub fn max_y(&self) -> f32 {
        self.top_left.y + self.size.y
    }

    /// Open-interval overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &WorldBox) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// Tile columns touched by the box.
    pub fn columns(&self) -> std::ops::RangeInclusive<i32> {
        tile_span(self.min_x(), self.size.x)
    }

    /// Tile rows touched by the box.
    pub fn rows(&self) -> std::ops::RangeInclusive<i32> {
        tile_span(self.min_y(), self.size.y)
    }
}

/// Tiles covered by the interval `[start, start + len)`.
pub(crate) fn tile_span(start: f32, len: f32) -> std::ops::RangeInclusive<i32> {
    let first = start.floor() as i32;
    let last = ((start + len).ceil() as i32 - 1).max(first);
    first..=last
}

/// Velocity and physics policy of a moving entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Physical {
    /// Tiles per second.
    pub velocity: Vec2,
    pub gravity_affected: bool,
    /// Sides that were blocked by map geometry during the last physics step.
    pub contacts: SolidEdges,
}

impl Physical {
    pub fn new(velocity: Vec2, gravity_affected: bool) -> Self {
        Self {
            velocity,
            gravity_affected,
            contacts: SolidEdges::NONE,
        }
    }
}

/// Marks an entity as physically blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolidBody;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_box_uses_inclusive_edges() {
        let bbox = BoundingBox::new(Vec2::new(0.0, -4.0), Vec2::new(3.0, 5.0));
        let world = bbox.to_world(&WorldPosition::new(9.0, 4.0));
        assert_eq!(world.left(), 9.0);
        assert_eq!(world.right(), 11.0);
        assert_eq!(world.top(), 0.0);
        assert_eq!(world.bottom(), 4.0);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = BoundingBox::sized(2.0, 2.0).to_world(&WorldPosition::new(0.0, 0.0));
        let b = BoundingBox::sized(2.0, 2.0).to_world(&WorldPosition::new(2.0, 0.0));
        let c = BoundingBox::sized(2.0, 2.0).to_world(&WorldPosition::new(1.5, 1.5));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
    }

    #[test]
    fn tile_span_handles_fractional_boxes() {
        assert_eq!(tile_span(2.0, 3.0), 2..=4);
        assert_eq!(tile_span(2.5, 3.0), 2..=5);
        assert_eq!(tile_span(-0.5, 1.0), -1..=0);
        assert_eq!(tile_span(4.0, 0.0), 4..=4);
    }
}
