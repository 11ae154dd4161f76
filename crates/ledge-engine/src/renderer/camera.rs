use glam::{IVec2, Vec2};

use crate::api::types::TileRect;
use crate::components::spatial::WorldBox;

/// The visible part of the map.
///
/// `offset` is the map tile shown at the top-left corner of the viewport.
/// It never leaves the map: `0 <= offset <= map_size - viewport_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCamera {
    pub offset: Vec2,
    /// Visible area in tiles.
    pub viewport: Vec2,
    /// Map extents in tiles.
    pub bounds: Vec2,
    pub tile_size_px: i32,
}

impl ScrollCamera {
    pub fn new(viewport: IVec2, bounds: IVec2, tile_size_px: i32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: viewport.as_vec2(),
            bounds: bounds.as_vec2(),
            tile_size_px,
        }
    }

    /// Move the camera, keeping the viewport inside the map.
    pub fn scroll_to(&mut self, offset: Vec2) {
        let max = (self.bounds - self.viewport).max(Vec2::ZERO);
        self.offset = offset.clamp(Vec2::ZERO, max);
    }

    /// Scroll the least amount that puts `target` between the dead-zone
    /// lines. `dead_zone_min` and `dead_zone_max` are viewport-relative tiles.
    pub fn keep_in_dead_zone(&mut self, target: &WorldBox, dead_zone_min: Vec2, dead_zone_max: Vec2) {
        let mut offset = self.offset;

        let left = target.min_x() - offset.x;
        let right = target.max_x() - offset.x;
        if left < dead_zone_min.x {
            offset.x -= dead_zone_min.x - left;
        } else if right > dead_zone_max.x {
            offset.x += right - dead_zone_max.x;
        }

        let top = target.min_y() - offset.y;
        let bottom = target.max_y() - offset.y;
        if top < dead_zone_min.y {
            offset.y -= dead_zone_min.y - top;
        } else if bottom > dead_zone_max.y {
            offset.y += bottom - dead_zone_max.y;
        }

        self.scroll_to(offset);
    }

    /// Map position in tiles to a pixel in the viewport.
    pub fn to_screen(&self, world: Vec2) -> IVec2 {
        ((world - self.offset) * self.tile_size_px as f32).round().as_ivec2()
    }

    /// Scroll offset in whole pixels.
    pub fn offset_px(&self) -> IVec2 {
        (self.offset * self.tile_size_px as f32).round().as_ivec2()
    }

    /// Tiles at least partly visible, clipped to the map.
    pub fn visible_tiles(&self) -> TileRect {
        let first = self.offset.floor().as_ivec2().max(IVec2::ZERO);
        let last = (self.offset + self.viewport).ceil().as_ivec2().min(self.bounds.as_ivec2());
        let size = (last - first).max(IVec2::ZERO);
        TileRect::new(first.x, first.y, size.x, size.y)
    }

    pub fn is_rect_visible(&self, rect: &WorldBox) -> bool {
        rect.max_x() > self.offset.x
            && rect.min_x() < self.offset.x + self.viewport.x
            && rect.max_y() > self.offset.y
            && rect.min_y() < self.offset.y + self.viewport.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::spatial::{BoundingBox, WorldPosition};

    fn camera() -> ScrollCamera {
        ScrollCamera::new(IVec2::new(32, 20), IVec2::new(100, 50), 8)
    }

    fn player_at(x: f32, y: f32) -> WorldBox {
        BoundingBox::sized(3.0, 5.0).to_world(&WorldPosition::new(x, y))
    }

    #[test]
    fn scroll_is_clamped_to_map() {
        let mut cam = camera();
        cam.scroll_to(Vec2::new(-5.0, 400.0));
        assert_eq!(cam.offset, Vec2::new(0.0, 30.0));
        cam.scroll_to(Vec2::new(90.0, 10.0));
        assert_eq!(cam.offset, Vec2::new(68.0, 10.0));
    }

    #[test]
    fn small_map_never_scrolls() {
        let mut cam = ScrollCamera::new(IVec2::new(32, 20), IVec2::new(10, 10), 8);
        cam.scroll_to(Vec2::new(3.0, 3.0));
        assert_eq!(cam.offset, Vec2::ZERO);
    }

    #[test]
    fn dead_zone_follows_player_right() {
        let mut cam = camera();
        cam.keep_in_dead_zone(&player_at(30.0, 5.0), Vec2::new(11.0, 7.0), Vec2::new(21.0, 14.0));
        assert_eq!(cam.offset.x, 12.0);
        assert_eq!(cam.offset.y, 0.0);
    }

    #[test]
    fn player_inside_dead_zone_does_not_scroll() {
        let mut cam = camera();
        cam.scroll_to(Vec2::new(10.0, 5.0));
        cam.keep_in_dead_zone(&player_at(25.0, 14.0), Vec2::new(11.0, 7.0), Vec2::new(21.0, 14.0));
        assert_eq!(cam.offset, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn screen_mapping_and_visibility() {
        let mut cam = camera();
        cam.scroll_to(Vec2::new(10.0, 0.0));
        assert_eq!(cam.to_screen(Vec2::new(12.0, 1.5)), IVec2::new(16, 12));
        assert_eq!(cam.offset_px(), IVec2::new(80, 0));
        assert!(cam.is_rect_visible(&player_at(40.0, 3.0)));
        assert!(!cam.is_rect_visible(&player_at(50.0, 3.0)));
        assert_eq!(cam.visible_tiles(), TileRect::new(10, 0, 32, 20));
    }
}
