//! Tile map with per-edge collision data and tile attributes.
//!
//! Tiles are stored in row-major order per layer: index = y * width + x.
//! Layer 0 is the base layer, layer 1 holds decoration and masked tiles.
//! Collision and attribute lookups combine both layers.
//!
//! Lookups outside the grid panic. Check `in_bounds` first.

use serde::{Deserialize, Serialize};

use crate::api::types::TileRect;

/// Index into the tile set. Tile 0 is empty and never drawn.
pub type TileIndex = u16;

/// Number of tile layers in a map.
pub const LAYER_COUNT: usize = 2;

/// One side of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SolidEdge {
    pub const ALL: [SolidEdge; 4] = [
        SolidEdge::Top,
        SolidEdge::Right,
        SolidEdge::Bottom,
        SolidEdge::Left,
    ];
}

/// Set of solid tile edges, one bit per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SolidEdges(u8);

impl SolidEdges {
    pub const NONE: SolidEdges = SolidEdges(0);
    pub const TOP: SolidEdges = SolidEdges(1 << 0);
    pub const RIGHT: SolidEdges = SolidEdges(1 << 1);
    pub const BOTTOM: SolidEdges = SolidEdges(1 << 2);
    pub const LEFT: SolidEdges = SolidEdges(1 << 3);
    pub const ALL: SolidEdges = SolidEdges(0b1111);

    pub fn of(edge: SolidEdge) -> Self {
        match edge {
            SolidEdge::Top => Self::TOP,
            SolidEdge::Right => Self::RIGHT,
            SolidEdge::Bottom => Self::BOTTOM,
            SolidEdge::Left => Self::LEFT,
        }
    }

    pub fn is_solid_on(self, edge: SolidEdge) -> bool {
        self.contains(Self::of(edge))
    }

    pub fn contains(self, other: SolidEdges) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn set(&mut self, edge: SolidEdge, solid: bool) {
        let bit = Self::of(edge).0;
        if solid {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub fn union(self, other: SolidEdges) -> Self {
        SolidEdges(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for SolidEdges {
    type Output = SolidEdges;

    fn bitor(self, rhs: SolidEdges) -> SolidEdges {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for SolidEdges {
    fn bitor_assign(&mut self, rhs: SolidEdges) {
        self.0 |= rhs.0;
    }
}

/// Non-collision properties of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TileAttributes {
    pub climbable: bool,
    pub ladder: bool,
    pub flammable: bool,
    /// Drawn in front of sprites.
    pub foreground: bool,
    /// Cycles through the next three tile indices.
    pub animated: bool,
    /// Animation advances every frame instead of every other.
    pub fast_animation: bool,
}

impl TileAttributes {
    pub fn union(self, other: TileAttributes) -> Self {
        Self {
            climbable: self.climbable || other.climbable,
            ladder: self.ladder || other.ladder,
            flammable: self.flammable || other.flammable,
            foreground: self.foreground || other.foreground,
            animated: self.animated || other.animated,
            fast_animation: self.fast_animation || other.fast_animation,
        }
    }
}

/// Collision edges and attributes for one tile index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileProperties {
    pub solid_edges: SolidEdges,
    pub attributes: TileAttributes,
}

/// Properties for every tile index of a tile set.
/// Indices past the end read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileAttributeDict {
    entries: Vec<TileProperties>,
}

impl TileAttributeDict {
    pub fn new(entries: Vec<TileProperties>) -> Self {
        Self { entries }
    }

    pub fn properties(&self, index: TileIndex) -> TileProperties {
        self.entries
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn collision_data(&self, index: TileIndex) -> SolidEdges {
        self.properties(index).solid_edges
    }

    pub fn attributes(&self, index: TileIndex) -> TileAttributes {
        self.properties(index).attributes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How the backdrop moves relative to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackdropScrollMode {
    #[default]
    None,
    ParallaxHorizontal,
    ParallaxBoth,
    AutoHorizontal,
    AutoVertical,
}

/// The level's tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: i32,
    height: i32,
    layers: [Vec<TileIndex>; LAYER_COUNT],
    attribute_dict: TileAttributeDict,
}

impl Map {
    /// Create an empty map.
    ///
    /// Panics on an empty map or one whose cell count overflows `i32`.
    /// `LevelManifest::build_map` rejects both before getting here.
    pub fn new(width: i32, height: i32, attribute_dict: TileAttributeDict) -> Self {
        assert!(width > 0 && height > 0, "map must not be empty");
        let Some(count) = width.checked_mul(height) else {
            panic!("map size {width}x{height} is too large");
        };
        let count = count as usize;
        Self {
            width,
            height,
            layers: [vec![0; count], vec![0; count]],
            attribute_dict,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn attribute_dict(&self) -> &TileAttributeDict {
        &self.attribute_dict
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "map lookup at ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    pub fn tile_at(&self, layer: usize, x: i32, y: i32) -> TileIndex {
        self.layers[layer][self.index(x, y)]
    }

    pub fn set_tile_at(&mut self, layer: usize, x: i32, y: i32, tile: TileIndex) {
        let idx = self.index(x, y);
        self.layers[layer][idx] = tile;
    }

    /// Solid edges of the cell, combined over both layers.
    pub fn collision_data(&self, x: i32, y: i32) -> SolidEdges {
        let idx = self.index(x, y);
        self.attribute_dict
            .collision_data(self.layers[0][idx])
            .union(self.attribute_dict.collision_data(self.layers[1][idx]))
    }

    /// Attributes of the cell, combined over both layers.
    pub fn attributes(&self, x: i32, y: i32) -> TileAttributes {
        let idx = self.index(x, y);
        self.attribute_dict
            .attributes(self.layers[0][idx])
            .union(self.attribute_dict.attributes(self.layers[1][idx]))
    }

    /// True if the rectangle lies completely inside the map.
    pub fn contains_rect(&self, rect: &TileRect) -> bool {
        self.in_bounds(rect.left(), rect.top()) && self.in_bounds(rect.right(), rect.bottom())
    }

    /// Empty all tiles of a section, on both layers.
    pub fn clear_section(&mut self, section: &TileRect) {
        for y in section.top()..=section.bottom() {
            for x in section.left()..=section.right() {
                for layer in 0..LAYER_COUNT {
                    self.set_tile_at(layer, x, y, 0);
                }
            }
        }
    }

    /// Move the tiles of `section` by `dy` rows. Vacated cells become empty.
    /// Both the source and the destination must be inside the map.
    pub fn move_section_vertically(&mut self, section: &TileRect, dy: i32) {
        let target = section.translated(glam::IVec2::new(0, dy));
        assert!(
            self.contains_rect(section) && self.contains_rect(&target),
            "section move {section:?} by {dy} leaves the map"
        );

        let mut copied = Vec::with_capacity((section.size.x * section.size.y) as usize * LAYER_COUNT);
        for y in section.top()..=section.bottom() {
            for x in section.left()..=section.right() {
                for layer in 0..LAYER_COUNT {
                    copied.push(self.tile_at(layer, x, y));
                }
            }
        }

        self.clear_section(section);

        let mut tiles = copied.into_iter();
        for y in target.top()..=target.bottom() {
            for x in target.left()..=target.right() {
                for layer in 0..LAYER_COUNT {
                    if let Some(tile) = tiles.next() {
                        self.set_tile_at(layer, x, y, tile);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dict() -> TileAttributeDict {
        TileAttributeDict::new(vec![
            TileProperties::default(),
            TileProperties {
                solid_edges: SolidEdges::ALL,
                ..Default::default()
            },
            TileProperties {
                solid_edges: SolidEdges::TOP,
                ..Default::default()
            },
            TileProperties {
                attributes: TileAttributes {
                    ladder: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ])
    }

    #[test]
    fn new_map_is_empty() {
        let map = Map::new(4, 3, dict());
        for y in 0..3 {
            for x in 0..4 {
                assert!(map.collision_data(x, y).is_empty());
                assert_eq!(map.tile_at(0, x, y), 0);
            }
        }
    }

    #[test]
    fn layers_are_combined() {
        let mut map = Map::new(4, 4, dict());
        map.set_tile_at(0, 1, 1, 2);
        map.set_tile_at(1, 1, 1, 3);
        assert!(map.collision_data(1, 1).is_solid_on(SolidEdge::Top));
        assert!(!map.collision_data(1, 1).is_solid_on(SolidEdge::Left));
        assert!(map.attributes(1, 1).ladder);
    }

    #[test]
    fn unknown_tile_index_is_empty() {
        let mut map = Map::new(2, 2, dict());
        map.set_tile_at(0, 0, 0, 999);
        assert!(map.collision_data(0, 0).is_empty());
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn overflowing_map_size_panics() {
        Map::new(100_000, 100_000, dict());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_lookup_panics() {
        let map = Map::new(2, 2, dict());
        map.collision_data(2, 0);
    }

    #[test]
    fn move_section_up_leaves_empty_row() {
        let mut map = Map::new(5, 6, dict());
        let section = TileRect::new(1, 3, 3, 1);
        for x in 1..=3 {
            map.set_tile_at(0, x, 3, 2);
        }
        map.move_section_vertically(&section, -1);
        for x in 1..=3 {
            assert_eq!(map.tile_at(0, x, 2), 2);
            assert_eq!(map.tile_at(0, x, 3), 0);
        }
    }

    #[test]
    fn solid_edges_of_map_are_stable() {
        let mut map = Map::new(3, 3, dict());
        map.set_tile_at(0, 2, 2, 1);
        let first = map.collision_data(2, 2);
        let second = map.collision_data(2, 2);
        assert_eq!(first, second);
        assert_eq!(first, SolidEdges::ALL);
    }

    proptest! {
        #[test]
        fn setting_one_edge_leaves_others_untouched(bits in 0u8..16, edge_idx in 0usize..4, solid: bool) {
            let mut edges = SolidEdges::NONE;
            for (i, e) in SolidEdge::ALL.iter().enumerate() {
                edges.set(*e, bits & (1 << i) != 0);
            }
            let before = edges;
            let target = SolidEdge::ALL[edge_idx];
            edges.set(target, solid);

            prop_assert_eq!(edges.is_solid_on(target), solid);
            for other in SolidEdge::ALL.iter().filter(|e| **e != target) {
                prop_assert_eq!(edges.is_solid_on(*other), before.is_solid_on(*other));
            }
        }
    }
}
