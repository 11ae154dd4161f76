use serde::{Deserialize, Serialize};

use crate::api::game::Difficulty;
use crate::assets::loader::LoadError;
use crate::core::level::ActorDescriptor;
use crate::core::map::{
    BackdropScrollMode, Map, SolidEdge, SolidEdges, TileAttributeDict, TileAttributes, TileIndex,
    TileProperties,
};

/// A level document. Loaded from JSON by `JsonLevelLoader`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelManifest {
    /// Map width in tiles.
    pub width: i32,
    /// Map height in tiles.
    pub height: i32,
    /// Base layer, row-major, `width * height` entries.
    pub background: Vec<TileIndex>,
    /// Decoration layer. Empty when the level has none.
    #[serde(default)]
    pub foreground: Vec<TileIndex>,
    /// Properties per tile index of the tile set.
    #[serde(default)]
    pub tile_attributes: Vec<TileAttributeEntry>,
    #[serde(default)]
    pub actors: Vec<ManifestActor>,
    /// Image names, resolved through the loader.
    pub tile_set: String,
    pub backdrop: String,
    #[serde(default)]
    pub backdrop_scroll_mode: BackdropScrollMode,
    pub music: String,
}

/// Properties of one tile index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileAttributeEntry {
    /// Solid sides, e.g. `["top", "left"]`.
    #[serde(default)]
    pub solid: Vec<SolidEdge>,
    #[serde(flatten)]
    pub attributes: TileAttributes,
}

/// An actor placement, optionally restricted to harder difficulties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestActor {
    #[serde(flatten)]
    pub descriptor: ActorDescriptor,
    /// Only placed when playing at this difficulty or above.
    #[serde(default)]
    pub min_difficulty: Option<Difficulty>,
}

impl LevelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn attribute_dict(&self) -> TileAttributeDict {
        TileAttributeDict::new(
            self.tile_attributes
                .iter()
                .map(|entry| {
                    let mut solid_edges = SolidEdges::NONE;
                    for edge in &entry.solid {
                        solid_edges.set(*edge, true);
                    }
                    TileProperties {
                        solid_edges,
                        attributes: entry.attributes,
                    }
                })
                .collect(),
        )
    }

    /// Build the tile map, checking layer sizes against the dimensions.
    pub fn build_map(&self) -> Result<Map, LoadError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LoadError::Invalid(format!(
                "map size {}x{} is empty",
                self.width, self.height
            )));
        }
        let Some(expected) = self.width.checked_mul(self.height).map(|n| n as usize) else {
            return Err(LoadError::Invalid(format!(
                "map size {}x{} is too large",
                self.width, self.height
            )));
        };
        if self.background.len() != expected {
            return Err(LoadError::Invalid(format!(
                "background layer has {} tiles, expected {expected}",
                self.background.len()
            )));
        }
        if !self.foreground.is_empty() && self.foreground.len() != expected {
            return Err(LoadError::Invalid(format!(
                "foreground layer has {} tiles, expected {expected}",
                self.foreground.len()
            )));
        }

        let mut map = Map::new(self.width, self.height, self.attribute_dict());
        for (layer, tiles) in [&self.background, &self.foreground].into_iter().enumerate() {
            for (i, tile) in tiles.iter().enumerate() {
                let x = i as i32 % self.width;
                let y = i as i32 / self.width;
                map.set_tile_at(layer, x, y, *tile);
            }
        }
        Ok(map)
    }

    /// Actors placed at the given difficulty.
    pub fn actors_for(&self, difficulty: Difficulty) -> Vec<ActorDescriptor> {
        self.actors
            .iter()
            .filter(|a| a.min_difficulty.map_or(true, |min| difficulty >= min))
            .map(|a| a.descriptor)
            .collect()
    }
}
