//! Level and image loading.
//!
//! The in-game mode only sees the `LevelLoader` trait. `JsonLevelLoader` is
//! the bundled implementation: level documents and images as JSON, held in
//! memory or read from a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::game::Difficulty;
use crate::api::types::Color;
use crate::assets::manifest::LevelManifest;
use crate::core::level::LoadedLevel;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Asset not found: {0}")]
    MissingAsset(String),
    #[error("Invalid level: {0}")]
    Invalid(String),
}

/// RGBA image, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Image {
    /// Image filled with one color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    fn validate(&self, name: &str) -> Result<(), LoadError> {
        let expected = (self.width as usize).checked_mul(self.height as usize);
        if expected != Some(self.pixels.len()) {
            return Err(LoadError::Invalid(format!(
                "image {name} has {} pixels, expected {}x{}",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Source of level content.
pub trait LevelLoader {
    fn load_level(&self, file_name: &str, difficulty: Difficulty) -> Result<LoadedLevel, LoadError>;

    fn load_image(&self, name: &str) -> Result<Image, LoadError>;
}

#[derive(Debug, Clone)]
enum Source {
    Memory {
        levels: HashMap<String, String>,
        images: HashMap<String, Image>,
    },
    Directory(PathBuf),
}

/// Reads `LevelManifest` documents and JSON images.
///
/// In directory mode, `L1.MNI` is read from `<dir>/L1.MNI.json`.
#[derive(Debug, Clone)]
pub struct JsonLevelLoader {
    source: Source,
}

impl JsonLevelLoader {
    /// Empty in-memory loader. Add content with `with_level` / `with_image`.
    pub fn in_memory() -> Self {
        Self {
            source: Source::Memory {
                levels: HashMap::new(),
                images: HashMap::new(),
            },
        }
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            source: Source::Directory(dir.as_ref().to_path_buf()),
        }
    }

    /// Register a level document. Ignored in directory mode.
    pub fn with_level(mut self, file_name: &str, json: impl Into<String>) -> Self {
        if let Source::Memory { levels, .. } = &mut self.source {
            levels.insert(file_name.to_string(), json.into());
        }
        self
    }

    /// Register an image. Ignored in directory mode.
    pub fn with_image(mut self, name: &str, image: Image) -> Self {
        if let Source::Memory { images, .. } = &mut self.source {
            images.insert(name.to_string(), image);
        }
        self
    }

    fn read_document(&self, name: &str) -> Result<String, LoadError> {
        match &self.source {
            Source::Memory { levels, .. } => levels
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::MissingAsset(name.to_string())),
            Source::Directory(dir) => read_json_file(dir, name),
        }
    }
}

fn read_json_file(dir: &Path, name: &str) -> Result<String, LoadError> {
    let path = dir.join(format!("{name}.json"));
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(LoadError::MissingAsset(name.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

impl LevelLoader for JsonLevelLoader {
    fn load_level(&self, file_name: &str, difficulty: Difficulty) -> Result<LoadedLevel, LoadError> {
        let manifest = LevelManifest::from_json(&self.read_document(file_name)?)?;
        let map = manifest.build_map()?;

        log::debug!(
            "{file_name}: {}x{} tiles, {} actors",
            manifest.width,
            manifest.height,
            manifest.actors.len()
        );

        Ok(LoadedLevel {
            map,
            actors: manifest.actors_for(difficulty),
            tile_set_image: self.load_image(&manifest.tile_set)?,
            backdrop_image: self.load_image(&manifest.backdrop)?,
            backdrop_scroll_mode: manifest.backdrop_scroll_mode,
            music_file: manifest.music,
        })
    }

    fn load_image(&self, name: &str) -> Result<Image, LoadError> {
        let image = match &self.source {
            Source::Memory { images, .. } => images
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::MissingAsset(name.to_string()))?,
            Source::Directory(dir) => serde_json::from_str(&read_json_file(dir, name)?)?,
        };
        image.validate(name)?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_json() -> String {
        r#"{
            "width": 2, "height": 2,
            "background": [0, 0, 1, 1],
            "tile_attributes": [{}, { "solid": ["top"] }],
            "actors": [{ "id": "player_facing_left", "position": [0, 0] }],
            "tile_set": "TILES", "backdrop": "DROP", "music": "SONG.IMF"
        }"#
        .to_string()
    }

    fn loader() -> JsonLevelLoader {
        JsonLevelLoader::in_memory()
            .with_level("L1.MNI", level_json())
            .with_image("TILES", Image::filled(8, 8, Color::WHITE))
            .with_image("DROP", Image::filled(4, 4, Color::BLACK))
    }

    #[test]
    fn loads_level_from_memory() {
        let level = loader().load_level("L1.MNI", Difficulty::Medium).unwrap();
        assert_eq!(level.map.width(), 2);
        assert_eq!(level.actors.len(), 1);
        assert_eq!(level.music_file, "SONG.IMF");
        assert_eq!(level.tile_set_image.width, 8);
    }

    #[test]
    fn missing_level_is_reported() {
        let err = loader().load_level("M1.MNI", Difficulty::Easy).unwrap_err();
        assert!(matches!(err, LoadError::MissingAsset(name) if name == "M1.MNI"));
    }

    #[test]
    fn missing_image_is_reported() {
        let loader = JsonLevelLoader::in_memory().with_level("L1.MNI", level_json());
        assert!(matches!(
            loader.load_level("L1.MNI", Difficulty::Easy),
            Err(LoadError::MissingAsset(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let loader = loader().with_level("L2.MNI", "{ not json");
        assert!(matches!(
            loader.load_level("L2.MNI", Difficulty::Easy),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn image_with_wrong_pixel_count_is_invalid() {
        let mut image = Image::filled(2, 2, Color::WHITE);
        image.pixels.pop();
        let loader = JsonLevelLoader::in_memory().with_image("BAD", image);
        assert!(matches!(loader.load_image("BAD"), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn oversized_image_is_invalid() {
        let image = Image {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        let loader = JsonLevelLoader::in_memory().with_image("HUGE", image);
        assert!(matches!(loader.load_image("HUGE"), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn missing_directory_file_is_missing_asset() {
        let loader = JsonLevelLoader::from_dir(std::env::temp_dir().join("ledge-engine-no-such-dir"));
        assert!(matches!(loader.load_image("X"), Err(LoadError::MissingAsset(_))));
    }

    #[test]
    fn error_messages_name_the_asset() {
        let err = LoadError::MissingAsset("LOAD1.MNI".into());
        assert_eq!(err.to_string(), "Asset not found: LOAD1.MNI");
    }
}
