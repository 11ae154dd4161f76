//! Level content as handed over by the loader, and the level data the
//! in-game mode keeps while the level runs.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::assets::loader::Image;
use crate::core::map::{BackdropScrollMode, Map};

const EPISODE_PREFIXES: [char; 4] = ['L', 'M', 'N', 'O'];

pub const EPISODE_COUNT: u32 = 4;
pub const LEVELS_PER_EPISODE: u32 = 8;

/// File name of a level, e.g. `L1.MNI` for the first level of episode one.
///
/// Panics on an episode or level number out of range.
pub fn level_file_name(episode: u32, level: u32) -> String {
    assert!(episode < EPISODE_COUNT, "invalid episode {episode}");
    assert!(level < LEVELS_PER_EPISODE, "invalid level {level}");
    format!("{}{}.MNI", EPISODE_PREFIXES[episode as usize], level + 1)
}

/// File name of the loading screen shown before levels of an episode.
pub fn loading_screen_file_name(episode: u32) -> String {
    assert!(episode < EPISODE_COUNT, "invalid episode {episode}");
    format!("LOAD{}.MNI", episode + 1)
}

/// Kinds of actors a level can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorId {
    PlayerFacingLeft,
    PlayerFacingRight,
    LevelExit,
    SecurityCamera,
    Elevator,
    Spikes,
    Hoverbot,
    SolidCrate,
    HealthMolecule,
    LaserWeapon,
    RocketLauncher,
    BonusGlobe,
}

impl ActorId {
    pub fn is_player(self) -> bool {
        matches!(self, ActorId::PlayerFacingLeft | ActorId::PlayerFacingRight)
    }
}

/// One actor placement in the level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDescriptor {
    pub id: ActorId,
    /// Tile position of the actor's top-left corner.
    pub position: IVec2,
    /// Size of the map section the actor controls, if any (elevators).
    #[serde(default)]
    pub assigned_area: Option<IVec2>,
}

impl ActorDescriptor {
    pub fn new(id: ActorId, x: i32, y: i32) -> Self {
        Self {
            id,
            position: IVec2::new(x, y),
            assigned_area: None,
        }
    }

    pub fn with_area(mut self, width: i32, height: i32) -> Self {
        self.assigned_area = Some(IVec2::new(width, height));
        self
    }
}

/// Everything the loader produces for a level.
#[derive(Debug, Clone)]
pub struct LoadedLevel {
    pub map: Map,
    pub actors: Vec<ActorDescriptor>,
    pub tile_set_image: Image,
    pub backdrop_image: Image,
    pub backdrop_scroll_mode: BackdropScrollMode,
    pub music_file: String,
}

/// Level state owned by the in-game mode while the level runs.
#[derive(Debug, Clone)]
pub struct LevelData {
    pub map: Map,
    /// Actor list the entities are rebuilt from on restart.
    pub initial_actors: Vec<ActorDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_follow_episode_prefixes() {
        assert_eq!(level_file_name(0, 0), "L1.MNI");
        assert_eq!(level_file_name(1, 4), "M5.MNI");
        assert_eq!(level_file_name(3, 7), "O8.MNI");
    }

    #[test]
    fn loading_screen_names() {
        assert_eq!(loading_screen_file_name(0), "LOAD1.MNI");
        assert_eq!(loading_screen_file_name(3), "LOAD4.MNI");
    }

    #[test]
    #[should_panic]
    fn invalid_episode_panics() {
        level_file_name(4, 0);
    }

    #[test]
    #[should_panic]
    fn invalid_level_panics() {
        level_file_name(0, 8);
    }

    #[test]
    fn actor_ids_use_snake_case_names() {
        let actor: ActorDescriptor =
            serde_json::from_str(r#"{ "id": "player_facing_right", "position": [2, 3] }"#)
                .unwrap();
        assert!(actor.id.is_player());
        assert_eq!(actor.position, IVec2::new(2, 3));
        assert_eq!(actor.assigned_area, None);
    }
}
