pub mod ingame;
pub mod runner;

pub use ingame::IngameMode;
pub use runner::GameRunner;
