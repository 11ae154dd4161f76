pub mod commands;
pub mod factory;
pub mod level;
pub mod map;
pub mod physics;
pub mod player_model;
pub mod scene;
pub mod storage;
pub mod time;
