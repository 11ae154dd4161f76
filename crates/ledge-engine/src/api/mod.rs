pub mod game;
pub mod services;
pub mod types;
