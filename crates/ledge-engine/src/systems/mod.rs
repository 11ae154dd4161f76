//! Per-frame passes over the scene. The in-game mode builds one of each per
//! level and runs them in a fixed order.

pub mod animation;
pub mod attack;
pub mod damage_infliction;
pub mod debug;
pub mod elevator;
pub mod interaction;
pub mod map_scroll;
pub mod movement;
pub mod player_damage;
pub mod render;
pub mod security_camera;
pub mod trigger;

pub use animation::{tick_animations, PlayerAnimationSystem};
pub use attack::AttackSystem;
pub use damage_infliction::DamageInflictionSystem;
pub use debug::DebuggingSystem;
pub use elevator::ElevatorSystem;
pub use interaction::PlayerInteractionSystem;
pub use map_scroll::MapScrollSystem;
pub use movement::PlayerMovementSystem;
pub use player_damage::PlayerDamageSystem;
pub use render::RenderingSystem;
pub use security_camera::SecurityCameraSystem;
pub use trigger::level_exit_reached;
