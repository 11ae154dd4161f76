//! Component fragments. Each kind is attached to entities independently.

pub mod ai;
pub mod animation;
pub mod damage;
pub mod geometry;
pub mod item;
pub mod layer;
pub mod player;
pub mod spatial;
pub mod sprite;
pub mod trigger;

pub use ai::{CameraDirection, SecurityCamera};
pub use animation::Animated;
pub use damage::{
    DamageInflicting, PlayerDamaging, Projectile, ProjectileDirection, ProjectileType, Shootable,
};
pub use geometry::{Elevator, MapGeometryLink};
pub use item::Collectable;
pub use layer::RenderLayer;
pub use player::{Orientation, PlayerControlled, PlayerState};
pub use spatial::{BoundingBox, Physical, SolidBody, WorldBox, WorldPosition};
pub use sprite::{Sprite, SpriteSheetId};
pub use trigger::{Trigger, TriggerType};
