//! Animation: sprite frame selection for the player, and frame cycling for
//! every other animated sprite.

use crate::api::game::GameConfig;
use crate::api::types::{Entity, TimeDelta};
use crate::components::animation::Animated;
use crate::components::player::{Orientation, PlayerControlled, PlayerState};
use crate::components::spatial::Physical;
use crate::components::sprite::Sprite;
use crate::core::scene::Scene;

/// Frames per orientation in the player sheet. Right-facing frames follow
/// the left-facing block.
const FRAMES_PER_ORIENTATION: u32 = 16;

const WALK_FIRST_FRAME: u32 = 1;
const WALK_FRAME_COUNT: u32 = 4;
const CLIMB_FIRST_FRAME: u32 = 9;
const CLIMB_FRAME_COUNT: u32 = 2;

/// Tick all `Animated` components and copy the current frame into the sprite.
///
/// Call this once per frame before rendering.
pub fn tick_animations(scene: &mut Scene, dt: TimeDelta) {
    for entity in scene.query::<Animated, Sprite>() {
        let (Some(anim), Some(sprite)) = (
            scene.animations.get_mut(entity),
            scene.sprites.get_mut(entity),
        ) else {
            continue;
        };
        anim.tick(dt);
        sprite.frame = anim.current_frame();
    }
}

/// Picks the player's sprite frame from its state and orientation.
pub struct PlayerAnimationSystem {
    player: Entity,
    frame_time: f32,
    cycle_timer: f32,
    cycle_index: u32,
    last_state: PlayerState,
}

impl PlayerAnimationSystem {
    /// Animates `player`, with walk frame timing from `config`.
    pub fn new(player: Entity, config: &GameConfig) -> Self {
        Self {
            player,
            frame_time: config.walk_frame_time,
            cycle_timer: 0.0,
            cycle_index: 0,
            last_state: PlayerState::Standing,
        }
    }

    /// Pick the player's sprite frame for its current state.
    pub fn update(&mut self, scene: &mut Scene, dt: TimeDelta) {
        let controlled = *scene.component::<PlayerControlled>(self.player);
        let climbing_moves = scene
            .get::<Physical>(self.player)
            .is_some_and(|p| p.velocity.y != 0.0);

        if controlled.state != self.last_state {
            self.last_state = controlled.state;
            self.cycle_timer = 0.0;
            self.cycle_index = 0;
        }

        let cycling = match controlled.state {
            PlayerState::Walking => true,
            PlayerState::ClimbingLadder => climbing_moves,
            _ => false,
        };
        if cycling && self.frame_time > 0.0 {
            self.cycle_timer += dt;
            while self.cycle_timer >= self.frame_time {
                self.cycle_timer -= self.frame_time;
                self.cycle_index += 1;
            }
        }

        let base = match controlled.state {
            PlayerState::Standing => 0,
            PlayerState::Walking => WALK_FIRST_FRAME + self.cycle_index % WALK_FRAME_COUNT,
            PlayerState::Crouching => 5,
            PlayerState::LookingUp => 6,
            PlayerState::Jumping => 7,
            PlayerState::Falling => 8,
            PlayerState::ClimbingLadder => CLIMB_FIRST_FRAME + self.cycle_index % CLIMB_FRAME_COUNT,
            PlayerState::Attacking => 11,
            PlayerState::Dead => 12,
        };
        let frame = match controlled.orientation {
            Orientation::Left => base,
            Orientation::Right => base + FRAMES_PER_ORIENTATION,
        };

        let visible = !controlled.is_invincible() || self.blink_on(controlled.mercy_time_left);

        let sprite = scene.component_mut::<Sprite>(self.player);
        sprite.frame = frame;
        sprite.visible = visible;
    }

    /// Mercy blinking alternates every animation frame.
    fn blink_on(&self, mercy_time_left: f32) -> bool {
        if self.frame_time <= 0.0 {
            return true;
        }
        ((mercy_time_left / self.frame_time) as u32) % 2 == 0
    }
}
