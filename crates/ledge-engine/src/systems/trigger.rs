use crate::api::types::Entity;
use crate::components::spatial::{WorldBox, WorldPosition};
use crate::components::trigger::{Trigger, TriggerType};
use crate::core::scene::Scene;

/// True if the player has reached any level exit.
///
/// The exit counts as reached when the player's box ends on or above the
/// trigger row and the trigger column lies between the box's left edge and
/// one past its right edge.
pub fn level_exit_reached(scene: &Scene, player: Entity) -> bool {
    let Some(player_box) = scene.world_box(player) else {
        panic!("{player:?} has no position or bounding box");
    };

    let mut reached = false;
    scene.each::<Trigger, WorldPosition>(|_, trigger, pos| {
        if trigger.kind == TriggerType::LevelExit && exit_touched(&player_box, pos) {
            reached = true;
        }
    });
    reached
}

fn exit_touched(player_box: &WorldBox, trigger: &WorldPosition) -> bool {
    let (x, y) = (trigger.0.x, trigger.0.y);
    player_box.bottom() <= y && x >= player_box.left() && x <= player_box.right() + 1.0
}
