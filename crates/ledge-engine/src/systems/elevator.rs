use glam::{IVec2, Vec2};

use crate::api::game::GameConfig;
use crate::api::types::{Entity, TileRect, TimeDelta};
use crate::components::geometry::{Elevator, MapGeometryLink};
use crate::components::player::PlayerControlled;
use crate::components::spatial::{BoundingBox, WorldBox, WorldPosition};
use crate::core::map::Map;
use crate::core::physics::overlaps_solid_tiles;
use crate::core::scene::Scene;
use crate::input::queue::PlayerInput;

/// Moves elevator platforms, and the player riding them, one tile at a time.
///
/// An elevator's platform is a section of map tiles. The section, the
/// elevator entity and the player all move together.
pub struct ElevatorSystem {
    player: Entity,
    input: PlayerInput,
    step_interval: f32,
}

impl ElevatorSystem {
    /// Elevators carrying `player`, stepping every `elevator_step_interval`.
    pub fn new(player: Entity, config: &GameConfig) -> Self {
        Self {
            player,
            input: PlayerInput::default(),
            step_interval: config.elevator_step_interval,
        }
    }

    /// Input for the next `update`.
    pub fn set_input_state(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Returns true if any map section moved.
    pub fn update(&mut self, scene: &mut Scene, map: &mut Map, dt: TimeDelta) -> bool {
        let direction = self.input.moving_down as i32 - self.input.moving_up as i32;
        let player_dead = scene.component::<PlayerControlled>(self.player).is_dead();

        let mut moved = false;
        for elevator in scene.query::<Elevator, MapGeometryLink>() {
            let Some(player_box) = scene.world_box(self.player) else {
                panic!("{:?} has no position or bounding box", self.player);
            };
            let section = scene.component::<MapGeometryLink>(elevator).linked_section;
            let riding = !player_dead && direction != 0 && is_riding(&player_box, &section);

            let state = scene.component_mut::<Elevator>(elevator);
            if !riding {
                state.step_timer = 0.0;
                continue;
            }
            state.step_timer += dt;
            if state.step_timer < self.step_interval {
                continue;
            }
            state.step_timer -= self.step_interval;

            if self.try_step(scene, map, elevator, section, direction) {
                moved = true;
            }
        }
        moved
    }

    fn try_step(
        &self,
        scene: &mut Scene,
        map: &mut Map,
        elevator: Entity,
        section: TileRect,
        dy: i32,
    ) -> bool {
        let target = section.translated(IVec2::new(0, dy));
        if !map.contains_rect(&target) {
            return false;
        }

        let entering_row = if dy < 0 { target.top() } else { target.bottom() };
        let row_free = (section.left()..=section.right())
            .all(|x| map.collision_data(x, entering_row).is_empty());
        if !row_free {
            return false;
        }

        let pos = *scene.component::<WorldPosition>(self.player);
        let bbox = *scene.component::<BoundingBox>(self.player);
        if dy < 0 {
            let lifted = bbox.to_world(&WorldPosition(pos.0 - Vec2::Y));
            if overlaps_solid_tiles(map, lifted.top_left, lifted.size) {
                return false;
            }
        }

        map.move_section_vertically(&section, dy);
        scene.component_mut::<MapGeometryLink>(elevator).linked_section = target;
        if let Some(elevator_pos) = scene.get_mut::<WorldPosition>(elevator) {
            elevator_pos.0.y += dy as f32;
        }
        scene.component_mut::<WorldPosition>(self.player).0.y += dy as f32;

        log::debug!("elevator {elevator:?} moved to row {}", target.top());
        true
    }
}

/// Player feet rest on the top row of the section and overlap its columns.
fn is_riding(player_box: &WorldBox, section: &TileRect) -> bool {
    const EPS: f32 = 1e-3;
    let on_top = (player_box.max_y() - section.top() as f32).abs() < EPS;
    let overlaps = player_box.min_x() < (section.right() + 1) as f32
        && player_box.max_x() > section.left() as f32;
    on_top && overlaps
}
