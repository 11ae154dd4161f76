//! Tile-grid physics.
//!
//! Moves every entity that has a `WorldPosition`, a `Physical` and a
//! `BoundingBox` through the map, one axis at a time (X first, then Y).
//! Along each axis the leading box edge walks the integer grid lines it
//! would cross, nearest first. At every line the tiles just beyond it,
//! across the box's extent on the other axis, are tested for a solid edge
//! facing the motion. The first blocking line stops the box flush against
//! it and zeroes that velocity component.
//!
//! Tiles outside the map block in every direction.
//! Entity-vs-entity collisions are not resolved here.

use glam::Vec2;

use crate::api::game::GameConfig;
use crate::api::types::TimeDelta;
use crate::components::spatial::{tile_span, BoundingBox, Physical, WorldBox, WorldPosition};
use crate::core::map::{Map, SolidEdge, SolidEdges};
use crate::core::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Integrates velocities against the map's collision data.
#[derive(Debug, Clone)]
pub struct PhysicsSystem {
    gravity: f32,
    terminal_velocity: f32,
}

impl PhysicsSystem {
    /// Physics with gravity and terminal velocity taken from `config`.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
        }
    }

    /// Move every physical body by one step of `dt`, stopping at solid edges.
    pub fn update(&mut self, scene: &mut Scene, map: &Map, dt: TimeDelta) {
        for entity in scene.query3::<WorldPosition, Physical, BoundingBox>() {
            let Some(bbox) = scene.bounding_boxes.get(entity).copied() else {
                continue;
            };
            let (Some(pos), Some(physical)) = (
                scene.positions.get_mut(entity),
                scene.physicals.get_mut(entity),
            ) else {
                continue;
            };
            self.step_body(map, &bbox, pos, physical, dt);
        }
    }

    fn step_body(
        &self,
        map: &Map,
        bbox: &BoundingBox,
        pos: &mut WorldPosition,
        physical: &mut Physical,
        dt: TimeDelta,
    ) {
        if physical.gravity_affected {
            physical.velocity.y =
                (physical.velocity.y + self.gravity * dt).min(self.terminal_velocity);
        }
        physical.contacts = SolidEdges::NONE;

        let displacement = physical.velocity * dt;

        match sweep(map, &bbox.to_world(pos), Axis::X, displacement.x) {
            Sweep::Free(dx) => pos.0.x += dx,
            Sweep::Blocked { line, side } => {
                pos.0.x = flush_position(line, side, bbox.offset.x, bbox.size.x);
                physical.velocity.x = 0.0;
                physical.contacts |= SolidEdges::of(side);
            }
        }

        match sweep(map, &bbox.to_world(pos), Axis::Y, displacement.y) {
            Sweep::Free(dy) => pos.0.y += dy,
            Sweep::Blocked { line, side } => {
                pos.0.y = flush_position(line, side, bbox.offset.y, bbox.size.y);
                physical.velocity.y = 0.0;
                physical.contacts |= SolidEdges::of(side);
            }
        }
    }
}

enum Sweep {
    Free(f32),
    /// Stopped at grid line `line`; `side` is the side of the box that hit.
    Blocked { line: i32, side: SolidEdge },
}

/// Anchor coordinate that puts the box flush against `line`.
fn flush_position(line: i32, side: SolidEdge, offset: f32, size: f32) -> f32 {
    match side {
        SolidEdge::Right | SolidEdge::Bottom => line as f32 - size - offset,
        SolidEdge::Left | SolidEdge::Top => line as f32 - offset,
    }
}

/// How far `world_box` can travel by `delta` along `axis`.
fn sweep(map: &Map, world_box: &WorldBox, axis: Axis, delta: f32) -> Sweep {
    if delta == 0.0 {
        return Sweep::Free(0.0);
    }

    let (lead, cross) = match axis {
        Axis::X if delta > 0.0 => (world_box.max_x(), tile_span(world_box.min_y(), world_box.size.y)),
        Axis::X => (world_box.min_x(), tile_span(world_box.min_y(), world_box.size.y)),
        Axis::Y if delta > 0.0 => (world_box.max_y(), tile_span(world_box.min_x(), world_box.size.x)),
        Axis::Y => (world_box.min_y(), tile_span(world_box.min_x(), world_box.size.x)),
    };
    let target = lead + delta;

    if delta > 0.0 {
        let side = match axis {
            Axis::X => SolidEdge::Right,
            Axis::Y => SolidEdge::Bottom,
        };
        let mut line = lead.ceil() as i32;
        while (line as f32) < target {
            if line_blocks(map, axis, line, cross.clone(), true) {
                return Sweep::Blocked { line, side };
            }
            line += 1;
        }
    } else {
        let side = match axis {
            Axis::X => SolidEdge::Left,
            Axis::Y => SolidEdge::Top,
        };
        let mut line = lead.floor() as i32;
        while (line as f32) > target {
            if line_blocks(map, axis, line, cross.clone(), false) {
                return Sweep::Blocked { line, side };
            }
            line -= 1;
        }
    }

    Sweep::Free(delta)
}

/// Whether the tiles just beyond grid line `line` stop motion across it.
fn line_blocks(
    map: &Map,
    axis: Axis,
    line: i32,
    cross: std::ops::RangeInclusive<i32>,
    positive: bool,
) -> bool {
    // Moving right enters the column starting at `line` through its left
    // edge; moving left enters the column ending at `line` through its
    // right edge. Same for rows.
    let (cell, facing) = match (axis, positive) {
        (Axis::X, true) => (line, SolidEdge::Left),
        (Axis::X, false) => (line - 1, SolidEdge::Right),
        (Axis::Y, true) => (line, SolidEdge::Top),
        (Axis::Y, false) => (line - 1, SolidEdge::Bottom),
    };

    cross.into_iter().any(|other| {
        let (x, y) = match axis {
            Axis::X => (cell, other),
            Axis::Y => (other, cell),
        };
        !map.in_bounds(x, y) || map.collision_data(x, y).is_solid_on(facing)
    })
}

/// True if the box rests on a solid top edge (or the map's bottom border).
pub fn on_solid_ground(map: &Map, world_box: &WorldBox) -> bool {
    const EPS: f32 = 1e-3;
    let bottom = world_box.max_y();
    let row = bottom.round();
    if (bottom - row).abs() > EPS {
        return false;
    }
    let row = row as i32;
    world_box.columns().any(|x| {
        !map.in_bounds(x, row) || map.collision_data(x, row).is_solid_on(SolidEdge::Top)
    })
}

/// True if a box of `size` with its top-left at `top_left` would overlap a
/// tile with any solid edge.
pub fn overlaps_solid_tiles(map: &Map, top_left: Vec2, size: Vec2) -> bool {
    let world = WorldBox { top_left, size };
    world.rows().any(|y| {
        world
            .columns()
            .any(|x| !map.in_bounds(x, y) || !map.collision_data(x, y).is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::map::{TileAttributeDict, TileProperties};
    use proptest::prelude::*;

    const SOLID: u16 = 1;
    const PLATFORM: u16 = 2;

    fn dict() -> TileAttributeDict {
        TileAttributeDict::new(vec![
            TileProperties::default(),
            TileProperties {
                solid_edges: SolidEdges::ALL,
                ..Default::default()
            },
            TileProperties {
                solid_edges: SolidEdges::TOP,
                ..Default::default()
            },
        ])
    }

    fn no_gravity() -> PhysicsSystem {
        PhysicsSystem {
            gravity: 0.0,
            terminal_velocity: 1000.0,
        }
    }

    fn body(scene: &mut Scene, x: f32, y: f32, velocity: Vec2) -> crate::api::types::Entity {
        scene
            .build()
            .with(WorldPosition::new(x, y))
            .with(BoundingBox::sized(1.0, 2.0))
            .with(Physical::new(velocity, false))
            .id()
    }

    #[test]
    fn free_motion_integrates_velocity() {
        let map = Map::new(10, 10, dict());
        let mut scene = Scene::new();
        let e = body(&mut scene, 2.0, 2.0, Vec2::new(6.0, 3.0));
        no_gravity().update(&mut scene, &map, 0.5);

        let pos = scene.positions.get(e).unwrap().0;
        assert_eq!(pos, Vec2::new(5.0, 3.5));
        assert!(scene.physicals.get(e).unwrap().contacts.is_empty());
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let mut map = Map::new(10, 10, dict());
        for y in 0..10 {
            map.set_tile_at(0, 6, y, SOLID);
        }
        let mut scene = Scene::new();
        let e = body(&mut scene, 2.0, 2.0, Vec2::new(10.0, 0.0));
        no_gravity().update(&mut scene, &map, 1.0);

        assert_eq!(scene.positions.get(e).unwrap().0.x, 5.0);
        let physical = scene.physicals.get(e).unwrap();
        assert_eq!(physical.velocity.x, 0.0);
        assert!(physical.contacts.contains(SolidEdges::RIGHT));
    }

    #[test]
    fn falling_body_lands_on_platform() {
        let mut map = Map::new(10, 10, dict());
        for x in 0..10 {
            map.set_tile_at(0, x, 8, PLATFORM);
        }
        let mut scene = Scene::new();
        let e = scene
            .build()
            .with(WorldPosition::new(3.0, 1.0))
            .with(BoundingBox::sized(1.0, 2.0))
            .with(Physical::new(Vec2::ZERO, true))
            .id();

        let mut physics = PhysicsSystem::new(&GameConfig::default());
        for _ in 0..120 {
            physics.update(&mut scene, &map, 1.0 / 60.0);
        }

        assert_eq!(scene.positions.get(e).unwrap().0.y, 6.0);
        assert!(scene.physicals.get(e).unwrap().contacts.contains(SolidEdges::BOTTOM));
    }

    #[test]
    fn platform_only_blocks_from_above() {
        let mut map = Map::new(10, 10, dict());
        map.set_tile_at(0, 3, 4, PLATFORM);
        let mut scene = Scene::new();
        let e = body(&mut scene, 3.0, 6.0, Vec2::new(0.0, -4.0));
        no_gravity().update(&mut scene, &map, 1.0);

        assert_eq!(scene.positions.get(e).unwrap().0.y, 2.0);
    }

    #[test]
    fn map_border_blocks() {
        let map = Map::new(6, 6, dict());
        let mut scene = Scene::new();
        let e = body(&mut scene, 1.0, 1.0, Vec2::new(-5.0, -5.0));
        no_gravity().update(&mut scene, &map, 1.0);

        assert_eq!(scene.positions.get(e).unwrap().0, Vec2::ZERO);
        let contacts = scene.physicals.get(e).unwrap().contacts;
        assert!(contacts.contains(SolidEdges::LEFT));
        assert!(contacts.contains(SolidEdges::TOP));
    }

    #[test]
    fn gravity_is_capped_at_terminal_velocity() {
        let map = Map::new(4, 200, dict());
        let mut scene = Scene::new();
        let e = scene
            .build()
            .with(WorldPosition::new(1.0, 0.0))
            .with(BoundingBox::sized(1.0, 1.0))
            .with(Physical::new(Vec2::ZERO, true))
            .id();
        let config = GameConfig::default();
        let mut physics = PhysicsSystem::new(&config);
        for _ in 0..60 {
            physics.update(&mut scene, &map, 1.0 / 60.0);
        }
        assert!(scene.physicals.get(e).unwrap().velocity.y <= config.terminal_velocity);
    }

    #[test]
    fn ground_probe_needs_flush_contact() {
        let mut map = Map::new(6, 6, dict());
        map.set_tile_at(0, 2, 4, PLATFORM);
        let resting = BoundingBox::sized(1.0, 2.0).to_world(&WorldPosition::new(2.0, 2.0));
        let hovering = BoundingBox::sized(1.0, 2.0).to_world(&WorldPosition::new(2.0, 1.5));
        let beside = BoundingBox::sized(1.0, 2.0).to_world(&WorldPosition::new(3.0, 2.0));
        assert!(on_solid_ground(&map, &resting));
        assert!(!on_solid_ground(&map, &hovering));
        assert!(!on_solid_ground(&map, &beside));
    }

    fn overlaps_fully_solid(map: &Map, top_left: Vec2, size: Vec2) -> bool {
        const EPS: f32 = 1e-4;
        (0..map.height()).any(|y| {
            (0..map.width()).any(|x| {
                map.collision_data(x, y) == SolidEdges::ALL
                    && top_left.x < x as f32 + 1.0 - EPS
                    && (x as f32) < top_left.x + size.x - EPS
                    && top_left.y < y as f32 + 1.0 - EPS
                    && (y as f32) < top_left.y + size.y - EPS
            })
        })
    }

    proptest! {
        #[test]
        fn never_enters_solid_tiles(
            solids in proptest::collection::vec((0i32..12, 0i32..12), 0..30),
            start in (0i32..11, 0i32..10),
            velocities in proptest::collection::vec((-40.0f32..40.0, -40.0f32..40.0), 1..20),
        ) {
            let mut map = Map::new(12, 12, dict());
            for (x, y) in solids {
                map.set_tile_at(0, x, y, SOLID);
            }
            let start = Vec2::new(start.0 as f32, start.1 as f32);
            let size = Vec2::new(1.0, 2.0);
            prop_assume!(!overlaps_solid_tiles(&map, start, size));

            let mut scene = Scene::new();
            let e = body(&mut scene, start.x, start.y, Vec2::ZERO);
            let mut physics = no_gravity();
            for (vx, vy) in velocities {
                scene.physicals.get_mut(e).unwrap().velocity = Vec2::new(vx, vy);
                physics.update(&mut scene, &map, 1.0 / 15.0);
                let pos = scene.positions.get(e).unwrap().0;
                prop_assert!(!overlaps_fully_solid(&map, pos, size), "entered solid at {:?}", pos);
            }
        }
    }
}
