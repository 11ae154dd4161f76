//! Debug overlay: collision data, bounding boxes and a tile grid, drawn over
//! the finished frame. Each view is toggled on its own.

use glam::IVec2;

use crate::api::types::{Color, PixelRect, TileRect};
use crate::components::damage::PlayerDamaging;
use crate::components::geometry::MapGeometryLink;
use crate::components::spatial::{BoundingBox, SolidBody, WorldPosition};
use crate::core::map::{Map, SolidEdge};
use crate::core::scene::Scene;
use crate::renderer::camera::ScrollCamera;
use crate::renderer::traits::Renderer;

pub const SOLID_EDGE_COLOR: Color = Color::new(255, 255, 0, 255);
pub const CLIMBABLE_COLOR: Color = Color::new(255, 100, 255, 220);
pub const LADDER_COLOR: Color = Color::new(0, 100, 255, 220);
pub const FLAMMABLE_COLOR: Color = Color::new(255, 127, 0, 220);
pub const DAMAGING_BOX_COLOR: Color = Color::new(255, 0, 0, 255);
pub const SOLID_BOX_COLOR: Color = Color::new(255, 255, 0, 255);
pub const BOX_COLOR: Color = Color::new(0, 255, 0, 255);
pub const GEOMETRY_LINK_COLOR: Color = Color::new(0, 255, 255, 190);
pub const GRID_COLOR: Color = Color::new(255, 255, 255, 190);

#[derive(Debug, Clone, Default)]
pub struct DebuggingSystem {
    show_bounding_boxes: bool,
    show_collision_data: bool,
    show_grid: bool,
}

impl DebuggingSystem {
    /// All overlays off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_bounding_box_display(&mut self) {
        self.show_bounding_boxes = !self.show_bounding_boxes;
        log::debug!("bounding boxes: {}", self.show_bounding_boxes);
    }

    pub fn toggle_world_collision_data_display(&mut self) {
        self.show_collision_data = !self.show_collision_data;
        log::debug!("collision data: {}", self.show_collision_data);
    }

    pub fn toggle_grid_display(&mut self) {
        self.show_grid = !self.show_grid;
        log::debug!("grid: {}", self.show_grid);
    }

    pub fn shows_bounding_boxes(&self) -> bool {
        self.show_bounding_boxes
    }

    pub fn shows_collision_data(&self) -> bool {
        self.show_collision_data
    }

    pub fn shows_grid(&self) -> bool {
        self.show_grid
    }

    /// Draw the enabled overlays over the current frame.
    pub fn update(&self, renderer: &mut dyn Renderer, scene: &Scene, map: &Map, camera: &ScrollCamera) {
        let visible = camera.visible_tiles();
        let tile_size = camera.tile_size_px;

        if self.show_collision_data {
            draw_collision_data(renderer, map, camera, &visible, tile_size);
        }
        if self.show_bounding_boxes {
            draw_bounding_boxes(renderer, scene, camera);
        }
        if self.show_grid {
            draw_grid(renderer, camera, &visible, tile_size);
        }
    }
}

fn draw_collision_data(
    renderer: &mut dyn Renderer,
    map: &Map,
    camera: &ScrollCamera,
    visible: &TileRect,
    tile_size: i32,
) {
    let last = tile_size - 1;
    for y in visible.top()..=visible.bottom() {
        for x in visible.left()..=visible.right() {
            let p = camera.to_screen(IVec2::new(x, y).as_vec2());
            let solid = map.collision_data(x, y);
            for edge in SolidEdge::ALL {
                if !solid.is_solid_on(edge) {
                    continue;
                }
                let (from, to) = match edge {
                    SolidEdge::Top => (p, p + IVec2::new(last, 0)),
                    SolidEdge::Bottom => (p + IVec2::new(0, last), p + IVec2::new(last, last)),
                    SolidEdge::Left => (p, p + IVec2::new(0, last)),
                    SolidEdge::Right => (p + IVec2::new(last, 0), p + IVec2::new(last, last)),
                };
                renderer.draw_line(from, to, SOLID_EDGE_COLOR);
            }

            let attributes = map.attributes(x, y);
            let rect = PixelRect::new(p.x, p.y, tile_size, tile_size);
            if attributes.climbable {
                renderer.draw_filled_rectangle(rect, CLIMBABLE_COLOR);
            }
            if attributes.ladder {
                renderer.draw_filled_rectangle(rect, LADDER_COLOR);
            }
            if attributes.flammable {
                renderer.draw_filled_rectangle(rect, FLAMMABLE_COLOR);
            }
        }
    }
}

fn draw_bounding_boxes(renderer: &mut dyn Renderer, scene: &Scene, camera: &ScrollCamera) {
    let tile_size = camera.tile_size_px as f32;

    scene.each::<WorldPosition, BoundingBox>(|entity, pos, bbox| {
        let world = bbox.to_world(pos);
        if !camera.is_rect_visible(&world) {
            return;
        }
        let color = if scene.has::<PlayerDamaging>(entity) {
            DAMAGING_BOX_COLOR
        } else if scene.has::<SolidBody>(entity) {
            SOLID_BOX_COLOR
        } else {
            BOX_COLOR
        };
        let top_left = camera.to_screen(world.top_left);
        let size = (world.size * tile_size).round().as_ivec2();
        renderer.draw_rectangle(PixelRect::new(top_left.x, top_left.y, size.x, size.y), color);
    });

    for entity in scene.query1::<MapGeometryLink>() {
        let section = scene.component::<MapGeometryLink>(entity).linked_section;
        let top_left = camera.to_screen(section.top_left.as_vec2());
        let size = section.size * camera.tile_size_px;
        renderer.draw_rectangle(
            PixelRect::new(top_left.x, top_left.y, size.x, size.y),
            GEOMETRY_LINK_COLOR,
        );
    }
}

fn draw_grid(renderer: &mut dyn Renderer, camera: &ScrollCamera, visible: &TileRect, tile_size: i32) {
    let height = visible.size.y * tile_size;
    let width = visible.size.x * tile_size;
    let origin = camera.to_screen(visible.top_left.as_vec2());

    for column in 0..visible.size.x {
        let x = origin.x + column * tile_size;
        renderer.draw_line(IVec2::new(x, origin.y), IVec2::new(x, origin.y + height), GRID_COLOR);
    }
    for row in 0..visible.size.y {
        let y = origin.y + row * tile_size;
        renderer.draw_line(IVec2::new(origin.x, y), IVec2::new(origin.x + width, y), GRID_COLOR);
    }
}
