use glam::Vec2;

use crate::api::types::TimeDelta;
use crate::components::layer::RenderLayer;
use crate::components::spatial::{WorldBox, WorldPosition};
use crate::components::sprite::Sprite;
use crate::core::map::Map;
use crate::core::scene::Scene;
use crate::renderer::camera::ScrollCamera;
use crate::renderer::map_renderer::{MapPass, MapRenderer};
use crate::renderer::traits::Renderer;

/// Draws one frame of the level into the bound render target.
///
/// Back to front: backdrop, `BehindMap` sprites, background tiles,
/// `Objects` sprites, foreground tiles, `TopMost` sprites.
pub struct RenderingSystem {
    map_renderer: MapRenderer,
}

impl RenderingSystem {
    /// Renders sprites around the passes of `map_renderer`.
    pub fn new(map_renderer: MapRenderer) -> Self {
        Self { map_renderer }
    }

    /// Draw the level as seen through `camera`.
    pub fn update(
        &mut self,
        renderer: &mut dyn Renderer,
        scene: &Scene,
        camera: &ScrollCamera,
        dt: TimeDelta,
    ) {
        self.map_renderer.update(dt);

        self.map_renderer.render_backdrop(renderer, camera);
        render_sprites(renderer, scene, camera, RenderLayer::BehindMap);
        self.map_renderer.render_map(renderer, camera, MapPass::Background);
        render_sprites(renderer, scene, camera, RenderLayer::Objects);
        self.map_renderer.render_map(renderer, camera, MapPass::Foreground);
        render_sprites(renderer, scene, camera, RenderLayer::TopMost);
    }

    /// Pick up changes to the map's tiles.
    pub fn rebuild_map(&mut self, renderer: &mut dyn Renderer, map: &Map) {
        self.map_renderer.rebuild(renderer, map);
    }

    /// Release backend resources. The system must not be used afterwards.
    pub fn destroy(&mut self, renderer: &mut dyn Renderer) {
        self.map_renderer.destroy(renderer);
    }
}

/// Draw the visible sprites of one layer, in entity order.
fn render_sprites(renderer: &mut dyn Renderer, scene: &Scene, camera: &ScrollCamera, layer: RenderLayer) {
    scene.each::<Sprite, WorldPosition>(|entity, sprite, pos| {
        if sprite.layer != layer || !sprite.visible {
            return;
        }
        let extent = scene.world_box(entity).unwrap_or(WorldBox {
            top_left: pos.0,
            size: Vec2::ONE,
        });
        if !camera.is_rect_visible(&extent) {
            return;
        }
        renderer.draw_sprite(sprite.sheet, sprite.frame, camera.to_screen(pos.0));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::api::types::Color;
    use crate::assets::loader::Image;
    use crate::components::spatial::BoundingBox;
    use crate::components::sprite::SpriteSheetId;
    use crate::core::level::LoadedLevel;
    use crate::core::map::{BackdropScrollMode, TileAttributeDict, TileAttributes, TileProperties};
    use crate::renderer::recording::{DrawCommand, RecordingRenderer};
    use glam::IVec2;

    fn system(renderer: &mut RecordingRenderer) -> (RenderingSystem, ScrollCamera) {
        let dict = TileAttributeDict::new(vec![
            TileProperties::default(),
            TileProperties::default(),
            TileProperties {
                attributes: TileAttributes {
                    foreground: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ]);
        let mut map = Map::new(64, 20, dict);
        map.set_tile_at(0, 0, 0, 1);
        map.set_tile_at(1, 0, 1, 2);
        let level = LoadedLevel {
            map,
            actors: Vec::new(),
            tile_set_image: Image::filled(16, 16, Color::WHITE),
            backdrop_image: Image::filled(256, 160, Color::BLACK),
            backdrop_scroll_mode: BackdropScrollMode::None,
            music_file: String::new(),
        };
        let config = GameConfig::default();
        let map_renderer = MapRenderer::new(renderer, &level, &config);
        let camera = ScrollCamera::new(IVec2::new(32, 20), IVec2::new(64, 20), config.tile_size_px);
        (RenderingSystem::new(map_renderer), camera)
    }

    fn sprite_at(scene: &mut Scene, x: f32, frame: u32, layer: RenderLayer) {
        scene
            .build()
            .with(WorldPosition::new(x, 2.0))
            .with(BoundingBox::sized(2.0, 2.0))
            .with(Sprite::new(SpriteSheetId::ITEMS, frame).with_layer(layer));
    }

    #[test]
    fn layers_are_drawn_back_to_front() {
        let mut renderer = RecordingRenderer::new();
        let (mut rendering, camera) = system(&mut renderer);
        let mut scene = Scene::new();
        sprite_at(&mut scene, 1.0, 3, RenderLayer::TopMost);
        sprite_at(&mut scene, 2.0, 1, RenderLayer::BehindMap);
        sprite_at(&mut scene, 3.0, 2, RenderLayer::Objects);

        rendering.update(&mut renderer, &scene, &camera, 0.0);

        let kinds: Vec<&str> = renderer
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Texture { .. } => "backdrop",
                DrawCommand::VertexBuffer { .. } => "tiles",
                DrawCommand::Sprite { frame, .. } => match frame {
                    1 => "behind",
                    2 => "objects",
                    _ => "top",
                },
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["backdrop", "behind", "tiles", "objects", "tiles", "top"]);
    }

    #[test]
    fn hidden_and_offscreen_sprites_are_skipped() {
        let mut renderer = RecordingRenderer::new();
        let (mut rendering, mut camera) = system(&mut renderer);
        let mut scene = Scene::new();
        sprite_at(&mut scene, 4.0, 0, RenderLayer::Objects);
        sprite_at(&mut scene, 50.0, 1, RenderLayer::Objects);
        let hidden = scene
            .build()
            .with(WorldPosition::new(6.0, 2.0))
            .with(Sprite::new(SpriteSheetId::ITEMS, 2))
            .id();
        scene.component_mut::<Sprite>(hidden).visible = false;

        camera.scroll_to(Vec2::new(2.0, 0.0));
        rendering.update(&mut renderer, &scene, &camera, 0.0);

        assert_eq!(
            renderer.sprites(),
            vec![(SpriteSheetId::ITEMS, 0, IVec2::new(16, 16))]
        );
    }
}
