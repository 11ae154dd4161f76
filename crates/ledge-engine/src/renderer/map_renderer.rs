//! Map drawing.
//!
//! The map is cut into square blocks of `BLOCK_SIZE` tiles. Each block keeps
//! one vertex buffer for its background tiles and one for its foreground
//! tiles, built once and re-submitted every frame; only blocks that touch
//! the viewport are submitted. Animated tiles change every few frames, so
//! they stay out of the buffers and are drawn one by one.
//!
//! Buffers are owned by the backend. Call `rebuild` after the map changed
//! and `destroy` before dropping the renderer.

use glam::{IVec2, Vec2};

use super::camera::ScrollCamera;
use super::traits::{Renderer, TextureId, VertexBufferId};
use super::vertex::TileQuad;
use crate::api::game::GameConfig;
use crate::api::types::{PixelRect, TileRect, TimeDelta};
use crate::assets::loader::Image;
use crate::core::level::LoadedLevel;
use crate::core::map::{BackdropScrollMode, Map, TileIndex, LAYER_COUNT};

/// Edge length of a map block, in tiles.
pub const BLOCK_SIZE: i32 = 32;

/// Frames of an animated tile: the tile itself and the next three indices.
pub const ANIMATION_STATES: u32 = 4;

/// Parallax backdrops move at 1/4 of the map scroll speed.
const PARALLAX_FACTOR: i32 = 4;
const AUTO_SCROLL_HORIZONTAL_PX_PER_SEC: f32 = 30.0;
const AUTO_SCROLL_VERTICAL_PX_PER_SEC: f32 = 60.0;

/// Which part of the map a draw call covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapPass {
    /// Tiles behind sprites.
    Background,
    /// Tiles flagged as foreground, drawn over sprites.
    Foreground,
}

#[derive(Debug)]
struct Block {
    area: TileRect,
    background: Option<VertexBufferId>,
    foreground: Option<VertexBufferId>,
}

#[derive(Debug, Clone, Copy)]
struct AnimatedTile {
    position: IVec2,
    tile: TileIndex,
    fast: bool,
    pass: MapPass,
}

#[derive(Debug, Clone, Copy)]
struct Backdrop {
    texture: TextureId,
    size: IVec2,
}

impl Backdrop {
    fn upload(renderer: &mut dyn Renderer, image: &Image) -> Self {
        Self {
            texture: renderer.create_texture(image),
            size: IVec2::new(image.width as i32, image.height as i32),
        }
    }
}

pub struct MapRenderer {
    tile_set: TextureId,
    tiles_per_row: i32,
    tile_size_px: i32,
    backdrop: Backdrop,
    scroll_mode: BackdropScrollMode,
    blocks: Vec<Block>,
    animated_tiles: Vec<AnimatedTile>,
    animation_interval: f32,
    animation_timer: f32,
    animation_ticks: u32,
    elapsed: f32,
}

impl MapRenderer {
    /// Upload the level's textures and build the map blocks.
    pub fn new(renderer: &mut dyn Renderer, level: &LoadedLevel, config: &GameConfig) -> Self {
        let tile_size_px = config.tile_size_px.max(1);
        let mut map_renderer = Self {
            tile_set: renderer.create_texture(&level.tile_set_image),
            tiles_per_row: (level.tile_set_image.width as i32 / tile_size_px).max(1),
            tile_size_px,
            backdrop: Backdrop::upload(renderer, &level.backdrop_image),
            scroll_mode: level.backdrop_scroll_mode,
            blocks: Vec::new(),
            animated_tiles: Vec::new(),
            animation_interval: config.tile_animation_interval,
            animation_timer: 0.0,
            animation_ticks: 0,
            elapsed: 0.0,
        };
        map_renderer.rebuild(renderer, &level.map);
        map_renderer
    }

    /// Drop all block buffers and build them again from `map`.
    pub fn rebuild(&mut self, renderer: &mut dyn Renderer, map: &Map) {
        self.destroy(renderer);

        for block_y in (0..map.height()).step_by(BLOCK_SIZE as usize) {
            for block_x in (0..map.width()).step_by(BLOCK_SIZE as usize) {
                let area = TileRect::new(
                    block_x,
                    block_y,
                    BLOCK_SIZE.min(map.width() - block_x),
                    BLOCK_SIZE.min(map.height() - block_y),
                );
                let block = self.build_block(renderer, map, area);
                self.blocks.push(block);
            }
        }
    }

    fn build_block(&mut self, renderer: &mut dyn Renderer, map: &Map, area: TileRect) -> Block {
        let mut background = Vec::new();
        let mut foreground = Vec::new();

        for y in area.top()..=area.bottom() {
            for x in area.left()..=area.right() {
                for layer in 0..LAYER_COUNT {
                    let tile = map.tile_at(layer, x, y);
                    if tile == 0 {
                        continue;
                    }
                    let attributes = map.attribute_dict().attributes(tile);
                    let pass = if attributes.foreground {
                        MapPass::Foreground
                    } else {
                        MapPass::Background
                    };

                    if attributes.animated {
                        self.animated_tiles.push(AnimatedTile {
                            position: IVec2::new(x, y),
                            tile,
                            fast: attributes.fast_animation,
                            pass,
                        });
                        continue;
                    }

                    let quad = self.quad(tile, IVec2::new(x, y) * self.tile_size_px);
                    match pass {
                        MapPass::Background => background.push(quad),
                        MapPass::Foreground => foreground.push(quad),
                    }
                }
            }
        }

        let mut upload = |quads: Vec<TileQuad>| {
            if quads.is_empty() {
                None
            } else {
                Some(renderer.create_vertex_buffer(&quads))
            }
        };
        Block {
            area,
            background: upload(background),
            foreground: upload(foreground),
        }
    }

    /// Release every vertex buffer held by this renderer.
    pub fn destroy(&mut self, renderer: &mut dyn Renderer) {
        for block in self.blocks.drain(..) {
            for buffer in [block.background, block.foreground].into_iter().flatten() {
                renderer.destroy_vertex_buffer(buffer);
            }
        }
        self.animated_tiles.clear();
    }

    /// Advance tile animations and backdrop auto-scrolling.
    pub fn update(&mut self, dt: TimeDelta) {
        self.elapsed += dt;
        if self.animation_interval <= 0.0 {
            return;
        }
        self.animation_timer += dt;
        while self.animation_timer >= self.animation_interval {
            self.animation_timer -= self.animation_interval;
            self.animation_ticks = self.animation_ticks.wrapping_add(1);
        }
    }

    /// Tile drawn for an animated tile right now.
    pub fn animated_tile_index(&self, tile: TileIndex, fast: bool) -> TileIndex {
        let ticks = if fast {
            self.animation_ticks
        } else {
            self.animation_ticks / 2
        };
        tile + (ticks % ANIMATION_STATES) as TileIndex
    }

    /// Backdrop scroll position in pixels for the current camera.
    pub fn backdrop_offset(&self, camera: &ScrollCamera) -> IVec2 {
        let scroll_px = camera.offset_px();
        match self.scroll_mode {
            BackdropScrollMode::None => IVec2::ZERO,
            BackdropScrollMode::ParallaxHorizontal => IVec2::new(scroll_px.x / PARALLAX_FACTOR, 0),
            BackdropScrollMode::ParallaxBoth => scroll_px / PARALLAX_FACTOR,
            BackdropScrollMode::AutoHorizontal => {
                IVec2::new((self.elapsed * AUTO_SCROLL_HORIZONTAL_PX_PER_SEC) as i32, 0)
            }
            BackdropScrollMode::AutoVertical => {
                IVec2::new(0, (self.elapsed * AUTO_SCROLL_VERTICAL_PX_PER_SEC) as i32)
            }
        }
    }

    /// Fill the viewport with the backdrop, repeated in both directions.
    pub fn render_backdrop(&self, renderer: &mut dyn Renderer, camera: &ScrollCamera) {
        let size = self.backdrop.size;
        if size.x <= 0 || size.y <= 0 {
            return;
        }
        let viewport_px = (camera.viewport * self.tile_size_px as f32).as_ivec2();
        let offset = self.backdrop_offset(camera);
        let start = IVec2::new(-offset.x.rem_euclid(size.x), -offset.y.rem_euclid(size.y));
        let source = PixelRect::new(0, 0, size.x, size.y);

        let mut y = start.y;
        while y < viewport_px.y {
            let mut x = start.x;
            while x < viewport_px.x {
                renderer.draw_texture(
                    self.backdrop.texture,
                    source,
                    PixelRect::new(x, y, size.x, size.y),
                );
                x += size.x;
            }
            y += size.y;
        }
    }

    /// Draw the visible part of one map pass.
    pub fn render_map(&self, renderer: &mut dyn Renderer, camera: &ScrollCamera, pass: MapPass) {
        let visible = camera.visible_tiles();
        let shift = -camera.offset_px();

        for block in self.blocks.iter().filter(|b| rects_overlap(&b.area, &visible)) {
            let buffer = match pass {
                MapPass::Background => block.background,
                MapPass::Foreground => block.foreground,
            };
            if let Some(buffer) = buffer {
                renderer.submit_vertex_buffer(buffer, self.tile_set, shift);
            }
        }

        for animated in self.animated_tiles.iter().filter(|t| t.pass == pass) {
            let p = animated.position;
            if !rects_overlap(&TileRect::new(p.x, p.y, 1, 1), &visible) {
                continue;
            }
            let tile = self.animated_tile_index(animated.tile, animated.fast);
            let dest = p * self.tile_size_px + shift;
            renderer.draw_texture(
                self.tile_set,
                self.tile_source(tile),
                PixelRect::new(dest.x, dest.y, self.tile_size_px, self.tile_size_px),
            );
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn tile_source(&self, tile: TileIndex) -> PixelRect {
        let index = tile as i32;
        PixelRect::new(
            (index % self.tiles_per_row) * self.tile_size_px,
            (index / self.tiles_per_row) * self.tile_size_px,
            self.tile_size_px,
            self.tile_size_px,
        )
    }

    fn quad(&self, tile: TileIndex, dest_px: IVec2) -> TileQuad {
        let source = self.tile_source(tile);
        let size = Vec2::splat(self.tile_size_px as f32);
        TileQuad {
            x: dest_px.x as f32,
            y: dest_px.y as f32,
            width: size.x,
            height: size.y,
            src_x: source.x as f32,
            src_y: source.y as f32,
            src_width: source.width as f32,
            src_height: source.height as f32,
        }
    }
}

fn rects_overlap(a: &TileRect, b: &TileRect) -> bool {
    a.left() <= b.right() && b.left() <= a.right() && a.top() <= b.bottom() && b.top() <= a.bottom()
}
