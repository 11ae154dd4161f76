//! A renderer that records draw calls instead of drawing.
//! Used by headless hosts and tests.

use std::collections::HashSet;

use glam::IVec2;

use super::traits::{Renderer, RenderTargetId, TextureId, VertexBufferId};
use super::vertex::{as_bytes, TileQuad};
use crate::api::types::{Color, PixelRect};
use crate::assets::loader::Image;
use crate::components::sprite::SpriteSheetId;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: IVec2,
        to: IVec2,
        color: Color,
    },
    Rectangle {
        rect: PixelRect,
        color: Color,
    },
    FilledRectangle {
        rect: PixelRect,
        color: Color,
    },
    Texture {
        texture: TextureId,
        source: PixelRect,
        dest: PixelRect,
    },
    Sprite {
        sheet: SpriteSheetId,
        frame: u32,
        position: IVec2,
    },
    SetRenderTarget(Option<RenderTargetId>),
    RenderTarget {
        target: RenderTargetId,
        position: IVec2,
    },
    VertexBuffer {
        buffer: VertexBufferId,
        texture: TextureId,
        offset: IVec2,
    },
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
    next_id: u32,
    live_buffers: HashSet<VertexBufferId>,
    /// Bytes uploaded through `create_vertex_buffer` so far.
    pub uploaded_bytes: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn lines_with_color(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color: found, .. } if *found == color))
            .count()
    }

    pub fn rectangles_with_color(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rectangle { color: found, .. } if *found == color))
            .count()
    }

    pub fn filled_rectangles_with_color(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FilledRectangle { color: found, .. } if *found == color))
            .count()
    }

    pub fn sprites(&self) -> Vec<(SpriteSheetId, u32, IVec2)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Sprite {
                    sheet,
                    frame,
                    position,
                } => Some((sheet, frame, position)),
                _ => None,
            })
            .collect()
    }

    pub fn live_vertex_buffers(&self) -> usize {
        self.live_buffers.len()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_rectangle(&mut self, rect: PixelRect, color: Color) {
        self.commands.push(DrawCommand::Rectangle { rect, color });
    }

    fn draw_filled_rectangle(&mut self, rect: PixelRect, color: Color) {
        self.commands.push(DrawCommand::FilledRectangle { rect, color });
    }

    fn create_texture(&mut self, _image: &Image) -> TextureId {
        TextureId(self.next_id())
    }

    fn draw_texture(&mut self, texture: TextureId, source: PixelRect, dest: PixelRect) {
        self.commands.push(DrawCommand::Texture {
            texture,
            source,
            dest,
        });
    }

    fn draw_sprite(&mut self, sheet: SpriteSheetId, frame: u32, position: IVec2) {
        self.commands.push(DrawCommand::Sprite {
            sheet,
            frame,
            position,
        });
    }

    fn create_render_target(&mut self, _width: i32, _height: i32) -> RenderTargetId {
        RenderTargetId(self.next_id())
    }

    fn set_render_target(&mut self, target: Option<RenderTargetId>) {
        self.commands.push(DrawCommand::SetRenderTarget(target));
    }

    fn draw_render_target(&mut self, target: RenderTargetId, position: IVec2) {
        self.commands
            .push(DrawCommand::RenderTarget { target, position });
    }

    fn create_vertex_buffer(&mut self, quads: &[TileQuad]) -> VertexBufferId {
        self.uploaded_bytes += as_bytes(quads).len();
        let id = VertexBufferId(self.next_id());
        self.live_buffers.insert(id);
        id
    }

    fn submit_vertex_buffer(&mut self, buffer: VertexBufferId, texture: TextureId, offset: IVec2) {
        self.commands.push(DrawCommand::VertexBuffer {
            buffer,
            texture,
            offset,
        });
    }

    fn destroy_vertex_buffer(&mut self, buffer: VertexBufferId) {
        self.live_buffers.remove(&buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_color() {
        let mut r = RecordingRenderer::new();
        let yellow = Color::new(255, 255, 0, 255);
        r.draw_line(IVec2::ZERO, IVec2::new(8, 0), yellow);
        r.draw_line(IVec2::ZERO, IVec2::new(0, 8), Color::WHITE);
        r.draw_rectangle(PixelRect::new(0, 0, 8, 8), yellow);
        assert_eq!(r.lines_with_color(yellow), 1);
        assert_eq!(r.rectangles_with_color(yellow), 1);
        assert_eq!(r.filled_rectangles_with_color(yellow), 0);
    }

    #[test]
    fn tracks_vertex_buffer_lifetime() {
        let mut r = RecordingRenderer::new();
        let a = r.create_vertex_buffer(&[TileQuad::default(); 2]);
        let b = r.create_vertex_buffer(&[]);
        assert_ne!(a, b);
        assert_eq!(r.live_vertex_buffers(), 2);
        assert_eq!(r.uploaded_bytes, 2 * TileQuad::STRIDE_BYTES);
        r.destroy_vertex_buffer(a);
        assert_eq!(r.live_vertex_buffers(), 1);
    }
}
