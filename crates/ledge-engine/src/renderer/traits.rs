//! Renderer trait implemented by the host's drawing backend.
//!
//! All coordinates are pixels in the currently bound render target, origin
//! top-left, y down. Textures, render targets and vertex buffers are opaque
//! handles owned by the backend.

use glam::IVec2;

use super::vertex::TileQuad;
use crate::api::types::{Color, PixelRect};
use crate::assets::loader::Image;
use crate::components::sprite::SpriteSheetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferId(pub u32);

pub trait Renderer {
    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color);

    /// Outline only.
    fn draw_rectangle(&mut self, rect: PixelRect, color: Color);

    fn draw_filled_rectangle(&mut self, rect: PixelRect, color: Color);

    /// Upload an image. The handle stays valid for the renderer's lifetime.
    fn create_texture(&mut self, image: &Image) -> TextureId;

    /// Copy `source` of the texture to `dest` of the bound target.
    fn draw_texture(&mut self, texture: TextureId, source: PixelRect, dest: PixelRect);

    /// Draw one frame of a sprite sheet with its top-left at `position`.
    fn draw_sprite(&mut self, sheet: SpriteSheetId, frame: u32, position: IVec2);

    fn create_render_target(&mut self, width: i32, height: i32) -> RenderTargetId;

    /// Redirect drawing into `target`, or back to the screen with `None`.
    fn set_render_target(&mut self, target: Option<RenderTargetId>);

    /// Draw the contents of a render target into the bound target.
    fn draw_render_target(&mut self, target: RenderTargetId, position: IVec2);

    fn create_vertex_buffer(&mut self, quads: &[TileQuad]) -> VertexBufferId;

    /// Draw a vertex buffer's quads from `texture`, shifted by `offset` pixels.
    fn submit_vertex_buffer(&mut self, buffer: VertexBufferId, texture: TextureId, offset: IVec2);

    fn destroy_vertex_buffer(&mut self, buffer: VertexBufferId);
}
