use bytemuck::{Pod, Zeroable};

/// One tile of a pre-built map block, ready for upload.
/// 8 floats = 32 bytes stride; backends read the slice as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TileQuad {
    /// Destination top-left in pixels, relative to the map origin.
    pub x: f32,
    pub y: f32,
    /// Destination size in pixels.
    pub width: f32,
    pub height: f32,
    /// Source top-left in the tile set texture, in pixels.
    pub src_x: f32,
    pub src_y: f32,
    pub src_width: f32,
    pub src_height: f32,
}

impl TileQuad {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// View a quad slice as raw bytes for upload.
pub fn as_bytes(quads: &[TileQuad]) -> &[u8] {
    bytemuck::cast_slice(quads)
}
