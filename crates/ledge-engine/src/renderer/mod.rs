pub mod camera;
pub mod map_renderer;
pub mod recording;
pub mod traits;
pub mod vertex;

pub use camera::ScrollCamera;
pub use map_renderer::{MapPass, MapRenderer};
pub use recording::{DrawCommand, RecordingRenderer};
pub use traits::{RenderTargetId, Renderer, TextureId, VertexBufferId};
pub use vertex::TileQuad;
