/// Render layer. Controls where a sprite lands relative to the map.
///
/// Layers are drawn back-to-front: `BehindMap` before the background tiles,
/// `Objects` between background and foreground tiles, `TopMost` last.
/// Default layer is `Objects`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RenderLayer {
    BehindMap,
    #[default]
    Objects,
    TopMost,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 3] = [
        RenderLayer::BehindMap,
        RenderLayer::Objects,
        RenderLayer::TopMost,
    ];
}
