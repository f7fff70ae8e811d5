/// `RendererPort` and the call/request vocabulary.
pub mod port;
/// SVG rasterization into RGBA frames.
pub mod raster;
/// In-memory renderer.
pub mod recording;
/// Sprites drawn at one instant.
pub mod stage;
/// Stage to SVG composition.
pub mod svg;
/// Time-addressable renderer.
pub mod timeline;
