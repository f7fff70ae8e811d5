//! Frame sinks.
//!
//! Sinks consume rasterized frames in timeline order and are fed by `RenderSession::render_to`.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// The frame sink trait and the built-in sinks.
pub mod sink;
