use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PlexusError, PlexusResult};
use crate::render::raster::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PlexusResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PlexusResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PlexusResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PlexusResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PlexusResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PlexusResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes each frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
    cfg: Option<SinkConfig>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            cfg: None,
        }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PlexusResult<()> {
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.written = 0;
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PlexusResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PlexusError::render("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PlexusError::render(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        frame.save_png(&self.frame_path(idx))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> PlexusResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
