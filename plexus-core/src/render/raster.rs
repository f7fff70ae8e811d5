use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{PlexusError, PlexusResult},
    render::{stage::Stage, svg::stage_to_svg},
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Write the frame as a PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> PlexusResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.straight_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Turns stages into pixels through SVG.
///
/// The font database is loaded once and shared by every frame.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("faces", &self.fontdb.faces().count())
            .finish()
    }
}

impl Rasterizer {
    /// Rasterizer using the system fonts.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.faces().count(), "font database loaded");
        Self { fontdb: Arc::new(db) }
    }

    /// Also load every `.ttf`, `.otf` and `.ttc` file in `dir`.
    pub fn with_font_dir(mut self, dir: &Path) -> Self {
        let Ok(rd) = std::fs::read_dir(dir) else {
            return self;
        };
        let db = Arc::make_mut(&mut self.fontdb);
        for entry in rd.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
                .unwrap_or(false);
            if is_font && db.load_font_file(&path).is_err() {
                tracing::warn!(path = %path.display(), "skipping unreadable font");
            }
        }
        self
    }

    /// Rasterize an SVG document into a `canvas`-sized frame.
    pub fn render_svg(&self, svg: &str, canvas: Canvas) -> PlexusResult<FrameRGBA> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(PlexusError::render("canvas width/height must be non-zero"));
        }
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| PlexusError::render(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| PlexusError::render("failed to allocate frame pixmap"))?;
        let sx = (canvas.width as f32) / tree.size().width();
        let sy = (canvas.height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }

    /// Draw `stage` over `background`.
    pub fn render_stage(
        &self,
        stage: &Stage,
        canvas: Canvas,
        background: Rgba8,
    ) -> PlexusResult<FrameRGBA> {
        self.render_svg(&stage_to_svg(stage, canvas, background), canvas)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
