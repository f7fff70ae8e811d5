use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    encode::{
        ffmpeg::EncodePreset,
        sink::{FrameSink, SinkConfig},
    },
    foundation::core::{Canvas, Fps, FrameIndex, Rgba8, Seconds},
    foundation::error::{PlexusError, PlexusResult},
    render::{
        raster::{FrameRGBA, Rasterizer},
        timeline::Timeline,
    },
    scene::step::Scene,
    sequence::runner::{RunReport, play_scene},
    style::config::StyleConfig,
};

/// Output resolution and frame rate preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854x480 at 15 fps.
    Low,
    /// 1280x720 at 30 fps.
    Medium,
    /// 1920x1080 at 60 fps.
    #[default]
    High,
}

impl Quality {
    /// Every preset, lowest first.
    pub const ALL: [Quality; 3] = [Quality::Low, Quality::Medium, Quality::High];

    /// Output canvas. Widths are even so yuv420p encoding accepts them.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Quality::Low => (854, 480),
            Quality::Medium => (1280, 720),
            Quality::High => (1920, 1080),
        };
        Canvas { width, height }
    }

    /// Output frame rate.
    pub fn fps(self) -> Fps {
        let num = match self {
            Quality::Low => 15,
            Quality::Medium => 30,
            Quality::High => 60,
        };
        Fps { num, den: 1 }
    }

    /// x264 settings for MP4 output at this quality.
    pub fn encode_preset(self) -> EncodePreset {
        match self {
            Quality::Low => EncodePreset::DRAFT,
            Quality::Medium => EncodePreset::STANDARD,
            Quality::High => EncodePreset::FINAL,
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        })
    }
}

impl std::str::FromStr for Quality {
    type Err = PlexusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" | "480p" => Ok(Quality::Low),
            "medium" | "m" | "720p" => Ok(Quality::Medium),
            "high" | "h" | "1080p" => Ok(Quality::High),
            other => Err(PlexusError::configuration(format!(
                "unknown quality '{other}' (expected low, medium or high)"
            ))),
        }
    }
}

/// Options for [`RenderSession`].
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Extra directory of font files.
    pub font_dir: Option<PathBuf>,
    /// Rasterize frames on the rayon pool, a chunk at a time.
    pub parallel: bool,
    /// Frames per chunk in parallel mode.
    pub chunk_size: usize,
}

impl RenderSessionOpts {
    /// Options matching `quality`.
    pub fn from_quality(quality: Quality) -> Self {
        Self {
            canvas: quality.canvas(),
            fps: quality.fps(),
            font_dir: None,
            parallel: false,
            chunk_size: 32,
        }
    }
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self::from_quality(Quality::default())
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Scene time covered.
    pub duration: Seconds,
}

/// A scene played once onto a timeline, ready to be sampled into frames.
///
/// Construction runs the sequencer to completion; frames are then rendered on demand, so a
/// still and a full video come from the same transcript.
#[derive(Debug)]
pub struct RenderSession {
    timeline: Timeline,
    report: RunReport,
    background: Rgba8,
    raster: Rasterizer,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Play `scene` under `style` onto a fresh timeline.
    pub fn new(scene: &Scene, style: &StyleConfig, opts: RenderSessionOpts) -> PlexusResult<Self> {
        Fps::new(opts.fps.num, opts.fps.den)?;
        if opts.canvas.width == 0 || opts.canvas.height == 0 {
            return Err(PlexusError::configuration(
                "session canvas width/height must be non-zero",
            ));
        }
        let mut timeline = Timeline::new();
        let report = play_scene(scene, style, &mut timeline)?;

        let mut raster = Rasterizer::new();
        if let Some(dir) = &opts.font_dir {
            raster = raster.with_font_dir(dir);
        }
        tracing::debug!(
            scene = %report.scene,
            calls = report.calls,
            duration = report.duration.0,
            width = opts.canvas.width,
            height = opts.canvas.height,
            "render session ready"
        );
        Ok(Self {
            timeline,
            report,
            background: style.palette.background,
            raster,
            opts,
        })
    }

    /// Summary of the run that filled the timeline.
    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// The recorded timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.opts.canvas
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.opts.fps
    }

    /// Scene length.
    pub fn duration(&self) -> Seconds {
        self.timeline.duration()
    }

    /// Frames needed to cover the scene, first and last included.
    pub fn frame_count(&self) -> u64 {
        self.opts.fps.frames_for(self.duration())
    }

    /// Rasterize the stage at scene time `t`.
    pub fn frame_at(&self, t: Seconds) -> PlexusResult<FrameRGBA> {
        if !t.0.is_finite() || t.0 < 0.0 || t.0 > self.duration().0 {
            return Err(PlexusError::configuration(format!(
                "frame time {}s is outside the scene (0..={}s)",
                t.0,
                self.duration().0
            )));
        }
        let stage = self.timeline.sample(t)?;
        self.raster
            .render_stage(&stage, self.opts.canvas, self.background)
    }

    /// Rasterize frame `idx`; the last frame is clamped to the scene's end.
    pub fn render_frame(&self, idx: FrameIndex) -> PlexusResult<FrameRGBA> {
        if idx.0 >= self.frame_count() {
            return Err(PlexusError::configuration(format!(
                "frame {} is outside the scene ({} frames)",
                idx.0,
                self.frame_count()
            )));
        }
        let t = self.opts.fps.frame_time(idx.0);
        self.frame_at(Seconds(t.0.min(self.duration().0)))
    }

    /// The scene's last frame.
    pub fn final_frame(&self) -> PlexusResult<FrameRGBA> {
        self.frame_at(self.duration())
    }

    /// Render every frame into `sink`, in order.
    #[tracing::instrument(level = "debug", skip_all, fields(scene = %self.report.scene))]
    pub fn render_to(&self, sink: &mut dyn FrameSink) -> PlexusResult<RenderStats> {
        let frames = self.frame_count();
        sink.begin(SinkConfig {
            width: self.opts.canvas.width,
            height: self.opts.canvas.height,
            fps: self.opts.fps,
        })?;
        if self.opts.parallel {
            // Chunks bound memory; frames within a chunk are pushed in index order.
            let chunk = self.opts.chunk_size.max(1) as u64;
            let mut start = 0;
            while start < frames {
                let end = (start + chunk).min(frames);
                let rendered = (start..end)
                    .into_par_iter()
                    .map(|i| self.render_frame(FrameIndex(i)))
                    .collect::<PlexusResult<Vec<_>>>()?;
                for (i, frame) in (start..end).zip(&rendered) {
                    sink.push_frame(FrameIndex(i), frame)?;
                }
                tracing::debug!(frame = end, of = frames, "chunk rendered");
                start = end;
            }
        } else {
            for i in 0..frames {
                let idx = FrameIndex(i);
                let frame = self.render_frame(idx)?;
                sink.push_frame(idx, &frame)?;
                if i % 100 == 0 {
                    tracing::debug!(frame = i, of = frames, "rendering");
                }
            }
        }
        sink.end()?;
        Ok(RenderStats {
            frames,
            duration: self.duration(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
