use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{PlexusError, PlexusResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::raster::FrameRGBA;

/// x264 speed/size trade-off for one output quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodePreset {
    /// x264 `-preset` name.
    pub speed: &'static str,
    /// Constant rate factor; lower keeps more detail.
    pub crf: u8,
}

impl EncodePreset {
    /// Quick previews.
    pub const DRAFT: Self = Self {
        speed: "veryfast",
        crf: 28,
    };
    /// Default trade-off.
    pub const STANDARD: Self = Self {
        speed: "medium",
        crf: 23,
    };
    /// Thin strokes and small labels stay crisp at the cost of encode time.
    pub const FINAL: Self = Self {
        speed: "slow",
        crf: 18,
    };
}

impl Default for EncodePreset {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Replace an existing file.
    pub overwrite: bool,
    /// Color translucent pixels are flattened over.
    pub background: Rgba8,
    /// Encoder speed and quality.
    pub preset: EncodePreset,
    /// Written to the container's `title` tag.
    pub title: Option<String>,
}

impl FfmpegSinkOpts {
    /// Options writing to `out_path` over a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0, 0, 0),
            preset: EncodePreset::default(),
            title: None,
        }
    }

    /// Flatten over `background` instead.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Encode with `preset`.
    pub fn with_preset(mut self, preset: EncodePreset) -> Self {
        self.preset = preset;
        self
    }

    /// Tag the video with `title`, usually the scene name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Streams flattened frames into a system `ffmpeg` producing an H.264 MP4.
///
/// Nothing is spawned until [`FrameSink::begin`]; [`FrameSink::end`] waits for the encoder and
/// reports its stderr on failure.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    active: Option<Active>,
}

struct Active {
    encoder: Encoder,
    cfg: SinkConfig,
    scratch: Vec<u8>,
    last: Option<FrameIndex>,
    frames: u64,
}

impl FfmpegSink {
    /// Sink for `opts`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self { opts, active: None }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> PlexusResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PlexusError::configuration(
                "mp4 output needs a non-zero canvas",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(PlexusError::configuration(format!(
                "mp4 output needs even dimensions for yuv420p (got {}x{})",
                cfg.width, cfg.height
            )));
        }
        if self.active.is_some() {
            return Err(PlexusError::render("ffmpeg sink already started"));
        }

        let out = &self.opts.out_path;
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        if !self.opts.overwrite && out.exists() {
            return Err(PlexusError::configuration(format!(
                "output file '{}' already exists",
                out.display()
            )));
        }
        if !ffmpeg_available() {
            return Err(PlexusError::render(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        let encoder = Encoder::spawn(&encoder_args(&self.opts, &cfg))?;
        tracing::debug!(
            out = %out.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            preset = self.opts.preset.speed,
            crf = self.opts.preset.crf,
            "ffmpeg started"
        );
        self.active = Some(Active {
            encoder,
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            last: None,
            frames: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PlexusResult<()> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| PlexusError::render("ffmpeg sink not started"))?;
        if active.last.is_some_and(|last| idx <= last) {
            return Err(PlexusError::render(format!(
                "frame {} arrived out of order",
                idx.0
            )));
        }
        if frame.width != active.cfg.width || frame.height != active.cfg.height {
            return Err(PlexusError::render(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, active.cfg.width, active.cfg.height
            )));
        }

        flatten_onto(&mut active.scratch, frame, self.opts.background)?;
        active.encoder.write(&active.scratch)?;
        active.last = Some(idx);
        active.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> PlexusResult<()> {
        let active = self
            .active
            .take()
            .ok_or_else(|| PlexusError::render("ffmpeg sink not started"))?;
        active.encoder.finish()?;
        tracing::debug!(
            out = %self.opts.out_path.display(),
            frames = active.frames,
            "ffmpeg finished"
        );
        Ok(())
    }
}

/// A running `ffmpeg` with a thread draining its stderr so the pipe never fills.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
}

impl Encoder {
    fn spawn(args: &[OsString]) -> PlexusResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PlexusError::render(format!("failed to spawn ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut pipe)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(PlexusError::render("ffmpeg pipes were not opened"));
        };
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            pipe.read_to_end(&mut log)?;
            Ok(log)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> PlexusResult<()> {
        self.stdin
            .write_all(bytes)
            .map_err(|e| PlexusError::render(format!("failed to write frame to ffmpeg: {e}")))
    }

    fn finish(self) -> PlexusResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
        } = self;
        // EOF on stdin lets ffmpeg flush and exit.
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| PlexusError::render(format!("failed to wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| PlexusError::render("ffmpeg stderr reader panicked"))?
            .map_err(|e| PlexusError::render(format!("failed to read ffmpeg stderr: {e}")))?;
        if !status.success() {
            return Err(PlexusError::render(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

fn os(s: impl Into<OsString>) -> OsString {
    s.into()
}

/// Command line for encoding opaque RGBA8 frames from stdin.
fn encoder_args(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Vec<OsString> {
    let mut args = vec![
        os(if opts.overwrite { "-y" } else { "-n" }),
        os("-loglevel"),
        os("error"),
        os("-f"),
        os("rawvideo"),
        os("-pix_fmt"),
        os("rgba"),
        os("-s"),
        os(format!("{}x{}", cfg.width, cfg.height)),
        os("-r"),
        os(format!("{}/{}", cfg.fps.num, cfg.fps.den)),
        os("-i"),
        os("pipe:0"),
        os("-an"),
        os("-c:v"),
        os("libx264"),
        os("-preset"),
        os(opts.preset.speed),
        os("-crf"),
        os(opts.preset.crf.to_string()),
        os("-pix_fmt"),
        os("yuv420p"),
        os("-movflags"),
        os("+faststart"),
    ];
    if let Some(title) = &opts.title {
        args.push(os("-metadata"));
        args.push(os(format!("title={title}")));
    }
    args.push(os(&opts.out_path));
    args
}

/// Composite `frame` over the opaque `bg` into `dst`, leaving every pixel opaque.
///
/// Handles both premultiplied and straight-alpha frames.
fn flatten_onto(dst: &mut [u8], frame: &FrameRGBA, bg: Rgba8) -> PlexusResult<()> {
    if dst.len() != frame.data.len() || !dst.len().is_multiple_of(4) {
        return Err(PlexusError::render(format!(
            "frame holds {} bytes, expected {}",
            frame.data.len(),
            dst.len()
        )));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if frame.premultiplied {
                u16::from(s[c])
            } else {
                mul_div255_u16(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// `true` when `ffmpeg` can be invoked from `PATH`.
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
