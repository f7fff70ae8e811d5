//! Plexus is an animated anatomical-diagram engine for the brachial plexus.
//!
//! A fixed graph model (roots, trunks, divisions, cords, branches) is driven by hand-authored
//! scene scripts through a renderer port. The public API is run-oriented:
//!
//! - Pick a [`SceneKind`] and build its [`Scene`] under a [`StyleConfig`]
//! - Play it through any [`RendererPort`] with [`play_scene`] or a [`SceneRun`]
//! - Or create a [`RenderSession`] and stream frames into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// The anatomical graph model.
pub mod anatomy;
/// Rate functions and staggered timing.
pub mod animation;
/// Frame sinks.
pub mod encode;
/// The renderer port and its implementations.
pub mod render;
/// Scene scripts.
pub mod scene;
/// Scene sequencing.
pub mod sequence;
/// Frame-producing sessions.
pub mod session;
/// Style configuration.
pub mod style;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgba8, Seconds, Vec2};
pub use crate::foundation::error::{PlexusError, PlexusResult};

pub use crate::anatomy::model::{ElementKey, Model, Variant};
pub use crate::anatomy::tier::Tier;
pub use crate::anatomy::topology::{build_model, groups};
pub use crate::anatomy::visual::{Mutation, VisualState};
pub use crate::encode::ffmpeg::{EncodePreset, FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::port::{Ack, RenderCall, RenderRequest, RendererPort, TimedRequest};
pub use crate::render::raster::{FrameRGBA, Rasterizer};
pub use crate::render::recording::RecordingRenderer;
pub use crate::render::timeline::Timeline;
pub use crate::scene::library::SceneKind;
pub use crate::scene::step::Scene;
pub use crate::sequence::fingerprint::TranscriptFingerprint;
pub use crate::sequence::runner::{RunReport, RunState, SceneRun, play_scene, run_scene};
pub use crate::session::render_session::{Quality, RenderSession, RenderSessionOpts, RenderStats};
pub use crate::style::config::StyleConfig;
