//! Scene sequencing: pre-flight resolution, the run state machine and transcript digests.

/// Stable digests of call transcripts.
pub mod fingerprint;
pub(crate) mod plan;
/// Step dispatch through a renderer.
pub mod runner;
