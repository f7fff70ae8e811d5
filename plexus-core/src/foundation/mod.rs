//! Shared value types and the error taxonomy.

/// Colors, durations, frame rates and canvas sizes.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
/// Small numeric helpers shared by the sequencer and renderers.
pub mod math;
