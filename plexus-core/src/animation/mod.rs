//! Rate functions and staggered timing.

/// Rate functions mapping normalized progress.
pub mod ease;
/// Lagged-start timing for staggered multi-element animations.
pub mod lag;
