//! Immutable style configuration shared by the model builder and the scenes.

/// Palette and geometry options, loadable from JSON.
pub mod config;
