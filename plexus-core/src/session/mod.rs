//! Scene-to-artifact sessions.

/// Quality presets and the frame-producing session.
pub mod render_session;
