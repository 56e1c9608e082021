//! Frame sinks.
//!
//! Sinks consume rendered frames in tick order. They are fed by
//! [`crate::animation::engine::AnimationEngine::run`].

/// `ffmpeg`-based MP4 output through the system binary.
pub mod ffmpeg;
/// PNG image sequences.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
