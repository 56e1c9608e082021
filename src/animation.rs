//! Procedural walker animation.
//!
//! [`engine::step`] is a pure tick function over an owned [`state::WalkerState`]. It produces a
//! [`engine::TickFrame`] whose draw list any backend can paint. [`driver::AnimationLoop`] runs the
//! engine on a background thread at a fixed cadence. [`AnimationEngine::run`] drives it offline
//! into a frame sink.
//!
//! [`AnimationEngine::run`]: engine::AnimationEngine::run

pub mod config;
pub mod driver;
pub mod engine;
pub mod pose;
pub mod scene;
pub mod state;
