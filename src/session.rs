//! Playback session: what is playing, from which playlist, in which mode.
//!
//! `PlaybackController` owns the session and is the only way to mutate it.
//! It drives one bound `MediaResource` and reacts to the signals that
//! resource publishes.

mod controller;
mod navigation;
mod types;

pub use controller::PlaybackController;
pub use types::{PlaybackMode, TransportState};
