//! Media resource contract: the actions the controller invokes and the
//! signals it subscribes to.

use std::sync::mpsc::Receiver;

use thiserror::Error;

/// Signals published by a media resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position moved (seconds).
    TimeUpdate(f64),
    /// Total duration became known (seconds).
    DurationKnown(f64),
    /// The bound source played through to its end.
    Ended,
    /// Playback started, whoever initiated it.
    Started,
    /// Playback paused.
    Paused,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("audio output unavailable: {0}")]
    Device(String),
    #[error("no source is bound")]
    NoSource,
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode audio: {0}")]
    Decode(String),
}

/// A single playable resource exclusively owned by the controller.
pub trait MediaResource {
    /// The currently bound source URL, if any.
    fn source(&self) -> Option<&str>;

    /// Bind `url` and begin loading it. Load failures surface on the next `play`.
    fn set_source(&mut self, url: &str);

    /// Detach the bound source.
    fn clear_source(&mut self);

    /// Attempt to start playback.
    ///
    /// Calling this on a resource that already reached its end restarts it
    /// from the beginning; calling it while playing does nothing.
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Jump to `seconds` from the start of the source.
    fn seek(&mut self, seconds: f64);

    /// Apply a normalized volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Open the signal channel. A later call replaces the previous subscriber.
    fn subscribe(&mut self) -> Receiver<MediaEvent>;
}
