//! The playable media resource driven by the playback controller.
//!
//! The controller never talks to an audio API directly: it goes through the
//! `MediaResource` trait and listens to the `MediaEvent`s the resource
//! publishes on a channel. `RodioMedia` is the production implementation.

mod rodio_backend;
mod source;
mod types;

pub use rodio_backend::RodioMedia;
pub use types::{MediaError, MediaEvent, MediaResource};

#[cfg(test)]
pub(crate) mod fake;
