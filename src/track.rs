//! Recitation tracks as supplied by the catalogue API.
//!
//! A `Track` is an opaque, read-only record from the playback controller's
//! point of view. This module owns the identity rule used everywhere tracks
//! are compared, playlist file loading and a couple of display helpers.

mod display;
mod identity;
mod load;
mod model;

pub use display::{display_from_fields, format_time};
pub use identity::same_track;
pub use load::{PlaylistError, load_playlist};
pub use model::Track;
