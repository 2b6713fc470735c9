//! Turning a source URL into a decoded `rodio` source.
//!
//! Only local files are playable: `file://` URLs and plain paths. Anything
//! else with a scheme is rejected, which the controller treats like any
//! other refused start.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, Source};

use super::types::MediaError;

pub(super) type DecodedSource = Decoder<BufReader<File>>;

pub(super) fn resolve_local_path(url: &str) -> Result<PathBuf, MediaError> {
    if let Some(rest) = url.strip_prefix("file://") {
        return Ok(PathBuf::from(rest));
    }
    if url.contains("://") {
        return Err(MediaError::UnsupportedSource(url.to_string()));
    }
    Ok(PathBuf::from(url))
}

/// Open and decode `url`, returning the source and its duration when the
/// container reports one.
pub(super) fn open_source(url: &str) -> Result<(DecodedSource, Option<Duration>), MediaError> {
    let path = resolve_local_path(url)?;
    let file = File::open(&path).map_err(|source| MediaError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let decoder =
        Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode(e.to_string()))?;
    let duration = decoder.total_duration();
    Ok((decoder, duration))
}

/// Convert a seek target in seconds to a `Duration`. Negative values clamp to
/// zero; NaN, infinities and values past `Duration::MAX` have no position.
pub(super) fn seek_position(seconds: f64) -> Option<Duration> {
    if seconds.is_nan() {
        return None;
    }
    Duration::try_from_secs_f64(seconds.max(0.0)).ok()
}
