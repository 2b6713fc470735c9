use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::model::Track;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid playlist JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Playlist files are either a bare array or the API's `{ "data": [...] }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistDocument {
    Items(Vec<Track>),
    Wrapped {
        #[serde(default)]
        data: Vec<Track>,
    },
}

/// Read and parse a playlist file.
pub fn load_playlist(path: &Path) -> Result<Vec<Track>, PlaylistError> {
    let raw = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let tracks = parse_playlist(&raw)?;
    debug!(path = %path.display(), count = tracks.len(), "playlist loaded");
    Ok(tracks)
}

/// Parse playlist JSON, dropping entries that have no identity.
pub fn parse_playlist(raw: &str) -> Result<Vec<Track>, PlaylistError> {
    let items = match serde_json::from_str::<PlaylistDocument>(raw)? {
        PlaylistDocument::Items(items) => items,
        PlaylistDocument::Wrapped { data } => data,
    };

    Ok(items
        .into_iter()
        .filter(|t| {
            if t.has_identity() {
                true
            } else {
                warn!(title = %t.title, "dropping playlist entry without id or slug");
                false
            }
        })
        .collect())
}
