use serde::{Deserialize, Serialize};

use super::identity::same_track;

/// A single recitation as published by the catalogue.
///
/// Field names follow the public API (`sourate`, `stream_url`, ...) through
/// serde aliases so playlist files can be fed straight from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    #[serde(alias = "sourate", alias = "surah")]
    pub collection: String,
    pub description: Option<String>,
    #[serde(alias = "streamUrl")]
    pub stream_url: Option<String>,
    #[serde(alias = "downloadUrl")]
    pub download_url: Option<String>,
}

impl Track {
    /// The URL to bind to the media resource: the stream URL when present,
    /// otherwise the download URL. Blank values count as absent.
    pub fn source_url(&self) -> Option<&str> {
        non_blank(self.stream_url.as_deref()).or_else(|| non_blank(self.download_url.as_deref()))
    }

    /// The slug when present, otherwise the id.
    pub fn identity_key(&self) -> &str {
        non_blank(self.slug.as_deref()).unwrap_or(&self.id)
    }

    /// True when the track carries a usable identity (non-empty slug or id).
    pub fn has_identity(&self) -> bool {
        !self.identity_key().trim().is_empty()
    }

    pub fn same_as(&self, other: &Track) -> bool {
        same_track(self, other)
    }
}

#[cfg(test)]
impl Track {
    /// Create a track with an id and title and no playable source.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }
}

pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
