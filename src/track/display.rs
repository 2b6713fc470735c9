use crate::config::TrackDisplayField;

use super::model::Track;

/// Render seconds as `m:ss`. Negative and non-finite values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Build a label for `track` from the configured `fields`, joined by `sep`.
///
/// Blank fields are skipped; when nothing remains the title is used as is.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for f in fields {
        let value = match f {
            TrackDisplayField::Title => Some(track.title.as_str()),
            TrackDisplayField::Collection => Some(track.collection.as_str()),
            TrackDisplayField::Slug => track.slug.as_deref(),
            TrackDisplayField::Id => Some(track.id.as_str()),
        };
        if let Some(v) = value.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(v);
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
