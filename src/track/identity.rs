use super::model::{Track, non_blank};

/// Decide whether two tracks denote the same recitation.
///
/// Slugs win when both sides carry one; otherwise, or when the slugs differ,
/// the primary keys are compared. Empty keys never match each other.
pub fn same_track(a: &Track, b: &Track) -> bool {
    if let (Some(sa), Some(sb)) = (non_blank(a.slug.as_deref()), non_blank(b.slug.as_deref())) {
        if sa == sb {
            return true;
        }
    }
    !a.id.trim().is_empty() && a.id == b.id
}
