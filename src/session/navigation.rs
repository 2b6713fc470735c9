//! Next/previous candidate selection for each playback mode.
//!
//! These helpers are pure: they look at the current track, the playlist and
//! the mode and say what the controller should do. Shuffle's "previous" is
//! history based and lives in the controller.

use rand::Rng;

use crate::track::{Track, same_track};

use super::types::PlaybackMode;

/// Outcome of a navigation decision.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Step {
    /// Load this track with autoplay.
    Load(Track),
    /// No candidate: stop playback.
    Stop,
}

fn position_of(current: &Track, playlist: &[Track]) -> Option<usize> {
    playlist.iter().position(|t| same_track(t, current))
}

pub(super) fn next_step<R: Rng + ?Sized>(
    current: &Track,
    playlist: &[Track],
    mode: PlaybackMode,
    rng: &mut R,
) -> Step {
    match mode {
        PlaybackMode::RepeatOne => Step::Load(current.clone()),
        PlaybackMode::Sequence => match position_of(current, playlist) {
            Some(i) if i + 1 < playlist.len() => Step::Load(playlist[i + 1].clone()),
            _ => Step::Stop,
        },
        PlaybackMode::RepeatAll => {
            if playlist.is_empty() {
                return Step::Stop;
            }
            // A current track missing from the playlist restarts it from the top.
            let next = position_of(current, playlist).map_or(0, |i| (i + 1) % playlist.len());
            Step::Load(playlist[next].clone())
        }
        PlaybackMode::Shuffle => {
            if playlist.len() == 1 {
                return Step::Load(playlist[0].clone());
            }
            let candidates: Vec<&Track> = playlist
                .iter()
                .filter(|t| !same_track(t, current))
                .collect();
            if candidates.is_empty() {
                return Step::Stop;
            }
            let pick = rng.random_range(0..candidates.len());
            Step::Load(candidates[pick].clone())
        }
    }
}

/// Index-based previous item for the non-shuffle modes.
pub(super) fn previous_in_playlist(
    current: &Track,
    playlist: &[Track],
    mode: PlaybackMode,
) -> Option<Track> {
    let wrap = mode == PlaybackMode::RepeatAll;
    match position_of(current, playlist) {
        Some(0) if wrap => playlist.last().cloned(),
        Some(0) => None,
        Some(i) => Some(playlist[i - 1].clone()),
        None if wrap => playlist.last().cloned(),
        None => None,
    }
}
