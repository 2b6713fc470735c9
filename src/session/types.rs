//! Small session enums shared by the controller and the runtime.

/// Transport state of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Nothing loaded, or playback was stopped.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Playlist navigation policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Play the playlist in order and stop after the last item.
    #[default]
    Sequence,
    /// Wrap around to the start of the playlist.
    RepeatAll,
    /// Replay the current track when it ends.
    RepeatOne,
    /// Pick a random different track each time.
    Shuffle,
}

impl PlaybackMode {
    /// Next mode in the cycle `Sequence -> RepeatAll -> RepeatOne -> Shuffle`.
    pub fn cycled(self) -> Self {
        match self {
            Self::Sequence => Self::RepeatAll,
            Self::RepeatAll => Self::RepeatOne,
            Self::RepeatOne => Self::Shuffle,
            Self::Shuffle => Self::Sequence,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::RepeatAll => "repeat-all",
            Self::RepeatOne => "repeat-one",
            Self::Shuffle => "shuffle",
        }
    }
}
