use serde::{Deserialize, Serialize};

use crate::session::PlaybackMode;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/recital/config.toml` or `~/.config/recital/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RECITAL__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Navigation mode the session starts in.
    pub mode: PlaybackModeSetting,
    /// Initial volume, 0-100.
    pub volume: u8,
    /// Start the first playlist item on launch.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlaybackModeSetting::Sequence,
            volume: 80,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the output monitor publishes position updates (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to seek when pressing `h` / `l`.
    pub scrub_seconds: u64,
    /// Volume change when pressing `+` / `-`.
    pub volume_step: u8,
    /// Input poll timeout of the event loop (milliseconds).
    pub poll_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 10,
            volume_step: 5,
            poll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Which track fields make up the now-playing label, and in what order.
    ///
    /// Example: ["collection", "title"]
    pub now_playing_fields: Vec<TrackDisplayField>,
    /// Separator used to join `now_playing_fields`.
    pub now_playing_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            now_playing_fields: vec![TrackDisplayField::Title],
            now_playing_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "recital=debug").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Log file path. Defaults to `recital.log` in the system temp directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackModeSetting {
    #[serde(alias = "seq", alias = "no-loop", alias = "no_loop", alias = "in-order")]
    Sequence,
    #[serde(
        alias = "repeat_all",
        alias = "repeatall",
        alias = "loop-all",
        alias = "loop_all"
    )]
    RepeatAll,
    #[serde(
        alias = "repeat_one",
        alias = "repeatone",
        alias = "loop-one",
        alias = "loop_one"
    )]
    RepeatOne,
    #[serde(alias = "random")]
    Shuffle,
}

impl From<PlaybackModeSetting> for PlaybackMode {
    fn from(setting: PlaybackModeSetting) -> Self {
        match setting {
            PlaybackModeSetting::Sequence => PlaybackMode::Sequence,
            PlaybackModeSetting::RepeatAll => PlaybackMode::RepeatAll,
            PlaybackModeSetting::RepeatOne => PlaybackMode::RepeatOne,
            PlaybackModeSetting::Shuffle => PlaybackMode::Shuffle,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    #[serde(alias = "sourate", alias = "surah")]
    Collection,
    Slug,
    Id,
}
