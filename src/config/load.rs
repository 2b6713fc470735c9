use std::env;
use std::path::{Path, PathBuf};

use super::schema::Settings;

/// Environment variable prefix; `RECITAL__PLAYBACK__MODE` sets `playback.mode`.
const ENV_PREFIX: &str = "RECITAL";
/// Explicit config file location, overriding the XDG lookup.
const CONFIG_PATH_VAR: &str = "RECITAL_CONFIG_PATH";

impl Settings {
    /// Layer the config file found by `resolve_config_path` and the
    /// environment over the struct defaults.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Like `load`, reading the file at `path` when given. A missing file
    /// is not an error; the defaults and environment still apply.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(p) = path {
            builder = builder.add_source(::config::File::from(p).required(false));
        }

        let env = ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        builder.add_source(env).build()?.try_deserialize()
    }

    /// Reject values the player cannot run with: a volume above 100, a
    /// zero monitor tick, or a zero volume step.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.volume > 100 {
            return Err("playback.volume must be <= 100".to_string());
        }
        if self.audio.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        if self.controls.volume_step == 0 {
            return Err("controls.volume_step must be >= 1".to_string());
        }
        Ok(())
    }

    /// Render the settings as TOML, suitable as a starting `config.toml`.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// The config file to read: `RECITAL_CONFIG_PATH` when set, otherwise the
/// XDG location.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `recital/config.toml` under `$XDG_CONFIG_HOME`, falling back to
/// `~/.config` when that is unset.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("recital").join("config.toml"))
}
