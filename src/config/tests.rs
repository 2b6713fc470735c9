use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::session::PlaybackMode;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_recital_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RECITAL_CONFIG_PATH", "/tmp/recital-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/recital-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("recital")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("recital")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_reference_player() {
    let s = Settings::default();
    assert_eq!(s.playback.volume, 80);
    assert_eq!(s.playback.mode, PlaybackModeSetting::Sequence);
    assert!(s.playback.autoplay);
    assert_eq!(s.controls.scrub_seconds, 10);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
mode = "loop-one"
volume = 35
autoplay = false

[audio]
tick_ms = 100

[controls]
scrub_seconds = 15
volume_step = 10
poll_ms = 20

[ui]
now_playing_fields = ["sourate", "title"]
now_playing_separator = " | "

[logging]
level = "debug"
file = "/tmp/recital-test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RECITAL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RECITAL__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.mode, PlaybackModeSetting::RepeatOne);
    assert_eq!(PlaybackMode::from(s.playback.mode), PlaybackMode::RepeatOne);
    assert_eq!(s.playback.volume, 35);
    assert!(!s.playback.autoplay);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.controls.scrub_seconds, 15);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(s.controls.poll_ms, 20);
    assert_eq!(
        s.ui.now_playing_fields,
        vec![TrackDisplayField::Collection, TrackDisplayField::Title]
    );
    assert_eq!(s.ui.now_playing_separator, " | ");
    assert_eq!(s.logging.level.as_deref(), Some("debug"));
    assert_eq!(s.logging.file.as_deref(), Some("/tmp/recital-test.log"));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 60
mode = "sequence"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RECITAL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RECITAL__PLAYBACK__VOLUME", "20");
    let _g3 = EnvGuard::set("RECITAL__PLAYBACK__MODE", "shuffle");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 20);
    assert_eq!(s.playback.mode, PlaybackModeSetting::Shuffle);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("does-not-exist.toml");
    let _g1 = EnvGuard::set("RECITAL_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RECITAL__PLAYBACK__VOLUME");
    let _g3 = EnvGuard::remove("RECITAL__PLAYBACK__MODE");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 80);
    assert_eq!(s.playback.mode, PlaybackModeSetting::Sequence);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());
}

#[test]
fn default_settings_render_as_loadable_toml() {
    let rendered = Settings::default().to_toml_string().unwrap();
    assert!(rendered.contains("[playback]"));
    assert!(rendered.contains("mode = \"sequence\""));

    let parsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.playback.volume, 80);
    assert_eq!(parsed.ui.now_playing_fields, vec![TrackDisplayField::Title]);
}

#[test]
fn load_from_without_a_file_applies_environment_over_defaults() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RECITAL__CONTROLS__SCRUB_SECONDS", "30");
    let _g2 = EnvGuard::remove("RECITAL__PLAYBACK__VOLUME");
    let _g3 = EnvGuard::remove("RECITAL__PLAYBACK__MODE");

    let s = Settings::load_from(None).unwrap();
    assert_eq!(s.controls.scrub_seconds, 30);
    assert_eq!(s.playback.volume, 80);
    assert_eq!(s.controls.volume_step, 5);
}
