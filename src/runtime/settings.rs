use crate::config::Settings;

/// Settings for this run, plus why the defaults were used if they were.
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback_reason: Option<String>,
}

/// Load and validate settings. A broken config never stops the player: the
/// problem is reported on stderr now and kept for the log once it exists.
pub fn load_settings() -> LoadedSettings {
    let outcome = Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| {
            s.validate()
                .map(|()| s)
                .map_err(|msg| format!("invalid config: {msg}"))
        });

    match outcome {
        Ok(settings) => LoadedSettings {
            settings,
            fallback_reason: None,
        },
        Err(reason) => {
            eprintln!("recital: {reason}, using defaults");
            LoadedSettings {
                settings: Settings::default(),
                fallback_reason: Some(reason),
            }
        }
    }
}
