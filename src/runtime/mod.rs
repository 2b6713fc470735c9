use std::env;
use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{info, warn};

use crate::media::RodioMedia;
use crate::track::load_playlist;

mod event_loop;
mod logging;
mod settings;
mod startup;


const USAGE: &str = "usage: recital [--print-config] [PLAYLIST.json]";

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let loaded = settings::load_settings();
    let settings = loaded.settings;

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }
    if args.iter().any(|a| a == "--print-config") {
        print!("{}", settings.to_toml_string()?);
        return Ok(());
    }

    logging::init(&settings.logging);
    if let Some(reason) = &loaded.fallback_reason {
        warn!(%reason, "using default settings");
    }
    info!(mode = ?settings.playback.mode, volume = settings.playback.volume, "starting");

    let tracks = match args.iter().find(|a| !a.starts_with('-')) {
        Some(path) => load_playlist(Path::new(path))?,
        None => {
            warn!("no playlist given, starting empty");
            Vec::new()
        }
    };

    let media = RodioMedia::open(Duration::from_millis(settings.audio.tick_ms))?;
    let mut controller = startup::build_controller(&settings, media, tracks);

    let run_result = with_terminal_restored(
        || {
            enable_raw_mode()?;
            let mut out = io::stdout();
            execute!(out, Hide)
        },
        || event_loop::run(&settings, &mut controller),
        || {
            disable_raw_mode()?;
            let mut out = io::stdout();
            execute!(out, Show, Print("\n"))
        },
    );

    controller.stop_playback();
    info!("shutdown");
    run_result
}

/// Run `body` between `enter` and `leave`. `leave` runs whenever `enter` was
/// attempted, even if it failed part way, so raw mode never outlives us.
/// The first error wins.
fn with_terminal_restored<T>(
    enter: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
    leave: impl FnOnce() -> io::Result<()>,
) -> Result<T, Box<dyn std::error::Error>> {
    let result = match enter() {
        Ok(()) => body(),
        Err(e) => Err(e.into()),
    };
    let restored = leave();
    let value = result?;
    restored?;
    Ok(value)
}
