use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use crate::config;
use crate::media::MediaResource;
use crate::session::{PlaybackController, PlaybackMode, TransportState};
use crate::track::{display_from_fields, format_time};

/// Commands the terminal can issue to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCmd {
    Quit,
    PlayPause,
    Stop,
    Next,
    Prev,
    CycleMode,
    SeekBy(f64),
    VolumeBy(i32),
}

/// Main terminal event loop: drains media signals, redraws the status line
/// and dispatches key presses. Returns `Ok(())` when quit is requested.
pub fn run<M: MediaResource>(
    settings: &config::Settings,
    controller: &mut PlaybackController<M>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout();
    let mut last_line = String::new();
    let poll = Duration::from_millis(settings.controls.poll_ms);

    loop {
        controller.pump_events();

        let line = status_line(controller, &settings.ui);
        if line != last_line {
            execute!(
                stdout,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(&line)
            )?;
            stdout.flush()?;
            last_line = line;
        }

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = command_for_key(key, &settings.controls) {
                    if handle_control_cmd(cmd, controller) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn command_for_key(
    key: KeyEvent,
    controls: &config::ControlsSettings,
) -> Option<ControlCmd> {
    let scrub = controls.scrub_seconds as f64;
    let step = i32::from(controls.volume_step);

    let cmd = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ControlCmd::Quit,
        KeyCode::Char('q') | KeyCode::Esc => ControlCmd::Quit,
        KeyCode::Char(' ') => ControlCmd::PlayPause,
        KeyCode::Char('s') => ControlCmd::Stop,
        KeyCode::Char('n') => ControlCmd::Next,
        KeyCode::Char('p') => ControlCmd::Prev,
        KeyCode::Char('m') => ControlCmd::CycleMode,
        KeyCode::Char('h') | KeyCode::Left => ControlCmd::SeekBy(-scrub),
        KeyCode::Char('l') | KeyCode::Right => ControlCmd::SeekBy(scrub),
        KeyCode::Char('+') | KeyCode::Char('=') => ControlCmd::VolumeBy(step),
        KeyCode::Char('-') => ControlCmd::VolumeBy(-step),
        _ => return None,
    };
    Some(cmd)
}

/// Apply `cmd` to the session. Returns `true` when the loop should exit.
pub(crate) fn handle_control_cmd<M: MediaResource>(
    cmd: ControlCmd,
    controller: &mut PlaybackController<M>,
) -> bool {
    debug!(?cmd, "control");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::PlayPause => {
            if controller.current_track().is_none() {
                if let Some(first) = controller.playlist().first().cloned() {
                    controller.load_track(first, true);
                }
            } else {
                controller.toggle_play();
            }
        }
        ControlCmd::Stop => controller.stop_playback(),
        ControlCmd::Next => controller.play_next(),
        ControlCmd::Prev => controller.play_previous(),
        ControlCmd::CycleMode => controller.cycle_playback_mode(),
        ControlCmd::SeekBy(delta) => {
            if controller.current_track().is_some() {
                controller.seek(controller.position() + delta);
            }
        }
        ControlCmd::VolumeBy(delta) => {
            controller.set_volume(i32::from(controller.volume()) + delta);
        }
    }
    false
}

/// One-line summary of the session, e.g.
/// `[playing] Al-Fatiha  0:12 / 1:05  vol 80  repeat-all`.
pub(crate) fn status_line<M: MediaResource>(
    controller: &PlaybackController<M>,
    ui: &config::UiSettings,
) -> String {
    let state = match controller.transport() {
        TransportState::Idle => "idle",
        TransportState::Playing => "playing",
        TransportState::Paused if controller.has_started() => "paused",
        TransportState::Paused => "ready",
    };
    let mode = match controller.mode() {
        PlaybackMode::Shuffle => format!("shuffle ({} played)", controller.shuffle_history().len()),
        other => other.label().to_string(),
    };

    let Some(track) = controller.current_track() else {
        return format!(
            "[{state}] {} tracks  vol {}  {}",
            controller.playlist().len(),
            controller.volume(),
            mode
        );
    };

    let label = display_from_fields(track, &ui.now_playing_fields, &ui.now_playing_separator);
    format!(
        "[{state}] {label}  {} / {}  vol {}  {}",
        format_time(controller.position()),
        format_time(controller.length()),
        controller.volume(),
        mode
    )
}
