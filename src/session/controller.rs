use std::sync::mpsc::Receiver;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::media::{MediaEvent, MediaResource};
use crate::track::Track;

use super::navigation::{Step, next_step, previous_in_playlist};
use super::types::{PlaybackMode, TransportState};

/// Owner of the playback session.
///
/// All state is private; consumers read it through the accessors and change
/// it only through the operations below. Everything runs on the caller's
/// thread: media signals are applied by `pump_events`.
pub struct PlaybackController<M: MediaResource> {
    media: Option<M>,
    events: Option<Receiver<MediaEvent>>,

    current: Option<Track>,
    playlist: Vec<Track>,
    transport: TransportState,
    has_started: bool,
    position: f64,
    length: f64,
    volume: u8,
    mode: PlaybackMode,
    shuffle_history: Vec<Track>,
    pending_autoplay: bool,

    rng: StdRng,
}

impl<M: MediaResource> PlaybackController<M> {
    /// Create an unbound controller with the given initial volume and mode.
    pub fn new(volume: u8, mode: PlaybackMode) -> Self {
        Self::with_rng(volume, mode, StdRng::from_os_rng())
    }

    /// Like `new`, with an explicit random source for shuffle picks.
    pub fn with_rng(volume: u8, mode: PlaybackMode, rng: StdRng) -> Self {
        Self {
            media: None,
            events: None,
            current: None,
            playlist: Vec::new(),
            transport: TransportState::Idle,
            has_started: false,
            position: 0.0,
            length: 0.0,
            volume: volume.min(100),
            mode,
            shuffle_history: Vec::new(),
            pending_autoplay: false,
            rng,
        }
    }

    /// Bind `media` as the session's resource, replacing any previous one.
    ///
    /// Subscribes to its signals and applies the current volume.
    pub fn bind(&mut self, mut media: M) -> Option<M> {
        let previous = self.unbind();
        self.events = Some(media.subscribe());
        self.media = Some(media);
        self.apply_volume();
        previous
    }

    /// Drop the signal subscription and hand the resource back.
    pub fn unbind(&mut self) -> Option<M> {
        self.events = None;
        self.media.take()
    }

    // Read-only session state.

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn shuffle_history(&self) -> &[Track] {
        &self.shuffle_history
    }

    // Operations.

    /// Replace the playlist. Playback is not affected.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        debug!(count = tracks.len(), "playlist replaced");
        self.playlist = tracks;
    }

    /// Make `track` the current track; start it when `autoplay` is set.
    ///
    /// Re-loading a track whose source is already bound does not reload or
    /// rewind the media resource.
    pub fn load_track(&mut self, track: Track, autoplay: bool) {
        debug!(track = track.identity_key(), autoplay, "load track");
        self.current = Some(track);
        self.pending_autoplay = autoplay;
        self.record_shuffle_history();
        self.apply_track_source();
    }

    /// Pause when playing, otherwise try to start.
    pub fn toggle_play(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if media.is_paused() {
            self.start_playback();
        } else {
            media.pause();
            self.transport = TransportState::Paused;
        }
    }

    /// Jump to `time` seconds, clamped to the known length.
    pub fn seek(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let Some(media) = self.media.as_mut() else {
            return;
        };
        let mut target = time.max(0.0);
        if self.length > 0.0 {
            target = target.min(self.length);
        }
        media.seek(target);
        self.position = target;
    }

    /// Store `value` clamped to `0..=100` and apply it to the resource.
    pub fn set_volume(&mut self, value: i32) {
        self.volume = value.clamp(0, 100) as u8;
        self.apply_volume();
    }

    pub fn play_next(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        match next_step(current, &self.playlist, self.mode, &mut self.rng) {
            Step::Load(track) => {
                info!(mode = self.mode.label(), track = track.identity_key(), "next");
                self.load_track(track, true);
            }
            Step::Stop => {
                info!(mode = self.mode.label(), "no next track, stopping");
                self.stop_playback();
            }
        }
    }

    pub fn play_previous(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };

        if self.mode == PlaybackMode::Shuffle {
            // The last entry is the current track; its predecessor is the target.
            if self.shuffle_history.len() < 2 {
                debug!("shuffle history exhausted, staying on current track");
                return;
            }
            self.shuffle_history.pop();
            if let Some(prev) = self.shuffle_history.last().cloned() {
                info!(track = prev.identity_key(), "previous from shuffle history");
                self.load_track(prev, true);
            }
            return;
        }

        if let Some(prev) = previous_in_playlist(current, &self.playlist, self.mode) {
            info!(mode = self.mode.label(), track = prev.identity_key(), "previous");
            self.load_track(prev, true);
        }
    }

    pub fn set_playback_mode(&mut self, mode: PlaybackMode) {
        debug!(mode = mode.label(), "playback mode");
        self.mode = mode;
        self.record_shuffle_history();
    }

    pub fn cycle_playback_mode(&mut self) {
        self.set_playback_mode(self.mode.cycled());
    }

    /// Reset the session to idle. Playlist and mode are kept.
    pub fn stop_playback(&mut self) {
        if let Some(media) = self.media.as_mut() {
            media.pause();
            media.clear_source();
        }
        discard_pending(self.events.as_ref());
        self.position = 0.0;
        self.length = 0.0;
        self.has_started = false;
        self.transport = TransportState::Idle;
        self.current = None;
        self.pending_autoplay = false;
        self.shuffle_history.clear();
        info!("playback stopped");
    }

    // Media signals.

    /// Apply every signal the resource has published so far, in order.
    pub fn pump_events(&mut self) {
        loop {
            let Some(event) = self.events.as_ref().and_then(|rx| rx.try_recv().ok()) else {
                break;
            };
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        // Late signals from a detached source must not touch an idle session.
        if self.current.is_none() {
            return;
        }
        match event {
            MediaEvent::TimeUpdate(t) => self.position = self.clamp_position(t),
            MediaEvent::DurationKnown(d) => {
                self.length = if d.is_finite() && d > 0.0 { d } else { 0.0 };
                self.position = self.clamp_position(self.position);
            }
            MediaEvent::Ended => {
                self.transport = TransportState::Paused;
                self.play_next();
            }
            MediaEvent::Started => {
                self.transport = TransportState::Playing;
                self.has_started = true;
            }
            MediaEvent::Paused => {
                if self.transport == TransportState::Playing {
                    self.transport = TransportState::Paused;
                }
            }
        }
    }

    // Effects.

    /// Bind the current track's source (when it changed) and start playback
    /// if autoplay is pending or playback was already running.
    fn apply_track_source(&mut self) {
        let Some(url) = self.current.as_ref().and_then(|t| t.source_url()).map(str::to_owned)
        else {
            warn!("current track has no playable source");
            return;
        };
        let Some(media) = self.media.as_mut() else {
            return;
        };

        if media.source() != Some(url.as_str()) {
            debug!(url = %url, "binding source");
            // Signals still queued belong to the previous source.
            discard_pending(self.events.as_ref());
            media.set_source(&url);
            self.position = 0.0;
            self.length = 0.0;
        }

        if self.pending_autoplay || self.transport == TransportState::Playing {
            self.start_playback();
        }
        self.pending_autoplay = false;
    }

    fn record_shuffle_history(&mut self) {
        if self.mode != PlaybackMode::Shuffle {
            return;
        }
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let is_last = self
            .shuffle_history
            .last()
            .is_some_and(|last| last.same_as(current));
        if !is_last {
            self.shuffle_history.push(current.clone());
        }
    }

    /// Fallible start: a refusal leaves the session paused.
    fn start_playback(&mut self) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        match media.play() {
            Ok(()) => {
                if self.current.is_some() {
                    self.transport = TransportState::Playing;
                    self.has_started = true;
                }
            }
            Err(e) => {
                warn!(error = %e, "playback start refused");
                if self.current.is_some() {
                    self.transport = TransportState::Paused;
                }
            }
        }
    }

    fn apply_volume(&mut self) {
        let normalized = (f32::from(self.volume) / 100.0).clamp(0.0, 1.0);
        if let Some(media) = self.media.as_mut() {
            media.set_volume(normalized);
        }
    }

    fn clamp_position(&self, t: f64) -> f64 {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        if self.length > 0.0 { t.min(self.length) } else { t }
    }
}

fn discard_pending(events: Option<&Receiver<MediaEvent>>) {
    if let Some(rx) = events {
        let dropped = rx.try_iter().count();
        if dropped > 0 {
            debug!(dropped, "discarded stale media signals");
        }
    }
}
