use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::source::{open_source, seek_position};
use super::types::{MediaError, MediaEvent, MediaResource};

type Subscriber = Arc<Mutex<Option<Sender<MediaEvent>>>>;

/// `MediaResource` backed by the default audio output device.
///
/// A single `Sink` is reused for every source. A monitor thread watches it
/// and publishes `TimeUpdate` and `Ended`; the remaining signals are sent
/// from the calling thread as the actions happen.
pub struct RodioMedia {
    // Dropping the stream silences the sink, so it lives as long as we do.
    _stream: OutputStream,
    sink: Arc<Sink>,
    source: Option<String>,
    subscriber: Subscriber,
    // Set while a started source may still reach its end.
    armed: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    monitor: Option<JoinHandle<()>>,
}

impl RodioMedia {
    /// Open the default output device. `tick` is the monitor interval.
    pub fn open(tick: Duration) -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::Device(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land
        // on top of the terminal status line.
        stream.log_on_drop(false);

        let sink = Arc::new(Sink::connect_new(stream.mixer()));
        sink.pause();

        let subscriber: Subscriber = Arc::new(Mutex::new(None));
        let armed = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(AtomicBool::new(false));

        let monitor = spawn_monitor(
            sink.clone(),
            subscriber.clone(),
            armed.clone(),
            shutdown.clone(),
            tick,
        );

        Ok(Self {
            _stream: stream,
            sink,
            source: None,
            subscriber,
            armed,
            shutdown,
            monitor: Some(monitor),
        })
    }

    fn emit(&self, event: MediaEvent) {
        emit(&self.subscriber, event);
    }

    /// Decode the bound source into the (cleared) sink.
    fn append_bound_source(&self) -> Result<(), MediaError> {
        let url = self.source.as_deref().ok_or(MediaError::NoSource)?;
        let (decoded, duration) = open_source(url)?;
        self.sink.append(decoded);
        if let Some(d) = duration {
            self.emit(MediaEvent::DurationKnown(d.as_secs_f64()));
        }
        Ok(())
    }
}

impl MediaResource for RodioMedia {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn set_source(&mut self, url: &str) {
        self.armed.store(false, Ordering::SeqCst);
        // `clear` drops queued sources and leaves the sink paused.
        self.sink.clear();
        self.source = Some(url.to_string());

        if let Err(e) = self.append_bound_source() {
            // Reported again by the next `play`.
            warn!(url, error = %e, "failed to load source");
        } else {
            debug!(url, "source loaded");
        }
    }

    fn clear_source(&mut self) {
        self.armed.store(false, Ordering::SeqCst);
        self.sink.clear();
        self.source = None;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.source.is_none() {
            return Err(MediaError::NoSource);
        }

        // An empty sink means the source ended (or never loaded): start over.
        let restarting = self.sink.empty();
        if restarting {
            self.append_bound_source()?;
        }

        let was_paused = self.sink.is_paused();
        self.sink.play();
        self.armed.store(true, Ordering::SeqCst);

        if was_paused || restarting {
            self.emit(MediaEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.sink.is_paused() {
            self.sink.pause();
            self.emit(MediaEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused() || self.sink.empty()
    }

    fn seek(&mut self, seconds: f64) {
        if self.source.is_none() {
            return;
        }
        let Some(target) = seek_position(seconds) else {
            warn!(seconds, "seek target out of range");
            return;
        };
        match self.sink.try_seek(target) {
            Ok(()) => self.emit(MediaEvent::TimeUpdate(target.as_secs_f64())),
            Err(e) => warn!(seconds, error = %e, "seek failed"),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut slot) = self.subscriber.lock() {
            *slot = Some(tx);
        }
        rx
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.sink.stop();
        if let Some(h) = self.monitor.take() {
            let _ = h.join();
        }
    }
}

fn emit(subscriber: &Subscriber, event: MediaEvent) {
    if let Ok(mut slot) = subscriber.lock() {
        let disconnected = slot.as_ref().is_some_and(|tx| tx.send(event).is_err());
        if disconnected {
            *slot = None;
        }
    }
}

fn spawn_monitor(
    sink: Arc<Sink>,
    subscriber: Subscriber,
    armed: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::SeqCst) {
            thread::sleep(tick);
            if !armed.load(Ordering::SeqCst) {
                continue;
            }
            if sink.empty() {
                armed.store(false, Ordering::SeqCst);
                emit(&subscriber, MediaEvent::Ended);
            } else if !sink.is_paused() {
                emit(&subscriber, MediaEvent::TimeUpdate(sink.get_pos().as_secs_f64()));
            }
        }
    })
}
