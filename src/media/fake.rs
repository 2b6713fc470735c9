//! Recording `MediaResource` used by unit tests across the crate.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use super::types::{MediaError, MediaEvent, MediaResource};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetSource(String),
    ClearSource,
    Play,
    Pause,
    Seek(f64),
}

#[derive(Debug)]
pub(crate) struct FakeState {
    pub(crate) source: Option<String>,
    pub(crate) paused: bool,
    pub(crate) ended: bool,
    pub(crate) refuse_play: bool,
    pub(crate) volume: Option<f32>,
    pub(crate) calls: Vec<Call>,
    pub(crate) tx: Option<Sender<MediaEvent>>,
}

impl FakeState {
    pub(crate) fn emit(&self, event: MediaEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    /// Simulate the source playing through to its end.
    pub(crate) fn finish(&mut self) {
        self.ended = true;
        self.paused = true;
        self.emit(MediaEvent::Ended);
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub(crate) fn set_source_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::SetSource(_)))
            .count()
    }
}

/// Recording `MediaResource` whose state stays observable from the test.
pub(crate) struct FakeMedia {
    source: Option<String>,
    state: Rc<RefCell<FakeState>>,
}

impl FakeMedia {
    pub(crate) fn new() -> (Self, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState {
            source: None,
            paused: true,
            ended: false,
            refuse_play: false,
            volume: None,
            calls: Vec::new(),
            tx: None,
        }));
        (
            Self {
                source: None,
                state: state.clone(),
            },
            state,
        )
    }
}

impl MediaResource for FakeMedia {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::SetSource(url.to_string()));
        s.source = Some(url.to_string());
        s.paused = true;
        s.ended = false;
    }

    fn clear_source(&mut self) {
        self.source = None;
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::ClearSource);
        s.source = None;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Play);
        if s.refuse_play {
            return Err(MediaError::Decode("refused".into()));
        }
        if s.source.is_none() {
            return Err(MediaError::NoSource);
        }
        s.ended = false;
        if s.paused {
            s.paused = false;
            s.emit(MediaEvent::Started);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Pause);
        if !s.paused {
            s.paused = true;
            s.emit(MediaEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        let s = self.state.borrow();
        s.paused || s.ended
    }

    fn seek(&mut self, seconds: f64) {
        self.state.borrow_mut().calls.push(Call::Seek(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = Some(volume);
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        let (tx, rx) = mpsc::channel();
        self.state.borrow_mut().tx = Some(tx);
        rx
    }
}
