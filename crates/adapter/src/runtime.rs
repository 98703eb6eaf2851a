//! Adapter runtime integration.
//!
//! Bridges the sync game loop with async puzzle loading and the session timer.
//! The loop calls [`Adapter::try_recv`] every frame and feeds the events into
//! the session host.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::ClientConfig;
use crate::core::{LoadError, Puzzle, SessionHost, SessionState};
use crate::protocol::GenerateRequest;
use crate::source::PuzzleSource;
use crate::timer::SessionTimer;

/// Event delivered to the game loop.
#[derive(Debug)]
pub enum RuntimeEvent {
    /// A puzzle request finished.
    PuzzleLoaded {
        request_id: u64,
        result: Result<Puzzle, LoadError>,
    },
    /// One second of play for `session_id`.
    Tick { session_id: u64 },
}

/// Running adapter instance.
pub struct Adapter {
    rt: Runtime,
    source: Arc<dyn PuzzleSource>,
    event_tx: mpsc::UnboundedSender<RuntimeEvent>,
    event_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    timer: Option<SessionTimer>,
}

impl Adapter {
    pub fn new(source: Arc<dyn PuzzleSource>) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            rt,
            source,
            event_tx,
            event_rx,
            timer: None,
        })
    }

    /// Start the adapter with the source named by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let source = config.source()?;
        info!(source = %source.describe(), "puzzle source ready");
        Self::new(source)
    }

    pub fn source(&self) -> &dyn PuzzleSource {
        self.source.as_ref()
    }

    /// Fetch a puzzle in the background; the result arrives as
    /// [`RuntimeEvent::PuzzleLoaded`] tagged with `request_id`.
    pub fn request_puzzle(&self, request_id: u64, request: GenerateRequest) {
        let fetch = self.source.fetch(request);
        let tx = self.event_tx.clone();
        self.rt.spawn(async move {
            let result = fetch.await;
            let _ = tx.send(RuntimeEvent::PuzzleLoaded { request_id, result });
        });
    }

    /// Run the timer for `session_id`, replacing any running timer.
    pub fn start_timer(&mut self, session_id: u64) {
        self.stop_timer();
        self.timer = Some(SessionTimer::start(
            self.rt.handle(),
            session_id,
            self.event_tx.clone(),
        ));
    }

    pub fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Session the running timer belongs to.
    pub fn timer_session(&self) -> Option<u64> {
        self.timer.as_ref().map(SessionTimer::session_id)
    }

    pub fn try_recv(&mut self) -> Option<RuntimeEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Feed every pending event into `host`, then bring the timer in line
    /// with it.
    pub fn drain_into(&mut self, host: &mut SessionHost) {
        while let Some(event) = self.try_recv() {
            match event {
                RuntimeEvent::PuzzleLoaded { request_id, result } => {
                    host.finish_load(request_id, result);
                }
                RuntimeEvent::Tick { session_id } => {
                    host.tick(session_id);
                }
            }
        }
        self.sync_timer(host);
    }

    /// Run the timer for the live session while it is unfinished, and for
    /// nothing otherwise.
    pub fn sync_timer(&mut self, host: &SessionHost) {
        let live = host
            .session()
            .filter(|s| !s.finished())
            .map(SessionState::session_id);
        if self.timer_session() == live {
            return;
        }
        match live {
            Some(session_id) => self.start_timer(session_id),
            None => self.stop_timer(),
        }
    }
}
