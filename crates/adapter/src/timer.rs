//! Session timer - one tick per second for the live session.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::runtime::RuntimeEvent;
use crate::types::TIMER_TICK_MS;

/// Running tick task for one session. Cancelled on drop.
#[derive(Debug)]
pub struct SessionTimer {
    session_id: u64,
    task: JoinHandle<()>,
}

impl SessionTimer {
    /// Tick every [`TIMER_TICK_MS`]; the first tick comes one period after start.
    pub fn start(
        handle: &Handle,
        session_id: u64,
        events: mpsc::UnboundedSender<RuntimeEvent>,
    ) -> Self {
        Self::with_period(handle, session_id, Duration::from_millis(TIMER_TICK_MS), events)
    }

    pub fn with_period(
        handle: &Handle,
        session_id: u64,
        period: Duration,
        events: mpsc::UnboundedSender<RuntimeEvent>,
    ) -> Self {
        debug!(session_id, "timer started");
        let task = handle.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if events.send(RuntimeEvent::Tick { session_id }).is_err() {
                    break;
                }
            }
        });
        Self { session_id, task }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.task.abort();
        debug!(session_id = self.session_id, "timer stopped");
    }
}
