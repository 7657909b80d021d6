//! Frame clock that drives animations from a tokio interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::observable::ObservableHome;

/// Background task ticking an [`ObservableHome`] once per frame.
///
/// The task exits when the home is disposed. Dropping the clock aborts it.
pub struct FrameClock {
    handle: JoinHandle<()>,
}

impl FrameClock {
    /// Spawn on the current tokio runtime.
    pub fn spawn(home: Arc<ObservableHome>, frame_interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(frame_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = ticker.tick().await;

            loop {
                let now = ticker.tick().await;
                let dt = now - last;
                last = now;

                if home.is_disposed() {
                    tracing::debug!("Home disposed, stopping frame clock");
                    break;
                }
                if home.is_animating() {
                    home.tick(dt);
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the clock and wait for the task to exit.
    pub async fn stop(mut self) {
        self.handle.abort();
        // Cancelled is the expected outcome
        let _ = (&mut self.handle).await;
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
