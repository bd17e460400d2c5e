//! Real-time driver that feeds wall-clock time into a shared session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::command::MAX_WAIT_MS;
use crate::session::GameSession;

/// Handle to a running driver task.
#[derive(Debug)]
pub struct DriverHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl DriverHandle {
    /// Stop the driver and wait for it to finish. No advance happens afterwards.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.task.await;
    }

    /// Whether the task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Advance `session` by the real time elapsed, once per `frame`.
///
/// Only whole milliseconds are handed to the session; the remainder carries
/// into the next frame. A stall longer than [`MAX_WAIT_MS`] is cut to that
/// length. Dropping the handle also stops the driver.
pub fn spawn_driver(session: Arc<Mutex<GameSession>>, frame: Duration) -> DriverHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let frame = frame.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        let mut ticker = time::interval(frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();
        debug!(frame_ms = frame.as_millis() as u64, "automation driver started");

        loop {
            tokio::select! {
                biased;
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    let ms = u64::try_from(last.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if ms == 0 {
                        continue;
                    }
                    last += Duration::from_millis(ms);
                    let fired = session.lock().await.advance(ms.min(MAX_WAIT_MS));
                    if !fired.is_empty() {
                        trace!(ms, fired = fired.total(), "driver frame");
                    }
                }
            }
        }
        debug!("automation driver stopped");
    });

    DriverHandle {
        stop: stop_tx,
        task,
    }
}
