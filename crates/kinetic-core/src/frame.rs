//! Cancellable per-frame update loop
//!
//! Ticks at the configured frame rate and hands the elapsed frame time to a
//! callback, but only while the owning view reports itself visible. While
//! hidden the loop parks on the visibility channel instead of ticking.
//! Dropping the handle stops the loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::motion::timing::frame_interval;

/// Running frame loop; stops on [`stop`](Self::stop) or drop
pub struct FrameLoopHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    frames: Arc<AtomicU64>,
}

impl FrameLoopHandle {
    /// Callbacks delivered so far
    pub fn frames_delivered(&self) -> u64 {
        self.frames.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for it to exit
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for FrameLoopHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct FrameLoop;

impl FrameLoop {
    /// Spawn a loop calling `on_frame(dt)` once per frame while visible.
    ///
    /// The loop also ends if the visibility sender is dropped (view gone).
    pub fn spawn<F>(fps: u32, mut visibility: watch::Receiver<bool>, mut on_frame: F) -> FrameLoopHandle
    where
        F: FnMut(Duration) + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let frames = Arc::new(AtomicU64::new(0));
        let delivered = frames.clone();
        let period = frame_interval(fps);

        let task = tokio::spawn(async move {
            info!(fps, "Frame loop started");
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = Instant::now();

            loop {
                let visible = *visibility.borrow_and_update();
                if !visible {
                    debug!("Frame loop parked: view hidden");
                    tokio::select! {
                        result = shutdown_rx.changed() => {
                            if result.is_err() || *shutdown_rx.borrow() {
                                break;
                            }
                        }
                        result = visibility.changed() => {
                            if result.is_err() {
                                break;
                            }
                            last = Instant::now();
                            interval.reset();
                        }
                    }
                    continue;
                }

                tokio::select! {
                    result = shutdown_rx.changed() => {
                        if result.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    result = visibility.changed() => {
                        if result.is_err() {
                            break;
                        }
                    }
                    now = interval.tick() => {
                        let dt = now.saturating_duration_since(last);
                        last = now;
                        on_frame(dt);
                        delivered.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
            info!("Frame loop stopped");
        });

        FrameLoopHandle {
            shutdown: shutdown_tx,
            task: Some(task),
            frames,
        }
    }
}
