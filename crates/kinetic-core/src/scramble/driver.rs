//! Timer ownership for a scramble effect
//!
//! A [`ScrambleDriver`] owns at most one running tick task. Starting a new
//! run cancels the previous task first; exiting or dropping the driver
//! cancels it too. Frames are published through a `watch` channel stamped
//! with a generation number, and teardown bumps the generation while
//! holding the channel's write lock, so a cancelled task can never publish
//! after teardown even if it was mid-tick on another worker thread.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use super::state::{Scramble, ScramblePhase};

/// One published state of the displayed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleFrame {
    /// Incremented on every start or teardown
    pub generation: u64,
    pub text: String,
    pub phase: ScramblePhase,
}

/// Live/started timer bookkeeping, shareable after the driver is gone
#[derive(Debug, Clone, Default)]
pub struct TimerStats {
    live: Arc<AtomicUsize>,
    started: Arc<AtomicU64>,
}

impl TimerStats {
    /// Tick tasks currently alive
    pub fn active(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Tick tasks ever spawned
    pub fn started(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }
}

/// Decrements the live count when the tick task ends or is dropped
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs a [`Scramble`] on a fixed-interval tokio timer.
///
/// Triggered outside a tokio runtime, a run resolves at once to the target.
pub struct ScrambleDriver {
    scramble: Scramble,
    interval: Duration,
    tx: watch::Sender<ScrambleFrame>,
    timer: Option<JoinHandle<()>>,
    stats: TimerStats,
    rng: StdRng,
}

impl ScrambleDriver {
    pub fn new(scramble: Scramble, interval: Duration) -> Self {
        Self::with_rng(scramble, interval, StdRng::from_entropy())
    }

    /// Deterministic noise, for tests and reproducible demos
    pub fn with_seed(scramble: Scramble, interval: Duration, seed: u64) -> Self {
        Self::with_rng(scramble, interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scramble: Scramble, interval: Duration, rng: StdRng) -> Self {
        let (tx, _) = watch::channel(ScrambleFrame {
            generation: 0,
            text: scramble.target().to_string(),
            phase: ScramblePhase::Idle,
        });
        Self {
            scramble,
            interval: interval.max(Duration::from_millis(1)),
            tx,
            timer: None,
            stats: TimerStats::default(),
            rng,
        }
    }

    /// Receiver that always holds the latest frame
    pub fn subscribe(&self) -> watch::Receiver<ScrambleFrame> {
        self.tx.subscribe()
    }

    /// Latest published frame
    pub fn frame(&self) -> ScrambleFrame {
        self.tx.borrow().clone()
    }

    pub fn target(&self) -> &str {
        self.scramble.target()
    }

    pub fn stats(&self) -> TimerStats {
        self.stats.clone()
    }

    /// Whether a tick task is still scheduled
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start a run from pure noise, replacing any run in flight
    pub fn trigger_enter(&mut self) {
        self.cancel_timer();

        if tokio::runtime::Handle::try_current().is_err() {
            warn!(
                target_text = self.scramble.target(),
                "No tokio runtime, showing scramble target without animation"
            );
            let target = self.scramble.target().to_string();
            self.tx.send_modify(|frame| {
                frame.generation += 1;
                frame.text = target;
                frame.phase = ScramblePhase::Resolved;
            });
            return;
        }

        let mut scramble = self.scramble.clone();
        let mut rng = StdRng::seed_from_u64(self.rng.gen());
        scramble.trigger_enter(&mut rng);

        let mut generation = 0;
        self.tx.send_modify(|frame| {
            frame.generation += 1;
            frame.text = scramble.display().to_string();
            frame.phase = scramble.phase();
            generation = frame.generation;
        });

        if scramble.phase() != ScramblePhase::Scrambling {
            return;
        }

        self.stats.live.fetch_add(1, Ordering::SeqCst);
        self.stats.started.fetch_add(1, Ordering::SeqCst);
        let guard = LiveGuard(self.stats.live.clone());
        let tx = self.tx.clone();
        let period = self.interval;

        debug!(
            target_text = scramble.target(),
            generation,
            ticks = scramble.total_ticks(),
            "Scramble timer started"
        );

        self.timer = Some(tokio::spawn(async move {
            let _guard = guard;
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let more = scramble.tick(&mut rng);
                let published = tx.send_if_modified(|frame| {
                    if frame.generation != generation {
                        return false;
                    }
                    frame.text = scramble.display().to_string();
                    frame.phase = scramble.phase();
                    true
                });
                if !published {
                    trace!(generation, "Stale scramble timer stopped");
                    break;
                }
                if !more {
                    trace!(generation, "Scramble resolved");
                    break;
                }
            }
        }));
    }

    /// Stop the run and show the target immediately
    pub fn trigger_exit(&mut self) {
        self.cancel_timer();
        let target = self.scramble.target().to_string();
        self.tx.send_if_modified(|frame| {
            let changed = frame.text != target || frame.phase != ScramblePhase::Idle;
            frame.text = target;
            frame.phase = ScramblePhase::Idle;
            changed
        });
    }

    /// Replace the target and start scrambling toward it
    pub fn retarget(&mut self, target: &str) {
        self.cancel_timer();
        self.scramble.retarget(target);
        self.trigger_enter();
    }

    /// Invalidate the current generation, then abort the task
    fn cancel_timer(&mut self) {
        self.tx.send_if_modified(|frame| {
            frame.generation += 1;
            false
        });
        if let Some(timer) = self.timer.take() {
            if !timer.is_finished() {
                debug!("Scramble timer cancelled");
            }
            timer.abort();
        }
    }
}

impl Drop for ScrambleDriver {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
