//! Text scramble effect
//!
//! - `alphabet` - Noise character sets
//! - `state` - The tick-driven state machine (`Idle` → `Scrambling` → `Resolved`)
//! - `driver` - Owns the single tokio timer that ticks a scramble
//! - `cycle` - Rotating headline words that retarget a driver

pub mod alphabet;
pub mod cycle;
pub mod driver;
pub mod state;

pub use alphabet::Alphabet;
pub use cycle::WordCycle;
pub use driver::{ScrambleDriver, ScrambleFrame, TimerStats};
pub use state::{Scramble, ScramblePhase};

use std::time::Duration;

use crate::config::ScrambleConfig;
use crate::Result;

impl ScrambleConfig {
    /// A scramble for `target` using the configured alphabet and step
    pub fn build(&self, target: &str) -> Result<Scramble> {
        Scramble::new(target, Alphabet::from_setting(&self.alphabet)?, self.step_per_tick)
    }

    /// A timer-driven scramble for `target`
    pub fn driver(&self, target: &str) -> Result<ScrambleDriver> {
        Ok(ScrambleDriver::new(
            self.build(target)?,
            Duration::from_millis(self.tick_interval_ms),
        ))
    }

    /// The rotating headline
    pub fn headline(&self) -> Result<WordCycle> {
        WordCycle::new(
            self.headline_words.clone(),
            Duration::from_millis(self.headline_interval_ms),
        )
    }
}
