use rand::Rng;
use serde::Serialize;

use super::alphabet::Alphabet;
use crate::{Error, Result};

/// Tolerance when turning `ticks * step` into a whole character count
const PREFIX_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScramblePhase {
    /// Showing the target, no timer
    Idle,
    /// Resolved prefix growing every tick
    Scrambling,
    /// Showing the target after a completed run, timer stopped
    Resolved,
}

/// Character-by-character transition from noise to a target string.
///
/// Resolution is driven by ticks only; the caller owns the clock.
#[derive(Debug, Clone)]
pub struct Scramble {
    target: String,
    target_chars: Vec<char>,
    alphabet: Alphabet,
    step: f64,
    ticks: u32,
    phase: ScramblePhase,
    display: String,
}

impl Scramble {
    /// `step` is how many characters resolve per tick (e.g. 0.4 or 1/3)
    pub fn new(target: &str, alphabet: Alphabet, step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "scramble step must be positive, got {}",
                step
            )));
        }
        Ok(Self {
            target: target.to_string(),
            target_chars: target.chars().collect(),
            alphabet,
            step,
            ticks: 0,
            phase: ScramblePhase::Idle,
            display: target.to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn phase(&self) -> ScramblePhase {
        self.phase
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// The string to show right now
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Number of leading characters already settled on the target
    pub fn resolved_len(&self) -> usize {
        match self.phase {
            ScramblePhase::Scrambling => {
                let prefix = (self.ticks as f64 * self.step + PREFIX_EPSILON).floor();
                (prefix as usize).min(self.target_chars.len())
            }
            ScramblePhase::Idle | ScramblePhase::Resolved => self.target_chars.len(),
        }
    }

    /// Ticks from trigger to full resolution
    pub fn total_ticks(&self) -> u32 {
        let len = self.target_chars.len() as f64;
        (len / self.step - PREFIX_EPSILON).ceil().max(0.0) as u32
    }

    /// Begin (or restart) a run: tick 0, every position is noise
    pub fn trigger_enter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.ticks = 0;
        if self.target_chars.is_empty() {
            self.phase = ScramblePhase::Resolved;
            self.display = self.target.clone();
        } else {
            self.phase = ScramblePhase::Scrambling;
            self.render(rng);
        }
        &self.display
    }

    /// Advance one tick. Returns `true` while more ticks are needed.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase != ScramblePhase::Scrambling {
            return false;
        }
        self.ticks = self.ticks.saturating_add(1);
        if self.resolved_len() >= self.target_chars.len() {
            self.phase = ScramblePhase::Resolved;
            self.display = self.target.clone();
            return false;
        }
        self.render(rng);
        true
    }

    /// End the run immediately and show the target (no reverse animation)
    pub fn trigger_exit(&mut self) {
        self.ticks = 0;
        self.phase = ScramblePhase::Idle;
        self.display = self.target.clone();
    }

    /// Swap the target string; the effect returns to idle
    pub fn retarget(&mut self, target: &str) {
        self.target = target.to_string();
        self.target_chars = target.chars().collect();
        self.trigger_exit();
    }

    fn render<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let resolved = self.resolved_len();
        let alphabet = &self.alphabet;
        self.display = self
            .target_chars
            .iter()
            .enumerate()
            .map(|(i, c)| if i < resolved { *c } else { alphabet.pick(rng) })
            .collect();
    }
}
