use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Rotating list of headline words, advanced on a fixed interval
#[derive(Debug, Clone)]
pub struct WordCycle {
    words: Vec<String>,
    index: usize,
    interval: Duration,
    last_switch: Option<Instant>,
}

impl WordCycle {
    pub fn new(words: Vec<String>, interval: Duration) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::InvalidArgument(
                "word cycle needs at least one word".to_string(),
            ));
        }
        Ok(Self {
            words,
            index: 0,
            interval,
            last_switch: None,
        })
    }

    pub fn current(&self) -> &str {
        &self.words[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Move to the next word, wrapping around
    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.words.len();
        &self.words[self.index]
    }

    /// Start timing from `now`; the first word stays for one full interval
    pub fn start(&mut self, now: Instant) {
        self.last_switch = Some(now);
    }

    /// The next word if the interval has elapsed since the last switch
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let last = match self.last_switch {
            Some(last) => last,
            None => {
                self.last_switch = Some(now);
                return None;
            }
        };
        if now.saturating_duration_since(last) < self.interval {
            return None;
        }
        self.last_switch = Some(now);
        Some(self.advance())
    }
}
