//! Stateful smoothing stages layered on top of raw transform output
//!
//! Both smoothers remember their previous output and move it toward the
//! current target each frame. Neither overshoots: the exponential smoother
//! by construction, the spring whenever its damping ratio is at least 1.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SpringConfig;

/// Integration step upper bound for the spring
const MAX_STEP_SECS: f64 = 0.001;

/// Differences below this settle the exponential smoother exactly
const EXPONENTIAL_EPSILON: f64 = 1e-6;

/// Damped harmonic oscillator following a moving target
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
            at_rest: true,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if target != self.target {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Teleport to `value` and stop
    pub fn jump(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn value(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Step the simulation by `dt` and return the new position
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.at_rest {
            return self.position;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            rest_delta,
            rest_speed,
        } = self.config;

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            remaining -= h;

            let displacement = self.position - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;

            if (self.position - self.target).abs() < rest_delta && self.velocity.abs() < rest_speed {
                self.position = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                break;
            }
        }

        self.position
    }
}

/// First-order exponential approach toward a target
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    time_constant: Duration,
    value: f64,
    target: f64,
}

impl ExponentialSmoother {
    pub fn new(time_constant: Duration, initial: f64) -> Self {
        Self {
            time_constant,
            value: initial,
            target: initial,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    pub fn jump(&mut self, value: f64) {
        if value.is_finite() {
            self.value = value;
            self.target = value;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    pub fn advance(&mut self, dt: Duration) -> f64 {
        let tau = self.time_constant.as_secs_f64();
        let alpha = if tau <= 0.0 {
            1.0
        } else {
            1.0 - (-dt.as_secs_f64() / tau).exp()
        };
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).abs() < EXPONENTIAL_EPSILON {
            self.value = self.target;
        }
        self.value
    }
}

/// Smoothing option for an animated channel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Output follows the raw value exactly
    #[default]
    None,
    Spring(SpringConfig),
    Exponential { time_constant_ms: u64 },
}

impl Smoothing {
    /// Runtime smoother for this option, resting at `initial`
    pub fn build(&self, initial: f64) -> Smoother {
        match self {
            Smoothing::None => Smoother::Passthrough(initial),
            Smoothing::Spring(config) => Smoother::Spring(Spring::new(*config, initial)),
            Smoothing::Exponential { time_constant_ms } => Smoother::Exponential(
                ExponentialSmoother::new(Duration::from_millis(*time_constant_ms), initial),
            ),
        }
    }
}

/// Runtime state of a [`Smoothing`] stage
#[derive(Debug, Clone)]
pub enum Smoother {
    Passthrough(f64),
    Spring(Spring),
    Exponential(ExponentialSmoother),
}

impl Smoother {
    pub fn set_target(&mut self, target: f64) {
        match self {
            Smoother::Passthrough(v) => {
                if target.is_finite() {
                    *v = target;
                }
            }
            Smoother::Spring(s) => s.set_target(target),
            Smoother::Exponential(e) => e.set_target(target),
        }
    }

    pub fn jump(&mut self, value: f64) {
        match self {
            Smoother::Passthrough(v) => {
                if value.is_finite() {
                    *v = value;
                }
            }
            Smoother::Spring(s) => s.jump(value),
            Smoother::Exponential(e) => e.jump(value),
        }
    }

    pub fn advance(&mut self, dt: Duration) -> f64 {
        match self {
            Smoother::Passthrough(v) => *v,
            Smoother::Spring(s) => s.advance(dt),
            Smoother::Exponential(e) => e.advance(dt),
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Smoother::Passthrough(v) => *v,
            Smoother::Spring(s) => s.value(),
            Smoother::Exponential(e) => e.value(),
        }
    }

    pub fn is_settled(&self) -> bool {
        match self {
            Smoother::Passthrough(_) => true,
            Smoother::Spring(s) => s.is_at_rest(),
            Smoother::Exponential(e) => e.is_settled(),
        }
    }
}
