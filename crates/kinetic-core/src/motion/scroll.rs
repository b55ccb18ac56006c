//! Smooth page scrolling
//!
//! Eases the page offset toward a target over a fixed duration. Call
//! `scroll_to()` or `scroll_by()` on input, then `update()` every frame to
//! get the current interpolated offset.

use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::EasingType;
use super::timing::{is_complete_at, lerp, progress_at};
use crate::config::ScrollConfig;

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Smooth-scroll controller for a single scrollable page
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: f64,
    /// Scroll deltas received since the last update, applied together
    pending_delta: f64,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SmoothScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn set_config(&mut self, config: ScrollConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.animation_duration_ms)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or deltas waiting: the caller should keep a fast frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final offset once the current animation completes
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump to `offset` without animating (route change, anchor jump)
    pub fn jump_to(&mut self, offset: f64, max_scroll: f64) {
        self.animation = None;
        self.pending_delta = 0.0;
        self.current = clamp_offset(offset, max_scroll);
    }

    /// Animate toward `target`, starting from the currently visible offset
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64) {
        self.scroll_to_at(target, max_scroll, Instant::now());
    }

    pub fn scroll_to_at(&mut self, target: f64, max_scroll: f64, now: Instant) {
        let target = clamp_offset(target, max_scroll);

        if !self.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }

        if self.current == target {
            self.animation = None;
            return;
        }

        trace!(from = self.current, to = target, "Starting scroll animation");
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by `delta` (positive = down).
    ///
    /// Deltas arriving within one frame are batched and applied by the next
    /// `update()`.
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        if !delta.is_finite() {
            return;
        }
        if !self.is_smooth() {
            self.current = clamp_offset(self.current + delta, max_scroll);
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Mouse wheel input, scaled by the configured multiplier
    pub fn wheel(&mut self, delta: f64, max_scroll: f64) {
        self.scroll_by(delta * self.config.wheel_multiplier, max_scroll);
    }

    pub fn scroll_down(&mut self, max_scroll: f64) {
        self.scroll_by(self.config.scroll_lines as f64, max_scroll);
    }

    pub fn scroll_up(&mut self, max_scroll: f64) {
        self.scroll_by(-(self.config.scroll_lines as f64), max_scroll);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by((viewport_height / 2.0).max(1.0), max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(-(viewport_height / 2.0).max(1.0), max_scroll);
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, max_scroll: f64) -> f64 {
        self.update_at(max_scroll, Instant::now())
    }

    pub fn update_at(&mut self, max_scroll: f64, now: Instant) -> f64 {
        if self.pending_delta != 0.0 {
            let target = clamp_offset(self.target() + self.pending_delta, max_scroll);
            self.pending_delta = 0.0;
            if target != self.current {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to: target,
                    duration: self.duration(),
                    easing: self.config.easing,
                });
            } else {
                self.animation = None;
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete_at(anim.start, now, anim.duration) {
                self.current = clamp_offset(anim.to, max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress_at(anim.start, now, anim.duration));
                self.current = clamp_offset(lerp(anim.from, anim.to, t), max_scroll);
            }
        }

        self.current
    }

    /// Stop at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.current = 0.0;
    }
}

fn clamp_offset(offset: f64, max_scroll: f64) -> f64 {
    let max = if max_scroll.is_finite() { max_scroll.max(0.0) } else { 0.0 };
    if offset.is_finite() {
        offset.clamp(0.0, max)
    } else {
        0.0
    }
}
