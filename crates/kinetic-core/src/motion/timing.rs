//! Time calculation utilities for animations

use std::time::{Duration, Instant};

/// Progress (0.0 to 1.0) of an animation started at `start`, measured at `now`
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete_at(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Inverse of [`lerp`]: where `value` sits between `from` and `to`.
///
/// Returns 0.0 for an empty span so callers never see NaN.
#[inline]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    let span = to - from;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    (value - from) / span
}

/// Frame interval for a frames-per-second value, ~60fps when unset
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_micros(1_000_000 / fps as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_inverse_lerp() {
        assert!((inverse_lerp(0.0, 300.0, 150.0) - 0.5).abs() < 1e-9);
        assert!((inverse_lerp(-0.5, 0.5, 0.0) - 0.5).abs() < 1e-9);
        assert_eq!(inverse_lerp(4.0, 4.0, 10.0), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress_at(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway() {
        let start = Instant::now();
        let now = start + Duration::from_millis(50);
        let p = progress_at(start, now, Duration::from_millis(100));
        assert!((p - 0.5).abs() < 1e-9);
        assert!(!is_complete_at(start, now, Duration::from_millis(100)));
        assert!(is_complete_at(start, now, Duration::from_millis(50)));
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(50), Duration::from_millis(20));
    }
}
