//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Pure functions; the caller supplies `now` so frames can be replayed in tests.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether an animation started at `start` has run its course at `now`
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two offsets
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 80.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 80.0, 0.5) - 40.0).abs() < 0.001);
        assert!((lerp(160.0, 80.0, 0.25) - 140.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, start + Duration::from_millis(50), duration) - 0.5).abs() < 0.001);
        assert_eq!(progress(start, start + Duration::from_secs(1), duration), 1.0);
        assert_eq!(progress(start, start, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_clock_before_start_counts_as_zero() {
        let start = Instant::now() + Duration::from_millis(10);
        let earlier = start - Duration::from_millis(5);
        assert_eq!(progress(start, earlier, Duration::from_millis(100)), 0.0);
        assert!(!is_complete(start, earlier, Duration::from_millis(1)));
    }
}
