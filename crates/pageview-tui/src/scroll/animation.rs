//! L3 Molecular Layer: Horizontal scroll animator
//!
//! Combines easing functions and timing utilities to move the visible offset
//! of the terminal surface towards the target chosen by the pager.

use std::time::{Duration, Instant};

use pageview_core::ScrollConfig;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting offset
    from: f64,
    /// Target offset
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Offset animator for the pager surface
///
/// Call `scroll_to()` to start moving, then `update()` each frame to get the
/// current interpolated offset.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Current offset (always up-to-date)
    current: f64,
}

impl ScrollAnimator {
    /// Create a new scroll animator with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Get current configuration
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final offset once the running animation completes
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    /// Current interpolated offset
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Set offset immediately (no animation)
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
    }

    /// Start moving towards `target`
    ///
    /// Jumps immediately when smooth scrolling is disabled. A running
    /// animation is replaced and the new one starts from the visible offset.
    ///
    /// # Returns
    /// `true` if an animation was started.
    pub fn scroll_to(&mut self, target: f64, now: Instant) -> bool {
        if !self.config.is_smooth() || self.current == target {
            self.set_offset(target);
            return false;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
        true
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, now, anim.duration));
                self.current = lerp(anim.from, anim.to, t);
            }
        }

        self.current
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_instant_jump_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        assert!(!animator.scroll_to(160.0, Instant::now()));
        assert_eq!(animator.current(), 160.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animation_reaches_target() {
        let config = ScrollConfig {
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);
        let t0 = Instant::now();

        assert!(animator.scroll_to(80.0, t0));
        assert_eq!(animator.target(), 80.0);
        assert!((animator.update(t0 + ms(50)) - 40.0).abs() < 0.001);
        assert!(animator.is_animating());
        assert_eq!(animator.update(t0 + ms(100)), 80.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_visible_offset() {
        let config = ScrollConfig {
            animation_duration_ms: 100,
            easing: EasingType::Linear,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);
        let t0 = Instant::now();

        animator.scroll_to(100.0, t0);
        animator.update(t0 + ms(50));
        animator.scroll_to(0.0, t0 + ms(50));
        assert!((animator.update(t0 + ms(100)) - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_same_target_does_not_animate() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.set_offset(80.0);
        assert!(!animator.scroll_to(80.0, Instant::now()));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_cancel_keeps_position() {
        let mut animator = ScrollAnimator::with_defaults();
        let t0 = Instant::now();
        animator.scroll_to(200.0, t0);
        let mid = animator.update(t0 + ms(30));
        animator.cancel();
        assert_eq!(animator.update(t0 + ms(500)), mid);
    }
}
