//! Terminal scroll surface
//!
//! Plays the host scroll primitive for the pager: keeps the visible offset
//! (in terminal columns), animates towards the targets the pager commands
//! and reports movement back once per frame.

use std::time::Instant;

use pageview_core::pager::{ListenerId, ScrollHost, TouchCapability};
use pageview_core::ScrollConfig;
use tracing::trace;

use crate::scroll::ScrollAnimator;

/// What happened to the surface during one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceTick {
    /// New offset, if the surface moved since the last frame
    pub moved_to: Option<f64>,
    /// The commanded motion came to rest this frame
    pub motion_finished: bool,
}

#[derive(Debug, Default)]
pub struct TerminalSurface {
    animator: ScrollAnimator,
    /// Offset last reported to the pager
    reported: f64,
    /// A commanded move has not been reported as finished yet
    in_motion: bool,
    /// Commanded move that has not been picked up by `tick` yet
    pending_target: Option<f64>,
    pointer_listener: Option<ListenerId>,
    next_listener: u64,
}

impl TerminalSurface {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animator: ScrollAnimator::new(config),
            ..Default::default()
        }
    }

    /// Current visible offset
    #[inline]
    pub fn offset(&self) -> f64 {
        self.animator.current()
    }

    /// Whether raw pointer input should be forwarded to the pager
    #[inline]
    pub fn has_pointer_listener(&self) -> bool {
        self.pointer_listener.is_some()
    }

    /// Whether the next frame has work to do
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.in_motion || self.pending_target.is_some() || self.animator.is_animating()
    }

    /// Move the surface directly under user control (drag or wheel)
    ///
    /// Interrupts any commanded motion. The caller reports the new offset to
    /// the pager itself, so `tick` will not report it again.
    pub fn set_user_offset(&mut self, offset: f64) {
        self.pending_target = None;
        self.animator.set_offset(offset);
        self.reported = offset;
    }

    /// Advance one frame
    pub fn tick(&mut self, now: Instant) -> SurfaceTick {
        if let Some(target) = self.pending_target.take() {
            self.animator.scroll_to(target, now);
        }

        let current = self.animator.update(now);
        let moved_to = if current != self.reported {
            self.reported = current;
            Some(current)
        } else {
            None
        };

        let motion_finished = self.in_motion && !self.animator.is_animating();
        if motion_finished {
            self.in_motion = false;
        }

        SurfaceTick {
            moved_to,
            motion_finished,
        }
    }
}

impl ScrollHost for TerminalSurface {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        trace!(offset, animated, "Surface scroll_to");
        if animated {
            self.pending_target = Some(offset);
            self.in_motion = true;
        } else {
            self.animator.set_offset(offset);
            self.reported = offset;
        }
    }

    fn add_pointer_listener(&mut self) -> Option<ListenerId> {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.pointer_listener = Some(id);
        Some(id)
    }

    fn remove_pointer_listener(&mut self, id: ListenerId) {
        if self.pointer_listener == Some(id) {
            self.pointer_listener = None;
        }
    }
}

/// Terminals deliver mouse input only
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCapability;

impl TouchCapability for TerminalCapability {
    fn max_touch_points(&self) -> Option<u32> {
        Some(0)
    }
}
