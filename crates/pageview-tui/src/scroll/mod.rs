//! Smooth horizontal scrolling for the terminal surface
//!
//! The pager controller only names a target offset; this module moves the
//! visible offset there over a few frames.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//!
//! ## L3 Molecular Layer
//! - `animation` - Animation controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use pageview_tui::scroll::{ScrollAnimator, ScrollConfig};
//!
//! let mut animator = ScrollAnimator::with_defaults();
//! animator.scroll_to(160.0, Instant::now());
//!
//! // In main loop, update each frame and get current position
//! let offset = animator.update(Instant::now());
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

// Re-exports for convenient access
pub use animation::ScrollAnimator;
pub use pageview_core::ScrollConfig;
pub use easing::{EasingType, EasingTypeExt};
