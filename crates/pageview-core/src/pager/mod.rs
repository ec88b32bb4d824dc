//! Horizontal paging controller
//!
//! Turns a noisy stream of horizontal scroll offsets into a settled page index
//! and drives the host surface to rest on a panel boundary.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `resolve` - Pure nearest-page resolution
//! - `input_mode` - Touch vs. pointer-only classification
//! - `layout` - Viewport measurement gate and panel geometry
//! - `host` - Contract consumed from the host scroll surface
//!
//! ## L3 Molecular Layer
//! - `controller` - Debounce/drag state machine combining the atoms
//! - `navigator` - Imperative next/previous/go_to surface
//!
//! # Usage
//!
//! ```ignore
//! use pageview_core::{PagerConfig, ScrollSnapController, InputMode};
//!
//! let mut pager = ScrollSnapController::new(host, PagerConfig::default(), InputMode::Touch)
//!     .with_page_listener(|page| println!("page {page}"));
//! pager.set_panel_count(5);
//! pager.on_viewport_measured(800.0, 600.0);
//!
//! // Feed offsets from the surface, then poll when the deadline passes
//! pager.on_raw_offset(790.0, Instant::now());
//! if let Some(deadline) = pager.next_deadline() {
//!     pager.poll(deadline);
//! }
//! ```

// L4 Atomic Layer
pub mod host;
pub mod input_mode;
pub mod layout;
pub mod resolve;

// L3 Molecular Layer
pub mod controller;
pub mod navigator;

// Re-exports for convenient access
pub use controller::ScrollSnapController;
pub use host::{ListenerId, ScrollHost};
pub use input_mode::{InputMode, TouchCapability};
pub use layout::{LayoutGate, LayoutTransition, PanelFrame, Viewport};
pub use navigator::PageNavigator;
pub use resolve::nearest_page;
