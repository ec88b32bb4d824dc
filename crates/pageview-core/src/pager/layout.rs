//! L4 Atomic Layer: Viewport measurement gate
//!
//! Nothing is positioned until the host has measured the viewport once.
//! The gate only ever moves from `NotReady` to `Ready`.

/// Measured viewport size, in the same units as scroll offsets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether offsets can be mapped to pages with this geometry
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.width.is_finite()
    }
}

/// Absolute placement of one panel inside the scroll content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub index: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// What a measurement did to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTransition {
    /// First measurement, positioning is now allowed
    BecameReady,
    /// Geometry changed after the gate opened
    Resized,
    /// Same geometry reported again
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutGate {
    #[default]
    NotReady,
    Ready(Viewport),
}

impl LayoutGate {
    /// Record a layout measurement
    pub fn measure(&mut self, viewport: Viewport) -> LayoutTransition {
        match self {
            LayoutGate::NotReady => {
                *self = LayoutGate::Ready(viewport);
                LayoutTransition::BecameReady
            }
            LayoutGate::Ready(current) if *current == viewport => LayoutTransition::Unchanged,
            LayoutGate::Ready(current) => {
                *current = viewport;
                LayoutTransition::Resized
            }
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, LayoutGate::Ready(_))
    }

    /// Current viewport, `None` before the first measurement
    #[inline]
    pub fn viewport(&self) -> Option<Viewport> {
        match self {
            LayoutGate::NotReady => None,
            LayoutGate::Ready(viewport) => Some(*viewport),
        }
    }

    /// Viewport that position math may use (ready and non-zero width)
    #[inline]
    pub fn usable_viewport(&self) -> Option<Viewport> {
        self.viewport().filter(Viewport::is_usable)
    }

    /// Frames for `count` panels laid out left to right; empty until ready
    pub fn panel_frames(&self, count: usize) -> Vec<PanelFrame> {
        let Some(viewport) = self.viewport() else {
            return Vec::new();
        };
        (0..count)
            .map(|index| PanelFrame {
                index,
                left: index as f64 * viewport.width,
                top: 0.0,
                width: viewport.width,
                height: viewport.height,
            })
            .collect()
    }

    /// Total scrollable content width for `count` panels
    pub fn content_width(&self, count: usize) -> f64 {
        self.viewport()
            .map(|viewport| viewport.width * count as f64)
            .unwrap_or(0.0)
    }
}
