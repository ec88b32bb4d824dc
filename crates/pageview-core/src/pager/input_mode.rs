//! L4 Atomic Layer: Input mode classification
//!
//! Decides once, at controller creation, whether the host delivers its own
//! drag start/end signals (touch) or whether the controller has to fall back
//! to raw pointer press/release listening.

use crate::config::InputModePreference;

/// Capability query supplied by the host environment
pub trait TouchCapability {
    /// Maximum simultaneous touch points, `None` when the host cannot tell
    fn max_touch_points(&self) -> Option<u32>;
}

/// A fixed capability value, mostly useful for hosts that know their input at compile time
impl TouchCapability for Option<u32> {
    fn max_touch_points(&self) -> Option<u32> {
        *self
    }
}

/// How drag gestures reach the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Host emits drag start/end around user gestures
    Touch,
    /// Only pointer press/release is reliable
    PointerOnly,
}

impl InputMode {
    /// Classify the host: an explicit zero touch point count means pointer-only
    pub fn detect(capability: &impl TouchCapability) -> Self {
        match capability.max_touch_points() {
            Some(0) => InputMode::PointerOnly,
            _ => InputMode::Touch,
        }
    }

    /// Apply a configured preference, probing the host only for `Auto`
    pub fn resolve(preference: InputModePreference, capability: &impl TouchCapability) -> Self {
        match preference {
            InputModePreference::Auto => Self::detect(capability),
            InputModePreference::Touch => InputMode::Touch,
            InputModePreference::Pointer => InputMode::PointerOnly,
        }
    }

    #[inline]
    pub fn is_pointer_only(&self) -> bool {
        matches!(self, InputMode::PointerOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(InputMode::detect(&Some(0)), InputMode::PointerOnly);
        assert_eq!(InputMode::detect(&Some(5)), InputMode::Touch);
        assert_eq!(InputMode::detect(&None), InputMode::Touch);
    }

    #[test]
    fn test_preference_overrides_detection() {
        assert_eq!(
            InputMode::resolve(InputModePreference::Touch, &Some(0)),
            InputMode::Touch
        );
        assert_eq!(
            InputMode::resolve(InputModePreference::Pointer, &Some(10)),
            InputMode::PointerOnly
        );
        assert_eq!(
            InputMode::resolve(InputModePreference::Auto, &Some(0)),
            InputMode::PointerOnly
        );
    }
}
