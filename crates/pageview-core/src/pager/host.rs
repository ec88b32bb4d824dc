//! L4 Atomic Layer: Host scroll surface contract
//!
//! The controller never animates anything itself. It asks the host surface
//! to move and, in pointer-only mode, to forward raw press/release signals.

/// Token for a pointer listener registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Scroll primitive the controller drives
pub trait ScrollHost {
    /// Move the surface to a horizontal offset
    ///
    /// With `animated` the host is expected to report the intermediate
    /// offsets back through `on_raw_offset` and to signal the end of the
    /// motion through `on_animation_end`.
    fn scroll_to(&mut self, offset: f64, animated: bool);

    /// Start forwarding pointer press/release to the controller
    ///
    /// Returns `None` when the host has no way to observe raw pointer input.
    fn add_pointer_listener(&mut self) -> Option<ListenerId> {
        None
    }

    /// Stop forwarding pointer input for a listener returned earlier
    fn remove_pointer_listener(&mut self, _id: ListenerId) {}
}

impl<H: ScrollHost + ?Sized> ScrollHost for Box<H> {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        (**self).scroll_to(offset, animated)
    }

    fn add_pointer_listener(&mut self) -> Option<ListenerId> {
        (**self).add_pointer_listener()
    }

    fn remove_pointer_listener(&mut self, id: ListenerId) {
        (**self).remove_pointer_listener(id)
    }
}
