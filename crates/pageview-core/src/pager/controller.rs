//! L3 Molecular Layer: Scroll snap controller
//!
//! Combines the layout gate, nearest-page resolution and a single debounce
//! slot into the state machine that settles a horizontally scrolling surface
//! on panel boundaries.
//!
//! Time is passed in explicitly. The controller never sleeps: it records a
//! deadline, and the owner calls [`ScrollSnapController::poll`] once
//! [`ScrollSnapController::next_deadline`] has passed.

use std::fmt;
use std::time::Instant;

use tracing::{debug, trace};

use super::host::{ListenerId, ScrollHost};
use super::input_mode::InputMode;
use super::layout::{LayoutGate, LayoutTransition, PanelFrame, Viewport};
use super::navigator::PageNavigator;
use super::resolve::{nearest_page, page_offset};
use crate::config::PagerConfig;

/// Offsets closer than this are treated as the same position
const POSITION_EPSILON: f64 = 0.5;

type PageListener = Box<dyn FnMut(usize) + Send>;

/// Why the debounce slot was armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerReason {
    /// Offsets arrived while the surface was idle
    Settle,
    /// Offsets arrived while a snap animation was in flight
    Animating,
    /// Timer fired mid-drag and is waiting for the release
    DragPoll,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    deadline: Instant,
    reason: TimerReason,
}

/// Paging state machine bound to one host scroll surface
///
/// Owns every piece of mutable paging state: latest offset, drag flag,
/// debounce deadline and current page. All mutation goes through `&mut self`
/// so one event is fully processed before the next.
pub struct ScrollSnapController<H: ScrollHost> {
    host: H,
    config: PagerConfig,
    input_mode: InputMode,
    layout: LayoutGate,
    panel_count: usize,
    /// Latest offset reported by the host
    offset: f64,
    current_page: usize,
    dragging: bool,
    /// A snap animation was issued and the host has not reported its end yet
    animating: bool,
    /// Debounce slot; re-arming replaces the deadline
    timer: Option<PendingTimer>,
    /// Navigation requested while the user was dragging
    deferred_page: Option<usize>,
    /// Configured start page, held until geometry and panels allow it
    pending_initial_page: Option<usize>,
    pointer_listener: Option<ListenerId>,
    on_change_page: Option<PageListener>,
    torn_down: bool,
}

impl<H: ScrollHost> ScrollSnapController<H> {
    /// Create a controller for `host`
    ///
    /// In pointer-only mode the host is asked to forward raw press/release
    /// signals; the listener is released again on teardown.
    pub fn new(mut host: H, config: PagerConfig, input_mode: InputMode) -> Self {
        let pointer_listener = if input_mode.is_pointer_only() {
            let id = host.add_pointer_listener();
            if id.is_none() {
                debug!("Host offers no pointer listener, relying on drag signals");
            }
            id
        } else {
            None
        };

        debug!(?input_mode, "Pager controller created");
        let pending_initial_page = config.initial_page;

        Self {
            host,
            config,
            input_mode,
            layout: LayoutGate::default(),
            panel_count: 0,
            offset: 0.0,
            current_page: 0,
            dragging: false,
            animating: false,
            timer: None,
            deferred_page: None,
            pending_initial_page,
            pointer_listener,
            on_change_page: None,
            torn_down: false,
        }
    }

    /// Set the page-change listener
    pub fn with_page_listener(mut self, listener: impl FnMut(usize) + Send + 'static) -> Self {
        self.set_page_listener(listener);
        self
    }

    /// Replace the page-change listener
    pub fn set_page_listener(&mut self, listener: impl FnMut(usize) + Send + 'static) {
        self.on_change_page = Some(Box::new(listener));
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    #[inline]
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Settled page index
    #[inline]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[inline]
    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Latest offset reported by the host
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.layout.is_ready()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.layout.viewport()
    }

    /// Whether the host should let the user scroll the surface directly
    #[inline]
    pub fn scroll_enabled(&self) -> bool {
        self.config.scroll_enabled
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        if enabled != self.config.scroll_enabled {
            debug!(enabled, dragging = self.dragging, "Scroll enabled changed");
        }
        self.config.scroll_enabled = enabled;
    }

    /// Page waiting for the current drag to end, if any
    #[inline]
    pub fn deferred_page(&self) -> Option<usize> {
        self.deferred_page
    }

    /// Deadline of the pending debounce timer
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(|timer| timer.deadline)
    }

    /// Panel placement for rendering, empty until the viewport is measured
    pub fn panel_frames(&self) -> Vec<PanelFrame> {
        self.layout.panel_frames(self.panel_count)
    }

    pub fn content_width(&self) -> f64 {
        self.layout.content_width(self.panel_count)
    }

    /// Largest offset a settled surface can rest at
    pub fn max_offset(&self) -> f64 {
        match self.layout.usable_viewport() {
            Some(viewport) if self.panel_count > 0 => {
                page_offset(self.panel_count - 1, viewport.width)
            }
            _ => 0.0,
        }
    }

    /// Host finished laying out the viewport
    ///
    /// The first call opens the layout gate. Later calls only update
    /// geometry; the current page is kept and the stored offset is not
    /// rescaled. The configured initial page is applied by the first
    /// measurement with a usable width once the panels exist.
    pub fn on_viewport_measured(&mut self, width: f64, height: f64) {
        if self.torn_down {
            return;
        }
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            debug!(width, height, "Ignoring invalid viewport measurement");
            return;
        }

        match self.layout.measure(Viewport::new(width, height)) {
            LayoutTransition::BecameReady => {
                debug!(width, height, "Viewport measured, pager ready");
            }
            LayoutTransition::Resized => {
                debug!(width, height, "Viewport resized");
            }
            LayoutTransition::Unchanged => return,
        }
        self.apply_initial_page();
    }

    /// Number of panels changed
    ///
    /// A current page that no longer exists is clamped to the last panel.
    pub fn set_panel_count(&mut self, count: usize) {
        if self.torn_down || count == self.panel_count {
            return;
        }
        self.panel_count = count;

        if let Some(page) = self.deferred_page {
            if page >= count {
                self.deferred_page = None;
            }
        }

        let clamped = self.current_page.min(count.saturating_sub(1));
        if clamped != self.current_page {
            debug!(from = self.current_page, to = clamped, "Panel count shrank, clamping page");
            self.current_page = clamped;
            self.notify(clamped);
        }

        self.apply_initial_page();
    }

    /// Host reported a new scroll offset
    pub fn on_raw_offset(&mut self, offset: f64, now: Instant) {
        if self.torn_down {
            return;
        }
        if !offset.is_finite() {
            trace!("Dropping non-finite offset");
            return;
        }
        self.offset = offset;

        if !self.layout.is_ready() {
            return;
        }

        let reason = if self.animating {
            TimerReason::Animating
        } else {
            TimerReason::Settle
        };
        self.arm(now, reason);
    }

    /// User started dragging the surface
    pub fn on_drag_start(&mut self) {
        if self.torn_down {
            return;
        }
        trace!("Drag started");
        self.dragging = true;
    }

    /// User released the surface
    ///
    /// A navigation requested during the drag is applied now and supersedes
    /// the pending snap. Otherwise the pending timer resolves on its own.
    pub fn on_drag_end(&mut self, _now: Instant) {
        if self.torn_down {
            return;
        }
        trace!("Drag ended");
        self.dragging = false;
        self.apply_deferred_page();
    }

    /// Raw pointer press, only meaningful in pointer-only mode
    pub fn on_pointer_down(&mut self) {
        if self.input_mode.is_pointer_only() {
            self.on_drag_start();
        }
    }

    /// Raw pointer release, only meaningful in pointer-only mode
    ///
    /// Pointer hosts do not report the end of a gesture any other way, so
    /// the release resolves immediately.
    pub fn on_pointer_up(&mut self, now: Instant) {
        if self.torn_down || !self.input_mode.is_pointer_only() {
            return;
        }
        self.dragging = false;
        if self.deferred_page.is_some() {
            self.apply_deferred_page();
            return;
        }
        self.timer = None;
        self.resolve();
    }

    /// Host finished the animated move issued by the controller
    pub fn on_animation_end(&mut self) {
        if self.animating {
            trace!("Snap animation finished");
        }
        self.animating = false;
    }

    /// Request a page from outside the controller
    ///
    /// Out-of-range pages, an unmeasured viewport and zero panels are
    /// ignored. During a drag the request waits for the drag to end.
    pub fn set_current_page(&mut self, page: usize) {
        if self.torn_down {
            return;
        }
        if page >= self.panel_count {
            debug!(page, count = self.panel_count, "Ignoring out-of-range page request");
            return;
        }
        if self.layout.usable_viewport().is_none() {
            debug!(page, "Ignoring page request before layout");
            return;
        }
        if self.dragging {
            debug!(page, "Deferring page request until drag ends");
            self.deferred_page = Some(page);
            return;
        }

        self.timer = None;
        self.commit(page);
    }

    /// Fire the debounce timer if its deadline has passed
    ///
    /// # Returns
    /// `true` when a resolution ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if timer.deadline <= now => self.fire_timer(now),
            _ => false,
        }
    }

    /// Run the debounce continuation regardless of its deadline
    ///
    /// While dragging the timer re-arms itself instead of resolving.
    pub fn fire_timer(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(timer) = self.timer.take() else {
            return false;
        };
        trace!(reason = ?timer.reason, "Debounce timer fired");
        if self.dragging {
            self.arm(now, TimerReason::DragPoll);
            return false;
        }
        self.resolve()
    }

    /// Release the timer and every host listener
    ///
    /// Safe to call more than once; all later input is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.timer = None;
        self.deferred_page = None;
        if let Some(id) = self.pointer_listener.take() {
            self.host.remove_pointer_listener(id);
        }
        self.torn_down = true;
        debug!("Pager controller torn down");
    }

    fn arm(&mut self, now: Instant, reason: TimerReason) {
        let delay = match reason {
            TimerReason::Settle => self.config.idle_debounce(),
            TimerReason::Animating => self.config.animating_debounce(),
            TimerReason::DragPoll => self.config.drag_poll(),
        };
        trace!(?reason, delay_ms = delay.as_millis() as u64, "Arming debounce timer");
        self.timer = Some(PendingTimer {
            deadline: now + delay,
            reason,
        });
    }

    fn resolve(&mut self) -> bool {
        let Some(viewport) = self.layout.usable_viewport() else {
            return false;
        };
        let Some(page) = nearest_page(self.offset, viewport.width, self.panel_count) else {
            return false;
        };
        trace!(offset = self.offset, page, "Resolved nearest page");
        self.commit(page);
        true
    }

    fn commit(&mut self, page: usize) {
        let Some(viewport) = self.layout.usable_viewport() else {
            return;
        };
        let target = page_offset(page, viewport.width);

        // A move the host will not animate never reports its end
        if (target - self.offset).abs() >= POSITION_EPSILON {
            self.animating = true;
        }
        self.host.scroll_to(target, true);
        // An explicit page supersedes a start page that never got applied
        self.pending_initial_page = None;

        if page != self.current_page {
            debug!(from = self.current_page, to = page, "Page changed");
            self.current_page = page;
            self.notify(page);
        }
    }

    /// Apply the start page once a usable viewport and enough panels exist
    fn apply_initial_page(&mut self) {
        let Some(page) = self.pending_initial_page else {
            return;
        };
        let Some(viewport) = self.layout.usable_viewport() else {
            return;
        };
        if page >= self.panel_count {
            debug!(page, count = self.panel_count, "Initial page out of range, waiting for panels");
            return;
        }
        self.pending_initial_page = None;
        debug!(page, "Applying initial page");
        let target = page_offset(page, viewport.width);
        self.host.scroll_to(target, false);
        self.offset = target;
        self.current_page = page;
    }

    fn apply_deferred_page(&mut self) {
        if let Some(page) = self.deferred_page.take() {
            self.timer = None;
            self.set_current_page(page);
        }
    }

    fn notify(&mut self, page: usize) {
        if let Some(listener) = self.on_change_page.as_mut() {
            listener(page);
        }
    }
}

impl<H: ScrollHost> PageNavigator for ScrollSnapController<H> {
    fn go_to(&mut self, page: usize) {
        self.set_current_page(page);
    }

    fn next(&mut self) {
        let base = self.deferred_page.unwrap_or(self.current_page);
        if base + 1 < self.panel_count {
            self.set_current_page(base + 1);
        }
    }

    fn previous(&mut self) {
        let base = self.deferred_page.unwrap_or(self.current_page);
        if base > 0 {
            self.set_current_page(base - 1);
        }
    }
}

impl<H: ScrollHost> Drop for ScrollSnapController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: ScrollHost + fmt::Debug> fmt::Debug for ScrollSnapController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSnapController")
            .field("host", &self.host)
            .field("input_mode", &self.input_mode)
            .field("layout", &self.layout)
            .field("panel_count", &self.panel_count)
            .field("offset", &self.offset)
            .field("current_page", &self.current_page)
            .field("dragging", &self.dragging)
            .field("animating", &self.animating)
            .field("timer", &self.timer)
            .field("deferred_page", &self.deferred_page)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct HostLog {
        commands: Vec<(f64, bool)>,
        added: Vec<ListenerId>,
        removed: Vec<ListenerId>,
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingHost {
        log: Arc<Mutex<HostLog>>,
        pointer_capable: bool,
    }

    impl RecordingHost {
        fn pointer_capable() -> Self {
            Self {
                pointer_capable: true,
                ..Default::default()
            }
        }

        fn commands(&self) -> Vec<(f64, bool)> {
            self.log.lock().unwrap().commands.clone()
        }
    }

    impl ScrollHost for RecordingHost {
        fn scroll_to(&mut self, offset: f64, animated: bool) {
            self.log.lock().unwrap().commands.push((offset, animated));
        }

        fn add_pointer_listener(&mut self) -> Option<ListenerId> {
            if !self.pointer_capable {
                return None;
            }
            let mut log = self.log.lock().unwrap();
            let id = ListenerId(log.added.len() as u64 + 1);
            log.added.push(id);
            Some(id)
        }

        fn remove_pointer_listener(&mut self, id: ListenerId) {
            self.log.lock().unwrap().removed.push(id);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Ready controller with `count` panels of width 800 and a page recorder
    fn setup(
        count: usize,
        mode: InputMode,
    ) -> (
        ScrollSnapController<RecordingHost>,
        RecordingHost,
        Arc<Mutex<Vec<usize>>>,
    ) {
        let host = RecordingHost::pointer_capable();
        let pages = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&pages);
        let mut pager = ScrollSnapController::new(host.clone(), PagerConfig::default(), mode)
            .with_page_listener(move |page| recorder.lock().unwrap().push(page));
        pager.set_panel_count(count);
        pager.on_viewport_measured(800.0, 600.0);
        (pager, host, pages)
    }

    #[test]
    fn test_burst_collapses_into_one_resolution() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        for (i, x) in [0.0, 150.0, 400.0, 790.0].into_iter().enumerate() {
            pager.on_raw_offset(x, t0 + ms(i as u64 * 5));
        }

        // Deadline follows the last event, not the first
        assert_eq!(pager.next_deadline(), Some(t0 + ms(15) + ms(20)));
        assert!(!pager.poll(t0 + ms(30)));
        assert!(pager.poll(t0 + ms(35)));

        assert_eq!(host.commands(), vec![(800.0, true)]);
        assert_eq!(*pages.lock().unwrap(), vec![1]);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.next_deadline(), None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_raw_offset(1700.0, t0);
        assert!(pager.poll(t0 + ms(20)));
        pager.on_raw_offset(1700.0, t0 + ms(30));
        assert!(pager.poll(t0 + ms(200)));

        assert_eq!(*pages.lock().unwrap(), vec![2]);
        assert_eq!(host.commands(), vec![(1600.0, true), (1600.0, true)]);
    }

    #[test]
    fn test_set_current_page_commands_offset_and_notifies() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        pager.on_raw_offset(123.0, Instant::now());

        pager.set_current_page(3);

        assert_eq!(host.commands(), vec![(2400.0, true)]);
        assert_eq!(*pages.lock().unwrap(), vec![3]);
        assert_eq!(pager.current_page(), 3);
        // Stale offset no longer resolves
        assert_eq!(pager.next_deadline(), None);
    }

    #[test]
    fn test_out_of_range_page_is_ignored() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);

        pager.set_current_page(7);
        pager.set_current_page(5);

        assert!(host.commands().is_empty());
        assert!(pages.lock().unwrap().is_empty());
        assert_eq!(pager.current_page(), 0);
    }

    #[test]
    fn test_commanded_offsets_stay_in_bounds() {
        let (mut pager, host, _pages) = setup(4, InputMode::Touch);
        let t0 = Instant::now();

        for (i, x) in [-900.0, 50_000.0, 2399.0, 2401.0].into_iter().enumerate() {
            let now = t0 + ms(i as u64 * 100);
            pager.on_raw_offset(x, now);
            pager.poll(now + ms(100));
            pager.on_animation_end();
        }
        for page in 0..10 {
            pager.set_current_page(page);
        }

        let max = pager.max_offset();
        assert_eq!(max, 2400.0);
        for (offset, _) in host.commands() {
            assert!((0.0..=max).contains(&offset), "offset {} out of bounds", offset);
        }
    }

    #[test]
    fn test_drag_suppresses_resolution() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_drag_start();
        pager.on_raw_offset(900.0, t0);
        let mut now = t0;
        for _ in 0..50 {
            now += ms(20);
            assert!(!pager.poll(now));
            assert!(pager.next_deadline().is_some());
        }
        pager.on_raw_offset(2500.0, now);
        assert!(host.commands().is_empty());

        pager.on_drag_end(now);
        let deadline = pager.next_deadline().unwrap();
        assert!(pager.poll(deadline));

        assert_eq!(host.commands(), vec![(2400.0, true)]);
        assert_eq!(*pages.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_timer_firing_mid_drag_reschedules() {
        let (mut pager, _host, _pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_raw_offset(300.0, t0);
        pager.on_drag_start();
        assert!(!pager.fire_timer(t0 + ms(20)));
        assert_eq!(pager.next_deadline(), Some(t0 + ms(40)));
    }

    #[test]
    fn test_no_resolution_before_layout() {
        let host = RecordingHost::default();
        let mut pager =
            ScrollSnapController::new(host.clone(), PagerConfig::default(), InputMode::Touch);
        pager.set_panel_count(5);
        let t0 = Instant::now();

        pager.on_raw_offset(790.0, t0);
        assert_eq!(pager.next_deadline(), None);
        assert!(!pager.poll(t0 + ms(1000)));
        assert!(!pager.fire_timer(t0 + ms(1000)));
        assert!(pager.panel_frames().is_empty());

        pager.set_current_page(2);
        assert!(host.commands().is_empty());
        assert_eq!(pager.offset(), 790.0);
    }

    #[test]
    fn test_zero_panels_is_noop() {
        let (mut pager, host, pages) = setup(0, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_raw_offset(400.0, t0);
        assert!(!pager.poll(t0 + ms(20)));
        pager.next();
        pager.previous();
        assert!(host.commands().is_empty());
        assert!(pages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_animating_uses_longer_debounce() {
        let (mut pager, _host, _pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.set_current_page(2);
        assert!(pager.is_animating());
        pager.on_raw_offset(400.0, t0);
        assert_eq!(pager.next_deadline(), Some(t0 + ms(100)));

        pager.on_animation_end();
        pager.on_raw_offset(1600.0, t0 + ms(50));
        assert_eq!(pager.next_deadline(), Some(t0 + ms(70)));
    }

    #[test]
    fn test_snap_to_current_position_is_not_animating() {
        let (mut pager, host, _pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_raw_offset(800.0, t0);
        assert!(pager.poll(t0 + ms(20)));
        assert!(!pager.is_animating());
        assert_eq!(host.commands(), vec![(800.0, true)]);
    }

    #[test]
    fn test_page_request_during_drag_is_deferred() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        let t0 = Instant::now();

        pager.on_drag_start();
        pager.on_raw_offset(700.0, t0);
        pager.set_current_page(2);
        pager.set_current_page(4);
        assert!(host.commands().is_empty());
        assert_eq!(pager.deferred_page(), Some(4));

        pager.on_drag_end(t0 + ms(10));

        assert_eq!(host.commands(), vec![(3200.0, true)]);
        assert_eq!(*pages.lock().unwrap(), vec![4]);
        // Release position does not fight the request
        assert_eq!(pager.next_deadline(), None);
    }

    #[test]
    fn test_navigator() {
        let (mut pager, host, pages) = setup(3, InputMode::Touch);

        pager.previous();
        pager.next();
        pager.next();
        pager.next();
        pager.previous();
        pager.go_to(0);
        pager.go_to(9);

        assert_eq!(*pages.lock().unwrap(), vec![1, 2, 1, 0]);
        assert_eq!(
            host.commands(),
            vec![(800.0, true), (1600.0, true), (800.0, true), (0.0, true)]
        );
    }

    #[test]
    fn test_pointer_only_registers_and_releases_listener() {
        let (mut pager, host, _pages) = setup(5, InputMode::PointerOnly);
        assert_eq!(host.log.lock().unwrap().added, vec![ListenerId(1)]);

        pager.on_raw_offset(100.0, Instant::now());
        pager.teardown();
        pager.teardown();

        let log = host.log.lock().unwrap();
        assert_eq!(log.removed, vec![ListenerId(1)]);
        drop(log);
        assert_eq!(pager.next_deadline(), None);
    }

    #[test]
    fn test_drop_releases_listener() {
        let (pager, host, _pages) = setup(5, InputMode::PointerOnly);
        drop(pager);
        assert_eq!(host.log.lock().unwrap().removed, vec![ListenerId(1)]);
    }

    #[test]
    fn test_touch_mode_registers_no_listener() {
        let (pager, host, _pages) = setup(5, InputMode::Touch);
        drop(pager);
        let log = host.log.lock().unwrap();
        assert!(log.added.is_empty());
        assert!(log.removed.is_empty());
    }

    #[test]
    fn test_pointer_release_resolves_immediately() {
        let (mut pager, host, pages) = setup(5, InputMode::PointerOnly);
        let t0 = Instant::now();

        pager.on_pointer_down();
        assert!(pager.is_dragging());
        pager.on_raw_offset(1300.0, t0);
        pager.on_pointer_up(t0 + ms(1));

        assert!(!pager.is_dragging());
        assert_eq!(host.commands(), vec![(1600.0, true)]);
        assert_eq!(*pages.lock().unwrap(), vec![2]);
        assert_eq!(pager.next_deadline(), None);
    }

    #[test]
    fn test_pointer_signals_ignored_in_touch_mode() {
        let (mut pager, host, _pages) = setup(5, InputMode::Touch);

        pager.on_pointer_down();
        assert!(!pager.is_dragging());
        pager.on_pointer_up(Instant::now());
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_input_after_teardown_is_ignored() {
        let (mut pager, host, pages) = setup(5, InputMode::Touch);
        pager.teardown();

        let t0 = Instant::now();
        pager.on_raw_offset(800.0, t0);
        pager.set_current_page(2);
        assert!(!pager.poll(t0 + ms(100)));
        assert!(host.commands().is_empty());
        assert!(pages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resize_keeps_page_and_offset() {
        let (mut pager, _host, _pages) = setup(5, InputMode::Touch);
        pager.set_current_page(2);
        pager.on_raw_offset(1600.0, Instant::now());

        pager.on_viewport_measured(1000.0, 500.0);

        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.offset(), 1600.0);
        assert_eq!(pager.viewport(), Some(Viewport::new(1000.0, 500.0)));
        assert_eq!(pager.panel_frames()[1].left, 1000.0);
    }

    #[test]
    fn test_initial_page_applied_when_ready() {
        let host = RecordingHost::default();
        let config = PagerConfig {
            initial_page: Some(3),
            ..Default::default()
        };
        let mut pager = ScrollSnapController::new(host.clone(), config, InputMode::Touch);
        pager.set_panel_count(5);
        assert!(host.commands().is_empty());

        pager.on_viewport_measured(800.0, 600.0);
        pager.on_viewport_measured(900.0, 600.0);

        assert_eq!(host.commands(), vec![(2400.0, false)]);
        assert_eq!(pager.current_page(), 3);
        assert_eq!(pager.offset(), 2400.0);
    }

    fn initial_page_pager(page: usize) -> (ScrollSnapController<RecordingHost>, RecordingHost) {
        let host = RecordingHost::default();
        let config = PagerConfig {
            initial_page: Some(page),
            ..Default::default()
        };
        let pager = ScrollSnapController::new(host.clone(), config, InputMode::Touch);
        (pager, host)
    }

    #[test]
    fn test_initial_page_waits_for_usable_width() {
        let (mut pager, host) = initial_page_pager(3);
        pager.set_panel_count(5);

        pager.on_viewport_measured(0.0, 0.0);
        assert!(pager.is_ready());
        assert!(host.commands().is_empty());

        pager.on_viewport_measured(800.0, 600.0);
        assert_eq!(host.commands(), vec![(2400.0, false)]);
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn test_initial_page_waits_for_panels() {
        let (mut pager, host) = initial_page_pager(3);

        pager.on_viewport_measured(800.0, 600.0);
        assert!(host.commands().is_empty());
        pager.set_panel_count(2);
        assert!(host.commands().is_empty());

        pager.set_panel_count(5);
        pager.set_panel_count(6);
        assert_eq!(host.commands(), vec![(2400.0, false)]);
        assert_eq!(pager.current_page(), 3);
        assert_eq!(pager.offset(), 2400.0);
    }

    #[test]
    fn test_explicit_page_drops_pending_initial_page() {
        let (mut pager, host) = initial_page_pager(3);
        pager.set_panel_count(2);
        pager.on_viewport_measured(800.0, 600.0);

        pager.set_current_page(1);
        pager.set_panel_count(5);

        assert_eq!(host.commands(), vec![(800.0, true)]);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn test_shrinking_panel_count_clamps_page() {
        let (mut pager, _host, pages) = setup(5, InputMode::Touch);
        pager.set_current_page(4);

        pager.set_panel_count(5);
        pager.set_panel_count(2);
        pager.set_panel_count(2);

        assert_eq!(pager.current_page(), 1);
        assert_eq!(*pages.lock().unwrap(), vec![4, 1]);
    }

    #[test]
    fn test_non_finite_offset_dropped() {
        let (mut pager, _host, _pages) = setup(5, InputMode::Touch);
        pager.on_raw_offset(f64::NAN, Instant::now());
        assert_eq!(pager.offset(), 0.0);
        assert_eq!(pager.next_deadline(), None);
    }
}
