use std::sync::Arc;
use std::time::Instant;

use pageview_core::pager::{InputMode, PageNavigator, ScrollSnapController};
use pageview_core::AppConfig;
use tokio::sync::mpsc;
use tracing::debug;

use crate::input::Action;
use crate::surface::{TerminalCapability, TerminalSurface};
use crate::theme::Theme;

/// Where a mouse drag started
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    column: u16,
    offset: f64,
}

/// Application state for the pager shell
pub struct App {
    pub pager: ScrollSnapController<TerminalSurface>,
    /// Panel labels, one page each
    pub panels: Vec<String>,
    pub theme: Theme,
    pub config: Arc<AppConfig>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    drag: Option<DragAnchor>,
    page_rx: mpsc::UnboundedReceiver<usize>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let panels = config.ui.panels.clone();
        Self::with_panels(config, theme, panels)
    }

    pub fn with_panels(config: Arc<AppConfig>, theme: Theme, panels: Vec<String>) -> Self {
        let input_mode = InputMode::resolve(config.pager.input_mode, &TerminalCapability);
        let surface = TerminalSurface::new(config.scroll.clone());

        let (page_tx, page_rx) = mpsc::unbounded_channel();
        let mut pager = ScrollSnapController::new(surface, config.pager.clone(), input_mode)
            .with_page_listener(move |page| {
                if page_tx.send(page).is_err() {
                    debug!(page, "Page change dropped: receiver closed");
                }
            });
        pager.set_panel_count(panels.len());

        Self {
            pager,
            panels,
            theme,
            config,
            status_message: None,
            should_quit: false,
            drag: None,
            page_rx,
        }
    }

    /// Settled page index
    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.panels.len()
    }

    /// Visible offset of the surface, in columns
    pub fn offset(&self) -> f64 {
        self.pager.host().offset()
    }

    /// Label of the settled page
    pub fn current_label(&self) -> Option<&str> {
        self.panels.get(self.current_page()).map(String::as_str)
    }

    /// Whether a "previous" arrow should be shown
    pub fn has_prev(&self) -> bool {
        self.page_count() > 0 && self.current_page() > 0
    }

    /// Whether a "next" arrow should be shown
    pub fn has_next(&self) -> bool {
        self.current_page() + 1 < self.page_count()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the main loop should poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.drag.is_some()
            || self.pager.host().needs_update()
            || self.pager.next_deadline().is_some()
    }

    /// The pager area was laid out at `width` x `height` cells
    pub fn measure(&mut self, width: u16, height: u16) {
        self.pager.on_viewport_measured(width as f64, height as f64);
    }

    /// Advance the surface one frame and fire the debounce timer when due
    pub fn update(&mut self, now: Instant) {
        let tick = self.pager.host_mut().tick(now);
        if let Some(offset) = tick.moved_to {
            self.pager.on_raw_offset(offset, now);
        }
        if tick.motion_finished {
            self.pager.on_animation_end();
        }

        self.pager.poll(now);

        while let Ok(page) = self.page_rx.try_recv() {
            let label = self.panels.get(page).map(String::as_str).unwrap_or("");
            self.status_message = Some(format!(" Page {}: {}", page + 1, label));
        }
    }

    /// Apply an input action
    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.pager.next(),
            Action::PrevPage => self.pager.previous(),
            Action::FirstPage => self.pager.go_to(0),
            Action::LastPage => {
                if let Some(last) = self.page_count().checked_sub(1) {
                    self.pager.go_to(last);
                }
            }
            Action::GoTo(page) => self.pager.go_to(page),
            Action::ToggleScrollEnabled => {
                let enabled = !self.pager.scroll_enabled();
                self.pager.set_scroll_enabled(enabled);
                self.status_message = Some(if enabled {
                    " Scrolling enabled".to_string()
                } else {
                    " Scrolling disabled".to_string()
                });
            }
            Action::PressAt(column) => self.press(column),
            Action::DragTo(column) => self.drag_to(column, now),
            Action::Release => self.release(now),
            Action::Wheel(delta) => {
                if self.pager.scroll_enabled() && self.drag.is_none() {
                    let offset = self.offset() + delta;
                    self.move_surface(offset, now);
                }
            }
            Action::None => {}
        }
    }

    fn press(&mut self, column: u16) {
        if !self.pager.scroll_enabled() {
            return;
        }
        let offset = self.offset();
        self.pager.host_mut().set_user_offset(offset);
        self.drag = Some(DragAnchor { column, offset });

        if self.pager.host().has_pointer_listener() {
            self.pager.on_pointer_down();
        } else {
            self.pager.on_drag_start();
        }
    }

    fn drag_to(&mut self, column: u16, now: Instant) {
        let Some(anchor) = self.drag else {
            return;
        };
        let offset = anchor.offset - (column as f64 - anchor.column as f64);
        self.move_surface(offset, now);
    }

    fn release(&mut self, now: Instant) {
        if self.drag.take().is_none() {
            return;
        }
        if self.pager.host().has_pointer_listener() {
            self.pager.on_pointer_up(now);
        } else {
            self.pager.on_drag_end(now);
        }
    }

    fn move_surface(&mut self, offset: f64, now: Instant) {
        let offset = offset.clamp(0.0, self.pager.max_offset());
        debug!(offset, "User moved surface");
        self.pager.host_mut().set_user_offset(offset);
        self.pager.on_raw_offset(offset, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageview_core::{EasingType, InputModePreference};
    use std::time::Duration;

    fn config(input_mode: InputModePreference) -> Arc<AppConfig> {
        let mut config = AppConfig::default();
        config.pager.input_mode = input_mode;
        config.scroll.easing = EasingType::Linear;
        config.scroll.animation_duration_ms = 100;
        Arc::new(config)
    }

    fn ready_app(input_mode: InputModePreference) -> App {
        let mut app = App::new(config(input_mode), Theme::default());
        app.measure(80, 20);
        app
    }

    /// Run frames every 10ms until nothing is moving
    fn settle(app: &mut App, mut now: Instant) -> Instant {
        for _ in 0..100 {
            now += Duration::from_millis(10);
            app.update(now);
            if !app.needs_fast_update() {
                break;
            }
        }
        now
    }

    #[test]
    fn test_terminal_defaults_to_pointer_listener() {
        let app = ready_app(InputModePreference::Auto);
        assert_eq!(app.pager.input_mode(), InputMode::PointerOnly);
        assert!(app.pager.host().has_pointer_listener());
        assert_eq!(app.page_count(), 5);
    }

    #[test]
    fn test_next_page_animates_surface() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        app.handle_action(Action::NextPage, t0);
        assert_eq!(app.current_page(), 1);
        settle(&mut app, t0);

        assert_eq!(app.offset(), 80.0);
        assert!(!app.pager.is_animating());
        assert!(app.has_prev());
        assert!(app.has_next());
        assert_eq!(app.status_message.as_deref(), Some(" Page 2: wheat"));
    }

    #[test]
    fn test_navigation_survives_closed_page_receiver() {
        let mut app = ready_app(InputModePreference::Auto);
        app.page_rx.close();
        let t0 = Instant::now();

        app.handle_action(Action::NextPage, t0);
        settle(&mut app, t0);

        assert_eq!(app.current_page(), 1);
        assert_eq!(app.offset(), 80.0);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_pointer_drag_snaps_on_release() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        app.handle_action(Action::PressAt(50), t0);
        app.handle_action(Action::DragTo(5), t0 + Duration::from_millis(5));
        assert_eq!(app.offset(), 45.0);

        // Held still: no snap while the button is down
        let now = settle(&mut app, t0 + Duration::from_millis(5));
        assert_eq!(app.current_page(), 0);
        assert_eq!(app.offset(), 45.0);

        app.handle_action(Action::Release, now);
        assert_eq!(app.current_page(), 1);
        settle(&mut app, now);
        assert_eq!(app.offset(), 80.0);
    }

    #[test]
    fn test_touch_drag_snaps_after_debounce() {
        let mut app = ready_app(InputModePreference::Touch);
        let t0 = Instant::now();
        assert!(!app.pager.host().has_pointer_listener());

        app.handle_action(Action::PressAt(10), t0);
        assert!(app.pager.is_dragging());
        app.handle_action(Action::DragTo(0), t0);
        app.handle_action(Action::Release, t0);
        assert_eq!(app.current_page(), 0);

        settle(&mut app, t0);
        // 10 columns of 80 is nearest to the first page
        assert_eq!(app.current_page(), 0);
        assert_eq!(app.offset(), 0.0);
    }

    #[test]
    fn test_drag_clamps_to_content() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        app.handle_action(Action::PressAt(0), t0);
        app.handle_action(Action::DragTo(60), t0);
        assert_eq!(app.offset(), 0.0);
    }

    #[test]
    fn test_wheel_scrolls_and_snaps() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        for _ in 0..12 {
            app.handle_action(Action::Wheel(4.0), t0);
        }
        assert_eq!(app.offset(), 48.0);
        settle(&mut app, t0);

        assert_eq!(app.current_page(), 1);
        assert_eq!(app.offset(), 80.0);
    }

    #[test]
    fn test_scroll_disabled_ignores_user_input() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        app.handle_action(Action::ToggleScrollEnabled, t0);
        app.handle_action(Action::Wheel(40.0), t0);
        app.handle_action(Action::PressAt(40), t0);
        app.handle_action(Action::DragTo(0), t0);
        assert_eq!(app.offset(), 0.0);
        assert!(!app.is_dragging());

        // Programmatic navigation still works
        app.handle_action(Action::LastPage, t0);
        assert_eq!(app.current_page(), 4);
    }

    #[test]
    fn test_out_of_range_jump_does_nothing() {
        let mut app = ready_app(InputModePreference::Auto);
        let t0 = Instant::now();

        app.handle_action(Action::GoTo(8), t0);
        app.update(t0);
        assert_eq!(app.current_page(), 0);
        assert!(app.status_message.is_none());
        assert!(!app.needs_fast_update());
    }
}
