//! Async pager driver
//!
//! Runs one [`ScrollSnapController`] inside a tokio task. Every input arrives
//! as a [`PagerCommand`] on a channel and the debounce deadline is awaited in
//! the same `select!` loop, so the controller is only ever touched by one
//! task. Scroll commands and page changes come back as [`PagerEvent`]s in the
//! order they were issued.

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::config::PagerConfig;
use crate::pager::{InputMode, ListenerId, PageNavigator, ScrollHost, ScrollSnapController};
use crate::{Error, Result};

/// Input delivered to the driver
#[derive(Debug, Clone, PartialEq)]
pub enum PagerCommand {
    /// Surface scrolled to a new offset
    Offset(f64),
    DragStart,
    DragEnd,
    PointerDown,
    PointerUp,
    /// Surface finished an animated move
    AnimationEnd,
    /// Viewport laid out
    Measured { width: f64, height: f64 },
    /// Panel set changed size
    PanelCount(usize),
    GoTo(usize),
    Next,
    Previous,
    SetScrollEnabled(bool),
}

/// Output emitted by the driver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PagerEvent {
    /// The surface should move to `offset`
    ScrollTo { offset: f64, animated: bool },
    /// The settled page changed
    PageChanged { page: usize },
}

impl PagerEvent {
    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Scroll host that forwards scroll commands onto the event channel
#[derive(Debug)]
struct ChannelHost {
    events: mpsc::UnboundedSender<PagerEvent>,
    listener: Option<ListenerId>,
}

impl ChannelHost {
    fn emit(&self, event: PagerEvent) {
        if self.events.send(event).is_err() {
            debug!("Pager event dropped: receiver closed");
        }
    }
}

impl ScrollHost for ChannelHost {
    fn scroll_to(&mut self, offset: f64, animated: bool) {
        self.emit(PagerEvent::ScrollTo { offset, animated });
    }

    // Pointer input already travels over the command channel
    fn add_pointer_listener(&mut self) -> Option<ListenerId> {
        let id = ListenerId(1);
        self.listener = Some(id);
        Some(id)
    }

    fn remove_pointer_listener(&mut self, id: ListenerId) {
        if self.listener == Some(id) {
            self.listener = None;
        }
    }
}

/// Cloneable handle feeding a running [`PagerDriver`]
#[derive(Debug, Clone)]
pub struct PagerHandle {
    commands: mpsc::UnboundedSender<PagerCommand>,
}

impl PagerHandle {
    /// Send a command, failing once the driver has stopped
    pub fn send(&self, command: PagerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::DriverClosed)
    }

    pub fn offset(&self, offset: f64) -> Result<()> {
        self.send(PagerCommand::Offset(offset))
    }

    pub fn drag_start(&self) -> Result<()> {
        self.send(PagerCommand::DragStart)
    }

    pub fn drag_end(&self) -> Result<()> {
        self.send(PagerCommand::DragEnd)
    }

    pub fn measured(&self, width: f64, height: f64) -> Result<()> {
        self.send(PagerCommand::Measured { width, height })
    }

    pub fn panel_count(&self, count: usize) -> Result<()> {
        self.send(PagerCommand::PanelCount(count))
    }

    /// Whether the driver is still accepting commands
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn fire(&self, command: PagerCommand) {
        if let Err(e) = self.send(command) {
            debug!("Navigation dropped: {}", e);
        }
    }
}

impl PageNavigator for PagerHandle {
    fn go_to(&mut self, page: usize) {
        self.fire(PagerCommand::GoTo(page));
    }

    fn next(&mut self) {
        self.fire(PagerCommand::Next);
    }

    fn previous(&mut self) {
        self.fire(PagerCommand::Previous);
    }
}

/// Task owning a pager controller
pub struct PagerDriver {
    controller: ScrollSnapController<ChannelHost>,
    commands: mpsc::UnboundedReceiver<PagerCommand>,
}

impl std::fmt::Debug for PagerDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDriver")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl PagerDriver {
    /// Create a driver together with its command handle and event stream
    pub fn new(
        config: PagerConfig,
        input_mode: InputMode,
    ) -> (Self, PagerHandle, mpsc::UnboundedReceiver<PagerEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let host = ChannelHost {
            events: event_tx.clone(),
            listener: None,
        };
        let controller = ScrollSnapController::new(host, config, input_mode).with_page_listener(
            move |page| {
                if event_tx.send(PagerEvent::PageChanged { page }).is_err() {
                    debug!("Page change dropped: receiver closed");
                }
            },
        );

        let driver = Self {
            controller,
            commands: command_rx,
        };
        (driver, PagerHandle { commands: command_tx }, event_rx)
    }

    /// Process commands and timers until shutdown or until every handle is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(input_mode = ?self.controller.input_mode(), "Pager driver started");

        loop {
            let deadline = self.controller.next_deadline();

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Pager driver received shutdown signal");
                        break;
                    }
                }

                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.apply(command),
                        None => {
                            debug!("All pager handles dropped");
                            break;
                        }
                    }
                }

                _ = sleep_until(deadline) => {
                    self.controller.poll(now());
                }
            }
        }

        self.controller.teardown();
        info!("Pager driver stopped");
    }

    fn apply(&mut self, command: PagerCommand) {
        let now = now();
        let pager = &mut self.controller;
        match command {
            PagerCommand::Offset(offset) => pager.on_raw_offset(offset, now),
            PagerCommand::DragStart => pager.on_drag_start(),
            PagerCommand::DragEnd => pager.on_drag_end(now),
            PagerCommand::PointerDown => pager.on_pointer_down(),
            PagerCommand::PointerUp => pager.on_pointer_up(now),
            PagerCommand::AnimationEnd => pager.on_animation_end(),
            PagerCommand::Measured { width, height } => pager.on_viewport_measured(width, height),
            PagerCommand::PanelCount(count) => pager.set_panel_count(count),
            PagerCommand::GoTo(page) => pager.go_to(page),
            PagerCommand::Next => pager.next(),
            PagerCommand::Previous => pager.previous(),
            PagerCommand::SetScrollEnabled(enabled) => pager.set_scroll_enabled(enabled),
        }
    }
}

/// Current time on the tokio clock, so paused test time is honoured
fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
