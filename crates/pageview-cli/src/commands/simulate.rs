use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};
use tracing::debug;

use pageview_core::{
    AppConfig, InputMode, PageNavigator, PagerCommand, PagerDriver, PagerEvent, PagerHandle,
};

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Number of panels
    #[arg(long, default_value_t = 5)]
    pub pages: usize,
    /// Viewport width
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,
    /// Viewport height
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
    /// Offsets reported by the surface, in order
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = vec![0.0, 150.0, 400.0, 790.0]
    )]
    pub offsets: Vec<f64>,
    /// Milliseconds between consecutive offsets
    #[arg(long, default_value_t = 5)]
    pub gap_ms: u64,
    /// Hold the surface while the offsets are reported
    #[arg(long)]
    pub drag: bool,
    /// Behave like a host without touch input
    #[arg(long)]
    pub pointer: bool,
    /// Request this page once the gesture is over
    #[arg(long)]
    pub goto: Option<usize>,
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: Arc<AppConfig>, args: SimulateArgs) -> Result<()> {
    let input_mode = if args.pointer {
        InputMode::PointerOnly
    } else {
        InputMode::Touch
    };

    let (driver, handle, mut events) = PagerDriver::new(config.pager.clone(), input_mode);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver_task = tokio::spawn(driver.run(shutdown_rx));

    let mut script = tokio::spawn(play(handle.clone(), args.clone()));
    let mut script_done = false;

    // Quiet period long enough for the slowest pending resolution
    let quiet = config.pager.animating_debounce() + config.pager.drag_poll() * 2;
    let start = Instant::now();
    let mut last_page = None;

    loop {
        tokio::select! {
            result = &mut script, if !script_done => {
                result??;
                script_done = true;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                if let PagerEvent::PageChanged { page } = event {
                    last_page = Some(page);
                }
                if matches!(event, PagerEvent::ScrollTo { animated: true, .. }) {
                    // The simulated surface arrives instantly
                    handle.send(PagerCommand::AnimationEnd)?;
                }

                let line = if args.json {
                    event.to_json_line()?
                } else {
                    format_event(&event, start.elapsed())
                };
                println!("{}", line);
            }
            _ = sleep(quiet), if script_done => break,
        }
    }

    let _ = shutdown_tx.send(true);
    driver_task.await?;

    if !args.json {
        match last_page {
            Some(page) => println!("Settled on page {}", page),
            None => println!("Page unchanged"),
        }
    }

    Ok(())
}

/// Feed the scripted gesture into the driver
async fn play(mut handle: PagerHandle, args: SimulateArgs) -> pageview_core::Result<()> {
    handle.panel_count(args.pages)?;
    handle.measured(args.width, args.height)?;

    let (press, release) = if args.pointer {
        (PagerCommand::PointerDown, PagerCommand::PointerUp)
    } else {
        (PagerCommand::DragStart, PagerCommand::DragEnd)
    };

    if args.drag {
        handle.send(press)?;
    }
    for (i, offset) in args.offsets.iter().enumerate() {
        if i > 0 {
            sleep(Duration::from_millis(args.gap_ms)).await;
        }
        debug!(offset, "Reporting offset");
        handle.offset(*offset)?;
    }
    if args.drag {
        sleep(Duration::from_millis(args.gap_ms)).await;
        handle.send(release)?;
    }

    if let Some(page) = args.goto {
        handle.go_to(page);
    }
    Ok(())
}

fn format_event(event: &PagerEvent, elapsed: Duration) -> String {
    let at = format!("{:>6}ms", elapsed.as_millis());
    match event {
        PagerEvent::ScrollTo { offset, animated } => {
            let how = if *animated { "animated" } else { "instant" };
            format!("{}  scroll_to {} ({})", at, offset, how)
        }
        PagerEvent::PageChanged { page } => format!("{}  page_changed {}", at, page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_event() {
        let scroll = PagerEvent::ScrollTo {
            offset: 800.0,
            animated: true,
        };
        assert_eq!(
            format_event(&scroll, Duration::from_millis(35)),
            "    35ms  scroll_to 800 (animated)"
        );

        let page = PagerEvent::PageChanged { page: 1 };
        assert_eq!(
            format_event(&page, Duration::from_millis(1200)),
            "  1200ms  page_changed 1"
        );
    }
}
