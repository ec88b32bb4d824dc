use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pageview_core::{AppConfig, InputModePreference};

mod commands;

#[derive(Parser)]
#[command(name = "pageview")]
#[command(author, version, about = "A snapping horizontal pager for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive pager
    Run {
        /// Panel label; repeat to replace the configured panels
        #[arg(short = 'p', long = "panel")]
        panels: Vec<String>,
        /// Override how press and release are detected
        #[arg(long, value_enum)]
        input: Option<InputArg>,
        /// Page shown when the pager opens (zero-based)
        #[arg(long)]
        initial_page: Option<usize>,
    },
    /// Replay a scripted gesture through the pager and print what it commands
    Simulate(commands::simulate::SimulateArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputArg {
    Auto,
    Touch,
    Pointer,
}

impl From<InputArg> for InputModePreference {
    fn from(arg: InputArg) -> Self {
        match arg {
            InputArg::Auto => InputModePreference::Auto,
            InputArg::Touch => InputModePreference::Touch,
            InputArg::Pointer => InputModePreference::Pointer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config_path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };

    let command = cli.command.unwrap_or(Commands::Run {
        panels: Vec::new(),
        input: None,
        initial_page: None,
    });

    match command {
        Commands::Run {
            panels,
            input,
            initial_page,
        } => {
            // The terminal is in raw mode, so logs go to a file
            init_file_logging(&config)?;

            if !panels.is_empty() {
                config.ui.panels = panels;
            }
            if let Some(input) = input {
                config.pager.input_mode = input.into();
            }
            if initial_page.is_some() {
                config.pager.initial_page = initial_page;
            }
            commands::run::run(Arc::new(config)).await
        }
        Commands::Simulate(args) => {
            init_stderr_logging(&config);
            commands::simulate::run(Arc::new(config), args).await
        }
        Commands::Config { action } => {
            init_stderr_logging(&config);
            match action {
                ConfigAction::Path => commands::config::path(cli.config_path.as_deref()),
                ConfigAction::Init { force } => {
                    commands::config::init(cli.config_path.as_deref(), force)
                }
                ConfigAction::Show => commands::config::show(&config),
            }
        }
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn init_file_logging(config: &AppConfig) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
