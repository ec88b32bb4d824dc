use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pager: PagerConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// How the pager decides between touch and pointer-only input handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModePreference {
    /// Ask the host for its touch capability
    #[default]
    Auto,
    /// Always treat the host as touch-capable
    Touch,
    /// Always use the pointer press/release fallback
    Pointer,
}

/// Paging controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Quiet period after the last offset before snapping (ms)
    #[serde(default = "default_idle_debounce")]
    pub idle_debounce_ms: u64,
    /// Quiet period used while a snap animation is still in flight (ms)
    #[serde(default = "default_animating_debounce")]
    pub animating_debounce_ms: u64,
    /// Re-check interval while the user is dragging (ms)
    #[serde(default = "default_drag_poll")]
    pub drag_poll_ms: u64,
    /// Allow the user to scroll the surface directly
    #[serde(default = "default_true")]
    pub scroll_enabled: bool,
    /// Page shown once the viewport is first measured
    #[serde(default)]
    pub initial_page: Option<usize>,
    /// Input mode detection override
    #[serde(default)]
    pub input_mode: InputModePreference,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            idle_debounce_ms: default_idle_debounce(),
            animating_debounce_ms: default_animating_debounce(),
            drag_poll_ms: default_drag_poll(),
            scroll_enabled: default_true(),
            initial_page: None,
            input_mode: InputModePreference::default(),
        }
    }
}

impl PagerConfig {
    #[inline]
    pub fn idle_debounce(&self) -> Duration {
        Duration::from_millis(self.idle_debounce_ms)
    }

    #[inline]
    pub fn animating_debounce(&self) -> Duration {
        Duration::from_millis(self.animating_debounce_ms)
    }

    #[inline]
    pub fn drag_poll(&self) -> Duration {
        Duration::from_millis(self.drag_poll_ms)
    }
}

/// Easing function type for scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// No easing (instant jump)
    None,
    /// Linear interpolation
    Linear,
    /// Cubic ease-out (recommended)
    #[default]
    Cubic,
    /// Quintic ease-out (more dramatic)
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Smooth scrolling configuration for the host scroll surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling animation
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing function type
    #[serde(default)]
    pub easing: EasingType,
    /// Target frame rate during animation
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl ScrollConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Frame interval while the surface is moving; ~60fps when `animation_fps` is 0
    #[inline]
    pub fn animation_tick_duration(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_millis(1000 / u64::from(fps)),
        }
    }

    /// Whether moves should be eased at all
    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0 && self.easing != EasingType::None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Labels of the panels shown by `pageview run`
    #[serde(default = "default_panels")]
    pub panels: Vec<String>,
    /// Show the "page x / n" indicator
    #[serde(default = "default_true")]
    pub show_page_indicator: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            panels: default_panels(),
            show_page_indicator: default_true(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pageview")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_idle_debounce() -> u64 {
    20
}

fn default_animating_debounce() -> u64 {
    100
}

fn default_drag_poll() -> u64 {
    20
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_panels() -> Vec<String> {
    ["pink", "wheat", "powderblue", "cornsilk", "palegreen"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pageview/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pageview")
            .join("config.toml")
    }

    /// Get the log file path used by the terminal UI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("pageview.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
