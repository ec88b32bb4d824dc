pub mod config;
pub mod driver;
pub mod error;
pub mod pager;

pub use config::{AppConfig, EasingType, InputModePreference, PagerConfig, ScrollConfig};
pub use driver::{PagerCommand, PagerDriver, PagerEvent, PagerHandle};
pub use error::{Error, Result};
pub use pager::{
    InputMode, LayoutGate, PageNavigator, PanelFrame, ScrollHost, ScrollSnapController,
    TouchCapability, Viewport,
};
