pub mod chips;
pub mod config;
pub mod contacts;
pub mod error;
pub mod filter;
pub mod focus;
pub mod models;
pub mod widget;

pub use chips::ChipList;
pub use config::{AppConfig, LogConfig, UiConfig, WidgetConfig};
pub use contacts::{load_contacts, validate_contacts};
pub use error::{ChipinError, ExitCode, Result};
pub use filter::{exact_match, filter};
pub use focus::FocusTracker;
pub use models::*;
pub use widget::{ChipChange, ChipEvent, ChipInput, DeleteGesture, ListenerId, WidgetKey};
