#![warn(clippy::pedantic)]

pub mod log;
mod service;
mod settings;

pub use service::Service;
pub use settings::{Settings, SettingsError, SettingsRepository, SettingsService, Theme};
