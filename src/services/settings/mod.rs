// Settings service: TOML persistence for planner settings

mod service;

pub use service::{load_settings_or_default, SettingsService};
