pub mod backup;
pub mod config;
pub mod console;
pub mod env;
pub mod error;
pub mod operations;
pub mod path_rules;
pub mod settings;
pub mod switch;
pub mod validator;

#[cfg(test)]
mod testing;

pub use config::SwitchConfig;
pub use env::{EnvironmentAccessor, default_accessor};
pub use error::JdkSwitchError;
pub use settings::{Registry, SettingsStore};
pub use switch::{SwitchReport, SwitchWarning, switch_to};

pub type Result<T> = std::result::Result<T, JdkSwitchError>;
