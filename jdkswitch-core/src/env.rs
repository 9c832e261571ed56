#[cfg(windows)]
pub mod windows;

use crate::error::AccessError;

pub const JAVA_HOME: &str = "JAVA_HOME";
pub const PATH: &str = "Path";
pub const CLASSPATH: &str = "CLASSPATH";

/// Machine-wide environment variables.
///
/// A variable that does not exist reads as an empty string.
pub trait EnvironmentAccessor {
    fn get_var(&self, name: &str) -> Result<String, AccessError>;

    fn set_var(&self, name: &str, value: &str) -> Result<(), AccessError>;

    /// Tells running processes that the system environment changed.
    fn broadcast_change(&self) -> Result<(), AccessError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedEnvironment;

impl EnvironmentAccessor for UnsupportedEnvironment {
    fn get_var(&self, _name: &str) -> Result<String, AccessError> {
        Err(AccessError::UnsupportedPlatform)
    }

    fn set_var(&self, _name: &str, _value: &str) -> Result<(), AccessError> {
        Err(AccessError::UnsupportedPlatform)
    }

    fn broadcast_change(&self) -> Result<(), AccessError> {
        Err(AccessError::UnsupportedPlatform)
    }
}

/// Values that reference other variables (`%SystemRoot%\system32`) must be
/// stored as expandable strings or Windows stops resolving them.
pub fn needs_expansion(value: &str) -> bool {
    let segments: Vec<&str> = value.split('%').collect();

    // Odd segments sit between a pair of '%' when a closing one follows.
    segments
        .iter()
        .enumerate()
        .skip(1)
        .step_by(2)
        .any(|(index, name)| index + 1 < segments.len() && !name.is_empty())
}

/// Picks the accessor for the running platform.
pub fn default_accessor() -> Box<dyn EnvironmentAccessor> {
    #[cfg(windows)]
    {
        Box::new(windows::RegistryEnvironment::new())
    }

    #[cfg(not(windows))]
    {
        tracing::debug!("system environment access is unavailable on {}", std::env::consts::OS);
        Box::new(UnsupportedEnvironment)
    }
}
