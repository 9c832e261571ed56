use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Unsupported platform: system environment variables are only available on Windows")]
    UnsupportedPlatform,

    #[error("Access denied to system environment variable {name} (run as administrator)")]
    AccessDenied { name: String },

    #[error("Failed to open the system environment registry key: status={code}")]
    OpenKey { code: u32 },

    #[error("Failed to read system environment variable {name}: status={code}")]
    Read { name: String, code: u32 },

    #[error("Failed to write system environment variable {name}: status={code}")]
    Write { name: String, code: u32 },

    #[error("Failed to broadcast environment change: {reason}")]
    Broadcast { reason: String },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Settings file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read settings file {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse settings file {path:?}: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },

    #[error("Settings file {path:?} contains no JDK paths")]
    Empty { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Settings file already exists at {path:?}")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to serialize settings for {path:?}: {reason}")]
    Serialize { path: PathBuf, reason: String },

    #[error("Failed to write settings file {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("JDK version {label} is not configured")]
pub struct UnknownVersion {
    pub label: String,
}

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Failed to read {name} for backup: {source}")]
    Read { name: String, source: AccessError },

    #[error("Failed to write backup file {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error(transparent)]
    UnknownVersion(#[from] UnknownVersion),

    #[error("Invalid JDK installation at {path:?}: bin\\java.exe and bin\\javac.exe are required")]
    InvalidInstallation { path: PathBuf },

    #[error("Backup of environment variables failed: {0}")]
    BackupFailed(#[source] BackupError),

    #[error("Failed to read {name}: {source}")]
    EnvReadFailed { name: String, source: AccessError },

    #[error("Failed to write {name}: {source}")]
    EnvWriteFailed { name: String, source: AccessError },

    #[error("Unsupported platform: system environment variables are only available on Windows")]
    UnsupportedPlatform,
}

impl SwitchError {
    /// Maps an accessor failure onto the switch taxonomy, keeping
    /// `UnsupportedPlatform` distinct from ordinary read/write failures.
    pub(crate) fn read(name: &str, source: AccessError) -> Self {
        match source {
            AccessError::UnsupportedPlatform => SwitchError::UnsupportedPlatform,
            source => SwitchError::EnvReadFailed {
                name: name.to_string(),
                source,
            },
        }
    }

    pub(crate) fn write(name: &str, source: AccessError) -> Self {
        match source {
            AccessError::UnsupportedPlatform => SwitchError::UnsupportedPlatform,
            source => SwitchError::EnvWriteFailed {
                name: name.to_string(),
                source,
            },
        }
    }

    pub(crate) fn backup(source: BackupError) -> Self {
        match source {
            BackupError::Read {
                source: AccessError::UnsupportedPlatform,
                ..
            } => SwitchError::UnsupportedPlatform,
            source => SwitchError::BackupFailed(source),
        }
    }
}

#[derive(Error, Debug)]
pub enum JdkSwitchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    UnknownVersion(#[from] UnknownVersion),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error(transparent)]
    Switch(#[from] SwitchError),
}
