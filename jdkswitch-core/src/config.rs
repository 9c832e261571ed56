use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "config.json";
pub const BACKUP_DIR: &str = "backup";

/// Location of the Oracle installer's `javapath` shim, which pins `java` to
/// whatever version the installer last registered.
pub const ORACLE_JAVAPATH_DIR: &str = r"C:\Program Files\Common Files\Oracle\Java\javapath";

#[derive(Debug, Clone)]
pub struct SwitchConfig {
    pub base_dir: PathBuf,
    pub vendor_shim_dir: PathBuf,
    pub verbose: bool,
}

impl SwitchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_dir = read("JDK_SWITCH_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(default_base_dir);

        let vendor_shim_dir = read("JDK_SWITCH_SHIM_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(ORACLE_JAVAPATH_DIR));

        let verbose = match read("JDK_SWITCH_VERBOSE") {
            Some(value) => {
                let v = value.to_ascii_lowercase();
                matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on")
            }
            None => false,
        };

        SwitchConfig {
            base_dir,
            vendor_shim_dir,
            verbose,
        }
    }

    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        SwitchConfig {
            base_dir: base_dir.as_ref().to_path_buf(),
            vendor_shim_dir: PathBuf::from(ORACLE_JAVAPATH_DIR),
            verbose: false,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join(BACKUP_DIR)
    }
}

fn default_base_dir() -> PathBuf {
    if cfg!(windows) {
        return PathBuf::from(r"C:\jdk-switch");
    }

    match ProjectDirs::from("io", "jdk-switch", "jdk-switch") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => PathBuf::from(".jdk-switch"),
    }
}
