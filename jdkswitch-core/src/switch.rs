use crate::backup::{self, BackupRecord};
use crate::config::SwitchConfig;
use crate::env::{self, EnvironmentAccessor};
use crate::error::SwitchError;
use crate::path_rules;
use crate::settings::Registry;
use crate::validator::{JAVA_EXE, Validator};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SwitchOptions {
    pub backup_root: PathBuf,
    pub vendor_shim_dir: PathBuf,
}

impl SwitchOptions {
    pub fn from_config(config: &SwitchConfig) -> Self {
        Self {
            backup_root: config.backup_dir(),
            vendor_shim_dir: config.vendor_shim_dir.clone(),
        }
    }
}

/// Conditions worth reporting that do not fail a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchWarning {
    MissingLibraryJar(PathBuf),
    BroadcastFailed(String),
    VendorShim {
        dir: PathBuf,
        on_disk: bool,
        in_path: bool,
    },
}

impl fmt::Display for SwitchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchWarning::MissingLibraryJar(path) => {
                write!(f, "file does not exist: {}", path.display())
            }
            SwitchWarning::BroadcastFailed(reason) => write!(
                f,
                "environment change was not broadcast, open a new terminal to pick it up ({})",
                reason
            ),
            SwitchWarning::VendorShim { dir, on_disk, in_path } => {
                let location = match (on_disk, in_path) {
                    (true, true) => "on disk and in Path",
                    (true, false) => "on disk",
                    _ => "in Path",
                };
                write!(
                    f,
                    "vendor java shim found {} ({}); it may keep `java` pinned to a fixed version",
                    location,
                    dir.display()
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    pub backup: Duration,
    pub read: Duration,
    pub write: Duration,
    pub broadcast: Duration,
}

impl StepTimings {
    pub fn total(&self) -> Duration {
        self.backup + self.read + self.write + self.broadcast
    }
}

#[derive(Debug, Clone)]
pub struct SwitchReport {
    pub label: String,
    pub java_home: String,
    pub path: String,
    pub classpath: String,
    pub backup: BackupRecord,
    pub warnings: Vec<SwitchWarning>,
    pub timings: StepTimings,
}

/// Points `JAVA_HOME`, `Path` and `CLASSPATH` at the installation registered
/// under `label`.
///
/// A backup is always taken before the first write. Writes happen in the
/// order `JAVA_HOME`, `Path`, `CLASSPATH` and stop at the first failure;
/// variables already written are not restored. The caller owns persisting
/// the new active label.
pub fn switch_to<V, E>(
    registry: &Registry,
    validator: &V,
    accessor: &E,
    label: &str,
    options: &SwitchOptions,
) -> Result<SwitchReport, SwitchError>
where
    V: Validator + ?Sized,
    E: EnvironmentAccessor + ?Sized,
{
    let home = PathBuf::from(registry.lookup(label)?);

    if !validator.is_valid(&home) {
        return Err(SwitchError::InvalidInstallation { path: home });
    }

    let mut timings = StepTimings::default();
    let mut warnings = Vec::new();

    let started = Instant::now();
    let backup =
        backup::create_backup(accessor, &options.backup_root).map_err(SwitchError::backup)?;
    timings.backup = started.elapsed();
    tracing::debug!(elapsed = ?timings.backup, "backup complete");

    let started = Instant::now();
    let original_path = accessor
        .get_var(env::PATH)
        .map_err(|e| SwitchError::read(env::PATH, e))?;
    timings.read = started.elapsed();
    tracing::debug!(elapsed = ?timings.read, "read {}", env::PATH);

    let java_home = home.display().to_string();
    let path = path_rules::rewrite_search_path(&original_path, &home.join("bin"));
    let classpath = path_rules::build_classpath(&home);
    warnings.extend(
        classpath
            .missing
            .iter()
            .cloned()
            .map(SwitchWarning::MissingLibraryJar),
    );

    let started = Instant::now();
    for (name, value) in [
        (env::JAVA_HOME, java_home.as_str()),
        (env::PATH, path.as_str()),
        (env::CLASSPATH, classpath.value.as_str()),
    ] {
        accessor
            .set_var(name, value)
            .map_err(|e| SwitchError::write(name, e))?;
        tracing::debug!("wrote {}", name);
    }
    timings.write = started.elapsed();
    tracing::debug!(elapsed = ?timings.write, "environment written");

    let started = Instant::now();
    if let Err(error) = accessor.broadcast_change() {
        tracing::debug!("broadcast failed: {}", error);
        warnings.push(SwitchWarning::BroadcastFailed(error.to_string()));
    }
    timings.broadcast = started.elapsed();
    tracing::debug!(elapsed = ?timings.broadcast, "broadcast finished");

    if let Some(warning) = detect_vendor_shim(&options.vendor_shim_dir, &original_path) {
        warnings.push(warning);
    }

    Ok(SwitchReport {
        label: label.to_string(),
        java_home,
        path,
        classpath: classpath.value,
        backup,
        warnings,
        timings,
    })
}

fn detect_vendor_shim(dir: &Path, original_path: &str) -> Option<SwitchWarning> {
    let on_disk = dir.join(JAVA_EXE).is_file();
    let in_path = path_rules::mentions_vendor_shim(original_path);

    (on_disk || in_path).then(|| SwitchWarning::VendorShim {
        dir: dir.to_path_buf(),
        on_disk,
        in_path,
    })
}
