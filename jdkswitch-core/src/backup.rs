use crate::env::{self, EnvironmentAccessor};
use crate::error::BackupError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

pub const MANIFEST_FILE: &str = "backup_info.txt";

/// Variables captured by every backup, with the file each one lands in.
const CAPTURED: [(&str, &str); 3] = [
    (env::PATH, "PATH.txt"),
    (env::JAVA_HOME, "JAVA_HOME.txt"),
    (env::CLASSPATH, "CLASSPATH.txt"),
];

#[derive(Debug, Clone)]
pub struct BackupRecord {
    pub dir: PathBuf,
    pub created_at: OffsetDateTime,
    pub files: Vec<(String, PathBuf)>,
}

impl BackupRecord {
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }
}

/// Snapshots the three variables into a new `<backup_root>/<YYYYMMDD_HHMMSS>` directory.
///
/// All values are read before anything is written, so a read failure leaves
/// no partial backup behind.
pub fn create_backup<E>(accessor: &E, backup_root: &Path) -> Result<BackupRecord, BackupError>
where
    E: EnvironmentAccessor + ?Sized,
{
    let mut values = Vec::with_capacity(CAPTURED.len());
    for (name, file) in CAPTURED {
        let value = accessor.get_var(name).map_err(|source| BackupError::Read {
            name: name.to_string(),
            source,
        })?;
        values.push((name, file, value));
    }

    let created_at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let dir = create_fresh_dir(backup_root, &timestamp_name(created_at))?;

    let mut files = Vec::with_capacity(values.len());
    for (name, file, value) in values {
        let path = dir.join(file);
        write_file(&path, &value)?;
        files.push((name.to_string(), path));
    }

    let record = BackupRecord {
        dir,
        created_at,
        files,
    };

    write_file(&record.manifest_path(), &manifest(&record))?;

    tracing::debug!("environment backed up to {}", record.dir.display());

    Ok(record)
}

fn timestamp_name(at: OffsetDateTime) -> String {
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

fn manifest(record: &BackupRecord) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let when = record
        .created_at
        .format(format)
        .unwrap_or_else(|_| record.created_at.to_string());

    let mut content = format!("Backup time: {}\n", when);
    content.push_str("Backed up files:\n");
    for (name, path) in &record.files {
        content.push_str(&format!("- {}: {}\n", name, path.display()));
    }
    content
}

fn create_fresh_dir(root: &Path, name: &str) -> Result<PathBuf, BackupError> {
    fs::create_dir_all(root).map_err(|source| BackupError::Write {
        path: root.to_path_buf(),
        source,
    })?;

    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            root.join(name)
        } else {
            root.join(format!("{}_{}", name, attempt))
        };

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(error) if error.kind() == ErrorKind::AlreadyExists && attempt < 100 => {
                attempt += 1;
            }
            Err(source) => {
                return Err(BackupError::Write {
                    path: candidate,
                    source,
                });
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), BackupError> {
    fs::write(path, content).map_err(|source| BackupError::Write {
        path: path.to_path_buf(),
        source,
    })
}
