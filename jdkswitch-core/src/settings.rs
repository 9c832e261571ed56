use crate::error::{LoadError, SaveError, UnknownVersion};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Installed JDKs keyed by version label, plus the label that is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Registry {
    #[serde(default)]
    pub jdk_paths: BTreeMap<String, String>,
    #[serde(default)]
    pub current_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry<'a> {
    pub label: &'a str,
    pub path: &'a str,
    pub active: bool,
}

impl Registry {
    pub fn lookup(&self, label: &str) -> Result<&str, UnknownVersion> {
        self.jdk_paths
            .get(label)
            .map(String::as_str)
            .ok_or_else(|| UnknownVersion {
                label: label.to_string(),
            })
    }

    pub fn set_active(&mut self, label: &str) -> Result<(), UnknownVersion> {
        if !self.jdk_paths.contains_key(label) {
            return Err(UnknownVersion {
                label: label.to_string(),
            });
        }

        self.current_version = label.to_string();
        Ok(())
    }

    pub fn versions(&self) -> impl Iterator<Item = VersionEntry<'_>> {
        self.jdk_paths.iter().map(|(label, path)| VersionEntry {
            label,
            path,
            active: *label == self.current_version,
        })
    }

    fn default_installations() -> Self {
        let jdk_paths = [
            ("8", r"C:\Program Files\Java\jdk1.8.0_301"),
            ("11", r"C:\Program Files\Java\jdk-11.0.12"),
            ("17", r"C:\Program Files\Java\jdk-17.0.2"),
        ]
        .into_iter()
        .map(|(label, path)| (label.to_string(), path.to_string()))
        .collect();

        Registry {
            jdk_paths,
            current_version: "8".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Registry, LoadError> {
        let data = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                LoadError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let mut registry: Registry =
            serde_json::from_str(&data).map_err(|source| LoadError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        if registry.jdk_paths.is_empty() {
            return Err(LoadError::Empty {
                path: self.path.clone(),
            });
        }

        if registry.current_version.is_empty()
            && let Some(first) = registry.jdk_paths.keys().next()
        {
            tracing::debug!("no current version recorded, selecting {}", first);
            registry.current_version = first.clone();
        }

        Ok(registry)
    }

    pub fn save(&self, registry: &Registry) -> Result<(), SaveError> {
        let data = to_indented_json(registry).map_err(|e| SaveError::Serialize {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SaveError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, data).map_err(|source| SaveError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Writes the default installation table. Never overwrites an existing file.
    pub fn init_default(&self) -> Result<Registry, SaveError> {
        if self.path.exists() {
            return Err(SaveError::AlreadyExists {
                path: self.path.clone(),
            });
        }

        let registry = Registry::default_installations();
        self.save(&registry)?;
        Ok(registry)
    }
}

/// Settings files are indented with four spaces.
fn to_indented_json(registry: &Registry) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    registry.serialize(&mut serializer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Registry {
        let mut registry = Registry::default();
        registry
            .jdk_paths
            .insert("8".to_string(), r"C:\Test\JDK8".to_string());
        registry
            .jdk_paths
            .insert("11".to_string(), r"C:\Test\JDK11".to_string());
        registry
            .jdk_paths
            .insert("17".to_string(), r"C:\Test\JDK17".to_string());
        registry.current_version = "11".to_string();
        registry
    }

    #[test]
    fn save_then_load_preserves_entries_and_active_label() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("nested").join("config.json"));
        let registry = sample();

        store.save(&registry).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, registry);
        assert_eq!(loaded.jdk_paths.len(), 3);
        assert_eq!(loaded.current_version, "11");
    }

    #[test]
    fn saved_file_is_pretty_printed_with_stable_field_names() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));

        store.save(&sample()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();

        assert!(text.contains("\"jdk_paths\""));
        assert!(text.contains("\"current_version\": \"11\""));
        assert!(text.lines().count() > 1);
        assert!(text.contains("\n    \"current_version\": \"11\""));
        assert!(text.contains("\n        \"11\": "));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));

        assert!(matches!(store.load(), Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(LoadError::Corrupt { .. })));
    }

    #[test]
    fn zero_entries_is_empty() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));
        fs::write(
            store.path(),
            r#"{ "jdk_paths": {}, "current_version": "8" }"#,
        )
        .unwrap();

        assert!(matches!(store.load(), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn blank_current_version_is_repaired_on_load() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));
        fs::write(
            store.path(),
            r#"{ "jdk_paths": { "17": "/opt/jdk17", "11": "/opt/jdk11" }, "current_version": "" }"#,
        )
        .unwrap();

        let registry = store.load().unwrap();
        assert!(registry.jdk_paths.contains_key(&registry.current_version));
    }

    #[test]
    fn lookup_and_set_active_reject_unknown_labels() {
        let mut registry = sample();

        assert_eq!(registry.lookup("8").unwrap(), r"C:\Test\JDK8");
        assert_eq!(
            registry.lookup("999"),
            Err(UnknownVersion {
                label: "999".to_string()
            })
        );

        let before = registry.clone();
        assert!(registry.set_active("999").is_err());
        assert_eq!(registry, before);

        registry.set_active("17").unwrap();
        assert_eq!(registry.current_version, "17");
    }

    #[test]
    fn versions_marks_the_active_entry() {
        let registry = sample();
        let active: Vec<_> = registry
            .versions()
            .filter(|entry| entry.active)
            .map(|entry| entry.label)
            .collect();

        assert_eq!(active, vec!["11"]);
        assert_eq!(registry.versions().count(), 3);
    }

    #[test]
    fn init_default_writes_once() {
        let tmp = tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("config.json"));

        let registry = store.init_default().unwrap();
        assert_eq!(registry.current_version, "8");
        assert_eq!(store.load().unwrap(), registry);

        assert!(matches!(
            store.init_default(),
            Err(SaveError::AlreadyExists { .. })
        ));
    }
}
