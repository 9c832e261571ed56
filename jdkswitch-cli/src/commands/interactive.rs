use anyhow::Result;
use jdkswitch_core::{EnvironmentAccessor, Registry, SwitchConfig, console, operations};
use std::io::{self, BufRead};

use super::{list, set};

pub fn run(
    config: &SwitchConfig,
    accessor: &dyn EnvironmentAccessor,
    registry: &Registry,
) -> Result<()> {
    console::info(&format!("JDK Switch Tool v{}", env!("CARGO_PKG_VERSION")));
    list::run(registry);

    let stdin = io::stdin();
    session(config, accessor, registry.clone(), stdin.lock())?;
    Ok(())
}

/// Reads commands until `q` or end of input and returns the registry as last shown.
fn session<R: BufRead>(
    config: &SwitchConfig,
    accessor: &dyn EnvironmentAccessor,
    mut registry: Registry,
    mut input: R,
) -> Result<Registry> {
    loop {
        console::prompt("\nEnter a JDK version to switch to ('b' to back up, 'q' to quit): ");

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Empty => continue,
            Command::Backup => match operations::backup_only(config, accessor) {
                Ok(record) => console::success(&format!(
                    "Environment variables backed up to {}",
                    record.dir.display()
                )),
                Err(error) => console::error(&format!("Backup failed: {}", error)),
            },
            Command::Switch(label) => match operations::use_version(config, accessor, label) {
                Ok(report) => {
                    set::print_report(&report);
                    match operations::list_versions(config) {
                        Ok(updated) => registry = updated,
                        Err(error) => {
                            console::error(&error.to_string());
                            registry.current_version = report.label.clone();
                        }
                    }
                    println!();
                    list::run(&registry);
                }
                Err(error) => console::error(&error.to_string()),
            },
        }
    }

    Ok(registry)
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Backup,
    Empty,
    Switch(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    match input.trim() {
        "q" => Command::Quit,
        "b" => Command::Backup,
        "" => Command::Empty,
        label => Command::Switch(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdkswitch_core::SettingsStore;
    use jdkswitch_core::error::AccessError;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingEnvironment {
        vars: RefCell<BTreeMap<String, String>>,
    }

    impl EnvironmentAccessor for RecordingEnvironment {
        fn get_var(&self, name: &str) -> Result<String, AccessError> {
            Ok(self.vars.borrow().get(name).cloned().unwrap_or_default())
        }

        fn set_var(&self, name: &str, value: &str) -> Result<(), AccessError> {
            self.vars
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
            Ok(())
        }

        fn broadcast_change(&self) -> Result<(), AccessError> {
            Ok(())
        }
    }

    fn install_jdk(root: &Path) {
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("java.exe"), b"").unwrap();
        fs::write(bin.join("javac.exe"), b"").unwrap();
    }

    #[test]
    fn parses_interactive_input() {
        assert_eq!(parse_command("q\n"), Command::Quit);
        assert_eq!(parse_command(" b \r\n"), Command::Backup);
        assert_eq!(parse_command("\n"), Command::Empty);
        assert_eq!(parse_command("17\n"), Command::Switch("17"));
    }

    #[test]
    fn switching_refreshes_the_active_version() {
        let tmp = tempdir().unwrap();
        let jdk8 = tmp.path().join("jdk8");
        let jdk11 = tmp.path().join("jdk11");
        install_jdk(&jdk8);
        install_jdk(&jdk11);

        let mut config = SwitchConfig::with_base_dir(tmp.path().join("state"));
        config.vendor_shim_dir = tmp.path().join("no-shim");

        let mut registry = Registry::default();
        registry
            .jdk_paths
            .insert("8".to_string(), jdk8.display().to_string());
        registry
            .jdk_paths
            .insert("11".to_string(), jdk11.display().to_string());
        registry.current_version = "8".to_string();
        SettingsStore::new(config.settings_path())
            .save(&registry)
            .unwrap();

        let env = RecordingEnvironment::default();
        let shown = session(&config, &env, registry, "11\nq\n".as_bytes()).unwrap();

        assert_eq!(shown.current_version, "11");
        let active: Vec<_> = shown.versions().filter(|entry| entry.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "11");
    }

    #[test]
    fn failed_switch_keeps_the_active_version() {
        let tmp = tempdir().unwrap();
        let config = SwitchConfig::with_base_dir(tmp.path());
        let mut registry = Registry::default();
        registry
            .jdk_paths
            .insert("8".to_string(), tmp.path().join("missing").display().to_string());
        registry.current_version = "8".to_string();
        SettingsStore::new(config.settings_path())
            .save(&registry)
            .unwrap();

        let env = RecordingEnvironment::default();
        let shown = session(&config, &env, registry, "17\n".as_bytes()).unwrap();

        assert_eq!(shown.current_version, "8");
    }
}
