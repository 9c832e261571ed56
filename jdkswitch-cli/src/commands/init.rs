use anyhow::Result;
use jdkswitch_core::error::LoadError;
use jdkswitch_core::{JdkSwitchError, Registry, SwitchConfig, console, operations};
use std::io::{self, BufRead};

pub fn run(config: &SwitchConfig) -> Result<()> {
    console::header("init");

    operations::init(config)?;
    console::info("Edit the JDK paths to match this machine.");

    Ok(())
}

/// Loads the settings, offering to create them when the file is missing.
///
/// Returns `None` when there is nothing to work with yet.
pub fn load_or_offer_init(config: &SwitchConfig) -> Result<Option<Registry>> {
    match operations::list_versions(config) {
        Ok(registry) => Ok(Some(registry)),
        Err(JdkSwitchError::Load(LoadError::NotFound { path })) => {
            console::warn(&format!("Settings file not found: {}", path.display()));

            if ask_for_init()? {
                operations::init(config)?;
                console::info("Edit the JDK paths to match this machine, then run jdk-switch again.");
            } else {
                console::info("You can initialize the settings later with --init");
            }

            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

fn ask_for_init() -> Result<bool> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        console::prompt("Initialize the settings file now? (y/n): ");

        let mut input = String::new();
        if lines.read_line(&mut input)? == 0 {
            return Ok(false);
        }

        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => console::info("Please answer y or n"),
        }
    }
}
