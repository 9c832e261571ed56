use crate::settings::{Registry, SettingsStore};
use crate::{Result, SwitchConfig, console};

pub fn init(config: &SwitchConfig) -> Result<Registry> {
    let store = SettingsStore::new(config.settings_path());
    let registry = store.init_default()?;

    console::info(&format!(
        "Created settings file at {}",
        store.path().display()
    ));

    Ok(registry)
}
