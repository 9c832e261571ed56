use crate::env::EnvironmentAccessor;
use crate::settings::{Registry, SettingsStore};
use crate::switch::{self, SwitchOptions, SwitchReport};
use crate::validator::JdkValidator;
use crate::{Result, SwitchConfig};

pub fn list_versions(config: &SwitchConfig) -> Result<Registry> {
    Ok(SettingsStore::new(config.settings_path()).load()?)
}

/// Switches the machine to `label` and records it as the active version.
pub fn use_version<E>(config: &SwitchConfig, accessor: &E, label: &str) -> Result<SwitchReport>
where
    E: EnvironmentAccessor + ?Sized,
{
    let store = SettingsStore::new(config.settings_path());
    let mut registry = store.load()?;

    let options = SwitchOptions::from_config(config);
    let report = switch::switch_to(&registry, &JdkValidator, accessor, label, &options)?;

    registry.set_active(label)?;
    store.save(&registry)?;

    tracing::debug!("active version is now {}", label);

    Ok(report)
}
