use crate::backup::{self, BackupRecord};
use crate::env::EnvironmentAccessor;
use crate::{Result, SwitchConfig};

/// Snapshots the environment without switching.
pub fn backup_only<E>(config: &SwitchConfig, accessor: &E) -> Result<BackupRecord>
where
    E: EnvironmentAccessor + ?Sized,
{
    Ok(backup::create_backup(accessor, &config.backup_dir())?)
}
