use anyhow::Result;
use jdkswitch_core::{EnvironmentAccessor, SwitchConfig, console, operations};

pub fn run(config: &SwitchConfig, accessor: &dyn EnvironmentAccessor) -> Result<()> {
    let record = operations::backup_only(config, accessor)?;

    console::success(&format!(
        "Environment variables backed up to {}",
        record.dir.display()
    ));

    Ok(())
}
