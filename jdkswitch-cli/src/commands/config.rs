use jdkswitch_core::{SwitchConfig, console};

pub fn run(config: &SwitchConfig) {
    console::header("config");

    console::info("paths");
    console::info(&format!("  base dir: {}", config.base_dir.display()));
    console::info(&format!("  settings: {}", config.settings_path().display()));
    console::info(&format!("  backups: {}", config.backup_dir().display()));
    console::info(&format!(
        "  vendor shim: {}",
        config.vendor_shim_dir.display()
    ));
    println!();

    console::info("logging");
    console::info(&format!("  verbose: {}", config.verbose));
}
