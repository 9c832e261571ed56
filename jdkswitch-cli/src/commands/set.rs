use anyhow::Result;
use jdkswitch_core::{EnvironmentAccessor, SwitchConfig, SwitchReport, console, operations};

pub fn run(config: &SwitchConfig, accessor: &dyn EnvironmentAccessor, label: &str) -> Result<()> {
    let report = operations::use_version(config, accessor, label)?;
    print_report(&report);
    Ok(())
}

pub fn print_report(report: &SwitchReport) {
    console::step(&format!(
        "Environment variables backed up to {}",
        report.backup.dir.display()
    ));

    let timings = &report.timings;
    console::timing("backup", timings.backup);
    console::timing("read environment", timings.read);
    console::timing("write environment", timings.write);
    console::timing("broadcast change", timings.broadcast);
    console::timing("total", timings.total());

    for warning in &report.warnings {
        console::warn(&warning.to_string());
    }

    println!();
    console::success(&format!("Switched to JDK {}", report.label));
    console::info("To use the new Java version:");
    console::info("- open a new terminal window");
    console::info("- or run refreshenv (if Chocolatey is installed)");
}
