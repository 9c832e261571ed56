use jdkswitch_core::{Registry, console};

pub fn run(registry: &Registry) {
    console::info(&format!("Current JDK version: {}", registry.current_version));
    console::info("Available JDK versions:");

    for entry in registry.versions() {
        console::version_entry(entry.label, entry.path, entry.active);
    }
}
