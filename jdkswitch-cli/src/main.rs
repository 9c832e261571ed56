use anyhow::Result;
use clap::Parser;
use jdkswitch_core::{SwitchConfig, console, default_accessor};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();

    let mut config = SwitchConfig::from_env();
    config.verbose |= args.verbose;

    if let Err(error) = init_tracing(config.verbose) {
        eprintln!("jdk-switch: failed to initialize logging: {}", error);
    }

    tracing::debug!(
        base_dir = %config.base_dir.display(),
        settings = %config.settings_path().display(),
        "resolved configuration"
    );

    match run(args, &config) {
        Ok(code) => code,
        Err(error) => {
            console::error(&format!("{:#}", error));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli, config: &SwitchConfig) -> Result<ExitCode> {
    if args.show_version {
        println!("JDK Switch Tool v{}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    if args.config {
        commands::config::run(config);
        return Ok(ExitCode::SUCCESS);
    }

    if args.init {
        commands::init::run(config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let accessor = default_accessor();

    if args.backup {
        commands::backup::run(config, accessor.as_ref())?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(registry) = commands::init::load_or_offer_init(config)? else {
        return Ok(ExitCode::SUCCESS);
    };

    if args.list {
        commands::list::run(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(label) = args.set.as_deref() {
        commands::set::run(config, accessor.as_ref(), label)?;
        return Ok(ExitCode::SUCCESS);
    }

    commands::interactive::run(config, accessor.as_ref(), &registry)?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("{}", error))?;
    Ok(())
}
