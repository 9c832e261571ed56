use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "jdk-switch",
    about = "Switch the system-wide JDK by rewriting JAVA_HOME, Path and CLASSPATH",
    color = clap::ColorChoice::Auto,
    group(ArgGroup::new("action").multiple(false)),
    after_help = "Run without flags to start interactive mode.\n\n\
        Every switch backs up Path, JAVA_HOME and CLASSPATH to <base>\\backup\\<timestamp> first.\n\
        Open a new terminal (or sign in again) after switching so the new JDK is picked up."
)]
pub struct Cli {
    /// Create the settings file with default JDK paths
    #[arg(long = "init", group = "action")]
    pub init: bool,

    /// List the configured JDK versions
    #[arg(long = "list", group = "action")]
    pub list: bool,

    /// Switch to the given JDK version
    #[arg(long = "set", value_name = "VERSION", group = "action")]
    pub set: Option<String>,

    /// Back up the environment variables without switching
    #[arg(long = "backup", group = "action")]
    pub backup: bool,

    /// Show the resolved file locations
    #[arg(long = "config", group = "action")]
    pub config: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", group = "action")]
    pub show_version: bool,

    /// Log every step with its timing
    #[arg(long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["jdk-switch", "--list", "--backup"]).is_err());
    }

    #[test]
    fn set_takes_a_version() {
        let cli = Cli::try_parse_from(["jdk-switch", "--set", "17", "--verbose"]).unwrap();

        assert_eq!(cli.set.as_deref(), Some("17"));
        assert!(cli.verbose);
        assert!(!cli.list);
    }

    #[test]
    fn no_flags_means_interactive() {
        let cli = Cli::try_parse_from(["jdk-switch"]).unwrap();

        assert!(!cli.init && !cli.list && !cli.backup && !cli.config && !cli.show_version);
        assert!(cli.set.is_none());
    }

    #[test]
    fn short_v_prints_version() {
        let cli = Cli::try_parse_from(["jdk-switch", "-v"]).unwrap();

        assert!(cli.show_version);
    }
}
