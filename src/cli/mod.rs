//! Command-line interface for h5sh
//!
//! Handles argument parsing with clap, configuration loading, CLI overrides
//! of config values, and the non-interactive subcommands.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{ConfigError, H5shError, Result};

/// Interactive shell for hierarchical data snapshots
#[derive(Parser, Debug)]
#[command(
    name = "h5sh",
    version,
    about = "Interactive shell for hierarchical data trees",
    long_about = "An interactive shell for exploring hierarchical data snapshots with
tab completion for item paths and attributes, session variables, and
multiple output formats."
)]
pub struct CliArgs {
    /// Snapshot files to open on startup
    ///
    /// Each file is bound to a variable derived from its file name.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (shell, json, json-pretty, table)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for h5sh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        let config = Self::load_config(&args)?;

        Ok(Self { args, config })
    }

    /// Load configuration and apply CLI overrides.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match &args.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: failed to load configuration: {e}");
                eprintln!("Using default configuration instead.");
                Config::default()
            }),
        };

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Override config values with CLI arguments where provided.
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            match OutputFormat::from_str(format_str) {
                Ok(format) => config.display.format = format,
                Err(_) => {
                    eprintln!("Warning: Unknown format '{format_str}', using default");
                }
            }
        }

        if args.no_color {
            config.display.color_output = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Handle subcommands. Returns true when one ran and the process
    /// should exit instead of entering the REPL.
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn show_version(&self) {
        println!("h5sh version {}", env!("CARGO_PKG_VERSION"));
    }

    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    fn validate_config_file(&self) {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::from_file(&path) {
            Ok(_) => println!("Configuration is valid"),
            Err(e) => println!("Configuration validation failed: {e}"),
        }
    }

    fn show_config(&self) -> Result<()> {
        let path = self.config_path();
        println!("Configuration file: {}", path.display());
        println!();

        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        println!("{toml_str}");

        Ok(())
    }

    /// Configuration file path from args or the default location.
    fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("h5sh {}", env!("CARGO_PKG_VERSION"));
            println!("Type 'help' for available commands.");
        }
    }
}

/// Generate a shell completion script on stdout.
fn generate_completion(shell_name: &str) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, "h5sh", &mut io::stdout());
    Ok(())
}

fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        other => Err(H5shError::Config(ConfigError::InvalidValue {
            field: "shell".to_string(),
            value: format!("{other} (supported: bash, zsh, fish)"),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["h5sh"]).unwrap();
        assert!(args.files.is_empty());
        assert!(args.config_file.is_none());
    }

    #[test]
    fn test_cli_args_with_files() {
        let args = CliArgs::try_parse_from(vec!["h5sh", "a.json", "b.json"]).unwrap();
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.files[0], PathBuf::from("a.json"));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(vec!["h5sh", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_format_override() {
        let args = CliArgs::try_parse_from(vec!["h5sh", "--format", "json-pretty"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.display.format, OutputFormat::JsonPretty);
    }

    #[test]
    fn test_verbosity_override() {
        let args = CliArgs::try_parse_from(vec!["h5sh", "-v"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Debug);

        let args = CliArgs::try_parse_from(vec!["h5sh", "--vv"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_parse_shell() {
        assert!(matches!(parse_shell("bash"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("ZSH"), Ok(Shell::Zsh)));
        assert!(parse_shell("powershell").is_err());
    }
}
