//! h5sh - interactive shell for hierarchical data snapshots
//!
//! Provides an interactive REPL for exploring trees of groups, datasets,
//! and attributes loaded from JSON snapshot files.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode, opening a snapshot on startup
//! h5sh data.json
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

use h5sh::cli::CliInterface;
use h5sh::error::Result;
use h5sh::repl::{ReplEngine, SharedState};
use h5sh::session::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Main application logic: parse arguments, load configuration, handle
/// subcommands, open startup files, and enter the REPL.
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    let shared_state = SharedState::with_config(&cli.config().display);
    if cli.args().no_color {
        shared_state.set_colors(false);
    }

    open_startup_files(&cli, &shared_state);

    let mut repl = ReplEngine::new(shared_state, cli.config())?;
    repl.run()
}

/// Open the snapshot files named on the command line, binding each to a
/// variable derived from its file name.
fn open_startup_files(cli: &CliInterface, shared_state: &SharedState) {
    for path in &cli.args().files {
        let variable = Session::variable_for_path(path);
        let mut session = shared_state
            .session
            .write()
            .unwrap_or_else(|e| e.into_inner());

        match session.open(path, &variable) {
            Ok(_) => {
                if !cli.args().quiet {
                    println!("Opened {} as '{}'", path.display(), variable);
                }
            }
            Err(e) => eprintln!("Failed to open {}: {e}", path.display()),
        }
    }
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over the configured level when set.
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
