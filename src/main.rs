mod calc;
mod cmd;
mod data;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datepick", about = "pick a date from a popup month calendar")]
struct Cli {
    /// Settings file, YAML or JSON by extension (default: ./config/settings.yaml)
    #[arg(long, default_value = "./config/settings.yaml")]
    config: PathBuf,

    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid without opening the interactive picker
    Show {
        /// Month to show (e.g. 2024-02); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Date to mark as selected (e.g. 2024-02-14)
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Write a default settings file to the --config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The interactive picker owns the terminal, so it only logs to a file.
    let interactive = cli.command.is_none();
    let _logger = start_logger(cli.log_file.as_deref(), interactive)?;

    match cli.command {
        None => cmd::root::run(data::Settings::load(&cli.config)?),
        Some(Commands::Show { month, select }) => {
            let settings = data::Settings::load(&cli.config)?;
            cmd::show::run(&settings, month.as_deref(), select.as_deref())
        }
        Some(Commands::Init { force }) => cmd::init::run(&cli.config, force),
    }
}

/// Level comes from RUST_LOG when set. Without a log file, output goes to
/// stderr for one-shot commands and nowhere for the interactive picker.
fn start_logger(log_file: Option<&Path>, interactive: bool) -> Result<LoggerHandle> {
    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;
    if let Some(path) = log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(path)?)
            .print_message();
    } else if interactive {
        logger = logger.do_not_log();
    }
    Ok(logger.start()?)
}
