use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scrollkeep_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "scrollkeep")]
#[command(author, version, about = "A terminal viewer with cursor-preserving half-page scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to open (shorthand for `run FILE`)
    file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/scrollkeep/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a file in the viewer
    Run {
        /// File to open
        file: PathBuf,
    },
    /// Run scroll commands against a file without a terminal and print each step
    Replay {
        /// File to load
        file: PathBuf,
        /// Viewport height in rows
        #[arg(long, default_value_t = 20)]
        height: usize,
        /// First visible line (1-based)
        #[arg(long, default_value_t = 1)]
        top: usize,
        /// Initial cursor as LINE:COL (1-based)
        #[arg(long, value_parser = commands::replay::parse_cursor, default_value = "1:1")]
        cursor: scrollkeep_core::scroll::CursorPosition,
        /// Command ids, e.g. scrollDownHalfPage
        #[arg(required = true)]
        commands: Vec<String>,
    },
    /// List the available scroll commands
    Commands,
    /// Print the effective configuration
    Config {
        /// Write it to the config file instead of printing
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(match &cli.config {
        Some(path) if path.exists() => AppConfig::load_from(path)?,
        Some(_) => AppConfig::default(),
        None => AppConfig::load()?,
    });

    // The viewer owns the terminal, so it logs to a file
    let file_to_open = match &cli.command {
        Some(Commands::Run { file }) => Some(file.clone()),
        None => cli.file.clone(),
        Some(_) => None,
    };
    init_logging(&config, file_to_open.is_some())?;

    match cli.command {
        Some(Commands::Replay {
            file,
            height,
            top,
            cursor,
            commands: ids,
        }) => {
            let options = commands::replay::ReplayOptions {
                height,
                top: top.saturating_sub(1),
                cursor,
            };
            commands::replay::run(&config, &file, options, &ids).await
        }
        Some(Commands::Commands) => commands::list::run(&config),
        Some(Commands::Config { write }) => {
            commands::config::run(&config, cli.config.as_deref(), write)
        }
        Some(Commands::Run { .. }) | None => match file_to_open {
            Some(file) => commands::run::run(config, &file).await,
            None => {
                eprintln!("No file given.\n\nUsage:\n  scrollkeep <FILE>\n  scrollkeep --help");
                Ok(())
            }
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
