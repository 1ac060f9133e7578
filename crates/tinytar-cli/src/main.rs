//! `tinytar` command-line tool
//!
//! Thin dispatch layer over the archive operations in `tinytar-archive`:
//! every subcommand maps onto one mutator operation, and any failure
//! surfaces as a diagnostic plus a non-zero exit code.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;

use tinytar_archive::{FileSet, ops};

#[derive(Parser)]
#[command(
    name = "tinytar",
    about = "Minimal POSIX ustar archive tool",
    version,
    long_about = "Creates, grows, lists, and extracts minimal POSIX ustar archives. \
                  Only regular files are supported; archives always end in the \
                  standard two-block terminator."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a new archive containing exactly the listed files
    Create {
        /// Archive to create (existing content is discarded)
        archive: PathBuf,
        /// Files to archive, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Add files to an existing archive without validation
    Append {
        /// Archive to grow
        archive: PathBuf,
        /// Files to append, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print each distinct member name once, in first-seen order
    List {
        /// Archive to list
        archive: PathBuf,
    },

    /// Append files only if every one is already an archive member
    Update {
        /// Archive to update
        archive: PathBuf,
        /// Members to replace by shadowing
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Extract every member into the current directory
    Extract {
        /// Archive to extract
        archive: PathBuf,
    },
}

fn file_set(paths: &[PathBuf]) -> FileSet {
    paths.iter().map(|p| p.display().to_string()).collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Create { archive, files } => ops::create(&archive, &file_set(&files))
            .with_context(|| format!("creating {}", archive.display()))?,
        Commands::Append { archive, files } => ops::append(&archive, &file_set(&files))
            .with_context(|| format!("appending to {}", archive.display()))?,
        Commands::List { archive } => {
            let members =
                ops::list(&archive).with_context(|| format!("listing {}", archive.display()))?;
            for name in members.iter() {
                println!("{name}");
            }
        }
        Commands::Update { archive, files } => ops::update(&archive, &file_set(&files))
            .with_context(|| format!("updating {}", archive.display()))?,
        Commands::Extract { archive } => ops::extract(&archive)
            .with_context(|| format!("extracting {}", archive.display()))?,
    }

    Ok(())
}
