use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use galah_core::config::{ConfigError, StoreConfig};
use galah_core::domain::{IdError, StoreError, Submission, SubmissionId};
use galah_core::impls::{FileStore, SpawnBlocking};
use galah_core::ports::AsyncSubmissionStore;

/// Galah submission store administration.
///
/// Unpacks uploaded archives into the submission root and resolves stored
/// locations back to directories.
#[derive(Parser, Debug)]
#[command(name = "galah", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON store configuration. Falls back to GALAH_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract an archive (.tar.gz or .zip) into the submission root.
    Store {
        /// Submission id to store under. A new id is allocated when omitted.
        #[arg(long)]
        id: Option<String>,

        /// Replace an existing directory for this id.
        #[arg(long)]
        overwrite: bool,

        archive: PathBuf,
    },

    /// Print the directory a stored location points to.
    Load { location: String },

    /// Print whether the file store handles a location.
    CanHandle { location: String },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn load_config(path: Option<&PathBuf>) -> Result<StoreConfig, CliError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            Ok(StoreConfig::from_json(&raw)?)
        }
        None => Ok(StoreConfig::from_env()?),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(root = %config.submission_root.display(), "loaded store config");

    let store = SpawnBlocking::new(FileStore::from_config(&config)?);

    match cli.command {
        Commands::Store {
            id,
            overwrite,
            archive,
        } => {
            let id = id.map(SubmissionId::parse).transpose()?;
            let stored = store.store(id, archive, overwrite).await?;
            tracing::info!(submission_id = %stored.id, location = %stored.location, "stored submission");
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        Commands::Load { location } => {
            let submission = Submission {
                id: None,
                testables: Some(location),
            };
            let path = store.load(&submission).await?;
            println!("{}", path.display());
        }
        Commands::CanHandle { location } => {
            println!("{}", store.can_handle(&location));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                CliError::Store(store_error) => {
                    tracing::error!(kind = ?store_error.kind(), "{e}");
                }
                _ => tracing::error!("{e}"),
            }
            ExitCode::from(1)
        }
    }
}
