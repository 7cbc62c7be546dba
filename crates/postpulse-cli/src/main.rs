mod aggregate;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use postpulse_store::ArtifactStore;

#[derive(Debug, Parser)]
#[command(name = "postpulse-cli")]
#[command(about = "Post analytics command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate a post dataset into the published artifacts
    Aggregate {
        /// Path to the dataset (.csv, .json, or .jsonl)
        dataset: PathBuf,

        /// Dataset profile describing the column layout
        #[arg(long)]
        profile: Option<String>,

        /// Directory the artifacts are written to
        #[arg(long)]
        artifact_dir: Option<PathBuf>,

        /// Path to the dataset profiles file
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Compute every aggregate without writing artifacts
        #[arg(long)]
        dry_run: bool,
    },
    /// Show a summary of the currently published artifacts
    Status {
        /// Directory the artifacts are read from
        #[arg(long)]
        artifact_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = postpulse_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Aggregate {
            dataset,
            profile,
            artifact_dir,
            profiles,
            dry_run,
        } => aggregate::run_aggregate(
            &config,
            &dataset,
            profile.as_deref(),
            artifact_dir,
            profiles,
            dry_run,
        ),
        Commands::Status { artifact_dir } => {
            let store =
                ArtifactStore::new(artifact_dir.unwrap_or_else(|| config.artifact_dir.clone()));
            status::run_status(&store)
        }
    }
}
