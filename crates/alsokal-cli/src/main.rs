mod check;
mod report;

use std::path::PathBuf;

use alsokal_data::DataStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "alsokal-cli")]
#[command(about = "AlsoKal creator dashboard command line interface")]
struct Cli {
    /// Root of the JSON data directory
    #[arg(long, global = true, env = "ALSOKAL_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Dashboard summary as JSON
    Summary,
    /// Prioritised action items
    Actions {
        /// Show every item instead of the dashboard's top five
        #[arg(long)]
        all: bool,
    },
    /// Partnership pipeline summary and board
    Pipeline,
    /// Revenue pacing and breakdowns
    Revenue,
    /// Follower growth across platforms
    Growth {
        /// Show one platform's history (e.g. tiktok, youtube-long, youtube-shorts)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Strictly load every data file and report problems
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = DataStore::new(cli.data_dir);
    let now = chrono::Utc::now();

    match cli.command {
        Commands::Summary => report::run_summary(&store, now).await,
        Commands::Actions { all } => report::run_actions(&store, all, now).await,
        Commands::Pipeline => report::run_pipeline(&store).await,
        Commands::Revenue => report::run_revenue(&store, now).await,
        Commands::Growth { platform } => report::run_growth(&store, platform.as_deref()).await,
        Commands::Check => check::run_check(&store).await,
    }
}

#[cfg(test)]
mod tests;
