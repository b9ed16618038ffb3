//! Edudir - institution directory API
//!
//! Loads a CSV directory of educational institutions into memory and serves
//! read-only search, filter and listing endpoints over HTTP.

use clap::{Args, Parser, Subcommand};
use edudir_core::{AppConfig, Dataset, QueryEngine, Result};
use edudir_serve::{EdudirServer, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "edudir")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Edudir - search API over a directory of educational institutions")]
#[command(long_about = r#"
Edudir loads a CSV file of institutions (name, state, district and any other
columns) into memory once at startup and serves paginated keyword search,
state and district filters, and distinct state/district listings.

Settings come from defaults, an optional config file, EDUDIR__* environment
variables and finally command line flags.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset and start the HTTP server
    Serve(ServeArgs),

    /// Load a dataset and report what it contains
    Validate {
        /// CSV file to check (defaults to dataset.path)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ServeArgs {
    /// Server host address
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// CSV file to load
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    edudir_core::init_logging_with_config(&config.logging.level, &config.logging.format)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await?,
        Commands::Validate { data } => handle_validate(data, &config)?,
        Commands::Version => handle_version(),
    }

    Ok(())
}

async fn handle_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data) = args.data {
        config.dataset.path = data;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }
    config.validate()?;

    info!("Starting Edudir v{}", env!("CARGO_PKG_VERSION"));

    // The listener is only bound once the dataset is in memory
    let engine = QueryEngine::new(Arc::new(load_dataset(&config.dataset.path, &config)?));

    let server = EdudirServer::new(ServerConfig::from(&config), engine)?;
    server.start().await
}

fn handle_validate(data: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let path = data.unwrap_or_else(|| config.dataset.path.clone());
    let engine = QueryEngine::new(Arc::new(load_dataset(&path, config)?));

    println!("Dataset:   {}", path.display());
    println!("Records:   {}", engine.total());
    println!("States:    {}", engine.list_distinct_states().len());
    println!("Districts: {}", engine.count_state_districts());

    Ok(())
}

fn handle_version() {
    println!("edudir v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", edudir_core::version_info());
    println!("edudir-serve v{}", edudir_serve::VERSION);
}

fn load_dataset(path: &Path, config: &AppConfig) -> Result<Dataset> {
    Dataset::load_csv(path, config.dataset.columns.clone()).map_err(|e| {
        error!("Failed to load dataset from {}: {}", path.display(), e);
        e
    })
}
