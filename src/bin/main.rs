//! bqcat CLI - Browse BigQuery datasets, tables and schemas
//!
//! Usage:
//!   bqcat datasets
//!   bqcat dataset [ID]
//!   bqcat tables
//!   bqcat table <TABLE>
//!   bqcat schema <TABLE>
//!
//! Examples:
//!   bqcat --project acme datasets --format csv
//!   bqcat --project acme --dataset orders tables
//!   bqcat --profile dev --dataset orders schema events --format json

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use bqcat::catalog::BigQueryCatalogService;
use bqcat::client::CatalogClient;
use bqcat::config::{ConnectionConfig, ConnectionError, Settings, SettingsError};
use bqcat::error::CatalogError;
use bqcat::report::{OutputFormat, ResultFormatter};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bqcat")]
#[command(about = "bqcat - Browse BigQuery datasets, tables and schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to BQCAT_CONFIG, ./bqcat.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Settings profile to use
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Project ID
    #[arg(long, global = true)]
    project: Option<String>,

    /// Dataset to select
    #[arg(long, global = true)]
    dataset: Option<String>,

    /// Output format (defaults to the settings file, then table)
    #[arg(short, long, global = true)]
    format: Option<FormatArg>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<log::Level>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every dataset of the project with its metadata
    Datasets,

    /// Describe a dataset and its tables (the selected dataset if no ID is given)
    Dataset {
        /// Dataset ID
        id: Option<String>,
    },

    /// List the tables of the selected dataset
    Tables,

    /// Describe a table of the selected dataset
    Table {
        /// Table ID
        table: String,
    },

    /// Show the schema of a table of the selected dataset
    Schema {
        /// Table ID
        table: String,
    },
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    /// Text layout or bordered table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // RUST_LOG can still override this
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };

    let format = match cli.format {
        Some(arg) => arg.into(),
        None => settings.output.format.parse::<OutputFormat>()?,
    };

    let auth = BigQueryCatalogService::authenticate().await?;

    let connection = ConnectionConfig::resolve(
        &settings,
        cli.profile.as_deref(),
        cli.project,
        cli.dataset,
        auth.project_id,
    )?;
    log::info!(
        "Connecting to project {} (dataset: {})",
        connection.project_id,
        connection.dataset_id.as_deref().unwrap_or("none")
    );

    let client = CatalogClient::with_service(
        Arc::new(auth.service),
        connection.project_id,
        connection.dataset_id.as_deref(),
    )
    .await?;

    let output = match cli.command {
        Commands::Datasets => {
            let listing = client.list_datasets().await;
            ResultFormatter::format_listing(&listing, format)
        }
        Commands::Dataset { id } => {
            let report = client.describe_dataset(id.as_deref()).await?;
            ResultFormatter::format_report(&report, format)
        }
        Commands::Tables => {
            let listing = client.list_tables()?;
            ResultFormatter::format_listing(&listing, format)
        }
        Commands::Table { table } => {
            let report = client.describe_table(&table).await?;
            ResultFormatter::format_report(&report, format)
        }
        Commands::Schema { table } => {
            let listing = client.get_table_schema(&table).await?;
            ResultFormatter::format_listing(&listing, format)
        }
    };

    Ok(output)
}
