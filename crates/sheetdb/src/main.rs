//! SheetDB CLI
//!
//! Create a spreadsheet, append records to it, and update them by id.

// CLI tool - relax pedantic lints for ergonomics
#![allow(clippy::pedantic)]

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sheetdb::{records_from_json, Record, SheetConnector, SheetDbConfig};

#[derive(Parser)]
#[command(name = "sheetdb")]
#[command(version)]
#[command(about = "Use a spreadsheet as a keyed record store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", default_value = sheetdb::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Spreadsheet id override
    #[arg(long, env = "SHEETDB_SPREADSHEET_ID")]
    spreadsheet: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a spreadsheet, optionally seeded with records
    Create {
        /// Spreadsheet title
        #[arg(short, long)]
        title: Option<String>,

        /// JSON file with a record or an array of records
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Explicit column order
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<String>>,
    },

    /// Append records and bind their keys
    Append {
        /// JSON file with a record or an array of records
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        /// Explicit column order
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<String>>,

        /// Write a header row first
        #[arg(long)]
        header: bool,
    },

    /// Update records by id
    Update {
        /// JSON file with a record or an array of records
        #[arg(short, long, value_name = "FILE")]
        data: PathBuf,

        /// Explicit column order
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<String>>,
    },

    /// Validate and print the effective configuration
    Validate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = SheetDbConfig::load_from_path(&cli.config)?;
    if let Some(id) = cli.spreadsheet {
        config.spreadsheet_id = Some(id);
    }

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate()?;

    match cli.command {
        Commands::Validate => {
            println!("✅ Configuration is valid!");
            print!("{}", config.to_toml()?);
        }
        Commands::Create { title, data, order } => {
            let records = match data {
                Some(path) => read_records(&path)?,
                None => Vec::new(),
            };
            let mut connector = connector(&config)?;
            let outcome = connector
                .create(title.as_deref(), &records, order.as_deref())
                .await?;

            println!("✅ Created spreadsheet {}", outcome.spreadsheet_id);
            if let Some(ack) = outcome.seeded {
                println!("   Registered keys: {}", ack.registered);
            }
        }
        Commands::Append {
            data,
            order,
            header,
        } => {
            let records = read_records(&data)?;
            let ack = connector(&config)?
                .append(&records, order.as_deref(), header)
                .await?;

            println!("✅ Appended {} records", records.len());
            println!("   Registered keys: {}", ack.registered);
        }
        Commands::Update { data, order } => {
            let records = read_records(&data)?;
            let ack = connector(&config)?
                .update(&records, order.as_deref())
                .await?;

            println!("✅ Updated {} records", records.len());
            println!("   Rows written:  {}", ack.updated_rows);
            println!("   Cells written: {}", ack.updated_cells);
        }
    }

    Ok(())
}

fn connector(config: &SheetDbConfig) -> anyhow::Result<SheetConnector<sheetdb::GoogleSheetsStore>> {
    let store = config.google_store()?;
    Ok(SheetConnector::with_options(
        store,
        config.connector_options(),
    ))
}

fn read_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    info!("Reading records from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(records_from_json(value)?)
}
