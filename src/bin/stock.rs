//! Cocoa stock CLI
//!
//! Maintains persisted stock levels and prints stock reports.

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "reports go to stdout and errors to stderr"
)]

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use cocoa::{
    fixtures::Fixture,
    logging::{LoggingConfig, init_subscriber},
    stock::{
        NewStockItem, ReportScope, SqliteStockRepository, StockRepository, connect,
        render_stock_table, stock_report,
    },
};

#[derive(Debug, Parser)]
#[command(name = "cocoa-stock", about = "Chocolate shop stock levels", long_about = None)]
struct Cli {
    /// SQLite connection string, e.g. `sqlite://stock.db`
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "sqlite://stock.db")]
    database_url: String,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the stock table
    Init,

    /// Start tracking an item
    Seed(SeedArgs),

    /// Track every item in a fixture set at its opening stock
    Import(ImportArgs),

    /// Add or remove stock
    Adjust(AdjustArgs),

    /// List items at or below their low-stock level
    Low,

    /// List every item
    Report,
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// Item name
    #[arg(long)]
    name: String,

    /// Opening stock
    #[arg(long, default_value_t = 0)]
    stock: i64,

    /// Low-stock level
    #[arg(long, default_value_t = 0)]
    low_level: i64,

    /// Item id; assigned automatically when omitted
    #[arg(long)]
    item_id: Option<i64>,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// Directory holding fixture sets
    #[arg(long, env = "COCOA_FIXTURES", default_value = "./fixtures")]
    fixtures: PathBuf,

    /// Fixture set name
    #[arg(long, default_value = "shop")]
    set: String,

    /// Low-stock level for every imported item
    #[arg(long, default_value_t = 3)]
    low_level: i64,
}

#[derive(Debug, Args)]
struct AdjustArgs {
    /// Item id
    item_id: i64,

    /// Units to add, negative to remove
    #[arg(allow_negative_numbers = true)]
    delta: i64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_subscriber(&cli.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let pool = connect(&cli.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let repository = SqliteStockRepository::new(pool);

    match cli.command {
        Commands::Init => {
            repository
                .ensure_schema()
                .await
                .map_err(|error| format!("failed to create schema: {error}"))?;

            println!("stock table ready");
        }
        Commands::Seed(args) => {
            let record = repository
                .insert_item(NewStockItem {
                    item_id: args.item_id,
                    name: args.name,
                    stock: args.stock,
                    low_level: args.low_level,
                })
                .await
                .map_err(|error| format!("failed to seed item: {error}"))?;

            println!("{}", render_stock_table(&[record]));
        }
        Commands::Import(args) => import(&repository, args).await?,
        Commands::Adjust(args) => {
            let record = repository
                .adjust_stock(args.item_id, args.delta)
                .await
                .map_err(|error| {
                    format!(
                        "failed to adjust stock of item {} by {}: {error}",
                        args.item_id, args.delta
                    )
                })?;

            println!("{}", render_stock_table(&[record]));
        }
        Commands::Low => print_report(&repository, ReportScope::Low).await?,
        Commands::Report => print_report(&repository, ReportScope::All).await?,
    }

    Ok(())
}

async fn import(repository: &SqliteStockRepository, args: ImportArgs) -> Result<(), String> {
    let mut fixture = Fixture::with_base_path(&args.fixtures);

    fixture
        .load_inventory(&args.set)
        .map_err(|error| format!("failed to load fixtures: {error}"))?;

    repository
        .ensure_schema()
        .await
        .map_err(|error| format!("failed to create schema: {error}"))?;

    let mut records = Vec::with_capacity(fixture.stock().len());

    for (item, stock) in fixture.stock() {
        let record = repository
            .insert_item(NewStockItem {
                item_id: None,
                name: item.name().to_string(),
                stock: i64::from(*stock),
                low_level: args.low_level,
            })
            .await
            .map_err(|error| format!("failed to import {}: {error}", item.name()))?;

        records.push(record);
    }

    println!("{}", render_stock_table(&records));

    Ok(())
}

async fn print_report(
    repository: &SqliteStockRepository,
    scope: ReportScope,
) -> Result<(), String> {
    let report = stock_report(repository, scope)
        .await
        .map_err(|error| format!("failed to build report: {error}"))?;

    println!("{report}");

    Ok(())
}
