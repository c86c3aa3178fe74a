//! Shop Service - command line for the shop persistence layer.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::PageRequest;
use domain::DEFAULT_PAGE_SIZE;
use shop_service::repository::ItemSearchFilter;
use shop_service::MigrateAction;

#[derive(Parser)]
#[command(name = "shop-service")]
#[command(about = "Shop catalogue and member persistence")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Insert sample items
    Seed {
        /// Number of items on sale
        #[arg(long, default_value = "10")]
        count: u16,
        /// Number of sold-out items added after those on sale
        #[arg(long, default_value = "0")]
        sold_out: u16,
    },
    /// Search items, most expensive first, and print one page as JSON
    Search {
        /// Text the item detail must contain
        #[arg(long)]
        detail: Option<String>,
        /// Exclusive lower price bound
        #[arg(long)]
        min_price: Option<i32>,
        /// Sell status (SELL or SOLD_OUT)
        #[arg(long)]
        status: Option<String>,
        /// Zero-based page index
        #[arg(long, default_value = "0")]
        page: u64,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u64,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            shop_service::run_migrations(migrate_action).await?;
        }
        Commands::Seed { count, sold_out } => {
            shop_service::run_seed(count, sold_out).await?;
        }
        Commands::Search {
            detail,
            min_price,
            status,
            page,
            size,
        } => {
            let filter = ItemSearchFilter {
                detail,
                min_price,
                sell_status: status,
            };
            shop_service::run_search(filter, PageRequest::of(page, size)).await?;
        }
    }

    Ok(())
}
