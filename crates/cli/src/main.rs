use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use api_shared::HealthService;
use catalog_core::config::store_backend_from_env_values;
use catalog_core::{open_store, CatalogConfig, CatalogError, CatalogService};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Disease and treatment-center catalog CLI")]
struct Cli {
    /// MongoDB connection string; omit to use a throwaway in-memory store
    #[arg(long, env = "MONGO_URI", global = true)]
    mongo_uri: Option<String>,
    /// MongoDB database name
    #[arg(long, env = "CATALOG_DATABASE", global = true)]
    database: Option<String>,
    /// JSON dataset used by `seed` instead of the embedded one
    #[arg(long, env = "CATALOG_SEED_FILE", global = true)]
    seed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which store the catalog would use
    Health,
    /// Replace all records with the seed dataset
    Seed,
    /// Search one record kind and print the normalized documents as JSON
    Search {
        /// Record kind: `diseases`, `professional_centers`, `disease_card` or `professional_center`
        kind: String,
        /// Case-insensitive substring to match
        #[arg(long)]
        q: Option<String>,
        /// Load the seed dataset before searching (useful with the in-memory store)
        #[arg(long)]
        seeded: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'catalog --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let backend = store_backend_from_env_values(cli.mongo_uri, cli.database)?;
    let cfg = CatalogConfig::new(backend, cli.seed_file)?;
    let store = open_store(cfg.store_backend()).await?;
    let catalog = CatalogService::new(Arc::clone(&store), &cfg);

    let mut exit = ExitCode::SUCCESS;
    match command {
        Commands::Health => {
            let res = HealthService::check_health(catalog.backend_name());
            println!("{}", res.message);
        }
        Commands::Seed => match catalog.seed().await {
            Ok(report) => println!(
                "Seeded {} disease cards and {} professional centers",
                report.diseases_inserted, report.centers_inserted
            ),
            Err(e) => {
                eprintln!("Error seeding data: {}", e);
                exit = ExitCode::FAILURE;
            }
        },
        Commands::Search { kind, q, seeded } => {
            if seeded {
                catalog.seed().await?;
            }
            match catalog
                .query_engine()
                .search_documents(&kind, q.as_deref())
                .await
            {
                Ok(documents) if documents.is_empty() => println!("No records found."),
                Ok(documents) => println!("{}", serde_json::to_string_pretty(&documents)?),
                Err(e @ CatalogError::InvalidKind(_)) => {
                    eprintln!("{}; use 'catalog search --help' for accepted kinds", e);
                    exit = ExitCode::from(2);
                }
                Err(e) => {
                    eprintln!("Error searching {}: {}", kind, e);
                    exit = ExitCode::FAILURE;
                }
            }
        }
    }

    catalog.close().await?;

    Ok(exit)
}
