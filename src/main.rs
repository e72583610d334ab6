//! # CMDB Catalog Entry Point
//!
//! Operator commands for the metadata catalog: schema migration, built-in
//! seeding and a quick listing of a tenant's models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdb_catalog::{catalog::Catalog, config::ConfigLoader, db, seeds, telemetry};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "cmdb-catalog")]
#[command(about = "Maintain the CMDB metadata catalog", long_about = None)]
struct Cli {
    /// Tenant to act for (overrides CMDB_SUPPLIER_ACCOUNT)
    #[arg(long, global = true)]
    supplier_account: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Apply migrations and create the built-in classifications
    Seed,

    /// List the tenant's models
    #[command(alias = "ls")]
    Models {
        /// Only models whose name contains this text (case-insensitive)
        #[arg(short, long)]
        like: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new().load().context("loading configuration")?;
    telemetry::init_tracing(&config).context("initializing telemetry")?;

    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Loaded configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    match cli.command {
        Commands::Migrate => {
            db::migrate(&db).await?;
        }
        Commands::Seed => {
            db::migrate(&db).await?;
            let created = seeds::seed_classifications(&db)
                .await
                .context("seeding classifications")?;
            println!("Created {} built-in classifications", created);
        }
        Commands::Models { like } => {
            let mut catalog = Catalog::from_config(Arc::new(db), &config.catalog);
            if let Some(supplier_account) = cli.supplier_account {
                catalog = catalog.for_supplier_account(supplier_account);
            }

            let mut models = catalog
                .find_models_like_name(like.as_deref().unwrap_or_default())
                .await
                .context("querying models")?;
            let mut count = 0usize;
            while let Some(model) = models.next().await? {
                println!(
                    "{}\t{}\t{}{}",
                    model.id().unwrap_or_default(),
                    model.classification_id(),
                    model.name(),
                    if model.paused() { "\t(paused)" } else { "" }
                );
                count += 1;
            }
            println!("{} models", count);
        }
    }

    Ok(())
}
