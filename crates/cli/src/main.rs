//! Product Catalog CLI
//!
//! Presentation layer for the offline-first catalog: renders published
//! engine state, collects user input, and invokes engine operations. Form
//! validation lives here, never in the core.

mod config;
mod output;

use anyhow::Result;
use catalog_sync::{
    HttpCatalogClient, JsonFavoriteStore, JsonOfflineStore, MonitorConfig, Notice, ProbeMonitor,
    Product, ProductId, RemoteConfig, SyncEngine,
};
use clap::{Parser, Subcommand};
use config::CliConfig;
use output::OutputFormat;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Product Catalog CLI
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "CLI for the offline-first product catalog", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    List,

    /// Add a new product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product category label
        #[arg(long)]
        product_type: String,

        /// Price
        #[arg(long)]
        price: f64,

        /// Tax rate percentage
        #[arg(long)]
        tax: f64,

        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
    },

    /// Toggle a product's favorite flag
    Favorite {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product category label
        #[arg(long)]
        product_type: String,
    },

    /// Show products awaiting upload
    Pending,

    /// Push pending offline products to the remote service
    Sync,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load()?;

    let remote = Arc::new(HttpCatalogClient::new(RemoteConfig {
        fetch_url: config.fetch_url.clone(),
        submit_url: config.submit_url.clone(),
        request_timeout: Duration::from_secs(config.request_timeout_secs),
    })?);
    let offline = Arc::new(JsonOfflineStore::new(config.offline_store_path()));
    let favorites = Arc::new(JsonFavoriteStore::new(config.favorites_path()));

    // One immediate probe; a short-lived command has no use for the loop.
    let (monitor, connectivity) = ProbeMonitor::new(MonitorConfig {
        probe_addr: config.probe_addr.clone(),
        ..Default::default()
    });
    monitor.check_now().await;

    let engine = SyncEngine::start(remote, offline, favorites, connectivity).await;

    match cli.command {
        Commands::List => list(&engine, cli.format).await,
        Commands::Add {
            name,
            product_type,
            price,
            tax,
            image,
        } => add(&engine, name, product_type, price, tax, image).await,
        Commands::Favorite { name, product_type } => {
            favorite(&engine, name, product_type, cli.format).await
        }
        Commands::Pending => pending(&engine, cli.format),
        Commands::Sync => sync(&engine).await,
    }
}

async fn list(engine: &SyncEngine, format: OutputFormat) -> Result<()> {
    engine.refresh().await;

    let snapshot = engine.snapshot();
    if let Some(error) = snapshot.last_error {
        output::print_error(&error.to_string());
        std::process::exit(1);
    }

    output::print_products(&snapshot.products, format);
    if !snapshot.pending_offline.is_empty() {
        output::print_info(&format!(
            "{} product(s) awaiting upload, run `catalog sync`",
            snapshot.pending_offline.len()
        ));
    }
    Ok(())
}

async fn add(
    engine: &SyncEngine,
    name: String,
    product_type: String,
    price: f64,
    tax: f64,
    image: String,
) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("product name must not be empty");
    }
    if price < 0.0 {
        anyhow::bail!("price must not be negative");
    }
    if tax < 0.0 {
        anyhow::bail!("tax rate must not be negative");
    }

    engine
        .add_product(Product::new(name, product_type, price, tax, image))
        .await;

    match engine.snapshot().notice {
        Some(notice @ Notice::ProductAdded) => output::print_success(notice.message()),
        Some(notice @ Notice::SavedOffline) => output::print_warning(notice.message()),
        Some(notice @ Notice::AddFailed) => {
            output::print_error(notice.message());
            std::process::exit(1);
        }
        None => {}
    }
    Ok(())
}

async fn favorite(
    engine: &SyncEngine,
    name: String,
    product_type: String,
    format: OutputFormat,
) -> Result<()> {
    engine.refresh().await;

    let snapshot = engine.snapshot();
    if let Some(error) = snapshot.last_error {
        output::print_error(&error.to_string());
        std::process::exit(1);
    }

    let id = ProductId(format!("{}{}", name, product_type));
    if !snapshot.products.iter().any(|p| p.id() == id) {
        anyhow::bail!("no product named {:?} of type {:?}", name, product_type);
    }

    engine.toggle_favorite(&id).await;
    output::print_products(&engine.snapshot().products, format);
    Ok(())
}

fn pending(engine: &SyncEngine, format: OutputFormat) -> Result<()> {
    let snapshot = engine.snapshot();
    if snapshot.pending_offline.is_empty() {
        output::print_info("Nothing awaiting upload");
        return Ok(());
    }
    output::print_products(&snapshot.pending_offline, format);
    Ok(())
}

async fn sync(engine: &SyncEngine) -> Result<()> {
    let before = engine.snapshot();
    if !before.connected {
        output::print_warning("Offline, pending products will sync when connected");
        return Ok(());
    }
    if before.pending_offline.is_empty() {
        output::print_info("Nothing awaiting upload");
        return Ok(());
    }

    engine.flush_pending().await;
    output::print_success(&format!(
        "Drained {} pending product(s)",
        before.pending_offline.len()
    ));
    Ok(())
}
