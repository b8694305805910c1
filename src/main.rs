use std::path::PathBuf;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::stops::StopStore;

mod api;
mod proximity;
mod stops;

#[derive(Parser)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// CSV snapshot of stops; when given, replaces the built-in seed
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    // Ingestion runs to completion before the listener binds; a failure here
    // aborts startup rather than serving an empty or partial store.
    let mut store = StopStore::new();
    match &args.snapshot {
        Some(path) => store
            .load_snapshot(path)
            .with_context(|| format!("failed to ingest snapshot {}", path.display()))?,
        None => store
            .seed(stops::default_seed())
            .context("failed to seed stop store")?,
    }

    let store = web::Data::new(store);
    info!(port = args.port, stops = store.len(), "starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .service(api::list_stops)
            .service(api::near)
    })
    .bind(("0.0.0.0", args.port))?
    .run()
    .await?;

    Ok(())
}
