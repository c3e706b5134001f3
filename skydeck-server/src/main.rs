//! Binary crate for the `skydeck` dashboard HTTP server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Wiring configuration into the request handlers

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod handlers;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::Args::parse();
    args.run().await
}
