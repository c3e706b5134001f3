use anyhow::Context;
use clap::Parser;
use skydeck_core::Config;
use tracing::info;

use crate::{routes, state::AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skydeck-server", version, about = "Weather & news dashboard API server")]
pub struct Args {
    /// Socket address to bind, e.g. 127.0.0.1:8787.
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub addr: String,
}

impl Args {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let state = AppState::from_config(&config);

        let app = routes::create_app(state);

        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        info!(addr = %self.addr, "skydeck server listening");

        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}
