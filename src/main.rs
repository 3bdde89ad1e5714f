// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use cell_analysis_node::{
    api::ApiServer,
    cli::Cli,
    vision::DetectionModelManager,
};
use clap::Parser;
use std::{env, sync::Arc};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.validate().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    tracing::info!("🚀 Starting {}", cell_analysis_node::version::get_version_string());

    // Load the detection model once; a failure leaves the node serving
    // but every analysis answers "Model not loaded"
    let model_config = cli.model_config();
    let model_manager = Arc::new(
        tokio::task::spawn_blocking(move || DetectionModelManager::new(model_config)).await?,
    );

    let info = model_manager.model_info();
    if info.available {
        tracing::info!("✅ Detection model ready: {}", info.name);
    } else {
        tracing::warn!("⚠️  No detection model loaded - POST /analyze will return errors");
    }

    let server = ApiServer::new(cli.api_config(), model_manager).await?;
    let addr = server.local_addr();

    tracing::info!("API Endpoints:");
    tracing::info!("  Health:   http://{}/health", addr);
    tracing::info!("  Analyze:  POST http://{}/analyze (multipart field 'file')", addr);

    // Wait for shutdown signal
    signal::ctrl_c().await?;

    tracing::info!("⏹️  Shutting down...");
    server.shutdown().await;

    Ok(())
}
