// ABOUTME: Main server binary for the RehabFlow patient platform
// ABOUTME: Loads configuration, connects the database, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! # RehabFlow Server
//!
//! Starts the HTTP server backing the RehabFlow patient app.
//!
//! ## Usage
//!
//! ```bash
//! # Start with environment configuration
//! cargo run --bin rehabflow-server
//!
//! # Override the port and database
//! cargo run --bin rehabflow-server -- --port 9090 --database-url sqlite:./data/dev.db
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use rehabflow_server::config::environment::ServerConfig;
use rehabflow_server::database::Database;
use rehabflow_server::errors::AppResult;
use rehabflow_server::llm::{HuggingFaceProvider, LlmProvider};
use rehabflow_server::logging;
use rehabflow_server::server::{RehabServer, ServerResources};

#[derive(Parser)]
#[command(
    name = "rehabflow-server",
    about = "RehabFlow patient platform server",
    long_about = "REST API for doctor chat, recovery profiles, and the community feed"
)]
struct Args {
    /// HTTP port override
    #[arg(long)]
    port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = Args::parse();

    logging::init("info")?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("Starting RehabFlow server on port {}", config.http_port);
    info!("Database: {}", config.database_url);
    info!("Inference model: {}", config.inference.model);

    if config.inference.api_key.is_none() {
        warn!("HUGGINGFACE_API_KEY not set; chat requests will rely on fallback replies");
    }

    let database = Database::new(&config.database_url).await?;
    let llm_provider: Arc<dyn LlmProvider> =
        Arc::new(HuggingFaceProvider::new(config.inference.clone()));

    let resources = Arc::new(ServerResources::new(database, config, llm_provider));

    RehabServer::new(resources).run().await
}
