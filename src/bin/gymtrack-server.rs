// ABOUTME: GymTrack HTTP server binary
// ABOUTME: Loads configuration from the environment, connects the database, and serves the JSON API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # GymTrack Server Binary
//!
//! ```bash
//! DATABASE_URL=sqlite:./data/gymtrack.db JWT_SECRET=... gymtrack-server --port 8080
//! ```

use anyhow::Result;
use clap::Parser;
use gymtrack_server::{config::ServerConfig, logging, resources::ServerResources, server};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gymtrack-server")]
#[command(about = "GymTrack - multi-tenant personal training tracker API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;
    info!("Starting GymTrack server");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
