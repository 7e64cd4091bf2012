// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;
use tracing_subscriber::EnvFilter;

use firmwatch_server::checker;
use firmwatch_server::config::ServerConfig;
use firmwatch_server::db::Database;
use firmwatch_server::ingest::{self, IngestState};
use firmwatch_server::notifications::EmailNotifier;
use firmwatch_server::status::{self, StatusState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("firmwatch_server=info")),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let run_once = if let Some(pos) = args.iter().position(|a| a == "--once") {
        args.remove(pos);
        true
    } else {
        false
    };
    let config_path = args
        .into_iter()
        .next()
        .unwrap_or_else(|| "firmwatch.toml".to_owned());

    info!(path = %config_path, "Loading configuration");
    let config = Arc::new(ServerConfig::from_file(&config_path)?);

    let db = Arc::new(Database::open(&config.database.path)?);
    info!(path = %config.database.path, "Database opened");

    let notifier = Arc::new(EmailNotifier::new(&config.email)?);

    if run_once {
        let outdated = checker::run_check(&db, &config, &notifier).await?;
        info!(outdated, "Single reconciliation run finished");
        return Ok(());
    }

    checker::spawn_checker(Arc::clone(&db), Arc::clone(&config), notifier);

    let ingest_state = IngestState {
        db: Arc::clone(&db),
        config: Arc::clone(&config),
    };
    let status_state = StatusState {
        db: Arc::clone(&db),
        config: Arc::clone(&config),
    };

    let app = Router::new()
        .route(
            "/api/ingest",
            post(ingest::ingest_handler).with_state(ingest_state),
        )
        .route(
            "/api/status",
            get(status::status_handler).with_state(status_state),
        );

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Firmwatch Server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
