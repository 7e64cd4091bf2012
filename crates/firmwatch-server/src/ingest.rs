// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use tracing::{info, warn};

use firmwatch_shared::ingest::{IngestRequest, IngestResponse};

use crate::config::ServerConfig;
use crate::db::Database;

#[derive(Debug, Clone)]
pub struct IngestState {
    pub db: Arc<Database>,
    pub config: Arc<ServerConfig>,
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<IngestResponse>) {
    (
        status,
        Json(IngestResponse {
            ok: false,
            server_time: Utc::now(),
            message: Some(message.to_owned()),
        }),
    )
}

#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn ingest_handler(
    State(state): State<IngestState>,
    Json(request): Json<IngestRequest>,
) -> impl IntoResponse {
    if request.shared_secret != state.config.auth.shared_secret {
        warn!(
            serial = %request.serial,
            "Ingest rejected: invalid shared secret"
        );
        return reject(StatusCode::UNAUTHORIZED, "Invalid shared secret");
    }

    let serial = request.serial.trim();
    if serial.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "serial must not be empty");
    }

    let firmware = request.firmware.trim();
    let firmware = if firmware.is_empty() {
        None
    } else {
        Some(firmware)
    };

    if let Err(e) = state
        .db
        .upsert_device(serial, firmware, request.reported_at.trim())
    {
        warn!(error = %e, serial = %serial, "Failed to upsert device record");
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
    }

    info!(
        serial = %serial,
        firmware = firmware.unwrap_or("<none>"),
        "Device record ingested"
    );

    (
        StatusCode::OK,
        Json(IngestResponse {
            ok: true,
            server_time: Utc::now(),
            message: None,
        }),
    )
}
