// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Operator status endpoint: the current fleet classified against the
//! reference table, as JSON. Read-only; reuses the same pure core the
//! checker runs, so what it shows is exactly what a report run would see.

use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use firmwatch_core::{ComparisonResult, classify};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::reference_csv::load_reference;

#[derive(Debug, Clone)]
pub struct StatusState {
    pub db: Arc<Database>,
    pub config: Arc<ServerConfig>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub server_time: DateTime<Utc>,
    pub total: usize,
    pub outdated: usize,
    pub up_to_date: usize,
    pub unknown: usize,
    pub last_report_at: Option<DateTime<Utc>>,
    pub devices: Vec<DeviceStatus>,
}

#[derive(Debug, Serialize)]
pub struct DeviceStatus {
    pub serial: String,
    pub firmware: Option<String>,
    pub expected_version: Option<String>,
    pub state: ComparisonResult,
    pub last_check: String,
}

#[derive(Debug, Serialize)]
pub struct StatusError {
    pub error: String,
}

#[expect(clippy::unused_async, reason = "axum handler must be async")]
pub async fn status_handler(
    State(state): State<StatusState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusError>)> {
    let reference = load_reference(
        Path::new(&state.config.reference.csv_path),
        state.config.reference.delimiter,
    )
    .map_err(|e| {
        error!(error = %e, "Status: failed to load reference table");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusError {
                error: format!("reference table unavailable: {e}"),
            }),
        )
    })?;

    let records = state.db.get_all_devices().map_err(|e| {
        error!(error = %e, "Status: failed to fetch device records");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(StatusError {
                error: "device store unavailable".to_owned(),
            }),
        )
    })?;

    let devices: Vec<DeviceStatus> = records
        .iter()
        .map(|record| DeviceStatus {
            serial: record.serial.clone(),
            firmware: record.firmware.clone(),
            expected_version: reference.lookup(&record.serial).map(str::to_owned),
            state: classify(record, &reference),
            last_check: record.last_check.clone(),
        })
        .collect();

    let outdated = devices
        .iter()
        .filter(|d| d.state == ComparisonResult::Outdated)
        .count();
    let up_to_date = devices
        .iter()
        .filter(|d| d.state == ComparisonResult::UpToDate)
        .count();
    let unknown = devices
        .iter()
        .filter(|d| d.state == ComparisonResult::Unknown)
        .count();

    Ok(Json(StatusResponse {
        server_time: Utc::now(),
        total: devices.len(),
        outdated,
        up_to_date,
        unknown,
        last_report_at: state.db.last_report_at(),
        devices,
    }))
}
