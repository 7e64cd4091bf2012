// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Periodic reconciliation task.
//!
//! Each run is an independent batch: load the reference CSV, snapshot the
//! device store, reconcile, and mail a report when anything is outdated.
//! A failed run is logged and the loop waits for the next tick; there are
//! no retries inside a run.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use firmwatch_core::{UpdateReport, classify, reconcile};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::notifications::EmailNotifier;
use crate::reference_csv::load_reference;

/// Runs one reconciliation pass. Returns the number of outdated devices.
pub async fn run_check(
    db: &Database,
    config: &ServerConfig,
    notifier: &EmailNotifier,
) -> Result<usize> {
    let reference = load_reference(
        Path::new(&config.reference.csv_path),
        config.reference.delimiter,
    )?;

    let records = db
        .get_all_devices()
        .context("Failed to fetch device records")?;
    info!(
        devices = records.len(),
        reference_entries = reference.len(),
        "Reconciliation started"
    );

    let outdated = reconcile(&records, &reference);

    if outdated.is_empty() {
        info!("No device requires a firmware update");
        // Operator diagnostic: show how the first record compared, so a
        // serial mismatch between store and CSV is visible in the logs.
        if let Some(first) = records.first() {
            debug!(
                serial = %first.serial,
                firmware = first.firmware.as_deref().unwrap_or("<none>"),
                expected = reference.lookup(&first.serial).unwrap_or("<no reference entry>"),
                result = ?classify(first, &reference),
                "First record comparison"
            );
        } else {
            debug!("Device store is empty");
        }
        return Ok(0);
    }

    let report = UpdateReport::from_outdated(&outdated);
    info!(outdated = report.count, "Sending firmware update report");

    notifier.send_report(&report).await?;

    let payload_json = serde_json::to_string(&report)?;
    db.log_report(report.count, &notifier.recipients(), &payload_json)
        .context("Failed to log report")?;

    Ok(report.count)
}

/// Spawns the reconciliation loop at the configured interval. The first
/// pass runs immediately.
pub fn spawn_checker(
    db: Arc<Database>,
    config: Arc<ServerConfig>,
    notifier: Arc<EmailNotifier>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(config.check.interval_secs));
        info!(
            interval_secs = config.check.interval_secs,
            "Reconciliation checker started"
        );

        loop {
            interval.tick().await;

            match run_check(&db, &config, &notifier).await {
                Ok(0) => {}
                Ok(outdated) => {
                    info!(outdated, "Reconciliation run reported outdated devices");
                }
                Err(e) => {
                    error!(error = %e, "Reconciliation run failed");
                }
            }
        }
    })
}
