// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Reconciliation of device records against the reference table.

use serde::{Deserialize, Serialize};

use crate::reference::ReferenceTable;
use crate::version::is_lower;

/// Snapshot of one device as fetched from the store.
///
/// `firmware` may be absent or empty for devices that registered without a
/// version; such devices are never flagged outdated. `last_check` is an
/// opaque timestamp string, passed through to the report unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub serial: String,
    pub firmware: Option<String>,
    pub last_check: String,
}

/// Outcome of comparing one device against the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    Outdated,
    UpToDate,
    /// The device serial has no reference entry; excluded from reports.
    Unknown,
}

/// A device whose firmware is strictly below its expected version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedDevice {
    pub serial: String,
    pub current_version: String,
    pub expected_version: String,
    pub last_check: String,
}

/// Classifies a single record against the reference table.
#[must_use]
pub fn classify(record: &DeviceRecord, reference: &ReferenceTable) -> ComparisonResult {
    let Some(expected) = reference.lookup(&record.serial) else {
        return ComparisonResult::Unknown;
    };
    if is_lower(record.firmware.as_deref().unwrap_or(""), expected) {
        ComparisonResult::Outdated
    } else {
        ComparisonResult::UpToDate
    }
}

/// Joins device records against the reference table and returns the devices
/// that need a firmware update.
///
/// Output preserves the input record order. Records with no matching
/// reference entry are skipped. Pure: deterministic for identical inputs,
/// no I/O, inputs untouched.
#[must_use]
pub fn reconcile(records: &[DeviceRecord], reference: &ReferenceTable) -> Vec<OutdatedDevice> {
    let mut outdated = Vec::new();

    for record in records {
        let Some(expected) = reference.lookup(&record.serial) else {
            continue;
        };

        let current = record.firmware.as_deref().unwrap_or("");
        if is_lower(current, expected) {
            outdated.push(OutdatedDevice {
                serial: record.serial.clone(),
                current_version: current.to_owned(),
                expected_version: expected.to_owned(),
                last_check: record.last_check.clone(),
            });
        }
    }

    outdated
}
