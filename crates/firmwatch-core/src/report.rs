// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Notification payload for the outdated-device report.
//!
//! A pure projection of the reconciliation output. Rendering (HTML table,
//! email subject) and delivery belong to the server's notifier, which
//! consumes this structure.

use serde::Serialize;

use crate::reconcile::OutdatedDevice;

/// One row of the report: what the device runs, what it should run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub serial: String,
    pub current_version: String,
    pub expected_version: String,
    pub last_check: String,
}

/// Structured payload handed to the notifier.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub count: usize,
    pub entries: Vec<ReportEntry>,
}

impl UpdateReport {
    /// Projects the engine output into the payload, preserving order.
    #[must_use]
    pub fn from_outdated(outdated: &[OutdatedDevice]) -> Self {
        let entries: Vec<ReportEntry> = outdated
            .iter()
            .map(|device| ReportEntry {
                serial: device.serial.clone(),
                current_version: device.current_version.clone(),
                expected_version: device.expected_version.clone(),
                last_check: device.last_check.clone(),
            })
            .collect();

        Self {
            count: entries.len(),
            entries,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outdated(serial: &str, current: &str, expected: &str, last_check: &str) -> OutdatedDevice {
        OutdatedDevice {
            serial: serial.to_owned(),
            current_version: current.to_owned(),
            expected_version: expected.to_owned(),
            last_check: last_check.to_owned(),
        }
    }

    #[test]
    fn test_projection_preserves_order_and_fields() {
        let devices = vec![
            outdated("SN001", "3.1.9", "3.2.0", "d1"),
            outdated("SN007", "1.0.0", "1.1.0", "d2"),
        ];

        let report = UpdateReport::from_outdated(&devices);
        assert_eq!(report.count, 2);
        assert_eq!(report.entries[0].serial, "SN001");
        assert_eq!(report.entries[0].current_version, "3.1.9");
        assert_eq!(report.entries[0].expected_version, "3.2.0");
        assert_eq!(report.entries[0].last_check, "d1");
        assert_eq!(report.entries[1].serial, "SN007");
    }

    #[test]
    fn test_empty_input_is_a_valid_report() {
        let report = UpdateReport::from_outdated(&[]);
        assert_eq!(report.count, 0);
        assert!(report.is_empty());
    }
}
