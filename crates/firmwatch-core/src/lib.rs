// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Firmwatch reconciliation core.
//!
//! Pure batch logic with no I/O: firmware version comparison, reference
//! table construction, device reconciliation and report projection. The
//! server crate owns every suspension point (CSV read, SQLite fetch, SMTP
//! delivery) and hands this crate fully materialized inputs.

pub mod error;
pub mod reconcile;
pub mod reference;
pub mod report;
pub mod version;

pub use error::CoreError;
pub use reconcile::{ComparisonResult, DeviceRecord, OutdatedDevice, classify, reconcile};
pub use reference::ReferenceTable;
pub use report::{ReportEntry, UpdateReport};
pub use version::{compare_versions, is_lower};
