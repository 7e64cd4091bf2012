// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Reference CSV loader.
//!
//! Reads the expected-firmware table exported by the fleet management tool:
//! a delimited file whose header row names a `Serial` and an `LFV` (latest
//! firmware version) column. Rows are handed to the core as plain key/value
//! pairs; trimming, skipping and duplicate handling happen there.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use firmwatch_core::ReferenceTable;

const SERIAL_COLUMN: &str = "Serial";
const VERSION_COLUMN: &str = "LFV";

pub fn load_reference(path: &Path, delimiter: char) -> Result<ReferenceTable> {
    let delimiter = u8::try_from(delimiter)
        .with_context(|| format!("CSV delimiter must be ASCII, got {delimiter:?}"))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open reference CSV: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read reference CSV header row")?
        .clone();
    let serial_idx = headers
        .iter()
        .position(|h| h.trim() == SERIAL_COLUMN)
        .with_context(|| format!("Reference CSV has no '{SERIAL_COLUMN}' column"))?;
    let version_idx = headers
        .iter()
        .position(|h| h.trim() == VERSION_COLUMN)
        .with_context(|| format!("Reference CSV has no '{VERSION_COLUMN}' column"))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read reference CSV record")?;
        let serial = record.get(serial_idx).unwrap_or("");
        let version = record.get(version_idx).unwrap_or("");
        rows.push((serial.to_owned(), version.to_owned()));
    }

    let table = ReferenceTable::from_rows(rows)
        .with_context(|| format!("Reference CSV {} yielded no entries", path.display()))?;

    info!(
        path = %path.display(),
        entries = table.len(),
        "Reference table loaded"
    );
    Ok(table)
}
