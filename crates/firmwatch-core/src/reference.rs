// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Reference table: serial -> expected firmware version.
//!
//! Built once per reconciliation run from whatever tabular source the caller
//! reads (the server feeds it CSV rows); immutable afterwards. Column naming
//! and delimiters are the caller's concern, this module only sees key/value
//! string pairs.

use std::collections::HashMap;

use crate::error::{CoreError, Result};

/// Authoritative mapping from device serial to expected firmware version.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: HashMap<String, String>,
}

impl ReferenceTable {
    /// Builds the table from `(serial, expected_version)` rows.
    ///
    /// Both fields are trimmed; a row with an empty field is skipped. A
    /// later row with a serial already present overwrites the earlier
    /// version (last wins, no merge). Fails with
    /// [`CoreError::EmptyReference`] when no valid row remains.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = HashMap::new();

        for (serial, version) in rows {
            let serial = serial.trim();
            let version = version.trim();
            if serial.is_empty() || version.is_empty() {
                continue;
            }
            entries.insert(serial.to_owned(), version.to_owned());
        }

        if entries.is_empty() {
            return Err(CoreError::EmptyReference);
        }

        Ok(Self { entries })
    }

    /// Expected firmware version for a serial, if the table knows it.
    #[must_use]
    pub fn lookup(&self, serial: &str) -> Option<&str> {
        self.entries.get(serial).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
