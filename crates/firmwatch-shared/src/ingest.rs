// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-record firmware upsert posted by a device agent.
///
/// `reported_at` is whatever timestamp the agent stamps on the reading; the
/// server stores and reports it verbatim.
#[derive(Debug, Deserialize, Serialize)]
pub struct IngestRequest {
    pub serial: String,
    pub shared_secret: String,
    pub firmware: String,
    pub reported_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub ok: bool,
    pub server_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
