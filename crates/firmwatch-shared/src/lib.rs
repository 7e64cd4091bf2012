// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Wire types shared between the Firmwatch server and device agents.

pub mod ingest;

pub use ingest::{IngestRequest, IngestResponse};
