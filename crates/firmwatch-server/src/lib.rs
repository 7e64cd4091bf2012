// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Firmwatch server: ingest endpoint, device store, periodic firmware
//! reconciliation and email reporting.

pub mod checker;
pub mod config;
pub mod db;
pub mod ingest;
pub mod notifications;
pub mod reference_csv;
pub mod status;
