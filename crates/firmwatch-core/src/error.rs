// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Error types for the reconciliation core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The reference input produced zero usable rows. Reconciling against an
    /// empty table would silently report nothing, so this is fatal.
    #[error("reference table is empty after filtering invalid rows")]
    EmptyReference,
}

pub type Result<T> = std::result::Result<T, CoreError>;
