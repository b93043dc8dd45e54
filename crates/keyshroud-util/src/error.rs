// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for keyshroud-util.
use thiserror::Error;

/// Errors raised while validating a caller-supplied byte count.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum LengthError {
    /// The byte count is negative or does not fit the platform's `usize`.
    #[error("invalid length: {0}")]
    InvalidLength(i64),
}
