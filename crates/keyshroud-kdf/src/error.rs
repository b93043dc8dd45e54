// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for keyshroud-kdf.
use thiserror::Error;

use keyshroud_buffer::BufferError;

/// Errors from building parameter lists or running a KDF primitive.
#[derive(Debug, Error)]
pub enum KdfError {
    /// A region is longer than a `u32` byte length can describe.
    #[error("region of {0} bytes does not fit a u32 length")]
    InvalidLength(usize),

    /// The list holds more entries than a `u32` count can describe.
    #[error("too many parameters")]
    TooManyParameters,

    /// A raw tag does not name a known buffer kind.
    #[error("unknown buffer kind: {0}")]
    UnknownKind(u32),

    /// The KDF primitive reported a failure.
    #[error("primitive error: {0:?}")]
    Primitive(Box<dyn core::fmt::Debug + Send + Sync + 'static>),

    /// Storing the derived key failed.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),
}

impl KdfError {
    /// Creates a Primitive error from any Debug + Send + Sync error.
    pub fn primitive<E: core::fmt::Debug + Send + Sync + 'static>(e: E) -> Self {
        Self::Primitive(Box::new(e))
    }
}
