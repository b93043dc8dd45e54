// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for keyshroud-buffer.
use thiserror::Error;

use keyshroud_util::LengthError;

/// Errors from a [`MemoryProtector`](crate::MemoryProtector).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum ProtectorError {
    /// The OS entropy source could not provide key or tweak material.
    #[error("entropy source unavailable")]
    EntropyUnavailable = 0,

    /// The protect transform could not be applied.
    #[error("protect failed")]
    ProtectFailed = 1,

    /// The unprotect transform could not be applied.
    #[error("unprotect failed")]
    UnprotectFailed = 2,
}

/// Errors that can occur when working with buffers.
#[derive(Debug, Error)]
pub enum BufferError {
    /// A caller-supplied byte count was negative or overflowed `usize`.
    #[error("{0}")]
    InvalidLength(#[from] LengthError),

    /// Protection could not be applied. The plaintext was zeroed before this was returned.
    #[error("ProtectionFailure: {0}")]
    ProtectionFailure(ProtectorError),

    /// Protection could not be removed for a scoped access. The buffer was disposed.
    #[error("UnprotectionFailure: {0}")]
    UnprotectionFailure(ProtectorError),

    /// The buffer was zeroed and disposed after an earlier protection failure.
    #[error("buffer is no longer available")]
    Disposed,

    /// An error occurred in a callback function.
    #[error("callback error: {0:?}")]
    CallbackError(Box<dyn core::fmt::Debug + Send + Sync + 'static>),
}

impl BufferError {
    /// Creates a CallbackError from any Debug + Send + Sync error.
    pub fn callback_error<E: core::fmt::Debug + Send + Sync + 'static>(e: E) -> Self {
        Self::CallbackError(Box::new(e))
    }
}
