// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Enums for ProtectedBuffer internal state

/// Protection state of a [`ProtectedBuffer`](crate::ProtectedBuffer).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProtectionState {
    /// Bytes are in protected form (the at-rest state).
    Protected,
    /// Bytes are plaintext; only observable from inside an access window.
    Unprotected,
    /// Bytes were zeroed after a protection failure; the buffer is unusable.
    Disposed,
}
