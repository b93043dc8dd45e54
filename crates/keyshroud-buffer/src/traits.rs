// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::BufferError;

/// Object-safe scoped access to secret bytes.
///
/// Plaintext only exists for the duration of the closure. Implementors restore
/// their at-rest form before returning, whether the closure returns `Ok`, returns
/// `Err`, or unwinds. Closure errors travel as [`BufferError`]; use
/// [`BufferError::callback_error`] to carry a caller error through.
///
/// [`ProtectedBuffer`](crate::ProtectedBuffer) also offers generic
/// `open_with` / `open_mut_with` for closures that return a value.
pub trait Buffer: Send + Sync + core::fmt::Debug {
    /// Runs `f` over the plaintext, read-only.
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Runs `f` over the plaintext; changes persist in the at-rest form.
    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError>;

    /// Plaintext length in bytes. Fixed at construction.
    fn len(&self) -> usize;

    /// True for the zero-length buffer.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
