// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Drop guards that run cleanup on early return and unwind.

use keyshroud_util::{FastZeroizable, secure_zero};

use crate::protector::TWEAK_LEN;
use crate::secure_buffer::SecureBuffer;

use super::buffer::ProtectedBuffer;
use super::enums::ProtectionState;

/// Zeroes the wrapped buffer on drop unless disarmed.
pub(crate) struct ZeroizeOnFailure<'a> {
    buffer: &'a mut SecureBuffer,
    armed: bool,
}

impl<'a> ZeroizeOnFailure<'a> {
    pub(crate) fn new(buffer: &'a mut SecureBuffer) -> Self {
        Self {
            buffer,
            armed: true,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ZeroizeOnFailure<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.buffer.fast_zeroize();
        }
    }
}

/// Disposes a buffer's parts on drop unless disarmed: zeroes the bytes and the
/// tweak, then marks the state `Disposed`.
///
/// Wraps every protector call made on a live buffer, so neither an error nor a
/// panic inside the protector can leave plaintext (or half-transformed bytes)
/// at rest.
pub(crate) struct DisposeOnFailure<'a> {
    inner: &'a mut SecureBuffer,
    tweak: &'a mut [u8; TWEAK_LEN],
    state: &'a mut ProtectionState,
    armed: bool,
}

impl<'a> DisposeOnFailure<'a> {
    pub(crate) fn new(
        inner: &'a mut SecureBuffer,
        tweak: &'a mut [u8; TWEAK_LEN],
        state: &'a mut ProtectionState,
    ) -> Self {
        Self {
            inner,
            tweak,
            state,
            armed: true,
        }
    }

    /// Runs `f` over the tweak and the bytes.
    pub(crate) fn with_parts<R>(
        &mut self,
        f: impl FnOnce(&mut [u8; TWEAK_LEN], &mut [u8]) -> R,
    ) -> R {
        f(&mut *self.tweak, self.inner.as_mut_slice())
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for DisposeOnFailure<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.fast_zeroize();
            secure_zero(&mut self.tweak[..]);
            *self.state = ProtectionState::Disposed;
        }
    }
}

/// Re-protects an opened buffer on drop unless disarmed (i.e. when the access
/// closure unwinds).
pub(crate) struct ReprotectOnUnwind<'a> {
    buffer: &'a mut ProtectedBuffer,
    armed: bool,
}

impl<'a> ReprotectOnUnwind<'a> {
    pub(crate) fn new(buffer: &'a mut ProtectedBuffer) -> Self {
        Self {
            buffer,
            armed: true,
        }
    }

    pub(crate) fn plaintext_mut(&mut self) -> &mut [u8] {
        self.buffer.inner_mut().as_mut_slice()
    }

    pub(crate) fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ReprotectOnUnwind<'_> {
    fn drop(&mut self) {
        if self.armed {
            // Nothing can be reported while unwinding; reprotect() disposes on failure.
            let _ = self.buffer.reprotect();
        }
    }
}
