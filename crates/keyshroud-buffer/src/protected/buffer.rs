// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use log::{trace, warn};

use keyshroud_util::{FastZeroizable, ZeroizationProbe, checked_len, secure_zero};

use crate::error::{BufferError, ProtectorError};
use crate::protector::{MemoryProtector, ProcessMemoryProtector, TWEAK_LEN};
use crate::secure_buffer::{SecureBuffer, to_owned_buffer};
use crate::traits::Buffer;

use super::enums::ProtectionState;
use super::guards::{DisposeOnFailure, ReprotectOnUnwind, ZeroizeOnFailure};

/// Applies protection to `inner` in place.
///
/// On failure (error or panic inside the protector) `inner` is zeroed before control
/// leaves this function.
pub(crate) fn seal(
    protector: &dyn MemoryProtector,
    tweak: &[u8; TWEAK_LEN],
    inner: &mut SecureBuffer,
) -> Result<(), BufferError> {
    let mut guard = ZeroizeOnFailure::new(inner);

    match protector.protect(tweak, guard.as_mut_slice()) {
        Ok(()) => {
            guard.disarm();
            Ok(())
        }
        Err(e) => {
            drop(guard);
            warn!("memory protection failed ({e}); plaintext zeroed");
            Err(BufferError::ProtectionFailure(e))
        }
    }
}

/// A secret buffer whose bytes are protected at rest.
///
/// Plaintext is only reachable through [`open_with`](Self::open_with),
/// [`open_mut_with`](Self::open_mut_with) and the [`Buffer`] methods, which require
/// exclusive access and re-protect the bytes (under a fresh tweak) before returning.
pub struct ProtectedBuffer {
    inner: SecureBuffer,
    tweak: [u8; TWEAK_LEN],
    state: ProtectionState,
    protector: Arc<dyn MemoryProtector>,
}

impl ProtectedBuffer {
    /// Copies `src` into a new buffer protected by [`ProcessMemoryProtector`].
    ///
    /// # Errors
    ///
    /// [`BufferError::ProtectionFailure`] if protection cannot be applied; the copied
    /// plaintext is zeroed first.
    pub fn new(src: &[u8]) -> Result<Self, BufferError> {
        Self::with_protector(Arc::new(ProcessMemoryProtector), src)
    }

    /// Copies `src` into a new buffer protected by `protector`.
    pub fn with_protector(
        protector: Arc<dyn MemoryProtector>,
        src: &[u8],
    ) -> Result<Self, BufferError> {
        Self::from_secure_buffer(protector, SecureBuffer::from_slice(src))
    }

    /// Copies `byte_count` bytes at `ptr` into a new buffer protected by
    /// [`ProcessMemoryProtector`].
    ///
    /// # Safety
    ///
    /// When `byte_count > 0`, `ptr` must be valid for reads of `byte_count` bytes.
    pub unsafe fn from_raw_parts(ptr: *const u8, byte_count: usize) -> Result<Self, BufferError> {
        // SAFETY: forwarded to the caller.
        let inner = unsafe { SecureBuffer::from_raw_parts(ptr, byte_count) };

        Self::from_secure_buffer(Arc::new(ProcessMemoryProtector), inner)
    }

    /// Protects the plaintext held by `inner`, taking ownership of it.
    ///
    /// On any error `inner` is zeroed before being released.
    pub fn from_secure_buffer(
        protector: Arc<dyn MemoryProtector>,
        mut inner: SecureBuffer,
    ) -> Result<Self, BufferError> {
        let mut tweak = [0u8; TWEAK_LEN];

        if !inner.is_empty() {
            if let Err(e) = protector.fill_tweak(&mut tweak) {
                inner.fast_zeroize();
                warn!("failed to draw protection tweak ({e}); plaintext zeroed");
                return Err(BufferError::ProtectionFailure(e));
            }

            seal(protector.as_ref(), &tweak, &mut inner)?;
        }

        trace!("protected buffer created (len = {})", inner.len());

        Ok(Self {
            inner,
            tweak,
            state: ProtectionState::Protected,
            protector,
        })
    }

    /// Returns the current protection state.
    pub fn state(&self) -> ProtectionState {
        self.state
    }

    /// Returns true if the bytes are currently in protected form.
    pub fn is_protected(&self) -> bool {
        self.state == ProtectionState::Protected
    }

    /// Returns the at-rest (protected) bytes.
    pub fn protected_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    /// Runs `f` over the plaintext and returns its result.
    ///
    /// Generic counterpart of [`Buffer::open`]: the closure may return any value
    /// and any error type that a [`BufferError`] converts into. The bytes are
    /// re-protected before this returns, on every path.
    ///
    /// # Errors
    ///
    /// The closure's own error, or a [`BufferError`] converted into `E`. When both
    /// the closure and re-protection fail, the re-protection error is returned.
    pub fn open_with<R, E>(&mut self, f: impl FnOnce(&[u8]) -> Result<R, E>) -> Result<R, E>
    where
        E: From<BufferError>,
    {
        self.try_open_mut(|plaintext| f(plaintext))?
    }

    /// Mutable counterpart of [`open_with`](Self::open_with).
    pub fn open_mut_with<R, E>(
        &mut self,
        f: impl FnOnce(&mut [u8]) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<BufferError>,
    {
        self.try_open_mut(f)?
    }

    /// Copies the plaintext out into a new [`SecureBuffer`].
    pub fn to_secure_buffer(&mut self) -> Result<SecureBuffer, BufferError> {
        self.open_with(|plaintext| Ok(SecureBuffer::from_slice(plaintext)))
    }

    pub(crate) fn inner_mut(&mut self) -> &mut SecureBuffer {
        &mut self.inner
    }

    /// Draws a fresh tweak and protects the plaintext with it.
    ///
    /// On error or panic inside the protector the buffer is disposed first.
    pub(crate) fn reprotect(&mut self) -> Result<(), BufferError> {
        let protector = &self.protector;
        let mut guard = DisposeOnFailure::new(&mut self.inner, &mut self.tweak, &mut self.state);

        let result = guard.with_parts(|tweak, data| -> Result<(), ProtectorError> {
            protector.fill_tweak(tweak)?;
            protector.protect(tweak, data)
        });

        if let Err(e) = result {
            drop(guard);
            warn!("re-protection failed ({e}); buffer disposed");
            return Err(BufferError::ProtectionFailure(e));
        }

        guard.disarm();
        drop(guard);
        self.state = ProtectionState::Protected;

        Ok(())
    }

    fn unprotect(&mut self) -> Result<(), BufferError> {
        let protector = &self.protector;
        let mut guard = DisposeOnFailure::new(&mut self.inner, &mut self.tweak, &mut self.state);

        let result = guard.with_parts(|tweak, data| protector.unprotect(tweak, data));

        if let Err(e) = result {
            drop(guard);
            warn!("unprotect failed ({e}); buffer disposed");
            return Err(BufferError::UnprotectionFailure(e));
        }

        guard.disarm();
        drop(guard);
        self.state = ProtectionState::Unprotected;

        Ok(())
    }

    fn dispose(&mut self) {
        self.inner.fast_zeroize();
        secure_zero(&mut self.tweak);
        self.state = ProtectionState::Disposed;
    }

    fn try_open_mut<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> Result<R, BufferError> {
        if self.state == ProtectionState::Disposed {
            return Err(BufferError::Disposed);
        }

        if self.inner.is_empty() {
            let empty: &mut [u8] = &mut [];
            return Ok(f(empty));
        }

        self.unprotect()?;

        let output = {
            let mut window = ReprotectOnUnwind::new(self);
            let output = f(window.plaintext_mut());
            window.disarm();
            output
        };

        self.reprotect()?;

        Ok(output)
    }
}

/// Copies the first `byte_count` bytes of `src` into a new [`ProtectedBuffer`] using
/// [`ProcessMemoryProtector`].
///
/// # Panics
///
/// Panics if `src` is shorter than `byte_count` (caller precondition).
///
/// # Errors
///
/// [`BufferError::ProtectionFailure`] if protection cannot be applied. The plaintext
/// copy is zeroed before the error is returned.
pub fn to_protected_buffer(src: &[u8], byte_count: usize) -> Result<ProtectedBuffer, BufferError> {
    ProtectedBuffer::from_secure_buffer(
        Arc::new(ProcessMemoryProtector),
        to_owned_buffer(src, byte_count),
    )
}

/// Signed-length variant of [`to_protected_buffer`].
///
/// # Errors
///
/// [`BufferError::InvalidLength`] before any allocation or copy if `byte_count` is
/// negative; otherwise as [`to_protected_buffer`].
pub fn to_protected_buffer_signed(
    src: &[u8],
    byte_count: impl Into<i64>,
) -> Result<ProtectedBuffer, BufferError> {
    let byte_count = checked_len(byte_count)?;

    to_protected_buffer(src, byte_count)
}

impl Drop for ProtectedBuffer {
    fn drop(&mut self) {
        // inner zeroes itself on drop
        secure_zero(&mut self.tweak);
    }
}

impl FastZeroizable for ProtectedBuffer {
    fn fast_zeroize(&mut self) {
        self.dispose();
    }
}

impl ZeroizationProbe for ProtectedBuffer {
    fn is_zeroized(&self) -> bool {
        self.inner.is_zeroized() & self.tweak.is_zeroized()
    }
}

impl core::fmt::Debug for ProtectedBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProtectedBuffer")
            .field("len", &self.inner.len())
            .field("state", &self.state)
            .field("protector", &self.protector)
            .finish_non_exhaustive()
    }
}

impl Buffer for ProtectedBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        self.try_open_mut(|plaintext| f(plaintext))?
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        self.try_open_mut(f)?
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
