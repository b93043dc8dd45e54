// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureBuffer - owned plaintext region, zeroed before release.

use subtle::ConstantTimeEq;

use keyshroud_util::{
    FastZeroizable, LengthError, ZeroizationProbe, checked_len, copy_bytes, copy_raw,
    secure_zero_vec,
};

use crate::error::BufferError;
use crate::traits::Buffer;

/// Owned, fixed-length byte region for secret material.
///
/// - The length never changes after construction.
/// - Memory is zeroed with non-elidable writes before it is freed, whichever way the
///   buffer goes out of scope (return, `?`, panic unwind).
/// - No `Clone`, no `Deref`, redacted `Debug`, constant-time `PartialEq`.
pub struct SecureBuffer {
    data: Vec<u8>,
}

impl SecureBuffer {
    /// The zero-length buffer.
    ///
    /// All empty buffers share the same dangling, never-dereferenced pointer: no
    /// allocation happens and nothing is ever written through it.
    pub const EMPTY: SecureBuffer = SecureBuffer { data: Vec::new() };

    /// Returns [`EMPTY`](Self::EMPTY).
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Allocates a zero-filled buffer of exactly `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        if len == 0 {
            return Self::empty();
        }

        Self {
            data: vec![0u8; len],
        }
    }

    /// Copies `src` into a new buffer.
    pub fn from_slice(src: &[u8]) -> Self {
        to_owned_buffer(src, src.len())
    }

    /// Copies `byte_count` bytes starting at `ptr` into a new buffer.
    ///
    /// With `byte_count == 0` the pointer is never read, so null is accepted.
    ///
    /// # Safety
    ///
    /// When `byte_count > 0`, `ptr` must be valid for reads of `byte_count` bytes.
    pub unsafe fn from_raw_parts(ptr: *const u8, byte_count: usize) -> Self {
        if byte_count == 0 {
            return Self::empty();
        }

        let mut buffer = Self::zeroed(byte_count);
        // SAFETY: the caller guarantees `ptr` is readable for `byte_count` bytes and the
        // destination was just allocated with exactly `byte_count` bytes.
        unsafe { copy_raw(ptr, buffer.data.as_mut_ptr(), byte_count) };

        buffer
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer contents for in-place mutation.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Copies the first `byte_count` bytes of `src` into a new [`SecureBuffer`].
///
/// With `byte_count == 0` the empty buffer is returned and `src` is not read.
///
/// # Panics
///
/// Panics if `src` is shorter than `byte_count` (caller precondition).
///
/// # Example
///
/// ```rust
/// use keyshroud_buffer::to_owned_buffer;
///
/// let buffer = to_owned_buffer(b"derivation key", 10);
/// assert_eq!(buffer.as_slice(), b"derivation");
/// ```
pub fn to_owned_buffer(src: &[u8], byte_count: usize) -> SecureBuffer {
    if byte_count == 0 {
        return SecureBuffer::empty();
    }

    let mut buffer = SecureBuffer::zeroed(byte_count);
    copy_bytes(src, &mut buffer.data, byte_count);

    buffer
}

/// Signed-length variant of [`to_owned_buffer`].
///
/// # Errors
///
/// Returns [`LengthError::InvalidLength`] before allocating if `byte_count` is negative.
pub fn to_owned_buffer_signed(
    src: &[u8],
    byte_count: impl Into<i64>,
) -> Result<SecureBuffer, LengthError> {
    let byte_count = checked_len(byte_count)?;

    Ok(to_owned_buffer(src, byte_count))
}

impl Default for SecureBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl FastZeroizable for SecureBuffer {
    fn fast_zeroize(&mut self) {
        secure_zero_vec(&mut self.data);
    }
}

impl ZeroizationProbe for SecureBuffer {
    fn is_zeroized(&self) -> bool {
        self.data.is_zeroized()
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.fast_zeroize();
    }
}

impl PartialEq for SecureBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data.as_slice().ct_eq(other.data.as_slice()).into()
    }
}

impl Eq for SecureBuffer {}

impl core::fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Buffer for SecureBuffer {
    fn open(
        &mut self,
        f: &mut dyn FnMut(&[u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(&self.data)
    }

    fn open_mut(
        &mut self,
        f: &mut dyn FnMut(&mut [u8]) -> Result<(), BufferError>,
    ) -> Result<(), BufferError> {
        f(&mut self.data)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
