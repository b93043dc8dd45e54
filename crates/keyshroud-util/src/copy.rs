// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Bulk copy between byte regions.

use crate::error::LengthError;
use crate::length::checked_len;

/// Copies the first `byte_count` bytes of `src` into `dst`.
///
/// A `byte_count` of zero is a no-op and touches neither region.
///
/// # Panics
///
/// Both regions must hold at least `byte_count` bytes. This is a caller precondition,
/// not a recoverable condition: violating it panics on the slice bounds.
///
/// # Example
///
/// ```rust
/// use keyshroud_util::copy_bytes;
///
/// let src = [1u8, 2, 3, 4];
/// let mut dst = [0u8; 4];
///
/// copy_bytes(&src, &mut dst, 2);
/// assert_eq!(dst, [1, 2, 0, 0]);
/// ```
#[inline]
pub fn copy_bytes(src: &[u8], dst: &mut [u8], byte_count: usize) {
    if byte_count == 0 {
        return;
    }

    dst[..byte_count].copy_from_slice(&src[..byte_count]);
}

/// Signed-length variant of [`copy_bytes`].
///
/// The length is validated before any write, so on error `dst` is left untouched.
///
/// # Errors
///
/// Returns [`LengthError::InvalidLength`] if `byte_count` is negative or overflows `usize`.
#[inline]
pub fn copy_bytes_signed(
    src: &[u8],
    dst: &mut [u8],
    byte_count: impl Into<i64>,
) -> Result<(), LengthError> {
    let byte_count = checked_len(byte_count)?;
    copy_bytes(src, dst, byte_count);

    Ok(())
}

/// Copies `byte_count` bytes between raw regions.
///
/// With `byte_count == 0` neither pointer is dereferenced, so null or dangling
/// pointers are accepted. Copying a region onto itself (`src == dst`) is a no-op.
///
/// # Safety
///
/// When `byte_count > 0`:
/// - `src` must be valid for reads of `byte_count` bytes
/// - `dst` must be valid for writes of `byte_count` bytes
/// - the regions must not partially overlap
#[inline]
pub unsafe fn copy_raw(src: *const u8, dst: *mut u8, byte_count: usize) {
    if byte_count == 0 || core::ptr::eq(src, dst) {
        return;
    }

    // SAFETY: guaranteed by the caller (see # Safety).
    unsafe { core::ptr::copy_nonoverlapping(src, dst, byte_count) };
}
