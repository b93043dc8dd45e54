// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Non-elidable zeroization.
//!
//! Every byte is cleared with `write_volatile`, followed by a `SeqCst` compiler fence.
//! Volatile stores are observable side effects, so they survive dead-store elimination
//! even when the region is freed right after.

use alloc::vec::Vec;
use core::sync::atomic::{Ordering, compiler_fence};

use crate::error::LengthError;
use crate::length::checked_len;

/// Zeroes every byte of `buf`.
///
/// # Example
///
/// ```rust
/// use keyshroud_util::{is_slice_zeroized, secure_zero};
///
/// let mut key = [0x5Au8; 32];
/// secure_zero(&mut key);
/// assert!(is_slice_zeroized(&key));
/// ```
#[inline(never)]
pub fn secure_zero(buf: &mut [u8]) {
    // SAFETY: a live `&mut [u8]` is valid for writes of its whole length.
    unsafe { secure_zero_raw(buf.as_mut_ptr(), buf.len()) };
}

/// Zeroes the first `byte_count` bytes of `buf`.
///
/// # Panics
///
/// Panics if `byte_count > buf.len()` (caller precondition).
#[inline]
pub fn secure_zero_prefix(buf: &mut [u8], byte_count: usize) {
    secure_zero(&mut buf[..byte_count]);
}

/// Signed-length variant of [`secure_zero_prefix`].
///
/// # Errors
///
/// Returns [`LengthError::InvalidLength`] before touching `buf` if `byte_count` is
/// negative or overflows `usize`.
#[inline]
pub fn secure_zero_signed(buf: &mut [u8], byte_count: impl Into<i64>) -> Result<(), LengthError> {
    let byte_count = checked_len(byte_count)?;
    secure_zero_prefix(buf, byte_count);

    Ok(())
}

/// Zeroes `byte_count` bytes starting at `ptr`.
///
/// With `byte_count == 0` the pointer is never dereferenced.
///
/// # Safety
///
/// When `byte_count > 0`, `ptr` must be valid for writes of `byte_count` bytes.
#[inline(never)]
pub unsafe fn secure_zero_raw(ptr: *mut u8, byte_count: usize) {
    if byte_count == 0 {
        return;
    }

    for i in 0..byte_count {
        // SAFETY: `i < byte_count` and the caller guarantees the region is writable.
        unsafe { core::ptr::write_volatile(ptr.add(i), 0) };
    }

    compiler_fence(Ordering::SeqCst);
}

/// Zeroes the **entire allocation** of `vec` (0..capacity), spare capacity included.
///
/// The length is left unchanged.
///
/// # Example
///
/// ```rust
/// use keyshroud_util::{is_vec_fully_zeroized, secure_zero_vec};
///
/// let mut vec = vec![0xFFu8; 64];
/// vec.truncate(8);
///
/// secure_zero_vec(&mut vec);
/// assert!(is_vec_fully_zeroized(&vec));
/// ```
#[inline]
pub fn secure_zero_vec(vec: &mut Vec<u8>) {
    // SAFETY: a Vec's allocation is valid for `capacity` bytes; u8 has no invalid
    // bit patterns, so writing zeros into spare capacity is sound.
    unsafe { secure_zero_raw(vec.as_mut_ptr(), vec.capacity()) };
}

/// Returns `true` if every byte of `slice` is zero.
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Returns `true` if the whole allocation of `vec` (0..capacity) is zero.
///
/// Spare capacity is inspected too, so leftovers from `truncate()` are detected.
#[inline(never)]
pub fn is_vec_fully_zeroized(vec: &Vec<u8>) -> bool {
    let base = vec.as_ptr();

    (0..vec.capacity()).all(|i| {
        // SAFETY: `i < capacity`; spare capacity of a Vec<u8> that was zeroed or
        // initialised is read as raw bytes only.
        unsafe { core::ptr::read_volatile(base.add(i)) == 0 }
    })
}
