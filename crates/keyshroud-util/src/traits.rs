// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Core traits for systematic zeroization.

use alloc::vec::Vec;

use crate::zero::{is_slice_zeroized, is_vec_fully_zeroized, secure_zero, secure_zero_vec};

/// Trait for verifying that a value has been zeroized.
///
/// Used in tests and assertions to check that no sensitive data remains in memory.
///
/// # Example
///
/// ```rust
/// use keyshroud_util::{FastZeroizable, ZeroizationProbe};
///
/// let mut nonce = [7u8; 12];
/// assert!(!nonce.is_zeroized());
///
/// nonce.fast_zeroize();
/// assert!(nonce.is_zeroized());
/// ```
pub trait ZeroizationProbe {
    /// Returns `true` if the value is zeroized (all bytes are 0).
    fn is_zeroized(&self) -> bool;
}

/// Trait for types that can be zeroized in place.
///
/// Dyn-compatible, so it can be used as `&mut dyn FastZeroizable`.
pub trait FastZeroizable {
    /// Overwrites all sensitive data with zeros.
    fn fast_zeroize(&mut self);
}

impl ZeroizationProbe for [u8] {
    fn is_zeroized(&self) -> bool {
        is_slice_zeroized(self)
    }
}

impl FastZeroizable for [u8] {
    fn fast_zeroize(&mut self) {
        secure_zero(self);
    }
}

impl<const N: usize> ZeroizationProbe for [u8; N] {
    fn is_zeroized(&self) -> bool {
        is_slice_zeroized(self)
    }
}

impl<const N: usize> FastZeroizable for [u8; N] {
    fn fast_zeroize(&mut self) {
        secure_zero(self);
    }
}

// Vec covers its spare capacity too.
impl ZeroizationProbe for Vec<u8> {
    fn is_zeroized(&self) -> bool {
        is_vec_fully_zeroized(self)
    }
}

impl FastZeroizable for Vec<u8> {
    fn fast_zeroize(&mut self) {
        secure_zero_vec(self);
    }
}
