// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte-level primitives for secret material.
//!
//! - [`copy_bytes`] / [`copy_raw`]: bulk copy between regions, no-op on zero length
//! - [`secure_zero`] / [`secure_zero_raw`]: zeroization the optimizer cannot elide
//! - [`checked_len`]: signed-to-unsigned length conversion that fails instead of truncating
//!
//! Every signed entry point (`*_signed`) validates its length before touching memory,
//! so an [`LengthError::InvalidLength`] never leaves a partial write behind.
//!
//! ```rust
//! use keyshroud_util::{copy_bytes_signed, is_slice_zeroized, secure_zero, LengthError};
//!
//! let src = [0xAAu8; 16];
//! let mut dst = [0u8; 16];
//!
//! copy_bytes_signed(&src, &mut dst, 16).expect("Failed to copy_bytes_signed(..)");
//! assert_eq!(dst, src);
//!
//! assert_eq!(
//!     copy_bytes_signed(&src, &mut dst, -1),
//!     Err(LengthError::InvalidLength(-1))
//! );
//!
//! secure_zero(&mut dst);
//! assert!(is_slice_zeroized(&dst));
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod copy;
mod error;
mod length;
mod traits;
mod zero;

pub use copy::{copy_bytes, copy_bytes_signed, copy_raw};
pub use error::LengthError;
pub use length::checked_len;
pub use traits::{FastZeroizable, ZeroizationProbe};
pub use zero::{
    is_slice_zeroized, is_vec_fully_zeroized, secure_zero, secure_zero_prefix, secure_zero_raw,
    secure_zero_signed, secure_zero_vec,
};
