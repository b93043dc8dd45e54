// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::LengthError;

/// Converts a signed byte count into a `usize`.
///
/// Negative values, and values that exceed `usize::MAX` on narrow targets, fail with
/// [`LengthError::InvalidLength`]. The conversion never truncates.
///
/// # Example
///
/// ```rust
/// use keyshroud_util::{checked_len, LengthError};
///
/// assert_eq!(checked_len(32), Ok(32));
/// assert_eq!(checked_len(-4), Err(LengthError::InvalidLength(-4)));
/// ```
#[inline]
pub fn checked_len(byte_count: impl Into<i64>) -> Result<usize, LengthError> {
    let byte_count = byte_count.into();
    usize::try_from(byte_count).map_err(|_| LengthError::InvalidLength(byte_count))
}
