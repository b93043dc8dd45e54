// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::LengthError;
use crate::length::checked_len;

#[test]
fn test_checked_len_accepts_zero() {
    assert_eq!(checked_len(0), Ok(0));
}

#[test]
fn test_checked_len_accepts_positive_i32() {
    assert_eq!(checked_len(4096i32), Ok(4096));
}

#[test]
fn test_checked_len_rejects_negative() {
    assert_eq!(checked_len(-1), Err(LengthError::InvalidLength(-1)));
    assert_eq!(
        checked_len(i64::MIN),
        Err(LengthError::InvalidLength(i64::MIN))
    );
}

#[cfg(target_pointer_width = "32")]
#[test]
fn test_checked_len_rejects_overflow_on_32_bit() {
    let too_big = i64::from(u32::MAX) + 1;
    assert_eq!(checked_len(too_big), Err(LengthError::InvalidLength(too_big)));
}

#[test]
fn test_invalid_length_display() {
    let err = LengthError::InvalidLength(-7);
    assert_eq!(err.to_string(), "invalid length: -7");
}
