// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ProtectedBuffer - protected-at-rest secret buffer
//!
//! # Security Model
//!
//! Outside an access window the bytes are always in protected form.
//! Every path that would otherwise leave plaintext behind zeroes it instead:
//! 1. **Construction**: if `protect` fails (or panics), the freshly copied
//!    plaintext is zeroed before the error reaches the caller.
//! 2. **Access windows**: the buffer is re-protected under a fresh tweak when the
//!    closure returns, errors, or panics.
//! 3. **Protector failure on a live buffer**: if unprotect or re-protect fails or
//!    panics, the bytes and the tweak are zeroed and the buffer is marked disposed.

mod buffer;
mod enums;
mod guards;

pub use buffer::{ProtectedBuffer, to_protected_buffer, to_protected_buffer_signed};
pub use enums::ProtectionState;

#[cfg(test)]
pub(crate) use buffer::seal;
