// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Secret byte buffers with zeroization on every exit path.
//!
//! # Buffer Types
//!
//! ## SecureBuffer
//!
//! Owned, fixed-length plaintext region:
//! - Built by copying from a caller-supplied region
//! - Zeroed (non-elidable) before its memory is released
//! - Zero-length buffers never allocate
//!
//! ## ProtectedBuffer
//!
//! A [`SecureBuffer`] whose bytes are transformed by a [`MemoryProtector`] right after
//! they are copied in:
//! - Plaintext exists only inside [`Buffer::open`] / [`Buffer::open_mut`] windows
//! - The window re-protects on every exit path, including errors and panics
//! - If protection cannot be applied, the plaintext is zeroed before the error is returned
//!
//! The default protector is [`ProcessMemoryProtector`], which keys a SHA-256 keystream
//! with a random per-process key. Protected bytes are meaningless outside this process.
//!
//! # Example
//!
//! ```rust
//! use keyshroud_buffer::{Buffer, BufferError, ProtectedBuffer, ProtectionState};
//!
//! fn example() -> Result<(), BufferError> {
//!     let secret = [0x42u8; 32];
//!     let mut buffer = ProtectedBuffer::new(&secret)?;
//!
//!     assert_eq!(buffer.state(), ProtectionState::Protected);
//!     assert_ne!(buffer.protected_bytes(), &secret[..]);
//!
//!     buffer.open(&mut |plaintext: &[u8]| {
//!         assert_eq!(plaintext, &secret[..]);
//!         Ok(())
//!     })?;
//!
//!     assert_eq!(buffer.state(), ProtectionState::Protected);
//!
//!     // Ciphertext is zeroized on drop
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod protected;
mod protector;
mod secure_buffer;
mod support;
mod traits;

pub use error::{BufferError, ProtectorError};
pub use protected::{
    ProtectedBuffer, ProtectionState, to_protected_buffer, to_protected_buffer_signed,
};
pub use protector::{MemoryProtector, ProcessMemoryProtector, TWEAK_LEN};
pub use secure_buffer::{SecureBuffer, to_owned_buffer, to_owned_buffer_signed};
pub use traits::Buffer;

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
