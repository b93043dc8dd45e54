// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Secret byte buffers with guaranteed zeroing, at-rest protection and
//! fixed-layout key-derivation parameter lists.
//!
//! # Crates
//!
//! - [`util`]: bounded copies and zeroing the optimizer cannot remove
//! - [`buffer`]: [`SecureBuffer`](buffer::SecureBuffer) and
//!   [`ProtectedBuffer`](buffer::ProtectedBuffer)
//! - [`kdf`]: parameter records in the layout a native KDF consumes
//!
//! # Quick Start
//!
//! ```rust
//! use keyshroud::buffer::{Buffer, ProtectedBuffer, to_owned_buffer};
//! use keyshroud::kdf::{KdfHashAlgorithm, Sp800108Params};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Owned copy of the first 16 bytes, zeroed on drop
//!     let key_material = [0x42u8; 32];
//!     let key = to_owned_buffer(&key_material, 16);
//!     assert_eq!(key.len(), 16);
//!
//!     // Protected at rest, plaintext only inside the closure
//!     let mut protected = ProtectedBuffer::new(key.as_slice())?;
//!     protected.open(&mut |plaintext: &[u8]| {
//!         assert_eq!(plaintext, &[0x42u8; 16]);
//!         Ok(())
//!     })?;
//!
//!     // Parameter list for an SP800-108 derivation
//!     let params = Sp800108Params::new(b"label", b"context", KdfHashAlgorithm::Sha256);
//!     let list = params.to_parameter_list()?;
//!     assert_eq!(list.desc().count(), 3);
//!
//!     Ok(())
//! }
//! ```

pub use keyshroud_buffer as buffer;
pub use keyshroud_kdf as kdf;
pub use keyshroud_util as util;
