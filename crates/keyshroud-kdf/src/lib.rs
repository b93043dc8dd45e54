// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Key-derivation parameter lists in the binary layout a native KDF consumes.
//!
//! A [`KdfParameterList`] is an ordered, non-owning sequence of
//! `(byte_length: u32, kind: u32, pointer)` records. It borrows the regions it
//! describes, so the borrow checker keeps every backing buffer alive (and unmoved)
//! for as long as the list, and therefore the native call, can see it.
//!
//! The KDF computation itself lives behind [`KdfPrimitive`]; [`derive_key`] and
//! [`derive_protected_key`] wrap it so the derived key only ever lands in a
//! [`SecureBuffer`](keyshroud_buffer::SecureBuffer).
//!
//! # Example
//!
//! ```rust
//! use keyshroud_kdf::{KdfBufferKind, build_descriptor_list};
//!
//! let label = b"purpose";
//! let context = b"tenant-42";
//!
//! let list = build_descriptor_list([
//!     (KdfBufferKind::Label, &label[..]),
//!     (KdfBufferKind::Context, &context[..]),
//! ])
//! .expect("Failed to build_descriptor_list(..)");
//!
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.as_slice()[0].kind(), KdfBufferKind::Label);
//! assert_eq!(list.as_slice()[1].byte_length(), 9);
//!
//! let desc = list.desc();
//! assert_eq!(desc.count(), 2);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod descriptor;
mod error;
mod kind;
mod primitive;
mod sp800_108;

pub use descriptor::{
    KDF_PARAMETER_LIST_VERSION, KdfParameter, KdfParameterList, KdfParameterListDesc,
    build_descriptor_list,
};
pub use error::KdfError;
pub use kind::KdfBufferKind;
pub use primitive::{KdfPrimitive, derive_key, derive_protected_key};
pub use sp800_108::{KdfHashAlgorithm, Sp800108Params};
