// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Parameter lists for an SP800-108 counter-mode KDF.

use crate::descriptor::{KdfParameterList, build_descriptor_list};
use crate::error::KdfError;
use crate::kind::KdfBufferKind;

/// Widens NUL-terminated ASCII to UTF-16LE; `W` must be twice the input length.
const fn utf16le<const W: usize>(ascii: &[u8]) -> [u8; W] {
    assert!(ascii.len() * 2 == W);

    let mut wide = [0u8; W];
    let mut i = 0;
    while i < ascii.len() {
        wide[i * 2] = ascii[i];
        i += 1;
    }

    wide
}

const SHA1_NAME: [u8; 10] = utf16le(b"SHA1\0");
const SHA256_NAME: [u8; 14] = utf16le(b"SHA256\0");
const SHA384_NAME: [u8; 14] = utf16le(b"SHA384\0");
const SHA512_NAME: [u8; 14] = utf16le(b"SHA512\0");

/// Hash algorithm driving the PRF, passed by name.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KdfHashAlgorithm {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl KdfHashAlgorithm {
    /// Algorithm name as a NUL-terminated UTF-16LE string, the encoding the native
    /// KDF reads for a [`KdfBufferKind::HashAlgorithm`] parameter.
    ///
    /// `Sha256` is `"SHA256\0"` in UTF-16LE, 14 bytes.
    pub const fn name(self) -> &'static [u8] {
        match self {
            Self::Sha1 => &SHA1_NAME,
            Self::Sha256 => &SHA256_NAME,
            Self::Sha384 => &SHA384_NAME,
            Self::Sha512 => &SHA512_NAME,
        }
    }
}

/// Label, context and PRF hash for an SP800-108 derivation.
///
/// Borrows its inputs; the list it builds borrows them in turn.
#[derive(Debug, Clone, Copy)]
pub struct Sp800108Params<'a> {
    label: &'a [u8],
    context: &'a [u8],
    hash_algorithm: KdfHashAlgorithm,
}

impl<'a> Sp800108Params<'a> {
    /// Creates the parameter set.
    pub fn new(label: &'a [u8], context: &'a [u8], hash_algorithm: KdfHashAlgorithm) -> Self {
        Self {
            label,
            context,
            hash_algorithm,
        }
    }

    /// Builds the list in the order the counter-mode KDF consumes it:
    /// label, context, hash algorithm.
    pub fn to_parameter_list(&self) -> Result<KdfParameterList<'a>, KdfError> {
        build_descriptor_list([
            (KdfBufferKind::Label, self.label),
            (KdfBufferKind::Context, self.context),
            (KdfBufferKind::HashAlgorithm, self.hash_algorithm.name()),
        ])
    }
}
