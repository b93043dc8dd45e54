// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::KdfError;

/// Type tag of a KDF parameter, laid out as a `u32`.
///
/// Discriminants follow the native key-derivation buffer type numbering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum KdfBufferKind {
    /// Hash algorithm name.
    HashAlgorithm = 0,
    /// Bytes prepended to the secret.
    SecretPrepend = 1,
    /// Bytes appended to the secret.
    SecretAppend = 2,
    /// HMAC key.
    HmacKey = 3,
    /// TLS PRF label.
    TlsPrfLabel = 4,
    /// TLS PRF seed.
    TlsPrfSeed = 5,
    /// Secret handle.
    SecretHandle = 6,
    /// TLS PRF protocol version.
    TlsPrfProtocol = 7,
    /// Algorithm identifier.
    AlgorithmId = 8,
    /// Party U info.
    PartyUInfo = 9,
    /// Party V info.
    PartyVInfo = 10,
    /// Supplemental public info.
    SuppPubInfo = 11,
    /// Supplemental private info.
    SuppPrivInfo = 12,
    /// SP800-108 label.
    Label = 13,
    /// SP800-108 context.
    Context = 14,
    /// Salt.
    Salt = 15,
    /// Iteration count.
    IterationCount = 16,
}

impl KdfBufferKind {
    /// Returns the raw tag.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<KdfBufferKind> for u32 {
    fn from(kind: KdfBufferKind) -> Self {
        kind.as_u32()
    }
}

impl TryFrom<u32> for KdfBufferKind {
    type Error = KdfError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        let kind = match tag {
            0 => Self::HashAlgorithm,
            1 => Self::SecretPrepend,
            2 => Self::SecretAppend,
            3 => Self::HmacKey,
            4 => Self::TlsPrfLabel,
            5 => Self::TlsPrfSeed,
            6 => Self::SecretHandle,
            7 => Self::TlsPrfProtocol,
            8 => Self::AlgorithmId,
            9 => Self::PartyUInfo,
            10 => Self::PartyVInfo,
            11 => Self::SuppPubInfo,
            12 => Self::SuppPrivInfo,
            13 => Self::Label,
            14 => Self::Context,
            15 => Self::Salt,
            16 => Self::IterationCount,
            other => return Err(KdfError::UnknownKind(other)),
        };

        Ok(kind)
    }
}
