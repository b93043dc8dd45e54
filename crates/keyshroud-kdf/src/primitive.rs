// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use log::{trace, warn};

use keyshroud_buffer::{MemoryProtector, ProtectedBuffer, SecureBuffer};
use keyshroud_util::FastZeroizable;

use crate::descriptor::{KdfParameterList, KdfParameterListDesc};
use crate::error::KdfError;

/// External key-derivation primitive.
///
/// This is the one boundary where descriptor pointers leave safe code: an
/// implementation typically forwards `params.as_ptr()` to a native call.
///
/// # Safety
///
/// Implementations must:
/// - read at most `byte_length` bytes through each record's pointer
/// - not retain `params`, `key` or `output` (or pointers into them) after returning
/// - write only inside `output`
pub unsafe trait KdfPrimitive {
    /// Derives `output.len()` bytes from `key` and `params` into `output`.
    fn derive(
        &self,
        key: &[u8],
        params: &KdfParameterListDesc<'_>,
        output: &mut [u8],
    ) -> Result<(), KdfError>;
}

/// Runs `primitive` and returns the derived key in a fresh [`SecureBuffer`].
///
/// The output is zeroed before an error is returned.
pub fn derive_key<P>(
    primitive: &P,
    key: &SecureBuffer,
    params: &KdfParameterList<'_>,
    output_len: usize,
) -> Result<SecureBuffer, KdfError>
where
    P: KdfPrimitive + ?Sized,
{
    let mut output = SecureBuffer::zeroed(output_len);
    let desc = params.desc();

    if let Err(e) = primitive.derive(key.as_slice(), &desc, output.as_mut_slice()) {
        output.fast_zeroize();
        warn!("key derivation failed; output zeroed");
        return Err(e);
    }

    trace!(
        "derived {} bytes from {} parameters",
        output_len,
        params.len()
    );

    Ok(output)
}

/// Like [`derive_key`], then protects the derived key at rest with `protector`.
pub fn derive_protected_key<P>(
    primitive: &P,
    key: &SecureBuffer,
    params: &KdfParameterList<'_>,
    output_len: usize,
    protector: Arc<dyn MemoryProtector>,
) -> Result<ProtectedBuffer, KdfError>
where
    P: KdfPrimitive + ?Sized,
{
    let derived = derive_key(primitive, key, params, output_len)?;

    Ok(ProtectedBuffer::from_secure_buffer(protector, derived)?)
}
