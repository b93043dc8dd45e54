// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Memory protection seam and the default in-process protector.

use std::sync::OnceLock;

use log::debug;
use sha2::{Digest, Sha256};

use keyshroud_util::secure_zero;

use crate::error::ProtectorError;

/// Length in bytes of the per-buffer tweak mixed into the protection transform.
pub const TWEAK_LEN: usize = 16;

const PROCESS_KEY_LEN: usize = 32;
const KEYSTREAM_BLOCK_LEN: usize = 32;

/// Transforms buffer contents in place so they are not plaintext at rest.
///
/// `unprotect` must invert `protect` for the same tweak. Both calls see the whole
/// buffer; implementations must not retain references to it.
pub trait MemoryProtector: Send + Sync + core::fmt::Debug {
    /// Fills the per-buffer tweak. Defaults to the OS CSPRNG.
    fn fill_tweak(&self, tweak: &mut [u8; TWEAK_LEN]) -> Result<(), ProtectorError> {
        getrandom::fill(tweak).map_err(|_| ProtectorError::EntropyUnavailable)
    }

    /// Applies protection to `data` in place.
    fn protect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError>;

    /// Removes protection from `data` in place.
    fn unprotect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError>;
}

struct ProcessKey([u8; PROCESS_KEY_LEN]);

static PROCESS_KEY: OnceLock<ProcessKey> = OnceLock::new();

fn process_key() -> Result<&'static ProcessKey, ProtectorError> {
    if let Some(key) = PROCESS_KEY.get() {
        return Ok(key);
    }

    let mut candidate = [0u8; PROCESS_KEY_LEN];
    getrandom::fill(&mut candidate).map_err(|_| ProtectorError::EntropyUnavailable)?;

    // Losing a race keeps the winner's key; ours is discarded.
    let key = PROCESS_KEY.get_or_init(|| {
        debug!("generated process memory protection key");
        ProcessKey(candidate)
    });
    secure_zero(&mut candidate);

    Ok(key)
}

/// Same-process memory protector.
///
/// XORs the data with `SHA-256(process_key || tweak || counter_le)` blocks. The
/// 32-byte process key is drawn once from the OS CSPRNG and never leaves the process,
/// so protected bytes can only be recovered by this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemoryProtector;

impl ProcessMemoryProtector {
    fn apply_keystream(
        &self,
        tweak: &[u8; TWEAK_LEN],
        data: &mut [u8],
    ) -> Result<(), ProtectorError> {
        if data.is_empty() {
            return Ok(());
        }

        let key = process_key()?;

        for (counter, chunk) in data.chunks_mut(KEYSTREAM_BLOCK_LEN).enumerate() {
            let mut hasher = Sha256::new();
            hasher.update(&key.0);
            hasher.update(tweak);
            hasher.update((counter as u64).to_le_bytes());

            let mut block = hasher.finalize();
            for (byte, mask) in chunk.iter_mut().zip(block.iter()) {
                *byte ^= mask;
            }
            secure_zero(block.as_mut_slice());
        }

        Ok(())
    }
}

impl MemoryProtector for ProcessMemoryProtector {
    fn protect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError> {
        self.apply_keystream(tweak, data)
    }

    fn unprotect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError> {
        self.apply_keystream(tweak, data)
    }
}
