// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ProtectorError;
use crate::protector::{MemoryProtector, TWEAK_LEN};

/// Configurable behavior for [`MockMemoryProtector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMemoryProtectorBehaviour {
    /// Normal operation (reversible XOR transform).
    None,
    /// Always fail protect.
    FailProtect,
    /// Fail protect on the Nth call (1-indexed: 1 = first call fails).
    FailProtectAt(usize),
    /// Always fail unprotect.
    FailUnprotect,
    /// Always fail fill_tweak.
    FailTweak,
    /// Panic inside protect.
    PanicOnProtect,
    /// Panic inside protect on the Nth call (1-indexed).
    PanicOnProtectAt(usize),
    /// Panic inside unprotect.
    PanicOnUnprotect,
}

/// Mock memory protector for testing.
///
/// Applies `byte ^ MASK ^ tweak[i % TWEAK_LEN]`, so the at-rest bytes are predictable,
/// and allows simulating failures via [`MockMemoryProtectorBehaviour`].
#[derive(Debug)]
pub struct MockMemoryProtector {
    behaviour: MockMemoryProtectorBehaviour,
    protect_count: AtomicUsize,
    unprotect_count: AtomicUsize,
}

impl MockMemoryProtector {
    /// XOR mask applied on top of the tweak.
    pub const MASK: u8 = 0xA5;

    /// Tweak handed out by [`MemoryProtector::fill_tweak`].
    pub const TWEAK: [u8; TWEAK_LEN] = [0x3C; TWEAK_LEN];

    /// Creates a new mock protector with the specified behavior.
    pub fn new(behaviour: MockMemoryProtectorBehaviour) -> Self {
        Self {
            behaviour,
            protect_count: AtomicUsize::new(0),
            unprotect_count: AtomicUsize::new(0),
        }
    }

    /// Returns how many times protect was called.
    pub fn protect_count(&self) -> usize {
        self.protect_count.load(Ordering::SeqCst)
    }

    /// Returns how many times unprotect was called.
    pub fn unprotect_count(&self) -> usize {
        self.unprotect_count.load(Ordering::SeqCst)
    }

    /// Resets the call counters.
    pub fn reset_count(&self) {
        self.protect_count.store(0, Ordering::SeqCst);
        self.unprotect_count.store(0, Ordering::SeqCst);
    }

    /// Applies the mock transform to `data` (its own inverse).
    pub fn transform(tweak: &[u8; TWEAK_LEN], data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate() {
            *byte ^= Self::MASK ^ tweak[i % TWEAK_LEN];
        }
    }
}

impl MemoryProtector for MockMemoryProtector {
    fn fill_tweak(&self, tweak: &mut [u8; TWEAK_LEN]) -> Result<(), ProtectorError> {
        if self.behaviour == MockMemoryProtectorBehaviour::FailTweak {
            return Err(ProtectorError::EntropyUnavailable);
        }

        *tweak = Self::TWEAK;
        Ok(())
    }

    fn protect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError> {
        let current = self.protect_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            MockMemoryProtectorBehaviour::FailProtect => Err(ProtectorError::ProtectFailed),
            MockMemoryProtectorBehaviour::FailProtectAt(n) if current + 1 == n => {
                Err(ProtectorError::ProtectFailed)
            }
            MockMemoryProtectorBehaviour::PanicOnProtect => {
                panic!("MockMemoryProtector: forced panic in protect")
            }
            MockMemoryProtectorBehaviour::PanicOnProtectAt(n) if current + 1 == n => {
                panic!("MockMemoryProtector: forced panic in protect (call {n})")
            }
            _ => {
                Self::transform(tweak, data);
                Ok(())
            }
        }
    }

    fn unprotect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError> {
        self.unprotect_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            MockMemoryProtectorBehaviour::FailUnprotect => {
                return Err(ProtectorError::UnprotectFailed);
            }
            MockMemoryProtectorBehaviour::PanicOnUnprotect => {
                // Leave the bytes half-transformed, as an interrupted native call would.
                let half = data.len() / 2;
                Self::transform(tweak, &mut data[..half]);
                panic!("MockMemoryProtector: forced panic in unprotect")
            }
            _ => {}
        }

        Self::transform(tweak, data);
        Ok(())
    }
}
