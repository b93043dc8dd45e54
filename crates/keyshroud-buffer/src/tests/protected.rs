// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for ProtectedBuffer.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keyshroud_util::{FastZeroizable, LengthError, ZeroizationProbe};

use crate::error::{BufferError, ProtectorError};
use crate::protected::{
    ProtectedBuffer, ProtectionState, seal, to_protected_buffer, to_protected_buffer_signed,
};
use crate::protector::{MemoryProtector, TWEAK_LEN};
use crate::secure_buffer::SecureBuffer;
use crate::support::test_utils::{MockMemoryProtector, MockMemoryProtectorBehaviour};
use crate::traits::Buffer;

const PLAINTEXT: [u8; 40] = [0x5Cu8; 40];

fn mock(behaviour: MockMemoryProtectorBehaviour) -> Arc<MockMemoryProtector> {
    Arc::new(MockMemoryProtector::new(behaviour))
}

fn read_all(buffer: &mut ProtectedBuffer) -> Vec<u8> {
    let mut out = Vec::new();

    buffer
        .open(&mut |plaintext: &[u8]| {
            out = plaintext.to_vec();
            Ok(())
        })
        .expect("Failed to open(..)");

    out
}

// =============================================================================
// new() / to_protected_buffer()
// =============================================================================

#[test]
fn test_new_roundtrip_with_process_protector() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert_ne!(buffer.protected_bytes(), &PLAINTEXT[..]);

    assert_eq!(read_all(&mut buffer), PLAINTEXT.to_vec());

    assert!(buffer.is_protected());
    assert_ne!(buffer.protected_bytes(), &PLAINTEXT[..]);
}

#[test]
fn test_to_protected_buffer_copies_prefix() {
    let mut buffer = to_protected_buffer(&PLAINTEXT, 16).expect("Failed to to_protected_buffer(..)");

    assert_eq!(buffer.len(), 16);
    assert_eq!(read_all(&mut buffer), PLAINTEXT[..16].to_vec());
}

#[test]
fn test_to_protected_buffer_signed_negative_fails() {
    let result = to_protected_buffer_signed(&PLAINTEXT, -1);

    assert!(matches!(
        result,
        Err(BufferError::InvalidLength(LengthError::InvalidLength(-1)))
    ));
}

#[test]
fn test_from_raw_parts_null_with_zero_count() {
    let mut buffer = unsafe { ProtectedBuffer::from_raw_parts(core::ptr::null(), 0) }
        .expect("Failed to from_raw_parts(..)");

    assert!(buffer.is_empty());
    assert!(read_all(&mut buffer).is_empty());
}

#[test]
fn test_with_protector_at_rest_bytes_are_transformed() {
    let protector = mock(MockMemoryProtectorBehaviour::None);
    let buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let mut expected = PLAINTEXT;
    MockMemoryProtector::transform(&MockMemoryProtector::TWEAK, &mut expected);

    assert_eq!(buffer.protected_bytes(), &expected[..]);
    assert_eq!(protector.protect_count(), 1);
    assert_eq!(protector.unprotect_count(), 0);
}

#[test]
fn test_empty_source_skips_protector() {
    let protector = mock(MockMemoryProtectorBehaviour::FailProtect);
    let mut buffer =
        ProtectedBuffer::with_protector(protector.clone(), &[]).expect("Failed to with_protector(..)");

    assert_eq!(protector.protect_count(), 0);
    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert!(read_all(&mut buffer).is_empty());
}

// =============================================================================
// Protection failure at construction
// =============================================================================

#[test]
fn test_seal_failure_zeroizes_plaintext() {
    let protector = MockMemoryProtector::new(MockMemoryProtectorBehaviour::FailProtect);
    let mut inner = SecureBuffer::from_slice(&PLAINTEXT);
    assert!(!inner.is_zeroized());

    let result = seal(&protector, &MockMemoryProtector::TWEAK, &mut inner);

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(ProtectorError::ProtectFailed))
    ));
    assert!(inner.is_zeroized());
    assert_eq!(inner.len(), PLAINTEXT.len());
}

#[test]
fn test_seal_panic_zeroizes_plaintext() {
    let protector = MockMemoryProtector::new(MockMemoryProtectorBehaviour::PanicOnProtect);
    let mut inner = SecureBuffer::from_slice(&PLAINTEXT);

    let result = catch_unwind(AssertUnwindSafe(|| {
        seal(&protector, &MockMemoryProtector::TWEAK, &mut inner)
    }));

    assert!(result.is_err());
    assert!(inner.is_zeroized());
}

#[test]
fn test_seal_success_leaves_protected_bytes() {
    let protector = MockMemoryProtector::new(MockMemoryProtectorBehaviour::None);
    let mut inner = SecureBuffer::from_slice(&PLAINTEXT);

    seal(&protector, &MockMemoryProtector::TWEAK, &mut inner).expect("Failed to seal(..)");

    assert!(!inner.is_zeroized());
    assert_ne!(inner.as_slice(), &PLAINTEXT[..]);
}

#[test]
fn test_with_protector_failure_surfaces_protection_failure() {
    let protector = mock(MockMemoryProtectorBehaviour::FailProtect);

    let result = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT);

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(ProtectorError::ProtectFailed))
    ));
    assert_eq!(protector.protect_count(), 1);
}

#[test]
fn test_tweak_failure_surfaces_protection_failure() {
    let protector = mock(MockMemoryProtectorBehaviour::FailTweak);

    let result = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT);

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(
            ProtectorError::EntropyUnavailable
        ))
    ));
    assert_eq!(protector.protect_count(), 0);
}

// =============================================================================
// open() / open_mut()
// =============================================================================

#[test]
fn test_open_unprotects_then_reprotects() {
    let protector = mock(MockMemoryProtectorBehaviour::None);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");
    let at_rest = buffer.protected_bytes().to_vec();

    assert_eq!(read_all(&mut buffer), PLAINTEXT.to_vec());

    assert_eq!(protector.unprotect_count(), 1);
    assert_eq!(protector.protect_count(), 2);
    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert_eq!(buffer.protected_bytes(), &at_rest[..]);
}

#[test]
fn test_open_mut_persists_changes() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    buffer
        .open_mut(&mut |plaintext: &mut [u8]| {
            plaintext[0] = 0x01;
            Ok(())
        })
        .expect("Failed to open_mut(..)");

    let observed = read_all(&mut buffer);
    assert_eq!(observed[0], 0x01);
    assert_eq!(&observed[1..], &PLAINTEXT[1..]);
}

#[test]
fn test_open_callback_error_still_reprotects() {
    let protector = mock(MockMemoryProtectorBehaviour::None);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let result = buffer.open(&mut |_| Err(BufferError::callback_error("rejected")));

    assert!(matches!(result, Err(BufferError::CallbackError(_))));
    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert_eq!(protector.protect_count(), 2);
    assert_eq!(read_all(&mut buffer), PLAINTEXT.to_vec());
}

#[test]
fn test_open_panic_still_reprotects() {
    let protector = mock(MockMemoryProtectorBehaviour::None);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = buffer.open(&mut |_| panic!("callback panicked"));
    }));

    assert!(result.is_err());
    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert_eq!(read_all(&mut buffer), PLAINTEXT.to_vec());
}

#[test]
fn test_reprotect_failure_disposes_buffer() {
    // Call 1 (construction) succeeds, call 2 (re-protect after open) fails.
    let protector = mock(MockMemoryProtectorBehaviour::FailProtectAt(2));
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let result = buffer.open(&mut |_| Ok(()));

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(ProtectorError::ProtectFailed))
    ));
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(buffer.is_zeroized());

    let result = buffer.open(&mut |_| Ok(()));
    assert!(matches!(result, Err(BufferError::Disposed)));
}

#[test]
fn test_unprotect_failure_disposes_buffer() {
    let protector = mock(MockMemoryProtectorBehaviour::FailUnprotect);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let mut called = false;
    let result = buffer.open(&mut |_| {
        called = true;
        Ok(())
    });

    assert!(!called);
    assert!(matches!(
        result,
        Err(BufferError::UnprotectionFailure(
            ProtectorError::UnprotectFailed
        ))
    ));
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(buffer.is_zeroized());
}

#[test]
fn test_reprotect_error_wins_over_callback_error() {
    let protector = mock(MockMemoryProtectorBehaviour::FailProtectAt(2));
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let result = buffer.open(&mut |_| Err(BufferError::callback_error("rejected")));

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(ProtectorError::ProtectFailed))
    ));
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(buffer.is_zeroized());
}

#[test]
fn test_reprotect_panic_disposes_buffer() {
    // Call 1 (construction) succeeds, call 2 (re-protect after open) panics.
    let protector = mock(MockMemoryProtectorBehaviour::PanicOnProtectAt(2));
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &[0x5Cu8; 16])
        .expect("Failed to with_protector(..)");

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = buffer.open(&mut |_| Ok(()));
    }));

    assert!(result.is_err());
    assert_eq!(protector.protect_count(), 2);
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert_ne!(buffer.protected_bytes(), &[0x5Cu8; 16][..]);
    assert!(buffer.is_zeroized());
    assert!(matches!(
        buffer.open(&mut |_| Ok(())),
        Err(BufferError::Disposed)
    ));
}

#[test]
fn test_unprotect_panic_disposes_buffer() {
    let protector = mock(MockMemoryProtectorBehaviour::PanicOnUnprotect);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let mut called = false;
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = buffer.open(&mut |_| {
            called = true;
            Ok(())
        });
    }));

    assert!(result.is_err());
    assert!(!called);
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(buffer.is_zeroized());
}

#[test]
fn test_reprotect_draws_fresh_tweak() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");
    let before = buffer.protected_bytes().to_vec();

    buffer
        .open(&mut |_| Ok(()))
        .expect("Failed to open(..)");

    assert_ne!(buffer.protected_bytes(), &before[..]);
    assert_eq!(read_all(&mut buffer), PLAINTEXT.to_vec());
}

#[test]
fn test_reprotect_tweak_failure_disposes_buffer() {
    #[derive(Debug)]
    struct TweakOnce {
        inner: MockMemoryProtector,
        drawn: AtomicUsize,
    }

    impl MemoryProtector for TweakOnce {
        fn fill_tweak(&self, tweak: &mut [u8; TWEAK_LEN]) -> Result<(), ProtectorError> {
            if self.drawn.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(ProtectorError::EntropyUnavailable);
            }
            self.inner.fill_tweak(tweak)
        }

        fn protect(&self, tweak: &[u8; TWEAK_LEN], data: &mut [u8]) -> Result<(), ProtectorError> {
            self.inner.protect(tweak, data)
        }

        fn unprotect(
            &self,
            tweak: &[u8; TWEAK_LEN],
            data: &mut [u8],
        ) -> Result<(), ProtectorError> {
            self.inner.unprotect(tweak, data)
        }
    }

    let protector = Arc::new(TweakOnce {
        inner: MockMemoryProtector::new(MockMemoryProtectorBehaviour::None),
        drawn: AtomicUsize::new(0),
    });
    let mut buffer = ProtectedBuffer::with_protector(protector, &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let result = buffer.open(&mut |_| Ok(()));

    assert!(matches!(
        result,
        Err(BufferError::ProtectionFailure(
            ProtectorError::EntropyUnavailable
        ))
    ));
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(buffer.is_zeroized());
}

// =============================================================================
// open_with() / open_mut_with()
// =============================================================================

#[derive(Debug)]
enum AppError {
    Rejected,
    Buffer(BufferError),
}

impl From<BufferError> for AppError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

#[test]
fn test_open_with_returns_closure_value() {
    let protector = mock(MockMemoryProtectorBehaviour::None);
    let mut buffer = ProtectedBuffer::with_protector(protector.clone(), &PLAINTEXT)
        .expect("Failed to with_protector(..)");

    let sum = buffer
        .open_with(|plaintext| {
            Ok::<_, BufferError>(plaintext.iter().map(|b| *b as u32).sum::<u32>())
        })
        .expect("Failed to open_with(..)");

    assert_eq!(sum, 0x5C * PLAINTEXT.len() as u32);
    assert_eq!(buffer.state(), ProtectionState::Protected);
    assert_eq!(protector.protect_count(), 2);
}

#[test]
fn test_open_with_propagates_caller_error() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    let result: Result<(), AppError> = buffer.open_with(|_| Err(AppError::Rejected));

    assert!(matches!(result, Err(AppError::Rejected)));
    assert!(buffer.is_protected());
}

#[test]
fn test_open_with_converts_buffer_error() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");
    buffer.fast_zeroize();

    let result: Result<(), AppError> = buffer.open_with(|_| Ok(()));

    assert!(matches!(result, Err(AppError::Buffer(BufferError::Disposed))));
}

#[test]
fn test_open_mut_with_persists_changes() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    let previous = buffer
        .open_mut_with(|plaintext| {
            let previous = plaintext[3];
            plaintext[3] = 0xEE;
            Ok::<_, BufferError>(previous)
        })
        .expect("Failed to open_mut_with(..)");

    assert_eq!(previous, 0x5C);
    assert_eq!(read_all(&mut buffer)[3], 0xEE);
}

#[test]
fn test_open_with_empty_buffer() {
    let mut buffer = ProtectedBuffer::new(&[]).expect("Failed to new(..)");

    let len = buffer
        .open_with(|plaintext| Ok::<_, BufferError>(plaintext.len()))
        .expect("Failed to open_with(..)");

    assert_eq!(len, 0);
}

// =============================================================================
// to_secure_buffer() / fast_zeroize() / Debug
// =============================================================================

#[test]
fn test_to_secure_buffer_returns_plaintext() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    let plain = buffer.to_secure_buffer().expect("Failed to to_secure_buffer()");

    assert_eq!(plain.as_slice(), &PLAINTEXT[..]);
    assert!(buffer.is_protected());
}

#[test]
fn test_fast_zeroize_disposes() {
    let mut buffer = ProtectedBuffer::new(&PLAINTEXT).expect("Failed to new(..)");

    buffer.fast_zeroize();

    assert!(buffer.is_zeroized());
    assert_eq!(buffer.state(), ProtectionState::Disposed);
    assert!(matches!(
        buffer.to_secure_buffer(),
        Err(BufferError::Disposed)
    ));
}

#[test]
fn test_debug_is_redacted() {
    let buffer = ProtectedBuffer::new(&[0x42u8; 4]).expect("Failed to new(..)");
    let debug = format!("{:?}", buffer);

    assert!(debug.contains("ProtectedBuffer"));
    assert!(debug.contains("Protected"));
    assert!(!debug.contains("66"));
}
