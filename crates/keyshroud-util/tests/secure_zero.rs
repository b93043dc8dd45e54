// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod secure_zero_tests {
    use keyshroud_util::{
        LengthError, is_slice_zeroized, is_vec_fully_zeroized, secure_zero, secure_zero_prefix,
        secure_zero_signed, secure_zero_vec,
    };

    #[test]
    fn test_secure_zero_zeros_all_bytes() {
        let mut data = vec![0xABu8; 1024];
        secure_zero(&mut data);
        assert!(is_slice_zeroized(&data));
    }

    #[test]
    fn test_secure_zero_empty_slice() {
        let mut data: Vec<u8> = vec![];
        secure_zero(&mut data); // should not panic
        assert!(data.is_empty());
    }

    #[test]
    fn test_secure_zero_single_byte() {
        let mut data = vec![0xFFu8];
        secure_zero(&mut data);
        assert_eq!(data, vec![0]);
    }

    #[test]
    fn test_secure_zero_prefix_leaves_tail() {
        let mut data = [0x42u8; 6];
        secure_zero_prefix(&mut data, 4);
        assert_eq!(data, [0, 0, 0, 0, 0x42, 0x42]);
    }

    #[test]
    fn test_secure_zero_signed_negative_leaves_buffer() {
        let mut data = [0x42u8; 6];

        let result = secure_zero_signed(&mut data, -1);

        assert_eq!(result, Err(LengthError::InvalidLength(-1)));
        assert_eq!(data, [0x42; 6]);
    }

    #[test]
    fn test_secure_zero_signed_ok() {
        let mut data = [0x42u8; 6];

        secure_zero_signed(&mut data, 6).expect("Failed to secure_zero_signed(..)");

        assert!(is_slice_zeroized(&data));
    }

    #[test]
    fn test_secure_zero_vec_spare_capacity() {
        let mut vec = vec![1u8, 2, 3, 4, 5];
        vec.truncate(2);

        for byte in vec.iter_mut() {
            *byte = 0;
        }

        // Spare capacity still contains old data
        assert!(!is_vec_fully_zeroized(&vec));

        secure_zero_vec(&mut vec);
        assert!(is_vec_fully_zeroized(&vec));
    }

    #[test]
    fn test_zeroed_right_before_release() {
        let mut secret = vec![0x99u8; 48];
        secure_zero(&mut secret);

        assert!(is_vec_fully_zeroized(&secret));
        drop(secret);
    }
}
