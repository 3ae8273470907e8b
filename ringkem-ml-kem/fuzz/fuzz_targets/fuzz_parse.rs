//! Fuzz target for key and ciphertext parsing.
//!
//! Arbitrary bytes must either be rejected with an error or decode to a key
//! that re-encodes to the same bytes. Decapsulating arbitrary ciphertexts
//! with a parsed key must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use ringkem_ml_kem::kem::{ml_kem_decaps, DecapsulationKey, EncapsulationKey};
use ringkem_ml_kem::params::common::DECAPSULATION_KEY_SIZE;

fuzz_target!(|data: &[u8]| {
    if let Ok(ek) = EncapsulationKey::from_bytes(data) {
        assert_eq!(&ek.to_bytes()[..], data);
    }

    if data.len() < DECAPSULATION_KEY_SIZE {
        return;
    }
    let (dk_bytes, ct) = data.split_at(DECAPSULATION_KEY_SIZE);
    if let Ok(dk) = DecapsulationKey::from_bytes(dk_bytes) {
        assert_eq!(&dk.to_bytes()[..], dk_bytes);
        for d in [8, 10, 12] {
            // Length mismatches are errors; everything else yields a secret.
            let _ = ml_kem_decaps(&dk, ct, d);
        }
    }
});
