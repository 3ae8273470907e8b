//! Fuzz target for decapsulation.
//!
//! Checks that Decaps recovers the sender's secret for honest ciphertexts,
//! and that corrupted ciphertexts yield a deterministic J(z || c) instead of
//! an error.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ringkem_ml_kem::kem::{ml_kem_decaps, ml_kem_encaps_internal, ml_kem_keygen_internal};

#[derive(Debug, Arbitrary)]
struct DecapsInput {
    r1: [u8; 32],
    r2: [u8; 32],
    z: [u8; 32],
    r: [u8; 32],
    corrupt_byte: u8,
    corrupt_index: usize,
    variant: u8,
}

fuzz_target!(|input: DecapsInput| {
    let d = [8, 10, 12][input.variant as usize % 3];

    let (ek, dk) = ml_kem_keygen_internal(&input.r1, &input.r2, &input.z, d).unwrap();
    let (mut ct, ss_sender) = ml_kem_encaps_internal(&ek, &input.r, d).unwrap();

    let ss_receiver = ml_kem_decaps(&dk, &ct, d).unwrap();
    assert_eq!(
        ss_sender, ss_receiver,
        "Valid decaps should recover shared secret"
    );

    // Low bit forced so the flip always changes the ciphertext
    let idx = input.corrupt_index % ct.len();
    ct[idx] ^= input.corrupt_byte | 1;
    let ss_bad = ml_kem_decaps(&dk, &ct, d).unwrap();
    let ss_bad2 = ml_kem_decaps(&dk, &ct, d).unwrap();
    assert_eq!(
        ss_bad, ss_bad2,
        "Implicit rejection should be deterministic"
    );
    assert_ne!(
        ss_bad, ss_sender,
        "Corrupted ciphertext should not decapsulate"
    );
});
