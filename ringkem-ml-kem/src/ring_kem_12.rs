//! RingKem12: d = 12, ciphertext coefficients are sent uncompressed.

use crate::params::ring_kem_12::*;

crate::types::define_ring_kem!(
    RingKem12,
    "Rank-1 ML-KEM with uncompressed 12-bit ciphertexts (768 bytes)."
);
