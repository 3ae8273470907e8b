//! RingKem10: d = 10 ciphertext compression.

use crate::params::ring_kem_10::*;

crate::types::define_ring_kem!(
    RingKem10,
    "Rank-1 ML-KEM with 10-bit ciphertext compression (640-byte ciphertexts)."
);
