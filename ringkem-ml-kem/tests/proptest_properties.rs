//! Property-based tests for rank-1 ML-KEM using proptest.
//!
//! These tests cover the ring arithmetic and encoding layers as well as the
//! KEM itself:
//! - NTT: inverse round trip and agreement with schoolbook multiplication
//! - Compression: bounded round-trip error for every width
//! - Encoding: ByteEncode/ByteDecode round trip and message threshold
//! - KEM: roundtrip, determinism, implicit rejection of tampered ciphertexts

use proptest::prelude::*;
use ringkem_ml_kem::encode::{
    byte_decode, byte_encode, compress, decode_message, decompress, encode_message,
};
use ringkem_ml_kem::params::common::{N, Q};
use ringkem_ml_kem::sample::sample_ntt;
use ringkem_ml_kem::Poly;

/// Generate arbitrary 32-byte seeds for testing
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate a polynomial with canonical coefficients
fn arb_poly() -> impl Strategy<Value = Poly> {
    prop::collection::vec(0..Q, N).prop_map(|c| Poly::from_coeffs(&c).unwrap())
}

/// Negacyclic product mod (x^256 + 1, q).
fn schoolbook(a: &Poly, b: &Poly) -> Vec<u16> {
    let q = Q as u64;
    let mut acc = vec![0u64; N];
    for (i, &x) in a.coeffs().iter().enumerate() {
        for (j, &y) in b.coeffs().iter().enumerate() {
            let p = x as u64 * y as u64 % q;
            let k = i + j;
            if k < N {
                acc[k] = (acc[k] + p) % q;
            } else {
                acc[k - N] = (acc[k - N] + q - p) % q;
            }
        }
    }
    acc.into_iter().map(|c| c as u16).collect()
}

fn circular_distance(a: u16, b: u16) -> u16 {
    let diff = a.abs_diff(b);
    diff.min(Q - diff)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// NTT followed by inverse NTT is the identity.
    #[test]
    fn ntt_roundtrip(f in arb_poly()) {
        prop_assert_eq!(f.ntt().ntt_inverse(), f);
    }

    /// Pointwise multiplication in the NTT domain is negacyclic convolution.
    #[test]
    fn ntt_product_matches_schoolbook(a in arb_poly(), b in arb_poly()) {
        let product = a.ntt().multiply(&b.ntt()).ntt_inverse();
        prop_assert_eq!(product.coeffs().to_vec(), schoolbook(&a, &b));
    }

    /// Decompress(Compress(x)) stays within q/2^d + 1 of x, modulo q.
    #[test]
    fn compression_error_is_bounded(x in 0..Q, d in 1usize..=11) {
        let y = compress(x, d).unwrap();
        prop_assert!(y < (1 << d));
        let back = decompress(y, d).unwrap();
        prop_assert!(circular_distance(back, x) <= (Q >> d) + 1);
    }

    /// ByteDecode inverts ByteEncode for in-range coefficients.
    #[test]
    fn byte_encode_roundtrip(
        d in 1usize..=12,
        raw in prop::collection::vec(any::<u16>(), N),
    ) {
        let modulus = if d == 12 { Q } else { 1 << d };
        let coeffs: Vec<u16> = raw.iter().map(|&c| c % modulus).collect();
        let bytes = byte_encode(&coeffs, d).unwrap();
        prop_assert_eq!(bytes.len(), 32 * d);
        prop_assert_eq!(byte_decode(&bytes, d).unwrap().to_vec(), coeffs);
    }

    /// Message bits survive per-coefficient noise in [-832, 831].
    #[test]
    fn message_survives_small_noise(
        m in arb_seed(),
        noise in prop::collection::vec(-832i32..832, N),
    ) {
        let encoded = encode_message(&m);
        let noisy: Vec<u16> = encoded
            .coeffs()
            .iter()
            .zip(&noise)
            .map(|(&c, &e)| (c as i32 + e).rem_euclid(Q as i32) as u16)
            .collect();
        let w = Poly::from_coeffs(&noisy).unwrap();
        prop_assert_eq!(decode_message(&w), m);
    }

    /// SampleNTT output is always canonical.
    #[test]
    fn sample_ntt_in_range(rho in arb_seed(), i in any::<u8>(), j in any::<u8>()) {
        let mut seed = [0u8; 34];
        seed[..32].copy_from_slice(&rho);
        seed[32] = i;
        seed[33] = j;
        let a = sample_ntt(&seed).unwrap();
        prop_assert!(a.coeffs().iter().all(|&c| c < Q));
    }
}

macro_rules! ring_kem_proptest {
    ($mod_name:ident, $variant:ident, $feature:literal, $cases:expr) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use rand::rngs::StdRng;
            use rand::SeedableRng;
            use ringkem_ml_kem::Kem;
            use ringkem_ml_kem::$variant;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                /// Basic properties: roundtrip encaps/decaps, key sizes, ciphertext size.
                #[test]
                fn basic_properties(seed in arb_seed(), enc_rand in arb_seed()) {
                    let mut keygen_rng = StdRng::from_seed(seed);
                    let (dk, ek) = $variant::keygen(&mut keygen_rng).unwrap();

                    prop_assert_eq!(dk.as_bytes().len(), $variant::DECAPSULATION_KEY_SIZE);
                    prop_assert_eq!(ek.as_bytes().len(), $variant::ENCAPSULATION_KEY_SIZE);

                    let mut encaps_rng = StdRng::from_seed(enc_rand);
                    let (ct, ss_sender) = $variant::encaps(&ek, &mut encaps_rng).unwrap();

                    prop_assert_eq!(ct.as_bytes().len(), $variant::CIPHERTEXT_SIZE);

                    let ss_receiver = $variant::decaps(&dk, &ct).unwrap();
                    prop_assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
                }

                /// Determinism: same seed produces same keys.
                #[test]
                fn determinism(seed in arb_seed()) {
                    let (dk1, ek1) = $variant::keygen_from_seed(&seed).unwrap();
                    let (dk2, ek2) = $variant::keygen_from_seed(&seed).unwrap();

                    prop_assert_eq!(dk1.as_bytes(), dk2.as_bytes());
                    prop_assert_eq!(ek1.as_bytes(), ek2.as_bytes());
                }

                /// Flipping any ciphertext bit changes the decapsulated secret.
                #[test]
                fn tampered_ciphertext_rejected(
                    seed in arb_seed(),
                    enc_rand in arb_seed(),
                    bit in 0usize..(8 * $variant::CIPHERTEXT_SIZE),
                ) {
                    let (dk, ek) = $variant::keygen_from_seed(&seed).unwrap();
                    let mut rng = StdRng::from_seed(enc_rand);
                    let (ct, ss_sender) = $variant::encaps(&ek, &mut rng).unwrap();

                    let mut bytes = ct.as_bytes().to_vec();
                    bytes[bit / 8] ^= 1 << (bit % 8);
                    let tampered = <$variant as Kem>::Ciphertext::from_bytes(&bytes).unwrap();

                    let ss_rejected = $variant::decaps(&dk, &tampered).unwrap();
                    prop_assert_ne!(ss_sender.as_ref(), ss_rejected.as_ref());
                }
            }
        }
    };
}

ring_kem_proptest!(ring_kem_8_props, RingKem8, "ring-kem-8", 16);
ring_kem_proptest!(ring_kem_10_props, RingKem10, "ring-kem-10", 32);
ring_kem_proptest!(ring_kem_12_props, RingKem12, "ring-kem-12", 16);
