//! K-PKE: rank-1 IND-CPA public-key encryption (FIPS 203 Algorithms 13-15).
//!
//! The module is a single ring element, so the public matrix A, the secret,
//! and the ciphertext halves are each one polynomial. The compression width
//! `d` and noise parameters are runtime values validated at every entry.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::fmt;

use crate::encode::{decode_message, encode_message, pack, unpack};
use crate::hash::{prf_into, Xof};
use crate::params::common::{
    ciphertext_size, is_valid_d, is_valid_eta, MESSAGE_SIZE, N, PKE_PUBLIC_KEY_SIZE,
    PKE_SECRET_KEY_SIZE, POLY_BYTES, SEED_SIZE,
};
use crate::poly::{NttPoly, Poly};
use crate::reduce::csubq;
use crate::sample::{cbd, sample_ntt_from_xof};
use rand_core::CryptoRng;
use ringkem_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// K-PKE public key: the public element A and t_hat = A * s1_hat + s2_hat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkePublicKey {
    a: NttPoly,
    t_hat: NttPoly,
}

impl PkePublicKey {
    /// The public element A (NTT domain).
    pub fn a(&self) -> &NttPoly {
        &self.a
    }

    /// The public element t_hat (NTT domain).
    pub fn t_hat(&self) -> &NttPoly {
        &self.t_hat
    }

    /// Canonical encoding: ByteEncode_12(A) || ByteEncode_12(t_hat).
    pub fn to_bytes(&self) -> [u8; PKE_PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PKE_PUBLIC_KEY_SIZE];
        out[..POLY_BYTES].copy_from_slice(&self.a.to_bytes());
        out[POLY_BYTES..].copy_from_slice(&self.t_hat.to_bytes());
        out
    }

    /// Parse the canonical encoding.
    ///
    /// # Errors
    /// - [`Error::InvalidKeyLength`] if `bytes` is not 768 bytes.
    /// - [`Error::EncodingError`] if a coefficient is `>= q`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PKE_PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: PKE_PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let (a, t_hat) = bytes.split_at(POLY_BYTES);
        Ok(Self {
            a: NttPoly::from_bytes(a)?,
            t_hat: NttPoly::from_bytes(t_hat)?,
        })
    }
}

/// K-PKE secret key.
///
/// Only `s1` is needed to decrypt; `s2` and the encoded t_hat are kept so the
/// key carries its full generation transcript.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PkeSecretKey {
    encoded_t: [u8; POLY_BYTES],
    s1: Poly,
    s2: Poly,
}

impl fmt::Debug for PkeSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkeSecretKey").finish_non_exhaustive()
    }
}

impl PkeSecretKey {
    /// The secret element s1 (normal domain).
    pub fn s1(&self) -> &Poly {
        &self.s1
    }

    /// The error element s2 (normal domain).
    pub fn s2(&self) -> &Poly {
        &self.s2
    }

    /// ByteEncode_12(t_hat).
    pub fn encoded_t(&self) -> &[u8; POLY_BYTES] {
        &self.encoded_t
    }

    /// Canonical encoding: ByteEncode_12(s1) || ByteEncode_12(s2) || encodedT.
    pub fn to_bytes(&self) -> [u8; PKE_SECRET_KEY_SIZE] {
        let mut out = [0u8; PKE_SECRET_KEY_SIZE];
        out[..POLY_BYTES].copy_from_slice(&self.s1.to_bytes());
        out[POLY_BYTES..2 * POLY_BYTES].copy_from_slice(&self.s2.to_bytes());
        out[2 * POLY_BYTES..].copy_from_slice(&self.encoded_t);
        out
    }

    /// Parse the canonical encoding.
    ///
    /// # Errors
    /// - [`Error::InvalidKeyLength`] if `bytes` is not 1152 bytes.
    /// - [`Error::EncodingError`] if a coefficient is `>= q`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PKE_SECRET_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: PKE_SECRET_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let (s1, rest) = bytes.split_at(POLY_BYTES);
        let (s2, encoded_t) = rest.split_at(POLY_BYTES);

        // encodedT must itself be a valid element
        NttPoly::from_bytes(encoded_t)?;

        let mut key = Self {
            encoded_t: [0u8; POLY_BYTES],
            s1: Poly::from_bytes(s1)?,
            s2: Poly::from_bytes(s2)?,
        };
        key.encoded_t.copy_from_slice(encoded_t);
        Ok(key)
    }
}

pub(crate) fn check_d(d: usize) -> Result<()> {
    if is_valid_d(d) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "d",
            value: d,
        })
    }
}

fn check_eta(name: &'static str, eta: usize) -> Result<()> {
    if is_valid_eta(eta) {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value: eta })
    }
}

pub(crate) fn seed32<'a>(name: &'static str, bytes: &'a [u8]) -> Result<&'a [u8; SEED_SIZE]> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        name,
        expected: SEED_SIZE,
        actual: bytes.len(),
    })
}

/// CBD_eta(PRF_eta(seed, label)).
fn sample_noise(eta: usize, seed: &[u8; SEED_SIZE], label: u8) -> Poly {
    let mut buf = [0u8; 64 * 3];
    let buf = &mut buf[..64 * eta];
    prf_into(seed, label, buf);
    let poly = cbd(eta, buf);
    buf.zeroize();
    poly
}

/// A = SampleNTT(r2 || 0x00 || 0x00).
fn sample_a(r2: &[u8; SEED_SIZE]) -> NttPoly {
    let mut seed = [0u8; SEED_SIZE + 2];
    seed[..SEED_SIZE].copy_from_slice(r2);
    sample_ntt_from_xof(&mut Xof::for_seed(&seed))
}

/// Compress each coefficient to d bits and pack; d = 12 stores coefficients as-is.
fn compress_encode(p: &Poly, d: usize, out: &mut [u8]) -> Result<()> {
    if d == 12 {
        pack(p.coeffs(), 12, out);
    } else {
        pack(&p.compress(d)?, d, out);
    }
    Ok(())
}

/// Inverse of [`compress_encode`]; 12-bit fields are reduced mod q.
fn decode_decompress(bytes: &[u8], d: usize) -> Result<Poly> {
    let raw: [u16; N] = unpack(bytes, d);
    if d == 12 {
        Ok(Poly::from_reduced(raw.map(csubq)))
    } else {
        Poly::decompress(&raw, d)
    }
}

/// K-PKE Key Generation with fresh randomness.
///
/// Draws 32-byte seeds r1 (secret) and r2 (public) from `rng` and
/// calls [`k_pke_keygen_from_seeds`].
pub fn k_pke_keygen(
    rng: &mut impl CryptoRng,
    d: usize,
    eta1: usize,
    eta2: usize,
) -> Result<(PkePublicKey, PkeSecretKey)> {
    let mut r1 = [0u8; SEED_SIZE];
    let mut r2 = [0u8; SEED_SIZE];
    rng.fill_bytes(&mut r1);
    rng.fill_bytes(&mut r2);

    let keys = k_pke_keygen_from_seeds(&r1, &r2, d, eta1, eta2);
    r1.zeroize();
    keys
}

/// K-PKE Key Generation (FIPS 203 Algorithm 13, rank 1).
///
/// # Arguments
/// * `r1` - 32-byte secret seed for s1 and s2
/// * `r2` - 32-byte public seed for A
/// * `d` - Ciphertext compression width (8, 10, or 12)
/// * `eta1` - Noise parameter for s1 (2 or 3)
/// * `eta2` - Noise parameter for s2 (2 or 3)
///
/// # Algorithm
/// 1. s1 = CBD_eta1(PRF(r1, 0)), s2 = CBD_eta2(PRF(r1, 1))
/// 2. A = SampleNTT(r2 || 0 || 0)
/// 3. t_hat = A * NTT(s1) + NTT(s2)
/// 4. pk = (A, t_hat), sk = (ByteEncode_12(t_hat), s1, s2)
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`, `eta1`, or `eta2`.
/// - [`Error::InvalidLength`] if a seed is not 32 bytes.
pub fn k_pke_keygen_from_seeds(
    r1: &[u8],
    r2: &[u8],
    d: usize,
    eta1: usize,
    eta2: usize,
) -> Result<(PkePublicKey, PkeSecretKey)> {
    check_d(d)?;
    check_eta("eta1", eta1)?;
    check_eta("eta2", eta2)?;
    let r1 = seed32("r1", r1)?;
    let r2 = seed32("r2", r2)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(d, eta1, eta2, "k-pke keygen");

    // 1. Secret and error elements
    let s1 = sample_noise(eta1, r1, 0x00);
    let s2 = sample_noise(eta2, r1, 0x01);

    // 2. Public element
    let a = sample_a(r2);

    // 3. t_hat = A * s1_hat + s2_hat
    let mut t_hat = a.multiply(&s1.ntt());
    t_hat += &s2.ntt();

    // 4. Assemble keys
    let sk = PkeSecretKey {
        encoded_t: t_hat.to_bytes(),
        s1,
        s2,
    };
    let pk = PkePublicKey { a, t_hat };

    Ok((pk, sk))
}

/// K-PKE Encryption (FIPS 203 Algorithm 14, rank 1).
///
/// # Arguments
/// * `pk` - Public key
/// * `m` - 32-byte message
/// * `r` - 32-byte encryption randomness
/// * `d` - Ciphertext compression width (8, 10, or 12)
/// * `eta` - Noise parameter for y, e1, e2 (2 or 3)
///
/// # Returns
/// Ciphertext c1 || c2, each 32*d bytes.
///
/// # Algorithm
/// 1. y, e1, e2 = CBD_eta(PRF(r, 0)), CBD_eta(PRF(r, 1)), CBD_eta(PRF(r, 2))
/// 2. u_hat = A * NTT(y) + NTT(e1)
/// 3. v_hat = t_hat * NTT(y) + NTT(e2) + NTT(Encode(m))
/// 4. c1 = ByteEncode_d(Compress_d(NTT^-1(u_hat)))
/// 5. c2 = ByteEncode_d(Compress_d(NTT^-1(v_hat)))
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d` or `eta`.
/// - [`Error::InvalidLength`] if `m` or `r` is not 32 bytes.
pub fn k_pke_encrypt(
    pk: &PkePublicKey,
    m: &[u8],
    r: &[u8],
    d: usize,
    eta: usize,
) -> Result<Vec<u8>> {
    check_d(d)?;
    check_eta("eta", eta)?;
    let m: &[u8; MESSAGE_SIZE] = seed32("message", m)?;
    let r = seed32("randomness", r)?;

    #[cfg(feature = "tracing")]
    tracing::trace!(d, eta, "k-pke encrypt");

    // 1. Ephemeral secret and errors
    let mut y = sample_noise(eta, r, 0x00);
    let mut e1 = sample_noise(eta, r, 0x01);
    let mut e2 = sample_noise(eta, r, 0x02);
    let mut y_hat = y.ntt();
    let mut e1_hat = e1.ntt();
    let mut e2_hat = e2.ntt();
    let mut mu_hat = encode_message(m).ntt();

    // 2. u_hat = A * y_hat + e1_hat
    let mut u_hat = pk.a.multiply(&y_hat);
    u_hat += &e1_hat;

    // 3. v_hat = t_hat * y_hat + e2_hat + mu_hat
    let mut v_hat = pk.t_hat.multiply(&y_hat);
    v_hat += &e2_hat;
    v_hat += &mu_hat;

    y.zeroize();
    e1.zeroize();
    e2.zeroize();
    y_hat.zeroize();
    e1_hat.zeroize();
    e2_hat.zeroize();
    mu_hat.zeroize();

    // 4-5. Compress in the normal domain
    let mut c = vec![0u8; ciphertext_size(d)];
    let (c1, c2) = c.split_at_mut(32 * d);
    compress_encode(&u_hat.ntt_inverse(), d, c1)?;
    compress_encode(&v_hat.ntt_inverse(), d, c2)?;

    Ok(c)
}

/// K-PKE Decryption (FIPS 203 Algorithm 15, rank 1).
///
/// # Algorithm
/// 1. u = Decompress_d(ByteDecode_d(c1)), v = Decompress_d(ByteDecode_d(c2))
/// 2. w_hat = NTT(v) - NTT(u) * NTT(s1)
/// 3. m = Decode(NTT^-1(w_hat))
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidCiphertextLength`] if `c` is not 64*d bytes.
pub fn k_pke_decrypt(sk: &PkeSecretKey, c: &[u8], d: usize) -> Result<[u8; MESSAGE_SIZE]> {
    check_d(d)?;
    let expected = ciphertext_size(d);
    if c.len() != expected {
        return Err(Error::InvalidCiphertextLength {
            expected,
            actual: c.len(),
        });
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(d, "k-pke decrypt");

    // 1. Parse ciphertext
    let (c1, c2) = c.split_at(32 * d);
    let u = decode_decompress(c1, d)?;
    let v = decode_decompress(c2, d)?;

    // 2. w_hat = v_hat - u_hat * s1_hat
    let mut s1_hat = sk.s1.ntt();
    let w_hat = &v.ntt() - &u.ntt().multiply(&s1_hat);
    s1_hat.zeroize();

    // 3. Decode message
    Ok(decode_message(&w_hat.ntt_inverse()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::Q;

    const R1: [u8; 32] = [0x42; 32];
    const R2: [u8; 32] = [0x24; 32];

    fn keys(d: usize) -> (PkePublicKey, PkeSecretKey) {
        k_pke_keygen_from_seeds(&R1, &R2, d, 2, 2).unwrap()
    }

    fn message(tag: u8) -> [u8; 32] {
        let mut m = [0u8; 32];
        for (i, b) in m.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(tag) ^ tag.rotate_left(3);
        }
        m
    }

    #[test]
    fn test_k_pke_roundtrip_all_widths() {
        for d in [8, 10, 12] {
            let (pk, sk) = keys(d);
            for tag in [0u8, 1, 0x5A, 0xFF] {
                let m = message(tag);
                let c = k_pke_encrypt(&pk, &m, &[tag; 32], d, 2).unwrap();
                assert_eq!(c.len(), 64 * d);
                assert_eq!(
                    k_pke_decrypt(&sk, &c, d).unwrap(),
                    m,
                    "d = {d}, tag = {tag}"
                );
            }
        }
    }

    #[test]
    fn test_k_pke_roundtrip_eta3() {
        let (pk, sk) = k_pke_keygen_from_seeds(&R1, &R2, 10, 3, 3).unwrap();
        let m = message(0x33);
        let c = k_pke_encrypt(&pk, &m, &[7u8; 32], 10, 3).unwrap();
        assert_eq!(k_pke_decrypt(&sk, &c, 10).unwrap(), m);
    }

    #[test]
    fn test_k_pke_keygen_deterministic() {
        let (pk1, sk1) = keys(10);
        let (pk2, sk2) = keys(10);
        assert_eq!(pk1, pk2);
        assert_eq!(sk1.to_bytes(), sk2.to_bytes());
    }

    #[test]
    fn test_k_pke_keygen_structure() {
        let (pk, sk) = keys(10);
        assert_eq!(sk.encoded_t(), &pk.t_hat().to_bytes());
        let expected = &pk.a().multiply(&sk.s1().ntt()) + &sk.s2().ntt();
        assert_eq!(&expected, pk.t_hat());
        // s1 and s2 are CBD_2 samples
        for &c in sk.s1().coeffs().iter().chain(sk.s2().coeffs().iter()) {
            assert!(c <= 2 || c >= Q - 2);
        }
    }

    #[test]
    fn test_k_pke_encrypt_deterministic() {
        let (pk, _) = keys(10);
        let m = message(9);
        let c1 = k_pke_encrypt(&pk, &m, &[1u8; 32], 10, 2).unwrap();
        let c2 = k_pke_encrypt(&pk, &m, &[1u8; 32], 10, 2).unwrap();
        let c3 = k_pke_encrypt(&pk, &m, &[2u8; 32], 10, 2).unwrap();
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
    }

    #[test]
    fn test_k_pke_encrypt_matches_components() {
        let (pk, _) = keys(12);
        let m = message(0x21);
        let r = [0x3Cu8; 32];

        let y_hat = sample_noise(2, &r, 0x00).ntt();
        let e1 = sample_noise(2, &r, 0x01);
        let e2 = sample_noise(2, &r, 0x02);
        let u = &pk.a().multiply(&y_hat).ntt_inverse() + &e1;
        let v = &(&pk.t_hat().multiply(&y_hat).ntt_inverse() + &e2) + &encode_message(&m);

        let mut expected = vec![0u8; ciphertext_size(12)];
        let (c1, c2) = expected.split_at_mut(32 * 12);
        compress_encode(&u, 12, c1).unwrap();
        compress_encode(&v, 12, c2).unwrap();

        assert_eq!(k_pke_encrypt(&pk, &m, &r, 12, 2).unwrap(), expected);
    }

    #[test]
    fn test_k_pke_key_bytes_roundtrip() {
        let (pk, sk) = keys(8);
        let pk_bytes = pk.to_bytes();
        assert_eq!(PkePublicKey::from_bytes(&pk_bytes).unwrap(), pk);

        let sk_bytes = sk.to_bytes();
        let parsed = PkeSecretKey::from_bytes(&sk_bytes).unwrap();
        assert_eq!(parsed.s1(), sk.s1());
        assert_eq!(parsed.s2(), sk.s2());
        assert_eq!(parsed.encoded_t(), sk.encoded_t());
    }

    #[test]
    fn test_k_pke_key_bytes_invalid() {
        assert!(matches!(
            PkePublicKey::from_bytes(&[0u8; 767]),
            Err(Error::InvalidKeyLength {
                expected: 768,
                actual: 767,
            })
        ));
        assert!(matches!(
            PkeSecretKey::from_bytes(&[0u8; 1151]),
            Err(Error::InvalidKeyLength {
                expected: 1152,
                actual: 1151,
            })
        ));
        assert!(matches!(
            PkePublicKey::from_bytes(&[0xFFu8; 768]),
            Err(Error::EncodingError)
        ));
    }

    #[test]
    fn test_k_pke_rejects_bad_parameters() {
        assert!(matches!(
            k_pke_keygen_from_seeds(&R1, &R2, 11, 2, 2),
            Err(Error::InvalidParameter {
                name: "d",
                value: 11,
            })
        ));
        assert!(matches!(
            k_pke_keygen_from_seeds(&R1, &R2, 10, 1, 2),
            Err(Error::InvalidParameter {
                name: "eta1",
                value: 1,
            })
        ));
        assert!(matches!(
            k_pke_keygen_from_seeds(&R1[..16], &R2, 10, 2, 2),
            Err(Error::InvalidLength {
                name: "r1",
                expected: 32,
                actual: 16,
            })
        ));

        let (pk, sk) = keys(10);
        assert!(matches!(
            k_pke_encrypt(&pk, &[0u8; 31], &[0u8; 32], 10, 2),
            Err(Error::InvalidLength {
                name: "message",
                expected: 32,
                actual: 31,
            })
        ));
        assert!(matches!(
            k_pke_encrypt(&pk, &[0u8; 32], &[0u8; 33], 10, 2),
            Err(Error::InvalidLength {
                name: "randomness",
                expected: 32,
                actual: 33,
            })
        ));
        assert!(matches!(
            k_pke_encrypt(&pk, &[0u8; 32], &[0u8; 32], 10, 5),
            Err(Error::InvalidParameter {
                name: "eta",
                value: 5,
            })
        ));
        assert!(matches!(
            k_pke_decrypt(&sk, &[0u8; 100], 10),
            Err(Error::InvalidCiphertextLength {
                expected: 640,
                actual: 100,
            })
        ));
        assert!(matches!(
            k_pke_decrypt(&sk, &[0u8; 640], 9),
            Err(Error::InvalidParameter {
                name: "d",
                value: 9,
            })
        ));
    }

    #[test]
    fn test_k_pke_keygen_with_rng() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::from_seed([3u8; 32]);
        let (pk, sk) = k_pke_keygen(&mut rng, 12, 2, 2).unwrap();
        let m = message(0xC3);
        let c = k_pke_encrypt(&pk, &m, &[4u8; 32], 12, 2).unwrap();
        assert_eq!(k_pke_decrypt(&sk, &c, 12).unwrap(), m);
    }
}
