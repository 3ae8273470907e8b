//! ML-KEM over rank-1 K-PKE (FIPS 203 Algorithms 16-18).
//!
//! Encapsulation derives one ephemeral secret and uses it both as the K-PKE
//! message and as the encryption randomness. Decapsulation re-encrypts the
//! recovered message and compares ciphertexts in constant time; on mismatch
//! it returns J(z || c) instead of failing (implicit rejection).

#![allow(clippy::needless_range_loop)]

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::hash::{hash_g, hash_h, hash_j, hash_j_concat};
use crate::k_pke::{
    check_d, k_pke_decrypt, k_pke_encrypt, k_pke_keygen_from_seeds, seed32, PkePublicKey,
    PkeSecretKey,
};
use crate::params::common::{
    DECAPSULATION_KEY_SIZE, ENCAPSULATION_KEY_SIZE, ETA1, ETA2, PKE_PUBLIC_KEY_SIZE,
    PKE_SECRET_KEY_SIZE, SEED_SIZE, SHARED_SECRET_SIZE,
};
use rand_core::CryptoRng;
use ringkem_core::{Error, Result};
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Encapsulation key: the K-PKE public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncapsulationKey {
    pke: PkePublicKey,
}

impl EncapsulationKey {
    /// The underlying K-PKE public key.
    pub fn pke(&self) -> &PkePublicKey {
        &self.pke
    }

    /// Canonical 768-byte encoding.
    pub fn to_bytes(&self) -> [u8; ENCAPSULATION_KEY_SIZE] {
        self.pke.to_bytes()
    }

    /// Parse the canonical encoding, including the modulus check.
    ///
    /// # Errors
    /// - [`Error::InvalidKeyLength`] if `bytes` is not 768 bytes.
    /// - [`Error::EncodingError`] if a coefficient is `>= q`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            pke: PkePublicKey::from_bytes(bytes)?,
        })
    }
}

/// Decapsulation key: K-PKE secret key, the matching public key, and the
/// implicit rejection secret z.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsulationKey {
    pke_sk: PkeSecretKey,
    #[zeroize(skip)]
    ek: EncapsulationKey,
    z: [u8; 32],
}

impl fmt::Debug for DecapsulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecapsulationKey")
            .field("ek", &self.ek)
            .finish_non_exhaustive()
    }
}

impl DecapsulationKey {
    /// The underlying K-PKE secret key.
    pub fn pke(&self) -> &PkeSecretKey {
        &self.pke_sk
    }

    /// The encapsulation key this key pairs with.
    pub fn encapsulation_key(&self) -> &EncapsulationKey {
        &self.ek
    }

    /// Canonical 1952-byte encoding: pke secret key || pke public key || z.
    pub fn to_bytes(&self) -> [u8; DECAPSULATION_KEY_SIZE] {
        let mut out = [0u8; DECAPSULATION_KEY_SIZE];
        let (sk, rest) = out.split_at_mut(PKE_SECRET_KEY_SIZE);
        let (pk, z) = rest.split_at_mut(PKE_PUBLIC_KEY_SIZE);
        let mut sk_bytes = self.pke_sk.to_bytes();
        sk.copy_from_slice(&sk_bytes);
        sk_bytes.zeroize();
        pk.copy_from_slice(&self.ek.to_bytes());
        z.copy_from_slice(&self.z);
        out
    }

    /// Parse the canonical encoding.
    ///
    /// # Errors
    /// - [`Error::InvalidKeyLength`] if `bytes` is not 1952 bytes.
    /// - [`Error::EncodingError`] if a coefficient is `>= q`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DECAPSULATION_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: DECAPSULATION_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let (sk, rest) = bytes.split_at(PKE_SECRET_KEY_SIZE);
        let (pk, z) = rest.split_at(PKE_PUBLIC_KEY_SIZE);

        let mut key = Self {
            pke_sk: PkeSecretKey::from_bytes(sk)?,
            ek: EncapsulationKey::from_bytes(pk)?,
            z: [0u8; 32],
        };
        key.z.copy_from_slice(z);
        Ok(key)
    }
}

/// ML-KEM Key Generation from explicit seeds.
///
/// # Arguments
/// * `r1` - 32-byte secret seed for K-PKE
/// * `r2` - 32-byte public seed for A
/// * `z` - 32-byte implicit rejection secret
/// * `d` - Ciphertext compression width (8, 10, or 12)
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidLength`] if a seed is not 32 bytes.
pub fn ml_kem_keygen_internal(
    r1: &[u8],
    r2: &[u8],
    z: &[u8],
    d: usize,
) -> Result<(EncapsulationKey, DecapsulationKey)> {
    let z = seed32("z", z)?;
    let (pk, pke_sk) = k_pke_keygen_from_seeds(r1, r2, d, ETA1, ETA2)?;

    let ek = EncapsulationKey { pke: pk };
    let dk = DecapsulationKey {
        pke_sk,
        ek: ek.clone(),
        z: *z,
    };

    Ok((ek, dk))
}

/// ML-KEM Key Generation (FIPS 203 Algorithm 16).
///
/// Without a seed, r1, r2 and z are drawn from `rng`. With a 32-byte seed
/// the key pair is a function of the seed alone: (r1, r2) = G(seed) and
/// z = J(seed).
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidLength`] if `seed` is not 32 bytes.
pub fn ml_kem_keygen(
    rng: &mut impl CryptoRng,
    d: usize,
    seed: Option<&[u8]>,
) -> Result<(EncapsulationKey, DecapsulationKey)> {
    check_d(d)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(d, seeded = seed.is_some(), "ml-kem keygen");

    if let Some(seed) = seed {
        return ml_kem_keygen_from_seed(seed, d);
    }

    let mut r1 = [0u8; SEED_SIZE];
    let mut r2 = [0u8; SEED_SIZE];
    let mut z = [0u8; SEED_SIZE];
    rng.fill_bytes(&mut r1);
    rng.fill_bytes(&mut r2);
    rng.fill_bytes(&mut z);

    let keys = ml_kem_keygen_internal(&r1, &r2, &z, d);
    r1.zeroize();
    z.zeroize();
    keys
}

/// Seeded ML-KEM Key Generation: (r1, r2) = G(seed), z = J(seed).
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidLength`] if `seed` is not 32 bytes.
pub fn ml_kem_keygen_from_seed(
    seed: &[u8],
    d: usize,
) -> Result<(EncapsulationKey, DecapsulationKey)> {
    let seed = seed32("seed", seed)?;
    let (mut r1, r2) = hash_g(seed);
    let mut z = hash_j(seed);

    let keys = ml_kem_keygen_internal(&r1, &r2, &z, d);
    r1.zeroize();
    z.zeroize();
    keys
}

/// ML-KEM Encapsulation with explicit randomness.
///
/// # Algorithm
/// 1. e = first half of G(H(ek) || r)
/// 2. c = K-PKE.Encrypt(ek, e, e)
/// 3. K = H(e)
///
/// # Returns
/// `(c, K)`.
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidLength`] if `r` is not 32 bytes.
pub fn ml_kem_encaps_internal(
    ek: &EncapsulationKey,
    r: &[u8],
    d: usize,
) -> Result<(Vec<u8>, [u8; SHARED_SECRET_SIZE])> {
    check_d(d)?;
    let r = seed32("randomness", r)?;

    // 1. e = G(H(ek) || r).0
    let mut g_input = [0u8; 64];
    g_input[..32].copy_from_slice(&hash_h(&ek.to_bytes()));
    g_input[32..].copy_from_slice(r);
    let (mut ephemeral, _) = hash_g(&g_input);
    g_input.zeroize();

    // 2. c = K-PKE.Encrypt(ek, e, e)
    let c = k_pke_encrypt(&ek.pke, &ephemeral, &ephemeral, d, ETA2)?;

    // 3. K = H(e)
    let shared_secret = hash_h(&ephemeral);
    ephemeral.zeroize();

    Ok((c, shared_secret))
}

/// ML-KEM Encapsulation (FIPS 203 Algorithm 17).
///
/// Draws 32 bytes of randomness from `rng`.
///
/// # Returns
/// `(K, c)`: the shared secret and the ciphertext.
pub fn ml_kem_encaps(
    rng: &mut impl CryptoRng,
    ek: &EncapsulationKey,
    d: usize,
) -> Result<([u8; SHARED_SECRET_SIZE], Vec<u8>)> {
    #[cfg(feature = "tracing")]
    tracing::debug!(d, "ml-kem encaps");

    let mut r = [0u8; 32];
    rng.fill_bytes(&mut r);
    let result = ml_kem_encaps_internal(ek, &r, d);
    r.zeroize();

    let (c, k) = result?;
    Ok((k, c))
}

/// ML-KEM Decapsulation with implicit rejection.
///
/// # Algorithm
/// 1. m' = K-PKE.Decrypt(dk, c)
/// 2. K' = H(m')
/// 3. c' = K-PKE.Encrypt(ek, m', m')
/// 4. K_bar = J(z || c)
/// 5. if c == c': return K' else: return K_bar (constant-time)
///
/// # Errors
/// - [`Error::InvalidParameter`] for an unsupported `d`.
/// - [`Error::InvalidCiphertextLength`] if `c` is not 64*d bytes.
pub fn ml_kem_decaps_internal(
    dk: &DecapsulationKey,
    c: &[u8],
    d: usize,
) -> Result<[u8; SHARED_SECRET_SIZE]> {
    // 1. m' = K-PKE.Decrypt(dk, c)
    let mut m_prime = k_pke_decrypt(&dk.pke_sk, c, d)?;

    // 2. K' = H(m')
    let mut k_prime = hash_h(&m_prime);

    // 3. c' = K-PKE.Encrypt(ek, m', m')
    let c_prime = k_pke_encrypt(&dk.ek.pke, &m_prime, &m_prime, d, ETA2)?;
    m_prime.zeroize();

    // 4. K_bar = J(z || c)
    let k_bar = hash_j_concat(&dk.z, c);

    // 5. Constant-time comparison and selection
    let ciphertexts_equal = c.ct_eq(&c_prime);

    let mut result = [0u8; SHARED_SECRET_SIZE];
    for i in 0..SHARED_SECRET_SIZE {
        result[i] = u8::conditional_select(&k_bar[i], &k_prime[i], ciphertexts_equal);
    }
    k_prime.zeroize();

    Ok(result)
}

/// ML-KEM Decapsulation (FIPS 203 Algorithm 18).
pub fn ml_kem_decaps(
    dk: &DecapsulationKey,
    c: &[u8],
    d: usize,
) -> Result<[u8; SHARED_SECRET_SIZE]> {
    #[cfg(feature = "tracing")]
    tracing::debug!(d, ciphertext_len = c.len(), "ml-kem decaps");

    ml_kem_decaps_internal(dk, c, d)
}
