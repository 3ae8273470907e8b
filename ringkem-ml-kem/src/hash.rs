//! Hash, XOF, and PRF functions.
//!
//! This module provides the symmetric primitives the scheme is built on:
//! - H = SHA3-256: Hash messages and encapsulation keys
//! - G = SHA3-512: Split into two 32-byte seeds
//! - J = SHAKE256 (32 bytes): Implicit rejection secret
//! - XOF = SHAKE128: Sample the public polynomial A
//! - PRF = SHAKE256: Sample noise polynomials

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::params::common::{is_valid_eta, SEED_SIZE};
use ringkem_core::{Error, Result};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Sha3_256, Sha3_512, Shake128, Shake256,
};

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    use sha3::Digest;
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// SHA3-512 of `data`.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    use sha3::Digest;
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, data);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// First `n` bytes of SHAKE128 over `data`.
pub fn shake128(data: &[u8], n: usize) -> Vec<u8> {
    let mut output = vec![0u8; n];
    let mut hasher = Shake128::default();
    hasher.update(data);
    hasher.finalize_xof().read(&mut output);
    output
}

/// First `n` bytes of SHAKE256 over `data`.
pub fn shake256(data: &[u8], n: usize) -> Vec<u8> {
    let mut output = vec![0u8; n];
    shake256_into(&[data], &mut output);
    output
}

/// SHAKE256 over the concatenation of `parts`, filling `output`.
#[inline]
fn shake256_into(parts: &[&[u8]], output: &mut [u8]) {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof().read(output);
}

/// PRF function: SHAKE256(seed || label) truncated to 64 * eta bytes.
///
/// # Arguments
/// * `eta` - Noise parameter (2 or 3)
/// * `seed` - 32-byte secret seed
/// * `label` - Single-byte domain separator
///
/// # Errors
/// - [`Error::InvalidParameter`] if `eta` is not 2 or 3.
/// - [`Error::InvalidLength`] if `seed` is not 32 bytes or `label` is not 1 byte.
pub fn prf(eta: usize, seed: &[u8], label: &[u8]) -> Result<Vec<u8>> {
    if !is_valid_eta(eta) {
        return Err(Error::InvalidParameter {
            name: "eta",
            value: eta,
        });
    }
    let seed: &[u8; SEED_SIZE] = seed.try_into().map_err(|_| Error::InvalidLength {
        name: "seed",
        expected: SEED_SIZE,
        actual: seed.len(),
    })?;
    let &[label] = label else {
        return Err(Error::InvalidLength {
            name: "label",
            expected: 1,
            actual: label.len(),
        });
    };

    let mut output = vec![0u8; 64 * eta];
    prf_into(seed, label, &mut output);
    Ok(output)
}

/// PRF with pre-validated inputs; `output` decides the length.
#[inline]
pub(crate) fn prf_into(seed: &[u8; SEED_SIZE], label: u8, output: &mut [u8]) {
    shake256_into(&[&seed[..], &[label][..]], output);
}

/// H function: SHA3-256.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    sha3_256(input)
}

/// J function: the first 32 bytes of SHAKE256.
#[inline]
pub fn hash_j(input: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    shake256_into(&[input], &mut output);
    output
}

/// J(z || c) without materialising the concatenation.
#[inline]
pub(crate) fn hash_j_concat(z: &[u8; 32], ciphertext: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    shake256_into(&[&z[..], ciphertext], &mut output);
    output
}

/// G function: SHA3-512 split into two 32-byte halves.
///
/// Used to derive (r1, r2) from a key generation seed and the ephemeral
/// secret during encapsulation.
#[inline]
pub fn hash_g(input: &[u8]) -> ([u8; 32], [u8; 32]) {
    let digest = sha3_512(input);
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    first.copy_from_slice(&digest[..32]);
    second.copy_from_slice(&digest[32..]);
    (first, second)
}

enum XofState {
    Absorbing(Shake128),
    Squeezing(sha3::Shake128Reader),
}

/// Incremental SHAKE128.
///
/// Input may be absorbed in any number of calls until the first squeeze.
/// Every squeeze continues the same output stream, so consecutive calls
/// never repeat bytes.
pub struct Xof {
    state: XofState,
}

impl Default for Xof {
    fn default() -> Self {
        Self::new()
    }
}

impl Xof {
    /// Create an XOF with nothing absorbed yet.
    pub fn new() -> Self {
        Self {
            state: XofState::Absorbing(Shake128::default()),
        }
    }

    /// Create an XOF that has absorbed `seed`.
    pub fn for_seed(seed: &[u8]) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(seed);
        Self {
            state: XofState::Absorbing(hasher),
        }
    }

    /// Absorb more input.
    ///
    /// # Errors
    /// [`Error::XofFinalized`] once any output has been squeezed.
    pub fn absorb(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            XofState::Absorbing(hasher) => {
                hasher.update(data);
                Ok(())
            }
            XofState::Squeezing(_) => Err(Error::XofFinalized),
        }
    }

    /// Read the next `out.len()` bytes of output.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        if let XofState::Absorbing(hasher) = &mut self.state {
            let reader = core::mem::take(hasher).finalize_xof();
            self.state = XofState::Squeezing(reader);
        }
        if let XofState::Squeezing(reader) = &mut self.state {
            reader.read(out);
        }
    }
}
