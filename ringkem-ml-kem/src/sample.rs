//! Sampling functions.
//!
//! This module implements FIPS 203 Algorithm 7 (SampleNTT) for the public
//! element A and Algorithm 8 (SamplePolyCBD) for secret and noise elements.

#![allow(clippy::needless_range_loop)]

use crate::hash::Xof;
use crate::params::common::{is_valid_eta, N, Q};
use crate::poly::{NttPoly, Poly};
use crate::reduce::csubq;
use ringkem_core::{Error, Result};

/// Length of a SampleNTT seed: 32-byte seed plus two index bytes.
pub const SAMPLE_NTT_SEED_SIZE: usize = 34;

/// Sample an NTT-domain element uniformly from SHAKE128(seed) (FIPS 203 Algorithm 7).
///
/// # Errors
/// [`Error::InvalidLength`] if `seed` is not 34 bytes.
pub fn sample_ntt(seed: &[u8]) -> Result<NttPoly> {
    if seed.len() != SAMPLE_NTT_SEED_SIZE {
        return Err(Error::InvalidLength {
            name: "sample seed",
            expected: SAMPLE_NTT_SEED_SIZE,
            actual: seed.len(),
        });
    }
    let mut xof = Xof::for_seed(seed);
    Ok(sample_ntt_from_xof(&mut xof))
}

/// Rejection-sample 256 coefficients from a streaming XOF.
///
/// The XOF output is read three bytes at a time as two 12-bit candidates;
/// candidates `>= q` are dropped.
pub(crate) fn sample_ntt_from_xof(xof: &mut Xof) -> NttPoly {
    let mut coeffs = [0u16; N];
    let mut j = 0;

    while j < N {
        let mut buf = [0u8; 3];
        xof.squeeze(&mut buf);

        let d1 = (buf[0] as u16) | (((buf[1] as u16) & 0x0F) << 8);
        let d2 = ((buf[1] as u16) >> 4) | ((buf[2] as u16) << 4);

        if d1 < Q {
            coeffs[j] = d1;
            j += 1;
        }
        if j < N && d2 < Q {
            coeffs[j] = d2;
            j += 1;
        }
    }

    NttPoly::from_reduced(coeffs)
}

/// Sample from the centered binomial distribution (FIPS 203 Algorithm 8).
///
/// Coefficient i is `popcount(bits[2*eta*i .. 2*eta*i + eta])` minus
/// `popcount(bits[2*eta*i + eta .. 2*eta*(i + 1)])`, stored mod q.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `eta` is not 2 or 3.
/// - [`Error::InvalidLength`] if `bytes` is not 64*eta long.
pub fn sample_poly_cbd(eta: usize, bytes: &[u8]) -> Result<Poly> {
    if !is_valid_eta(eta) {
        return Err(Error::InvalidParameter {
            name: "eta",
            value: eta,
        });
    }
    if bytes.len() != 64 * eta {
        return Err(Error::InvalidLength {
            name: "cbd input",
            expected: 64 * eta,
            actual: bytes.len(),
        });
    }
    Ok(cbd(eta, bytes))
}

/// CBD on validated input.
pub(crate) fn cbd(eta: usize, bytes: &[u8]) -> Poly {
    let mut coeffs = [0u16; N];
    if eta == 2 {
        cbd2(&mut coeffs, bytes);
    } else {
        cbd3(&mut coeffs, bytes);
    }
    Poly::from_reduced(coeffs)
}

/// a - b mod q for small a, b.
#[inline]
const fn centered(a: u32, b: u32) -> u16 {
    csubq((a + Q as u32 - b) as u16)
}

/// eta = 2: one byte carries two coefficients of 2+2 bits.
fn cbd2(coeffs: &mut [u16; N], bytes: &[u8]) {
    for i in 0..N / 2 {
        let t = bytes[i] as u32;

        // Sum adjacent bit pairs
        let d = (t & 0x55) + ((t >> 1) & 0x55);

        coeffs[2 * i] = centered(d & 0x3, (d >> 2) & 0x3);
        coeffs[2 * i + 1] = centered((d >> 4) & 0x3, (d >> 6) & 0x3);
    }
}

/// eta = 3: three bytes carry four coefficients of 3+3 bits.
fn cbd3(coeffs: &mut [u16; N], bytes: &[u8]) {
    for i in 0..N / 4 {
        let t = (bytes[3 * i] as u32)
            | ((bytes[3 * i + 1] as u32) << 8)
            | ((bytes[3 * i + 2] as u32) << 16);

        // Sum each bit triple
        let d = (t & 0x249249) + ((t >> 1) & 0x249249) + ((t >> 2) & 0x249249);

        for j in 0..4 {
            let a = (d >> (6 * j)) & 0x7;
            let b = (d >> (6 * j + 3)) & 0x7;
            coeffs[4 * i + j] = centered(a, b);
        }
    }
}
