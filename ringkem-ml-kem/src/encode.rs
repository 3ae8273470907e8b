//! Bit packing, coefficient compression, and message embedding.
//!
//! Byte encodings are little-endian at the bit level: coefficient `i`
//! occupies bits `[d*i, d*i + d)` of the output, bit 0 being the least
//! significant bit of byte 0.

#![allow(clippy::needless_range_loop)]

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::params::common::{MESSAGE_SIZE, N, Q};
use crate::poly::Poly;
use crate::reduce::csubq;
use ringkem_core::{Error, Result};

/// Pack a bit array (one 0/1 entry per element) into bytes, LSB first.
///
/// # Errors
/// - [`Error::InvalidLength`] if the number of bits is not a multiple of 8.
/// - [`Error::InvalidParameter`] if an entry is neither 0 nor 1.
pub fn bits_to_bytes(bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::InvalidLength {
            name: "bits",
            expected: bits.len().next_multiple_of(8),
            actual: bits.len(),
        });
    }

    let mut bytes = vec![0u8; bits.len() / 8];
    for (i, &bit) in bits.iter().enumerate() {
        if bit > 1 {
            return Err(Error::InvalidParameter {
                name: "bit",
                value: bit as usize,
            });
        }
        bytes[i / 8] |= bit << (i % 8);
    }
    Ok(bytes)
}

/// Unpack bytes into one 0/1 entry per bit, LSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).map(move |j| (byte >> j) & 1))
        .collect()
}

#[inline]
const fn check_compress_width(d: usize) -> Result<()> {
    if d >= 1 && d <= 11 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "d",
            value: d,
        })
    }
}

/// Compress x in [0, q-1] to d bits: floor(x * 2^d / q) mod 2^d.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `d` is not in 1..=11.
/// - [`Error::OutOfRange`] if `x >= q`.
pub fn compress(x: u16, d: usize) -> Result<u16> {
    check_compress_width(d)?;
    if x >= Q {
        return Err(Error::OutOfRange { value: x, bound: Q });
    }
    Ok(compress_d(x, d))
}

/// Decompress a d-bit value: floor((y * q + 2^(d-1)) / 2^d).
///
/// # Errors
/// - [`Error::InvalidParameter`] if `d` is not in 1..=11.
/// - [`Error::OutOfRange`] if `y >= 2^d`.
pub fn decompress(y: u16, d: usize) -> Result<u16> {
    check_compress_width(d)?;
    let bound = 1u16 << d;
    if y >= bound {
        return Err(Error::OutOfRange { value: y, bound });
    }
    Ok(decompress_d(y, d))
}

#[inline]
const fn compress_d(x: u16, d: usize) -> u16 {
    ((((x as u32) << d) / Q as u32) & ((1 << d) - 1)) as u16
}

#[inline]
const fn decompress_d(y: u16, d: usize) -> u16 {
    ((y as u32 * Q as u32 + (1 << (d - 1))) >> d) as u16
}

impl Poly {
    /// Compress every coefficient to d bits.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `d` is not in 1..=11.
    pub fn compress(&self, d: usize) -> Result<[u16; N]> {
        check_compress_width(d)?;
        Ok(self.coeffs().map(|x| compress_d(x, d)))
    }

    /// Rebuild an element from d-bit compressed values.
    ///
    /// # Errors
    /// - [`Error::InvalidParameter`] if `d` is not in 1..=11.
    /// - [`Error::OutOfRange`] if a value is `>= 2^d`.
    pub fn decompress(values: &[u16; N], d: usize) -> Result<Poly> {
        check_compress_width(d)?;
        let bound = 1u16 << d;
        if let Some(&value) = values.iter().find(|&&y| y >= bound) {
            return Err(Error::OutOfRange { value, bound });
        }
        Ok(Poly::from_reduced(values.map(|y| decompress_d(y, d))))
    }
}

/// Modulus of a d-bit field: 2^d below 12 bits, q at 12 bits.
#[inline]
const fn field_modulus(d: usize) -> u16 {
    if d < 12 {
        1 << d
    } else {
        Q
    }
}

/// Encode 256 coefficients with d bits each into 32*d bytes.
///
/// # Errors
/// - [`Error::InvalidLength`] if `coeffs` does not hold 256 values.
/// - [`Error::InvalidParameter`] if `d` is not in 1..=12.
/// - [`Error::OutOfRange`] if a coefficient is not below 2^d (q when d = 12).
pub fn byte_encode(coeffs: &[u16], d: usize) -> Result<Vec<u8>> {
    let coeffs: &[u16; N] = coeffs.try_into().map_err(|_| Error::InvalidLength {
        name: "coefficients",
        expected: N,
        actual: coeffs.len(),
    })?;
    check_field_width(d)?;

    let bound = field_modulus(d);
    if let Some(&value) = coeffs.iter().find(|&&c| c >= bound) {
        return Err(Error::OutOfRange { value, bound });
    }

    let mut out = vec![0u8; 32 * d];
    pack(coeffs, d, &mut out);
    Ok(out)
}

/// Decode 32*d bytes into 256 coefficients, each reduced mod 2^d (q when d = 12).
///
/// # Errors
/// - [`Error::InvalidParameter`] if `d` is not in 1..=12.
/// - [`Error::InvalidLength`] if `bytes` is not exactly 32*d long.
pub fn byte_decode(bytes: &[u8], d: usize) -> Result<[u16; N]> {
    check_field_width(d)?;
    if bytes.len() != 32 * d {
        return Err(Error::InvalidLength {
            name: "encoded polynomial",
            expected: 32 * d,
            actual: bytes.len(),
        });
    }

    let mut coeffs = unpack(bytes, d);
    if d == 12 {
        for c in coeffs.iter_mut() {
            *c = csubq(*c);
        }
    }
    Ok(coeffs)
}

#[inline]
const fn check_field_width(d: usize) -> Result<()> {
    if d >= 1 && d <= 12 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "d",
            value: d,
        })
    }
}

/// Pack the low d bits of each coefficient into `out` (32*d bytes).
pub(crate) fn pack(coeffs: &[u16; N], d: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 32 * d);
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut pos = 0;
    for &c in coeffs {
        acc |= ((c as u32) & ((1 << d) - 1)) << bits;
        bits += d;
        while bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            bits -= 8;
        }
    }
}

/// Unpack 256 raw d-bit values from `bytes` (32*d bytes), no reduction.
pub(crate) fn unpack(bytes: &[u8], d: usize) -> [u16; N] {
    debug_assert_eq!(bytes.len(), 32 * d);
    let mut coeffs = [0u16; N];
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut bytes = bytes.iter();
    for c in coeffs.iter_mut() {
        while bits < d {
            if let Some(&b) = bytes.next() {
                acc |= (b as u32) << bits;
            }
            bits += 8;
        }
        *c = (acc & ((1 << d) - 1)) as u16;
        acc >>= d;
        bits -= d;
    }
    coeffs
}

/// Embed a 32-byte message: bit i becomes coefficient i, scaled to 0 or ceil(q/2).
pub fn encode_message(m: &[u8; MESSAGE_SIZE]) -> Poly {
    let half_q = Q.div_ceil(2); // 1665
    let mut coeffs = [0u16; N];

    for i in 0..MESSAGE_SIZE {
        for j in 0..8 {
            let bit = ((m[i] >> j) & 1) as u16;
            // bit * half_q without a branch on the message
            coeffs[8 * i + j] = 0u16.wrapping_sub(bit) & half_q;
        }
    }

    Poly::from_reduced(coeffs)
}

/// Recover a message: a coefficient decodes to 1 iff it is closer to q/2 than to 0.
///
/// Computed as round(2w/q) mod 2, which is 1 exactly for w in [833, 2496].
pub fn decode_message(w: &Poly) -> [u8; MESSAGE_SIZE] {
    let mut m = [0u8; MESSAGE_SIZE];
    let coeffs = w.coeffs();

    for i in 0..MESSAGE_SIZE {
        for j in 0..8 {
            let c = coeffs[8 * i + j] as u32;
            let bit = (((c << 1) + Q as u32 / 2) / Q as u32) & 1;
            m[i] |= (bit as u8) << j;
        }
    }

    m
}
