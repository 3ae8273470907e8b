//! Number Theoretic Transform for R_q (FIPS 203 Algorithms 9-12).
//!
//! q = 3329 has a primitive 256th root of unity (zeta = 17) but no 512th,
//! so the transform stops at degree-one factors: x^256 + 1 splits into 128
//! quadratics x^2 - gamma_i, and multiplication in the NTT domain is a
//! base-case product on each pair of coefficients.

#![allow(clippy::needless_range_loop)]

use crate::params::common::{INV_128, N, ZETA};
use crate::poly::{NttPoly, Poly};
use crate::reduce::{add_mod, mul_mod, sub_mod};

/// Powers of zeta consumed by the transform.
#[derive(Debug)]
pub struct NttTables {
    /// `zetas[i] = zeta^BitRev7(i) mod q`.
    pub zetas: [u16; 128],
    /// `gammas[i] = zeta^(2*BitRev7(i) + 1) mod q`.
    pub gammas: [u16; 128],
}

/// Reverse the low 7 bits of `i`.
const fn bit_rev7(i: usize) -> usize {
    ((i as u8).reverse_bits() >> 1) as usize
}

const fn pow_mod(base: u16, mut exp: usize) -> u16 {
    let mut result = 1u16;
    let mut b = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, b);
        }
        b = mul_mod(b, b);
        exp >>= 1;
    }
    result
}

const fn compute_tables() -> NttTables {
    let mut zetas = [0u16; 128];
    let mut gammas = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        zetas[i] = pow_mod(ZETA, bit_rev7(i));
        gammas[i] = pow_mod(ZETA, 2 * bit_rev7(i) + 1);
        i += 1;
    }
    NttTables { zetas, gammas }
}

/// Twiddle tables, evaluated at compile time and shared by every caller.
pub static NTT_TABLES: NttTables = compute_tables();

/// Forward NTT (FIPS 203 Algorithm 9).
///
/// Seven Cooley-Tukey layers, block length 128 down to 2, consuming
/// `zetas[1..128]` in order.
pub fn ntt(f: &Poly) -> NttPoly {
    let mut a = f.coeffs;
    let zetas = &NTT_TABLES.zetas;
    let mut k = 1;
    let mut len = 128;

    while len >= 2 {
        for start in (0..N).step_by(2 * len) {
            let zeta = zetas[k];
            k += 1;
            for j in start..start + len {
                let t = mul_mod(zeta, a[j + len]);
                a[j + len] = sub_mod(a[j], t);
                a[j] = add_mod(a[j], t);
            }
        }
        len >>= 1;
    }

    NttPoly::from_reduced(a)
}

/// Inverse NTT (FIPS 203 Algorithm 10).
///
/// Gentleman-Sande layers, block length 2 up to 128, consuming
/// `zetas[127..=1]` in reverse, then scaling by 128^-1.
pub fn ntt_inverse(f_hat: &NttPoly) -> Poly {
    let mut a = f_hat.coeffs;
    let zetas = &NTT_TABLES.zetas;
    let mut k = 127;
    let mut len = 2;

    while len <= 128 {
        for start in (0..N).step_by(2 * len) {
            let zeta = zetas[k];
            k -= 1;
            for j in start..start + len {
                let t = a[j];
                a[j] = add_mod(t, a[j + len]);
                a[j + len] = mul_mod(zeta, sub_mod(a[j + len], t));
            }
        }
        len <<= 1;
    }

    for c in a.iter_mut() {
        *c = mul_mod(*c, INV_128);
    }

    Poly::from_reduced(a)
}

/// Product of a0 + a1*X and b0 + b1*X modulo X^2 - gamma (FIPS 203 Algorithm 12).
///
/// Returns (a0*b0 + gamma*a1*b1, a0*b1 + a1*b0) mod q. Inputs of any size are
/// reduced; outputs are in [0, q-1].
#[inline]
pub const fn base_case_multiply(a0: u16, a1: u16, b0: u16, b1: u16, gamma: u16) -> (u16, u16) {
    let c0 = add_mod(mul_mod(a0, b0), mul_mod(mul_mod(a1, b1), gamma));
    let c1 = add_mod(mul_mod(a0, b1), mul_mod(a1, b0));
    (c0, c1)
}

/// Multiply two NTT-domain elements (FIPS 203 Algorithm 11).
pub fn multiply_ntts(f_hat: &NttPoly, g_hat: &NttPoly) -> NttPoly {
    let f = &f_hat.coeffs;
    let g = &g_hat.coeffs;
    let gammas = &NTT_TABLES.gammas;
    let mut h = [0u16; N];

    for i in 0..N / 2 {
        let (c0, c1) = base_case_multiply(
            f[2 * i],
            f[2 * i + 1],
            g[2 * i],
            g[2 * i + 1],
            gammas[i],
        );
        h[2 * i] = c0;
        h[2 * i + 1] = c1;
    }

    NttPoly::from_reduced(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::Q;

    fn pseudo_random_poly(seed: u32) -> Poly {
        let mut coeffs = [0u16; N];
        let mut x = seed;
        for c in coeffs.iter_mut() {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
            *c = ((x >> 8) % Q as u32) as u16;
        }
        Poly::from_reduced(coeffs)
    }

    /// Negacyclic schoolbook product mod (X^256 + 1, q).
    fn schoolbook(a: &Poly, b: &Poly) -> Poly {
        let mut r = [0u16; N];
        for i in 0..N {
            for j in 0..N {
                let p = mul_mod(a.coeffs[i], b.coeffs[j]);
                let k = i + j;
                if k < N {
                    r[k] = add_mod(r[k], p);
                } else {
                    r[k - N] = sub_mod(r[k - N], p);
                }
            }
        }
        Poly::from_reduced(r)
    }

    #[test]
    fn test_table_values() {
        assert_eq!(NTT_TABLES.zetas[0], 1);
        assert_eq!(NTT_TABLES.zetas[1], 1729);
        assert_eq!(NTT_TABLES.zetas[2], 2580);
        assert_eq!(NTT_TABLES.zetas[64], 17);
        assert_eq!(NTT_TABLES.gammas[0], 17);
        assert_eq!(NTT_TABLES.gammas[1], Q - 17);
        assert_eq!(NTT_TABLES.gammas[2], 2761);
    }

    #[test]
    fn test_tables_in_valid_range() {
        assert!(NTT_TABLES.zetas.iter().all(|&z| z > 0 && z < Q));
        assert!(NTT_TABLES.gammas.iter().all(|&g| g > 0 && g < Q));
    }

    #[test]
    fn test_ntt_inv_ntt_roundtrip() {
        for seed in 0..8 {
            let f = pseudo_random_poly(seed);
            assert_eq!(ntt_inverse(&ntt(&f)), f);
        }
    }

    #[test]
    fn test_ntt_zero_polynomial() {
        let zero = Poly::zero();
        assert_eq!(ntt(&zero), NttPoly::zero());
        assert_eq!(ntt_inverse(&NttPoly::zero()), zero);
    }

    #[test]
    fn test_ntt_of_one() {
        let mut coeffs = [0u16; N];
        coeffs[0] = 1;
        let one_hat = ntt(&Poly::from_reduced(coeffs));
        for i in 0..N / 2 {
            assert_eq!(one_hat.coeffs[2 * i], 1);
            assert_eq!(one_hat.coeffs[2 * i + 1], 0);
        }
    }

    #[test]
    fn test_multiply_matches_schoolbook() {
        let a = pseudo_random_poly(1);
        let b = pseudo_random_poly(2);
        let via_ntt = ntt_inverse(&multiply_ntts(&ntt(&a), &ntt(&b)));
        assert_eq!(via_ntt, schoolbook(&a, &b));
    }

    #[test]
    fn test_multiply_by_x_is_negacyclic_shift() {
        let a = pseudo_random_poly(7);
        let mut x = [0u16; N];
        x[1] = 1;
        let shifted = ntt_inverse(&multiply_ntts(&ntt(&a), &ntt(&Poly::from_reduced(x))));
        assert_eq!(shifted.coeffs[0], sub_mod(0, a.coeffs[N - 1]));
        for i in 1..N {
            assert_eq!(shifted.coeffs[i], a.coeffs[i - 1]);
        }
    }

    #[test]
    fn test_ntt_is_linear() {
        let a = pseudo_random_poly(3);
        let b = pseudo_random_poly(4);
        assert_eq!(ntt(&(&a + &b)), &ntt(&a) + &ntt(&b));
    }

    #[test]
    fn test_base_case_multiply() {
        // (1 + 2X)(3 + 4X) = 3 + 10X + 8X^2, X^2 = gamma
        let (c0, c1) = base_case_multiply(1, 2, 3, 4, 17);
        assert_eq!(c0, 3 + 8 * 17);
        assert_eq!(c1, 10);

        let (c0, c1) = base_case_multiply(Q - 1, Q - 1, Q - 1, Q - 1, Q - 17);
        // (-1 - X)^2 = 1 + 2X + X^2, X^2 = -17
        assert_eq!(c0, Q - 16);
        assert_eq!(c1, 2);
    }
}
