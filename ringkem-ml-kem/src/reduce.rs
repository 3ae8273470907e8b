//! Modular arithmetic on canonical coefficients.
//!
//! Every function here takes values in [0, q-1] and returns a value in
//! [0, q-1]; no intermediate leaves the unsigned domain.

use crate::params::common::Q;
use ringkem_core::define_barrett_reduce;

/// Barrett constant for q=3329: floor(2^36 / q) = 20642678
pub const BARRETT_MUL: u64 = 20_642_678;

define_barrett_reduce!(
    name: reduce,
    input: u32,
    output: u16,
    wide: u64,
    q: Q,
    barrett_mul: BARRETT_MUL,
    shift: 36
);

/// Conditional subtract: map r in [0, 2q-1] to [0, q-1] without branching.
#[inline]
pub const fn csubq(r: u16) -> u16 {
    let s = r.wrapping_sub(Q);
    s.wrapping_add(Q & 0u16.wrapping_sub(s >> 15))
}

/// (a + b) mod q
#[inline]
pub const fn add_mod(a: u16, b: u16) -> u16 {
    csubq(a + b)
}

/// (a - b) mod q
#[inline]
pub const fn sub_mod(a: u16, b: u16) -> u16 {
    csubq(a + Q - b)
}

/// (a * b) mod q
#[inline]
pub const fn mul_mod(a: u16, b: u16) -> u16 {
    reduce(a as u32 * b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_matches_remainder() {
        for a in [0u32, 1, 3328, 3329, 3330, 6658, 3328 * 3328, 1 << 30] {
            assert_eq!(reduce(a) as u32, a % Q as u32);
        }
    }

    #[test]
    fn test_csubq() {
        assert_eq!(csubq(0), 0);
        assert_eq!(csubq(3328), 3328);
        assert_eq!(csubq(3329), 0);
        assert_eq!(csubq(6657), 3328);
    }

    #[test]
    fn test_add_sub_mod() {
        assert_eq!(add_mod(3328, 1), 0);
        assert_eq!(add_mod(1664, 1665), 0);
        assert_eq!(sub_mod(0, 1), 3328);
        assert_eq!(sub_mod(5, 5), 0);
        for a in (0..Q).step_by(97) {
            for b in (0..Q).step_by(89) {
                assert_eq!(sub_mod(add_mod(a, b), b), a);
            }
        }
    }

    #[test]
    fn test_mul_mod_correctness() {
        for a in (0..Q).step_by(37) {
            for b in (0..Q).step_by(41) {
                assert_eq!(mul_mod(a, b) as u32, (a as u32 * b as u32) % Q as u32);
            }
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(BARRETT_MUL, (1u64 << 36) / Q as u64);
    }
}
