//! Modular reduction macro for lattice arithmetic.
//!
//! Generates a branch-free Barrett reduction that maps an unsigned wide
//! product straight to its canonical residue.

/// Generate a Barrett reduction function returning the canonical residue.
///
/// The generated function computes `a mod q` for any `a` of the input type
/// without division. Requires `2q < 2^(BITS(output) - 1)` and
/// `barrett_mul = floor(2^shift / q)` with `a < 2^shift`.
///
/// # Parameters
/// - `$name`: Function name (e.g., `reduce`)
/// - `$input`: Unsigned input type (e.g., `u32`)
/// - `$output`: Unsigned coefficient type (e.g., `u16`)
/// - `$wide`: Wide type for the multiplication (e.g., `u64`)
/// - `$q`: The prime modulus
/// - `$barrett_mul`: Precomputed constant floor(2^shift / q)
/// - `$shift`: Bit shift amount
#[macro_export]
macro_rules! define_barrett_reduce {
    (
        name: $name:ident,
        input: $input:ty,
        output: $output:ty,
        wide: $wide:ty,
        q: $q:expr,
        barrett_mul: $barrett_mul:expr,
        shift: $shift:expr
    ) => {
        /// Barrett reduction: compute a mod q without division.
        /// Result is in range [0, q-1].
        #[inline]
        pub const fn $name(a: $input) -> $output {
            let t = (((a as $wide) * ($barrett_mul as $wide)) >> $shift) as $input;
            // a - t*q lies in [0, 2q)
            let r = (a - t * ($q as $input)) as $output;
            let s = r.wrapping_sub($q as $output);
            let mask = (0 as $output).wrapping_sub(s >> (<$output>::BITS - 1));
            s.wrapping_add(($q as $output) & mask)
        }
    };
}

#[cfg(test)]
mod tests {
    define_barrett_reduce!(
        name: reduce_3329,
        input: u32,
        output: u16,
        wide: u64,
        q: 3329u16,
        barrett_mul: 20_642_678u64,
        shift: 36
    );

    define_barrett_reduce!(
        name: reduce_7681,
        input: u32,
        output: u16,
        wide: u64,
        q: 7681u16,
        barrett_mul: 8_946_683u64,
        shift: 36
    );

    #[test]
    fn test_barrett_reduce_small_values() {
        for a in 0..20_000u32 {
            assert_eq!(reduce_3329(a) as u32, a % 3329, "a = {a}");
        }
    }

    #[test]
    fn test_barrett_reduce_boundaries() {
        let cases = [
            3328u32,
            3329,
            3330,
            6657,
            6658,
            3328 * 3328,
            2 * 3328 * 3328,
            (1 << 25) - 1,
            u32::MAX,
        ];
        for a in cases {
            assert_eq!(reduce_3329(a) as u32, a % 3329, "a = {a}");
        }
    }

    #[test]
    fn test_barrett_reduce_other_modulus() {
        for a in [0u32, 7680, 7681, 7682, 7680 * 7680, u32::MAX] {
            assert_eq!(reduce_7681(a) as u32, a % 7681, "a = {a}");
        }
    }
}
