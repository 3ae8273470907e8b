//! Ring elements of R_q = Z_q\[X\]/(X^256 + 1).
//!
//! [`Poly`] holds coefficients in the normal domain and [`NttPoly`] holds
//! NTT-domain evaluations. Both keep every coefficient in [0, q-1]; the only
//! way across domains is [`Poly::ntt`] and [`NttPoly::ntt_inverse`].

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::encode::{pack, unpack};
use crate::ntt;
use crate::params::common::{N, POLY_BYTES, Q};
use crate::reduce::{add_mod, sub_mod};
use ringkem_core::{Error, Result};
use zeroize::Zeroize;

macro_rules! define_ring_element {
    ($name:ident, $domain:literal) => {
        #[doc = concat!("A ring element in the ", $domain, " domain.")]
        #[derive(Clone, PartialEq, Eq, Zeroize)]
        pub struct $name {
            pub(crate) coeffs: [u16; N],
        }

        impl Default for $name {
            fn default() -> Self {
                Self { coeffs: [0u16; N] }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("coeffs[..4]", &&self.coeffs[..4])
                    .finish_non_exhaustive()
            }
        }

        impl $name {
            /// The zero element.
            pub fn zero() -> Self {
                Self::default()
            }

            /// Build an element from 256 coefficients in [0, q-1].
            ///
            /// # Errors
            /// - [`Error::InvalidLength`] if `coeffs` does not hold 256 values.
            /// - [`Error::OutOfRange`] if a coefficient is `>= q`.
            pub fn from_coeffs(coeffs: &[u16]) -> Result<Self> {
                let coeffs: &[u16; N] = coeffs.try_into().map_err(|_| Error::InvalidLength {
                    name: "coefficients",
                    expected: N,
                    actual: coeffs.len(),
                })?;
                if let Some(&value) = coeffs.iter().find(|&&c| c >= Q) {
                    return Err(Error::OutOfRange { value, bound: Q });
                }
                Ok(Self { coeffs: *coeffs })
            }

            #[inline]
            pub(crate) fn from_reduced(coeffs: [u16; N]) -> Self {
                debug_assert!(coeffs.iter().all(|&c| c < Q));
                Self { coeffs }
            }

            /// The coefficients, each in [0, q-1].
            #[inline]
            pub fn coeffs(&self) -> &[u16; N] {
                &self.coeffs
            }

            /// Canonical 384-byte encoding (12 bits per coefficient).
            pub fn to_bytes(&self) -> [u8; POLY_BYTES] {
                let mut out = [0u8; POLY_BYTES];
                pack(&self.coeffs, 12, &mut out);
                out
            }

            /// Parse a canonical 384-byte encoding.
            ///
            /// # Errors
            /// - [`Error::InvalidLength`] if `bytes` is not 384 bytes.
            /// - [`Error::EncodingError`] if any 12-bit value is `>= q`.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != POLY_BYTES {
                    return Err(Error::InvalidLength {
                        name: "encoded polynomial",
                        expected: POLY_BYTES,
                        actual: bytes.len(),
                    });
                }
                let coeffs = unpack(bytes, 12);
                if coeffs.iter().any(|&c| c >= Q) {
                    return Err(Error::EncodingError);
                }
                Ok(Self { coeffs })
            }
        }

        impl Add<&$name> for &$name {
            type Output = $name;

            fn add(self, rhs: &$name) -> $name {
                let mut r = self.clone();
                r += rhs;
                r
            }
        }

        impl AddAssign<&$name> for $name {
            fn add_assign(&mut self, rhs: &$name) {
                for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
                    *a = add_mod(*a, b);
                }
            }
        }

        impl Sub<&$name> for &$name {
            type Output = $name;

            fn sub(self, rhs: &$name) -> $name {
                let mut r = self.clone();
                r -= rhs;
                r
            }
        }

        impl SubAssign<&$name> for $name {
            fn sub_assign(&mut self, rhs: &$name) {
                for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
                    *a = sub_mod(*a, b);
                }
            }
        }
    };
}

define_ring_element!(Poly, "normal");
define_ring_element!(NttPoly, "NTT");

impl Poly {
    /// Forward NTT.
    #[inline]
    pub fn ntt(&self) -> NttPoly {
        ntt::ntt(self)
    }
}

impl NttPoly {
    /// Inverse NTT.
    #[inline]
    pub fn ntt_inverse(&self) -> Poly {
        ntt::ntt_inverse(self)
    }

    /// Product in the NTT domain (128 degree-one base multiplications).
    #[inline]
    pub fn multiply(&self, other: &NttPoly) -> NttPoly {
        ntt::multiply_ntts(self, other)
    }
}
