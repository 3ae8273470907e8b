//! Error types for ringkem operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during ring arithmetic, encoding, or KEM operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid ciphertext length.
    InvalidCiphertextLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A seed, label, message, or coefficient array has the wrong length.
    InvalidLength {
        /// Which input was malformed.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A scheme parameter (eta, d, a bit value) is outside its domain.
    InvalidParameter {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A coefficient is not below its modulus.
    OutOfRange {
        /// The offending value.
        value: u16,
        /// Exclusive upper bound.
        bound: u16,
    },

    /// Key bytes decode to a coefficient that is not reduced mod q.
    EncodingError,

    /// Input was absorbed into an XOF after squeezing began.
    XofFinalized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidCiphertextLength { expected, actual } => {
                write!(
                    f,
                    "invalid ciphertext length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidLength {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "invalid {name} length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}: {value}")
            }
            Error::OutOfRange { value, bound } => {
                write!(f, "value {value} out of range: must be below {bound}")
            }
            Error::EncodingError => write!(f, "encoding or decoding error"),
            Error::XofFinalized => write!(f, "cannot absorb after squeezing has started"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_display_lengths() {
        let err = Error::InvalidLength {
            name: "seed",
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            std::format!("{err}"),
            "invalid seed length: expected 32, got 31"
        );

        let err = Error::InvalidKeyLength {
            expected: 768,
            actual: 0,
        };
        assert_eq!(
            std::format!("{err}"),
            "invalid key length: expected 768, got 0"
        );
    }

    #[test]
    fn test_display_parameter_and_range() {
        let err = Error::InvalidParameter {
            name: "eta",
            value: 4,
        };
        assert_eq!(std::format!("{err}"), "invalid parameter eta: 4");

        let err = Error::OutOfRange {
            value: 3329,
            bound: 3329,
        };
        assert_eq!(
            std::format!("{err}"),
            "value 3329 out of range: must be below 3329"
        );
    }
}
