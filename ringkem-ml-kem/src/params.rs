//! Parameter sets for rank-1 ML-KEM.
//!
//! Every set shares the ring, the key layout, and eta1 = eta2 = 2; they
//! differ only in the ciphertext compression width `D`.

/// Common parameters for all variants.
pub mod common {
    /// Polynomial ring dimension (n).
    pub const N: usize = 256;

    /// Modulus (q).
    pub const Q: u16 = 3329;

    /// Primitive 256th root of unity mod q.
    pub const ZETA: u16 = 17;

    /// 128^-1 mod q, the scale applied by the inverse NTT.
    pub const INV_128: u16 = 3303;

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = 32;

    /// Seed size for key generation.
    pub const SEED_SIZE: usize = 32;

    /// Message size for K-PKE encryption.
    pub const MESSAGE_SIZE: usize = 32;

    /// Bytes of one polynomial encoded with 12 bits per coefficient.
    pub const POLY_BYTES: usize = 384;

    /// K-PKE public key size: A || t_hat.
    pub const PKE_PUBLIC_KEY_SIZE: usize = 2 * POLY_BYTES;

    /// K-PKE secret key size: s1 || s2 || encodedT.
    pub const PKE_SECRET_KEY_SIZE: usize = 3 * POLY_BYTES;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = PKE_PUBLIC_KEY_SIZE;

    /// Decapsulation key size in bytes: pke secret key || pke public key || z.
    pub const DECAPSULATION_KEY_SIZE: usize = PKE_SECRET_KEY_SIZE + PKE_PUBLIC_KEY_SIZE + 32;

    /// Noise parameter for key generation (eta1).
    pub const ETA1: usize = 2;

    /// Noise parameter for encryption (eta2).
    pub const ETA2: usize = 2;

    /// Ciphertext size for compression width `d`.
    pub const fn ciphertext_size(d: usize) -> usize {
        64 * d
    }

    /// Whether `d` is a supported ciphertext compression width.
    pub const fn is_valid_d(d: usize) -> bool {
        matches!(d, 8 | 10 | 12)
    }

    /// Whether `eta` is a supported noise parameter.
    pub const fn is_valid_eta(eta: usize) -> bool {
        matches!(eta, 2 | 3)
    }
}

/// RingKem-8 parameters (8-bit ciphertext coefficients).
#[cfg(feature = "ring-kem-8")]
pub mod ring_kem_8 {
    /// Ciphertext compression width (d).
    pub const D: usize = 8;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = super::common::ENCAPSULATION_KEY_SIZE;

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = super::common::DECAPSULATION_KEY_SIZE;

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = super::common::ciphertext_size(D);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = super::common::SHARED_SECRET_SIZE;
}

/// RingKem-10 parameters (10-bit ciphertext coefficients).
#[cfg(feature = "ring-kem-10")]
pub mod ring_kem_10 {
    /// Ciphertext compression width (d).
    pub const D: usize = 10;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = super::common::ENCAPSULATION_KEY_SIZE;

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = super::common::DECAPSULATION_KEY_SIZE;

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = super::common::ciphertext_size(D);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = super::common::SHARED_SECRET_SIZE;
}

/// RingKem-12 parameters (uncompressed ciphertext coefficients).
#[cfg(feature = "ring-kem-12")]
pub mod ring_kem_12 {
    /// Ciphertext compression width (d).
    pub const D: usize = 12;

    /// Encapsulation key size in bytes.
    pub const ENCAPSULATION_KEY_SIZE: usize = super::common::ENCAPSULATION_KEY_SIZE;

    /// Decapsulation key size in bytes.
    pub const DECAPSULATION_KEY_SIZE: usize = super::common::DECAPSULATION_KEY_SIZE;

    /// Ciphertext size in bytes.
    pub const CIPHERTEXT_SIZE: usize = super::common::ciphertext_size(D);

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = super::common::SHARED_SECRET_SIZE;
}
