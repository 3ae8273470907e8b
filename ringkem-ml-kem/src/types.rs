//! Parameter-set wrapper macros.
//!
//! Each parameter set gets fixed-size byte containers for its keys,
//! ciphertext and shared secret, and a unit struct implementing
//! [`Kem`](ringkem_core::Kem) on top of the runtime-`d` functions in
//! [`crate::kem`].

/// Fixed-size byte container with a length-checked constructor.
macro_rules! byte_container {
    ($(#[$meta:meta])* $name:ident, $size:expr, $err:ident) => {
        $(#[$meta])*
        pub struct $name {
            bytes: [u8; $size],
        }

        impl $name {
            /// Copy `bytes` into a new container.
            ///
            /// # Errors
            #[doc = concat!("[`Error::", stringify!($err), "`] if the length is wrong.")]
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $size {
                    return Err(Error::$err {
                        expected: $size,
                        actual: bytes.len(),
                    });
                }
                let mut out = Self { bytes: [0u8; $size] };
                out.bytes.copy_from_slice(bytes);
                Ok(out)
            }

            /// The raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

/// Generate the byte-level types and `Kem` implementation for one parameter set.
///
/// Expects `D`, `DECAPSULATION_KEY_SIZE`, `ENCAPSULATION_KEY_SIZE`,
/// `CIPHERTEXT_SIZE` and `SHARED_SECRET_SIZE` in scope.
macro_rules! define_ring_kem {
    ($kem:ident, $doc:literal) => {
        use crate::kem as inner;
        use rand_core::CryptoRng;
        use ringkem_core::{Error, Kem, Result};
        use zeroize::{Zeroize, ZeroizeOnDrop};

        crate::types::byte_container!(
            /// Serialized decapsulation key: K-PKE secret key, public key, z.
            ///
            /// Only the length is checked on construction; the contents are
            /// parsed on every decapsulation.
            #[derive(Clone, Zeroize, ZeroizeOnDrop)]
            DecapsulationKey,
            DECAPSULATION_KEY_SIZE,
            InvalidKeyLength
        );

        crate::types::byte_container!(
            /// Serialized encapsulation key: ByteEncode_12(A) || ByteEncode_12(t_hat).
            ///
            /// Coefficients are range checked when the key is used.
            #[derive(Clone, Debug, PartialEq, Eq)]
            EncapsulationKey,
            ENCAPSULATION_KEY_SIZE,
            InvalidKeyLength
        );

        crate::types::byte_container!(
            /// Ciphertext c1 || c2.
            #[derive(Clone, Debug, PartialEq, Eq)]
            Ciphertext,
            CIPHERTEXT_SIZE,
            InvalidCiphertextLength
        );

        /// 32-byte shared secret, wiped on drop.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SharedSecret {
            bytes: [u8; SHARED_SECRET_SIZE],
        }

        impl AsRef<[u8]> for SharedSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $kem;

        impl $kem {
            /// Derive a key pair from a 32-byte seed.
            ///
            /// The same seed always yields the same key pair.
            ///
            /// # Errors
            /// [`Error::InvalidLength`] if `seed` is not 32 bytes.
            pub fn keygen_from_seed(seed: &[u8]) -> Result<(DecapsulationKey, EncapsulationKey)> {
                let (ek, dk) = inner::ml_kem_keygen_from_seed(seed, D)?;
                Ok(Self::serialize_pair(&ek, &dk))
            }

            fn serialize_pair(
                ek: &inner::EncapsulationKey,
                dk: &inner::DecapsulationKey,
            ) -> (DecapsulationKey, EncapsulationKey) {
                let mut dk_bytes = dk.to_bytes();
                let dk_out = DecapsulationKey { bytes: dk_bytes };
                dk_bytes.zeroize();
                (dk_out, EncapsulationKey { bytes: ek.to_bytes() })
            }
        }

        impl Kem for $kem {
            type DecapsulationKey = DecapsulationKey;
            type EncapsulationKey = EncapsulationKey;
            type Ciphertext = Ciphertext;
            type SharedSecret = SharedSecret;

            const DECAPSULATION_KEY_SIZE: usize = DECAPSULATION_KEY_SIZE;
            const ENCAPSULATION_KEY_SIZE: usize = ENCAPSULATION_KEY_SIZE;
            const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
            const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

            fn keygen(
                rng: &mut impl CryptoRng,
            ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
                let (ek, dk) = inner::ml_kem_keygen(rng, D, None)?;
                Ok(Self::serialize_pair(&ek, &dk))
            }

            fn encaps(
                ek: &Self::EncapsulationKey,
                rng: &mut impl CryptoRng,
            ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
                let ek = inner::EncapsulationKey::from_bytes(&ek.bytes)?;
                let (bytes, c) = inner::ml_kem_encaps(rng, &ek, D)?;
                Ok((Ciphertext::from_bytes(&c)?, SharedSecret { bytes }))
            }

            fn decaps(
                dk: &Self::DecapsulationKey,
                ct: &Self::Ciphertext,
            ) -> Result<Self::SharedSecret> {
                let dk = inner::DecapsulationKey::from_bytes(&dk.bytes)?;
                let bytes = inner::ml_kem_decaps(&dk, &ct.bytes, D)?;
                Ok(SharedSecret { bytes })
            }
        }
    };
}

pub(crate) use byte_container;
pub(crate) use define_ring_kem;
