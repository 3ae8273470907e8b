//! Key encapsulation trait shared by every parameter set.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A key encapsulation mechanism with all parameters fixed by the type.
///
/// Key, ciphertext and secret types are fixed-size byte containers, so
/// their lengths are available as associated constants.
///
/// ```ignore
/// use ringkem_core::Kem;
///
/// let (dk, ek) = SomeKem::keygen(&mut rng)?;
/// let (ct, ss_sender) = SomeKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = SomeKem::decaps(&dk, &ct)?;
/// assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
/// ```
pub trait Kem {
    /// Secret key; wiped on drop.
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Public key.
    type EncapsulationKey: Clone;

    /// Encapsulation output sent to the key owner.
    type Ciphertext: Clone;

    /// Agreed secret; wiped on drop.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Serialized decapsulation key length.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Serialized encapsulation key length.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Ciphertext length.
    const CIPHERTEXT_SIZE: usize;

    /// Shared secret length.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a fresh key pair, returned as `(decapsulation, encapsulation)`.
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Produce `(ciphertext, shared_secret)` for the holder of `ek`.
    ///
    /// Fails if `ek` does not parse.
    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRng,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Recover the shared secret from `ct`.
    ///
    /// A ciphertext that does not re-encrypt to itself yields a
    /// pseudorandom secret derived from the private key and the
    /// ciphertext instead of an error.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}
