//! RingKem8: d = 8 ciphertext compression.

use crate::params::ring_kem_8::*;

crate::types::define_ring_kem!(
    RingKem8,
    "Rank-1 ML-KEM with 8-bit ciphertext compression (512-byte ciphertexts)."
);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_key_sizes() {
        assert_eq!(RingKem8::DECAPSULATION_KEY_SIZE, 1952);
        assert_eq!(RingKem8::ENCAPSULATION_KEY_SIZE, 768);
        assert_eq!(RingKem8::CIPHERTEXT_SIZE, 512);
        assert_eq!(RingKem8::SHARED_SECRET_SIZE, 32);
    }

    #[test]
    fn test_roundtrip() {
        let mut rng = StdRng::from_seed([8u8; 32]);
        for _ in 0..4 {
            let (dk, ek) = RingKem8::keygen(&mut rng).unwrap();
            let (ct, ss_sender) = RingKem8::encaps(&ek, &mut rng).unwrap();
            let ss_receiver = RingKem8::decaps(&dk, &ct).unwrap();
            assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
        }
    }

    #[test]
    fn test_decapsulation_key_invalid_length() {
        let result = DecapsulationKey::from_bytes(&[0u8; 2400]);
        assert!(matches!(result, Err(Error::InvalidKeyLength { .. })));
    }
}
