//! # Rank-1 ML-KEM
//!
//! Key encapsulation built the way FIPS 203 builds ML-KEM, but over a single
//! ring element of R_q = Z_q\[x\]/(x^256 + 1) with q = 3329 instead of a
//! module of rank k. The public element A, the secret s and the noise e are
//! all polynomials, so every "matrix" operation is one NTT-domain product.
//!
//! The ciphertext compression width `d` selects the parameter set:
//!
//! | Parameter Set | d  | Encapsulation Key | Decapsulation Key | Ciphertext | Shared Secret |
//! |---------------|----|-------------------|-------------------|------------|---------------|
//! | RingKem8      | 8  | 768 bytes         | 1952 bytes        | 512 bytes  | 32 bytes      |
//! | RingKem10     | 10 | 768 bytes         | 1952 bytes        | 640 bytes  | 32 bytes      |
//! | RingKem12     | 12 | 768 bytes         | 1952 bytes        | 768 bytes  | 32 bytes      |
//!
//! A single ring element does not reach the security levels of the standard
//! parameter sets. This crate is meant for study and interoperability
//! testing of the ML-KEM building blocks.
//!
//! ## Example
//!
//! ```ignore
//! use ringkem_ml_kem::{RingKem10, Kem};
//! use rand::rngs::OsRng;
//!
//! let (dk, ek) = RingKem10::keygen(&mut OsRng)?;
//! let (ct, ss_sender) = RingKem10::encaps(&ek, &mut OsRng)?;
//! let ss_receiver = RingKem10::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```
//!
//! The layered API is public as well: [`hash`], [`encode`], [`ntt`],
//! [`sample`], [`k_pke`] and [`kem`] expose each step with runtime `d` and
//! `eta`, returning [`Error`] for out-of-range parameters.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod encode;
pub mod hash;
pub mod k_pke;
pub mod kem;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod sample;

mod reduce;
mod types;

#[cfg(feature = "ring-kem-8")]
pub mod ring_kem_8;
#[cfg(feature = "ring-kem-10")]
pub mod ring_kem_10;
#[cfg(feature = "ring-kem-12")]
pub mod ring_kem_12;

pub use poly::{NttPoly, Poly};
pub use ringkem_core::{Error, Kem, Result};

#[cfg(feature = "ring-kem-8")]
pub use ring_kem_8::RingKem8;
#[cfg(feature = "ring-kem-10")]
pub use ring_kem_10::RingKem10;
#[cfg(feature = "ring-kem-12")]
pub use ring_kem_12::RingKem12;

