#![cfg_attr(not(feature = "std"), no_std)]

//! # Verifiable encryption schemes
//!
//! ElGamal encryption over any group of the `arithm` crate, in the standard form and in the
//! Naor-Yung form where the randomness is used under two independent generators. Keys can be
//! widened to encrypt elements of product groups in one go.
//!
//! [`zkpok::ElGamalZKPoK`] attaches to every ciphertext a non-interactive proof of knowledge bound
//! to a label. With the proof of knowledge of the randomness of [`write_in::ZKPoKWriteIn`] this
//! gives the "write-in" ciphertexts of [`zkpok::ElGamalZKPoKWriteIn`], which are non-malleable, so
//! a ciphertext can not be re-used under another label or transformed into a related ciphertext.

pub mod elgamal;
pub mod error;
pub mod write_in;
pub mod zkpok;

pub use elgamal::{ElGamal, EncryptionRandomness, PublicKey, SecretKey};
pub use error::EncryptionError;
pub use write_in::ZKPoKWriteIn;
pub use zkpok::{ElGamalZKPoK, ElGamalZKPoKAdapter, ElGamalZKPoKWriteIn, ZKPoKWriteInAdapter};
