#![cfg_attr(not(feature = "std"), no_std)]

//! Shared building blocks for the arithmetic and proof crates.
//!
//! - [`byte_tree::ByteTree`], the length-prefixed tree format every element, proof and ciphertext
//!   is serialized to.
//! - [`sha256_prg::Sha256Prg`], a deterministic counter-mode generator usable wherever an `RngCore`
//!   is expected.
//! - Digest helpers over byte trees in [`hashing_utils`].

pub mod byte_tree;
pub mod error;
pub mod hashing_utils;
pub mod sha256_prg;

pub use byte_tree::ByteTree;
pub use error::{ByteTreeError, PrgError};

/// Default statistical distance, in bits, used when sampling elements by reduction.
pub const DEFAULT_STAT_DIST: u32 = 50;
