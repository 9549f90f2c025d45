#![cfg_attr(not(feature = "std"), no_std)]

//! Arithmetic of prime order groups and their rings of exponents.
//!
//! - [`field::PField`] and [`ring::PPRing`], the exponent rings, combined in [`ring::PRing`].
//! - [`modp_group::ModPGroup`], [`ecq_group::ECqPGroup`] and the product [`product_group::PPGroup`],
//!   combined in [`group::PGroup`].
//! - [`modpow_prod::ModPowProd`] and [`fix_mod_pow::FixModPow`] for simultaneous and fixed-base
//!   exponentiation.
//! - [`hom::Homomorphism`] and [`hom::ExpHom`].
//!
//! Elements are immutable. Operations combining elements of different rings or groups return
//! [`ArithmError::DistinctRings`] or [`ArithmError::DistinctGroups`].

pub mod ec;
pub mod ecq_group;
pub mod error;
pub mod field;
pub mod fix_mod_pow;
pub mod group;
pub mod hom;
pub mod integer;
pub mod modp_group;
pub mod modpow_prod;
mod named_params;
pub mod product_group;
pub mod ring;

pub use error::ArithmError;
pub use field::{PField, PFieldElement};
pub use group::{PGroup, PGroupElement};
pub use hom::{ExpHom, Homomorphism};
pub use ring::{PPRing, PPRingElement, PRing, PRingElement};
