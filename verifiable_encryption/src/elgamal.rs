//! ElGamal encryption in a prime order group with generator `g`.
//!
//! A public key is the pair `(gh, y)` in a product group, where `y = g^x` for the secret key `x`.
//! In the standard scheme `gh = g` and a message `m` encrypts to `(g^r, y^r * m)`. In the Naor-Yung
//! scheme `gh = (g, h)` for a random `h` and `m` encrypts to `((g^r, h^r), y^r * m)`, which allows
//! a proof of knowledge of `r` to make the ciphertext non-malleable.
//!
//! A key of width `w` encrypts elements of the product of `w` copies of the group, reusing the
//! same key in every component with independent randomness.

use crate::error::EncryptionError;
use arithm::{
    product_group::{PPGroup, PPGroupElement},
    PGroup, PGroupElement, PPRing, PRingElement,
};
use ark_std::{end_timer, rand::RngCore, start_timer, vec};
use crypto_utils::ByteTree;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElGamal {
    standard: bool,
    group: PGroup,
    stat_dist: u32,
}

/// `(gh, y)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(PPGroupElement);

#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub PRingElement);

/// Randomness `r` of an encryption and the powers `gh^r` and `y^r`, everything that does not
/// depend on the message.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionRandomness {
    r: PRingElement,
    #[zeroize(skip)]
    u: PGroupElement,
    #[zeroize(skip)]
    v: PGroupElement,
}

impl PublicKey {
    /// The pair `(gh, y)` as an element of a product of two groups.
    pub fn new(key: PPGroupElement) -> Result<Self, EncryptionError> {
        if key.values().len() != 2 {
            return Err(EncryptionError::MalformedPublicKey(key.values().len()));
        }
        Ok(Self(key))
    }

    pub fn gh(&self) -> &PGroupElement {
        &self.0.values()[0]
    }

    pub fn y(&self) -> &PGroupElement {
        &self.0.values()[1]
    }

    pub fn group(&self) -> &PPGroup {
        self.0.group()
    }

    /// Group of the messages.
    pub fn message_group(&self) -> PGroup {
        self.y().group()
    }

    pub fn to_byte_tree(&self) -> ByteTree {
        self.0.to_byte_tree()
    }
}

impl EncryptionRandomness {
    pub fn r(&self) -> &PRingElement {
        &self.r
    }
}

impl ElGamal {
    pub fn new(standard: bool, group: PGroup, stat_dist: u32) -> Self {
        Self {
            standard,
            group,
            stat_dist,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.standard
    }

    pub fn group(&self) -> &PGroup {
        &self.group
    }

    pub fn stat_dist(&self) -> u32 {
        self.stat_dist
    }

    /// Number of random bytes consumed by an encryption under `public_key`.
    pub fn randomness_byte_length(&self, public_key: &PublicKey) -> usize {
        public_key
            .message_group()
            .pring()
            .random_element_byte_length(self.stat_dist)
    }

    /// Group of the public keys of width 1.
    pub fn public_key_group(&self) -> Result<PPGroup, EncryptionError> {
        let gh_group = if self.standard {
            self.group.clone()
        } else {
            PGroup::wide(&self.group, 2)?
        };
        Ok(PPGroup::new(vec![gh_group, self.group.clone()])?)
    }

    /// Reads a public key of width 1.
    pub fn public_key_from_byte_tree(&self, tree: &ByteTree) -> Result<PublicKey, EncryptionError> {
        PublicKey::new(self.public_key_group()?.to_element(tree)?)
    }

    pub fn gen<R: RngCore>(&self, rng: &mut R) -> Result<(PublicKey, SecretKey), EncryptionError> {
        let ring = self.group.pring();
        let g = self.group.generator();
        let x = ring.random_element(rng, self.stat_dist);
        let gh = if self.standard {
            g.clone()
        } else {
            let h = g.exp(&ring.random_element(rng, self.stat_dist))?;
            PGroup::wide(&self.group, 2)?
                .as_product()?
                .prod(vec![g.clone(), h])?
                .into()
        };
        let y = g.exp(&x)?;
        let pk = self.public_key_group()?.prod(vec![gh, y])?;
        Ok((PublicKey::new(pk)?, SecretKey(x)))
    }

    /// Samples the randomness of an encryption and computes `gh^r` and `y^r`.
    pub fn precompute_encrypt<R: RngCore>(
        &self,
        public_key: &PublicKey,
        rng: &mut R,
    ) -> Result<EncryptionRandomness, EncryptionError> {
        let r = public_key
            .message_group()
            .pring()
            .random_element(rng, self.stat_dist);
        self.precompute_encrypt_with(public_key, r)
    }

    /// As [`Self::precompute_encrypt`] with the given randomness.
    pub fn precompute_encrypt_with(
        &self,
        public_key: &PublicKey,
        r: PRingElement,
    ) -> Result<EncryptionRandomness, EncryptionError> {
        let u = public_key.gh().exp(&r)?;
        let v = public_key.y().exp(&r)?;
        Ok(EncryptionRandomness { r, u, v })
    }

    /// `(gh^r, y^r * message)`
    pub fn complete_encrypt(
        &self,
        public_key: &PublicKey,
        randomness: &EncryptionRandomness,
        message: &PGroupElement,
    ) -> Result<PGroupElement, EncryptionError> {
        let v = randomness.v.mul(message)?;
        Ok(public_key
            .group()
            .prod(vec![randomness.u.clone(), v])?
            .into())
    }

    pub fn encrypt<R: RngCore>(
        &self,
        public_key: &PublicKey,
        message: &PGroupElement,
        rng: &mut R,
    ) -> Result<PGroupElement, EncryptionError> {
        let encrypt_time = start_timer!(|| "ElGamal encryption");
        let randomness = self.precompute_encrypt(public_key, rng)?;
        let ciphertext = self.complete_encrypt(public_key, &randomness, message);
        end_timer!(encrypt_time);
        ciphertext
    }

    /// `v * u^{-x}` for a ciphertext `(u, v)`, using the first component of `u` in the Naor-Yung
    /// scheme.
    pub fn decrypt(
        &self,
        secret_key: &SecretKey,
        ciphertext: &PGroupElement,
    ) -> Result<PGroupElement, EncryptionError> {
        let u = ciphertext.project(0)?;
        let v = ciphertext.project(1)?;
        let u = if self.standard { u } else { u.project(0)? };
        Ok(v.mul(&u.exp(&secret_key.0.neg())?)?)
    }

    /// Key encrypting `width` group elements at once with the same secret key.
    pub fn wide_public_key(
        &self,
        public_key: &PublicKey,
        width: usize,
    ) -> Result<PublicKey, EncryptionError> {
        if width == 0 {
            return Err(EncryptionError::InvalidWidth(width));
        }
        if width == 1 {
            return Ok(public_key.clone());
        }
        let y_group = public_key.message_group();
        let wy_group = PPGroup::repeated(y_group.clone(), width)?;
        let wy = wy_group.prod_repeated(public_key.y())?;

        let gh = public_key.gh();
        let (wgh_group, wgh): (PGroup, PGroupElement) = if gh.group() == y_group {
            (
                wy_group.clone().into(),
                wy_group.prod_repeated(gh)?.into(),
            )
        } else {
            let wg = wy_group.prod_repeated(gh.project(0)?)?;
            let wh = wy_group.prod_repeated(gh.project(1)?)?;
            let wgh_group = PPGroup::repeated(wy_group.clone().into(), 2)?;
            let wgh = wgh_group.prod(vec![wg.into(), wh.into()])?;
            (wgh_group.into(), wgh.into())
        };
        let wpk_group = PPGroup::new(vec![wgh_group, wy_group.into()])?;
        PublicKey::new(wpk_group.prod(vec![wgh, wy.into()])?)
    }

    /// Secret key matching [`Self::wide_public_key`].
    pub fn wide_private_key(
        &self,
        secret_key: &SecretKey,
        width: usize,
    ) -> Result<SecretKey, EncryptionError> {
        if width == 0 {
            return Err(EncryptionError::InvalidWidth(width));
        }
        if width == 1 {
            return Ok(secret_key.clone());
        }
        let ring = PPRing::repeated(secret_key.0.ring(), width)?;
        Ok(SecretKey(PRingElement::Product(
            ring.prod_repeated(&secret_key.0)?,
        )))
    }
}
