//! Pseudo-random generator built from SHA-256 in counter mode.
//!
//! Block `i` of the output stream is `SHA-256(seed || i)` where `i` is a big-endian `u32` starting
//! at 0. Blocks are consumed byte by byte so the stream does not depend on how requests are split.

use crate::error::PrgError;
use ark_std::rand::{CryptoRng, Error, RngCore, SeedableRng};
use digest::Digest;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const SEED_LENGTH: usize = 32;
const BLOCK_LENGTH: usize = 32;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha256Prg {
    /// Seed followed by 4 bytes for the counter
    input: [u8; SEED_LENGTH + 4],
    counter: u32,
    buffer: [u8; BLOCK_LENGTH],
    /// Next unread position in `buffer`, `BLOCK_LENGTH` when exhausted
    index: usize,
}

impl Sha256Prg {
    /// Seeds the generator with the first 32 bytes of `seed`. Longer seeds are truncated.
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self, PrgError> {
        if seed.len() < SEED_LENGTH {
            return Err(PrgError::SeedTooShort(SEED_LENGTH, seed.len()));
        }
        let mut input = [0u8; SEED_LENGTH + 4];
        input[..SEED_LENGTH].copy_from_slice(&seed[..SEED_LENGTH]);
        Ok(Self {
            input,
            counter: 0,
            buffer: [0u8; BLOCK_LENGTH],
            index: BLOCK_LENGTH,
        })
    }

    fn next_block(&mut self) {
        self.input[SEED_LENGTH..].copy_from_slice(&self.counter.to_be_bytes());
        self.buffer.copy_from_slice(&Sha256::digest(self.input));
        self.counter = self.counter.wrapping_add(1);
        self.index = 0;
    }
}

impl RngCore for Sha256Prg {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_be_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_be_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut filled = 0;
        while filled < dest.len() {
            if self.index == BLOCK_LENGTH {
                self.next_block();
            }
            let n = (BLOCK_LENGTH - self.index).min(dest.len() - filled);
            dest[filled..filled + n].copy_from_slice(&self.buffer[self.index..self.index + n]);
            self.index += n;
            filled += n;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Sha256Prg {}

impl SeedableRng for Sha256Prg {
    type Seed = [u8; SEED_LENGTH];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut input = [0u8; SEED_LENGTH + 4];
        input[..SEED_LENGTH].copy_from_slice(&seed);
        Self {
            input,
            counter: 0,
            buffer: [0u8; BLOCK_LENGTH],
            index: BLOCK_LENGTH,
        }
    }
}
