//! Fixed-key AES random number generator.

use crate::Block;
use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use rand::{CryptoRng, Error, Rng, RngCore, SeedableRng};
use rand_core::block::{BlockRng64, BlockRngCore};

/// Random number generator based on AES in counter mode, keyed by the seed.
///
/// Seeded instances are deterministic, which is what the protocol tests rely
/// on for reproducible transcripts.
#[derive(Clone)]
pub struct AesRng(BlockRng64<AesRngCore>);

impl RngCore for AesRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl SeedableRng for AesRng {
    type Seed = <AesRngCore as SeedableRng>::Seed;

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        AesRng(BlockRng64::<AesRngCore>::from_seed(seed))
    }

    #[inline]
    fn from_rng<R: RngCore>(rng: R) -> Result<Self, Error> {
        BlockRng64::<AesRngCore>::from_rng(rng).map(AesRng)
    }
}

impl CryptoRng for AesRng {}

impl AesRng {
    /// Create a new random number generator using a random seed from
    /// `rand::random`.
    #[inline]
    pub fn new() -> Self {
        let seed = rand::random::<Block>();
        AesRng::from_seed(seed)
    }

    /// Create a new RNG using a random seed from this one.
    #[inline]
    pub fn fork(&mut self) -> Self {
        let seed = self.gen::<Block>();
        AesRng::from_seed(seed)
    }
}

impl Default for AesRng {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// The core of `AesRng`, used with `BlockRng64`.
#[derive(Clone)]
pub struct AesRngCore {
    aes: Aes128,
    counter: u64,
}

impl BlockRngCore for AesRngCore {
    type Item = u64;
    type Results = [u64; 8];

    // Compute `E(seed, counter)` for four consecutive counter values per
    // refill.
    #[inline]
    fn generate(&mut self, results: &mut Self::Results) {
        let mut blocks = [GenericArray::from([0u8; 16]); 4];
        for block in blocks.iter_mut() {
            block[..8].copy_from_slice(&self.counter.to_le_bytes());
            self.counter = self.counter.wrapping_add(1);
        }
        self.aes.encrypt_blocks(&mut blocks);
        for (chunk, block) in results.chunks_exact_mut(2).zip(blocks.iter()) {
            chunk[0] = u64::from_le_bytes(block[..8].try_into().unwrap());
            chunk[1] = u64::from_le_bytes(block[8..].try_into().unwrap());
        }
    }
}

impl SeedableRng for AesRngCore {
    type Seed = Block;

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        let key: [u8; 16] = seed.into();
        AesRngCore {
            aes: Aes128::new(&GenericArray::from(key)),
            counter: 0,
        }
    }
}

impl CryptoRng for AesRngCore {}

impl From<AesRngCore> for AesRng {
    #[inline]
    fn from(core: AesRngCore) -> Self {
        AesRng(BlockRng64::new(core))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let mut rng = AesRng::new();
        let a = rng.gen::<[Block; 8]>();
        let b = rng.gen::<[Block; 8]>();
        assert_ne!(a, b);
    }

    #[test]
    fn test_seeded_determinism() {
        let seed = Block::from([7u8; 16]);
        let mut rng0 = AesRng::from_seed(seed);
        let mut rng1 = AesRng::from_seed(seed);
        for _ in 0..64 {
            assert_eq!(rng0.gen::<Block>(), rng1.gen::<Block>());
        }
    }

    #[test]
    fn test_fork_diverges() {
        let mut rng = AesRng::from_seed(Block::from([9u8; 16]));
        let mut fork = rng.fork();
        assert_ne!(rng.gen::<Block>(), fork.gen::<Block>());
    }
}
