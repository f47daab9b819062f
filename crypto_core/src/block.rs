//! Defines a block as a 128-bit value, and implements block-related functions.

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

/// A 128-bit chunk. The unit the stack hands around as keys and wire labels.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Block([u8; 16]);

impl Block {
    /// Try to create a `Block` from a slice of bytes. Fails if the slice is
    /// not 16 bytes long.
    #[inline]
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 16 {
            return None;
        }
        let mut data = [0u8; 16];
        data.copy_from_slice(bytes);
        Some(Block(data))
    }
}

impl AsRef<[u8]> for Block {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Block {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl From<[u8; 16]> for Block {
    #[inline]
    fn from(bytes: [u8; 16]) -> Self {
        Block(bytes)
    }
}

impl From<Block> for [u8; 16] {
    #[inline]
    fn from(block: Block) -> Self {
        block.0
    }
}

impl std::ops::BitXor for Block {
    type Output = Block;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0.iter()) {
            *a ^= *b;
        }
        Block(out)
    }
}

impl std::ops::BitXorAssign for Block {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a ^= *b;
        }
    }
}

impl Distribution<Block> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        Block(rng.gen())
    }
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
