//! The key-derivation hash, mapping a curve point and a 64-bit nonce to a
//! 128-bit key.

use crypto_core::Block;
use p256::ProjectivePoint;
use sha2::{Digest, Sha256};

use super::codec::encode_point;

/// Hash `point` and `nonce` to a 16-byte key.
///
/// SHA-256 absorbs the compressed hex digits of the point (no length prefix)
/// followed by the eight little-endian bytes of `nonce`. The key is the
/// first 16 digest bytes in reverse order; peers depend on this exact
/// layout.
pub fn hash_point(point: &ProjectivePoint, nonce: u64) -> Block {
    let mut hasher = Sha256::new();
    hasher.update(encode_point(point));
    hasher.update(nonce.to_le_bytes());
    let digest = hasher.finalize();

    let mut key = [0u8; 16];
    for (i, byte) in digest[..16].iter().enumerate() {
        key[15 - i] = *byte;
    }
    Block::from(key)
}
