pub mod block;
pub mod channel;
pub mod rand_aes;

pub use crate::{block::Block, rand_aes::AesRng};

pub use channel::*;
