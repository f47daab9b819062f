//! Provides traits for random 1-out-of-2 oblivious transfer, plus the
//! Naor-Pinkas base OT that implements them.

pub mod codec;
pub mod curve;
pub mod errors;
pub mod hash;
pub mod np;

pub use errors::OtError;
pub use np::{NaorPinkasReceiver, NaorPinkasSender};

use crypto_core::AbstractChannel;
use rand::{CryptoRng, Rng};

/// Sender of random OT. Each transfer yields a fresh pair of messages chosen
/// by the protocol rather than the caller.
pub trait RandomOtSender
where
    Self: Sized,
{
    /// Message type.
    type Msg: Sized + AsMut<[u8]>;

    /// Run a batch of `count` transfers, returning the two message vectors.
    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        count: usize,
        rng: &mut R,
    ) -> Result<(Vec<Self::Msg>, Vec<Self::Msg>), OtError>;
}

/// Receiver of random OT.
pub trait RandomOtReceiver
where
    Self: Sized,
{
    /// Message type.
    type Msg: Sized + AsMut<[u8]>;

    /// Run one batch, learning the message selected by each choice bit.
    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        choices: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Self::Msg>, OtError>;
}
