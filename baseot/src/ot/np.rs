//! Implementation of the Naor-Pinkas oblivious transfer protocol (cf.
//! <https://dl.acm.org/citation.cfm?id=365502>) in its batched random-OT
//! form over NIST P-256.
//!
//! One batch of size `n` uses a single shared point `M`. The receiver sends
//! one point per instance; the sender pairs it with `M` to recover both
//! branches, so the receiver's choice bits never appear on the wire.

use crypto_core::{AbstractChannel, Block};
use p256::elliptic_curve::subtle::{Choice, ConditionallySelectable};
use p256::elliptic_curve::Field;
use p256::ProjectivePoint;
use rand::{CryptoRng, Rng};
use tracing::debug;
use zeroize::Zeroizing;

use super::codec::{read_point, write_point};
use super::curve::Curve;
use super::errors::OtError;
use super::hash::hash_point;
use super::{RandomOtReceiver, RandomOtSender};

/// Oblivious transfer sender.
pub struct NaorPinkasSender {
    curve: Curve,
}

impl NaorPinkasSender {
    pub fn new() -> Result<Self, OtError> {
        Ok(Self {
            curve: Curve::new()?,
        })
    }
}

impl RandomOtSender for NaorPinkasSender {
    type Msg = Block;

    fn send<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        count: usize,
        rng: &mut R,
    ) -> Result<(Vec<Block>, Vec<Block>), OtError> {
        let curve = &self.curve;
        debug!(count, "sender: starting base OT batch");

        // One shared M for every instance in the batch.
        let m_scalar = Zeroizing::new(curve.random_scalar(rng)?);
        let global_m = curve.mul_base(&m_scalar);
        write_point(channel, &global_m)?;
        channel.flush()?;

        let mut rs = Zeroizing::new(Vec::with_capacity(count));
        let mut gr = Vec::with_capacity(count);
        let mut mr = Vec::with_capacity(count);
        for _ in 0..count {
            // A zero r would make gr the identity, which the codec refuses
            // to carry; resample instead.
            let r = loop {
                let r = curve.random_scalar(rng)?;
                if !bool::from(r.is_zero()) {
                    break r;
                }
            };
            gr.push(curve.mul_base(&r));
            mr.push(global_m * r);
            rs.push(r);
        }

        // Take all of the receiver's points before releasing any gr; the
        // receiver must be committed to its choices first.
        let mut s = Vec::with_capacity(count);
        for _ in 0..count {
            s.push(read_point(channel)?);
        }

        for point in gr.iter() {
            write_point(channel, point)?;
        }
        channel.flush()?;

        let mut m0 = Vec::with_capacity(count);
        let mut m1 = Vec::with_capacity(count);
        for i in 0..count {
            // t0 = s^r and t1 = M^r / s^r; exactly one of them matches the
            // receiver's g^(r*d).
            let t0 = s[i] * rs[i];
            let t1 = mr[i] + (-t0);
            m0.push(hash_point(&t0, 0));
            m1.push(hash_point(&t1, 1));
        }
        debug!(count, "sender: finished base OT batch");
        Ok((m0, m1))
    }
}

impl std::fmt::Display for NaorPinkasSender {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Naor-Pinkas Sender")
    }
}

/// Oblivious transfer receiver.
pub struct NaorPinkasReceiver {
    curve: Curve,
}

impl NaorPinkasReceiver {
    pub fn new() -> Result<Self, OtError> {
        Ok(Self {
            curve: Curve::new()?,
        })
    }
}

impl RandomOtReceiver for NaorPinkasReceiver {
    type Msg = Block;

    fn receive<C: AbstractChannel, R: CryptoRng + Rng>(
        &mut self,
        channel: &mut C,
        choices: &[bool],
        rng: &mut R,
    ) -> Result<Vec<Block>, OtError> {
        let curve = &self.curve;
        let count = choices.len();
        debug!(count, "receiver: starting base OT batch");

        let global_m = read_point(channel)?;

        let mut ds = Zeroizing::new(Vec::with_capacity(count));
        for &b in choices.iter() {
            // d must land in [1, q-1]; a zero d would put the identity on
            // the wire and hand the sender the choice bit.
            let d = curve.random_unit_scalar(rng)?;
            let p = curve.mul_base(&d);
            // Both branches are computed for every instance so that the two
            // choice values drive identical curve operations; only the
            // transmitted value differs.
            let q = global_m + (-p);
            let s0 = ProjectivePoint::conditional_select(&p, &q, Choice::from(b as u8));
            write_point(channel, &s0)?;
            ds.push(d);
        }
        channel.flush()?;

        let mut gr = Vec::with_capacity(count);
        for _ in 0..count {
            gr.push(read_point(channel)?);
        }

        let mut keys = Vec::with_capacity(count);
        for i in 0..count {
            let gd = gr[i] * ds[i];
            keys.push(hash_point(&gd, choices[i] as u64));
        }
        debug!(count, "receiver: finished base OT batch");
        Ok(keys)
    }
}

impl std::fmt::Display for NaorPinkasReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Naor-Pinkas Receiver")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ot::codec::read_point;
    use crypto_core::{local_channel_pair, AesRng};
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::thread;

    fn run_ot(
        choices: Vec<bool>,
        sender_seed: u8,
        receiver_seed: u8,
    ) -> (Vec<Block>, Vec<Block>, Vec<Block>) {
        let count = choices.len();
        let (mut chan_s, mut chan_r) = local_channel_pair();

        let handle = thread::spawn(move || {
            let mut rng = AesRng::from_seed(Block::from([sender_seed; 16]));
            let mut ot = NaorPinkasSender::new().unwrap();
            ot.send(&mut chan_s, count, &mut rng).unwrap()
        });

        let mut rng = AesRng::from_seed(Block::from([receiver_seed; 16]));
        let mut ot = NaorPinkasReceiver::new().unwrap();
        let received = ot.receive(&mut chan_r, &choices, &mut rng).unwrap();

        let (m0, m1) = handle.join().unwrap();
        (m0, m1, received)
    }

    #[test]
    fn test_single_choice_zero() {
        let (m0, m1, received) = run_ot(vec![false], 11, 12);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], m0[0]);
        assert_ne!(received[0], m1[0]);
    }

    #[test]
    fn test_single_choice_one() {
        let (m0, m1, received) = run_ot(vec![true], 13, 14);
        assert_eq!(received[0], m1[0]);
        assert_ne!(received[0], m0[0]);
    }

    #[test]
    fn test_batch_alternating() {
        let choices = (0..128).map(|i| i % 2 == 1).collect::<Vec<bool>>();
        let (m0, m1, received) = run_ot(choices.clone(), 15, 16);
        assert_eq!(m0.len(), 128);
        assert_eq!(m1.len(), 128);
        assert_eq!(received.len(), 128);
        for (i, &b) in choices.iter().enumerate() {
            assert_eq!(received[i], if b { m1[i] } else { m0[i] });
            assert_ne!(received[i], if b { m0[i] } else { m1[i] });
        }
    }

    #[test]
    fn test_batch_random_choices() {
        let mut rng = AesRng::from_seed(Block::from([17u8; 16]));
        let choices = (0..1000).map(|_| rng.gen::<bool>()).collect::<Vec<bool>>();
        let (m0, m1, received) = run_ot(choices.clone(), 18, 19);
        for (i, &b) in choices.iter().enumerate() {
            assert_eq!(received[i], if b { m1[i] } else { m0[i] });
        }

        // every output key is distinct from every other
        let mut seen = HashSet::new();
        for key in m0.iter().chain(m1.iter()) {
            assert!(seen.insert(*key));
        }
    }

    #[test]
    fn test_empty_batch() {
        let (m0, m1, received) = run_ot(vec![], 20, 21);
        assert!(m0.is_empty());
        assert!(m1.is_empty());
        assert!(received.is_empty());
    }

    #[test]
    fn test_batches_are_independent() {
        let (m0_a, m1_a, _) = run_ot(vec![false; 8], 30, 31);
        let (m0_b, m1_b, _) = run_ot(vec![false; 8], 32, 33);
        for i in 0..8 {
            assert_ne!(m0_a[i], m0_b[i]);
            assert_ne!(m1_a[i], m1_b[i]);
        }
    }

    #[test]
    fn test_receiver_rejects_off_curve_m() {
        let (mut chan_s, mut chan_r) = local_channel_pair();

        let handle = thread::spawn(move || {
            let encoded = ProjectivePoint::GENERATOR.to_affine().to_encoded_point(false);
            let mut raw = encoded.as_bytes().to_vec();
            let last = raw.len() - 1;
            raw[last] ^= 1;
            let hex_bytes = hex::encode_upper(&raw).into_bytes();
            chan_s.write_u64(hex_bytes.len() as u64).unwrap();
            chan_s.write_bytes(&hex_bytes).unwrap();
            chan_s.flush().unwrap();
        });

        let mut rng = AesRng::from_seed(Block::from([22u8; 16]));
        let mut ot = NaorPinkasReceiver::new().unwrap();
        let res = ot.receive(&mut chan_r, &[false], &mut rng);
        assert!(matches!(res, Err(OtError::WireDecode(_))));
        handle.join().unwrap();
    }

    #[test]
    fn test_receiver_rejects_corrupt_length_prefix() {
        let (mut chan_s, mut chan_r) = local_channel_pair();

        let handle = thread::spawn(move || {
            chan_s.write_u64(u64::MAX).unwrap();
            chan_s.flush().unwrap();
        });

        let mut rng = AesRng::from_seed(Block::from([23u8; 16]));
        let mut ot = NaorPinkasReceiver::new().unwrap();
        let res = ot.receive(&mut chan_r, &[true], &mut rng);
        assert!(matches!(res, Err(OtError::WireDecode(_))));
        handle.join().unwrap();
    }

    #[test]
    fn test_sender_rejects_identity_s() {
        let (mut chan_s, mut chan_r) = local_channel_pair();

        let handle = thread::spawn(move || {
            let mut rng = AesRng::from_seed(Block::from([24u8; 16]));
            let mut ot = NaorPinkasSender::new().unwrap();
            ot.send(&mut chan_s, 1, &mut rng)
        });

        // drain M, then answer with the identity encoding
        read_point(&mut chan_r).unwrap();
        chan_r.write_u64(2).unwrap();
        chan_r.write_bytes(b"00").unwrap();
        chan_r.flush().unwrap();

        let res = handle.join().unwrap();
        assert!(matches!(res, Err(OtError::WireDecode(_))));
    }
}
