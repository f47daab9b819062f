//! NIST P-256 group context: order handling and scalar sampling.

use p256::elliptic_curve::bigint::{ArrayEncoding, U256};
use p256::elliptic_curve::{Curve as _, PrimeField};
use p256::{NistP256, ProjectivePoint, Scalar};
use rand::{CryptoRng, Rng};

use super::errors::OtError;

/// Group context for one party: the prime order `q` of the P-256 generator
/// and the sampling ranges derived from it. Immutable once constructed.
pub struct Curve {
    order: U256,
    order_minus_one: U256,
}

impl Curve {
    /// Construct the context, retrieving the group order.
    pub fn new() -> Result<Self, OtError> {
        let order = NistP256::ORDER;
        if order == U256::ZERO {
            return Err(OtError::CurveInit("group order unavailable"));
        }
        Ok(Self {
            order_minus_one: order.wrapping_sub(&U256::ONE),
            order,
        })
    }

    /// The prime order `q` of the generator.
    pub fn order(&self) -> &U256 {
        &self.order
    }

    /// Sample a uniform scalar in `[0, q)`.
    pub fn random_scalar<R: CryptoRng + Rng>(&self, rng: &mut R) -> Result<Scalar, OtError> {
        self.random_scalar_below(&self.order, rng)
    }

    /// Sample a uniform scalar in `[1, q-1]`: a uniform draw from `[0, q-1)`
    /// shifted up by one, so zero is never produced.
    pub fn random_unit_scalar<R: CryptoRng + Rng>(&self, rng: &mut R) -> Result<Scalar, OtError> {
        let scalar = self.random_scalar_below(&self.order_minus_one, rng)?;
        Ok(scalar + Scalar::ONE)
    }

    /// `g^k`.
    pub fn mul_base(&self, k: &Scalar) -> ProjectivePoint {
        ProjectivePoint::GENERATOR * *k
    }

    // Rejection sampling over 256-bit candidates.
    fn random_scalar_below<R: CryptoRng + Rng>(
        &self,
        bound: &U256,
        rng: &mut R,
    ) -> Result<Scalar, OtError> {
        let mut buf = [0u8; 32];
        loop {
            rng.try_fill_bytes(&mut buf)?;
            let candidate = U256::from_be_slice(&buf);
            if candidate < *bound {
                return Option::<Scalar>::from(Scalar::from_repr(candidate.to_be_byte_array()))
                    .ok_or(OtError::CryptoInternal("candidate exceeds field order"));
            }
        }
    }
}
