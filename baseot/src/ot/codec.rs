//! Wire codec for curve points: compressed SEC1, hex digits, length-prefixed.

use crypto_core::AbstractChannel;
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::Group;
use p256::{AffinePoint, EncodedPoint, ProjectivePoint};

use super::errors::OtError;

// Longest legal SEC1 hex encoding: the uncompressed form, 65 bytes.
const MAX_POINT_HEX_LEN: u64 = 130;

/// Encode `point` as the hex digits of its compressed SEC1 form.
pub fn encode_point(point: &ProjectivePoint) -> Vec<u8> {
    let encoded = point.to_affine().to_encoded_point(true);
    hex::encode_upper(encoded.as_bytes()).into_bytes()
}

/// Decode a point from hex digits (either case). Rejects malformed hex,
/// encodings that do not satisfy the curve equation, and the point at
/// infinity.
pub fn decode_point(hex_bytes: &[u8]) -> Result<ProjectivePoint, OtError> {
    let raw = hex::decode(hex_bytes)
        .map_err(|e| OtError::WireDecode(format!("invalid point hex: {e}")))?;
    let encoded = EncodedPoint::from_bytes(&raw)
        .map_err(|e| OtError::WireDecode(format!("invalid SEC1 encoding: {e}")))?;
    let point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| OtError::WireDecode("point is not on the curve".into()))?;
    let point = ProjectivePoint::from(point);
    if bool::from(point.is_identity()) {
        return Err(OtError::WireDecode("point at infinity".into()));
    }
    Ok(point)
}

/// Write `point` as a `u64` length prefix followed by that many hex bytes.
pub fn write_point<C: AbstractChannel>(
    channel: &mut C,
    point: &ProjectivePoint,
) -> Result<(), OtError> {
    let hex_bytes = encode_point(point);
    channel.write_u64(hex_bytes.len() as u64)?;
    channel.write_bytes(&hex_bytes)?;
    Ok(())
}

/// Read a length-prefixed point.
pub fn read_point<C: AbstractChannel>(channel: &mut C) -> Result<ProjectivePoint, OtError> {
    let size = channel.read_u64()?;
    if size == 0 || size > MAX_POINT_HEX_LEN {
        return Err(OtError::WireDecode(format!(
            "implausible point length {size}"
        )));
    }
    let hex_bytes = channel.read_vec(size as usize)?;
    decode_point(&hex_bytes)
}
