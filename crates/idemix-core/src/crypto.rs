//! secp256k1 helpers shared by issuer key generation and credential issuance

use k256::{
    elliptic_curve::{
        ops::Reduce,
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Size of a compressed point encoding
pub const POINT_SIZE: usize = 33;

/// Size of a scalar encoding
pub const SCALAR_SIZE: usize = 32;

/// Draw a uniformly random non-zero scalar
pub fn random_scalar() -> Scalar {
    loop {
        let scalar = Scalar::random(&mut OsRng);
        if !bool::from(scalar.is_zero()) {
            return scalar;
        }
    }
}

/// Length-prefixed SHA-256 over several byte strings
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Hash byte strings onto the scalar field (reduced mod n)
pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let digest = FieldBytes::from(sha256_multi(parts));
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

/// Compressed SEC1 encoding of a point
pub fn encode_point(point: &ProjectivePoint) -> Vec<u8> {
    point.to_affine().to_encoded_point(true).as_bytes().to_vec()
}

/// Decode a compressed SEC1 point, rejecting the identity
pub fn decode_point(bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != POINT_SIZE {
        return Err(Error::Crypto(format!(
            "Invalid point length: expected {}, got {}",
            POINT_SIZE,
            bytes.len()
        )));
    }

    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|e| Error::Crypto(format!("Invalid point encoding: {}", e)))?;
    let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
    let affine = affine.ok_or_else(|| Error::Crypto("Point is not on the curve".to_string()))?;

    if affine == AffinePoint::IDENTITY {
        return Err(Error::Crypto("Point is the identity".to_string()));
    }

    Ok(ProjectivePoint::from(affine))
}

/// Big-endian encoding of a scalar
pub fn encode_scalar(scalar: &Scalar) -> Vec<u8> {
    scalar.to_bytes().to_vec()
}

/// Decode a big-endian scalar, rejecting values >= n
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != SCALAR_SIZE {
        return Err(Error::Crypto(format!(
            "Invalid scalar length: expected {}, got {}",
            SCALAR_SIZE,
            bytes.len()
        )));
    }

    let scalar: Option<Scalar> = Scalar::from_repr(*FieldBytes::from_slice(bytes)).into();
    scalar.ok_or_else(|| Error::Crypto("Scalar is not reduced".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_encoding_is_compressed() {
        let point = ProjectivePoint::GENERATOR * random_scalar();
        let bytes = encode_point(&point);

        assert_eq!(bytes.len(), POINT_SIZE);
        assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
        assert_eq!(decode_point(&bytes).unwrap(), point);
    }

    #[test]
    fn test_decode_point_rejects_garbage() {
        assert!(decode_point(&[0u8; 10]).is_err());
        assert!(decode_point(&[0x05; POINT_SIZE]).is_err());
    }

    #[test]
    fn test_decode_scalar_rejects_unreduced() {
        assert!(decode_scalar(&[0xff; SCALAR_SIZE]).is_err());
        assert!(decode_scalar(&[0x01; 16]).is_err());
    }

    #[test]
    fn test_hash_to_scalar_is_domain_sensitive() {
        let a = hash_to_scalar(&[b"ab", b"c"]);
        let b = hash_to_scalar(&[b"a", b"bc"]);
        assert_ne!(a, b);
        assert_eq!(a, hash_to_scalar(&[b"ab", b"c"]));
    }
}
