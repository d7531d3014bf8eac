//! Issuer key generation
//!
//! Generates the issuer secret scalar, random attribute bases and a
//! Schnorr proof that the issuer knows the secret behind `w`.

use k256::{ProjectivePoint, Scalar};

use crate::crypto::{decode_point, decode_scalar, encode_point, encode_scalar, hash_to_scalar, random_scalar};
use crate::error::{Error, Result};
use crate::types::{IssuerKey, IssuerPublicKey, IssuerSecretKey, ATTRIBUTE_NAMES};

/// Source of fresh issuer key pairs
pub trait IssuerKeyGenerator {
    /// Generate a new issuer key pair
    fn generate_issuer_key(&self) -> Result<IssuerKey>;
}

/// Identity Mixer certificate authority backed by secp256k1
#[derive(Debug, Clone, Copy, Default)]
pub struct IdemixCa;

impl IdemixCa {
    pub fn new() -> Self {
        Self
    }
}

impl IssuerKeyGenerator for IdemixCa {
    fn generate_issuer_key(&self) -> Result<IssuerKey> {
        let isk = random_scalar();
        let w = ProjectivePoint::GENERATOR * isk;

        let mut ipk = IssuerPublicKey {
            attribute_names: ATTRIBUTE_NAMES.iter().map(|name| name.to_string()).collect(),
            h_sk: encode_point(&random_base()),
            h_rand: encode_point(&random_base()),
            h_attrs: ATTRIBUTE_NAMES
                .iter()
                .map(|_| encode_point(&random_base()))
                .collect(),
            w: encode_point(&w),
            proof_c: Vec::new(),
            proof_s: Vec::new(),
            hash: Vec::new(),
        };

        // Schnorr proof of knowledge of isk
        let r = random_scalar();
        let t = ProjectivePoint::GENERATOR * r;
        let c = proof_challenge(&ipk, &t);
        let s = r + c * isk;

        ipk.proof_c = encode_scalar(&c);
        ipk.proof_s = encode_scalar(&s);
        ipk.hash = ipk.compute_hash().to_vec();

        Ok(IssuerKey::new(IssuerSecretKey::new(encode_scalar(&isk)), ipk))
    }
}

impl IssuerPublicKey {
    /// Full verification: structure, digest and proof of knowledge
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.hash != self.compute_hash() {
            return Err(Error::InvalidKey("hash does not match contents".to_string()));
        }

        let w = decode_point(&self.w)?;
        let c = decode_scalar(&self.proof_c)?;
        let s = decode_scalar(&self.proof_s)?;

        let t = ProjectivePoint::GENERATOR * s - w * c;
        if proof_challenge(self, &t) != c {
            return Err(Error::InvalidKey(
                "proof of knowledge of the secret key does not verify".to_string(),
            ));
        }

        Ok(())
    }
}

/// Decode the issuer secret and make sure it belongs to the public key
pub(crate) fn issuer_secret(key: &IssuerKey) -> Result<Scalar> {
    let isk = decode_scalar(key.secret().as_bytes())
        .map_err(|e| Error::InvalidKey(format!("issuer secret key: {}", e)))?;
    let w = decode_point(&key.public().w)?;

    if ProjectivePoint::GENERATOR * isk != w {
        return Err(Error::InvalidKey(
            "issuer secret key does not match the public key".to_string(),
        ));
    }

    Ok(isk)
}

fn random_base() -> ProjectivePoint {
    ProjectivePoint::GENERATOR * random_scalar()
}

fn proof_challenge(ipk: &IssuerPublicKey, t: &ProjectivePoint) -> Scalar {
    let t = encode_point(t);

    let mut parts: Vec<&[u8]> = vec![
        b"idemix-ipk-proof".as_slice(),
        t.as_slice(),
        ipk.w.as_slice(),
        ipk.h_sk.as_slice(),
        ipk.h_rand.as_slice(),
    ];
    parts.extend(ipk.h_attrs.iter().map(Vec::as_slice));
    parts.extend(ipk.attribute_names.iter().map(String::as_bytes));

    hash_to_scalar(&parts)
}
