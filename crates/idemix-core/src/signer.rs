//! Signer config generation
//!
//! Issues a credential binding a fresh user secret to the OU and role
//! attributes, then packs it into a [`SignerConfig`].

use k256::{ProjectivePoint, Scalar};

use crate::crypto::{decode_point, decode_scalar, encode_point, encode_scalar, hash_to_scalar, random_scalar};
use crate::error::{Error, Result};
use crate::issuer::{issuer_secret, IdemixCa};
use crate::types::{
    Credential, IssuerKey, IssuerPublicKey, Role, SignerConfig, ATTRIBUTE_INDEX_OU,
    ATTRIBUTE_INDEX_ROLE, ATTRIBUTE_NAMES,
};

/// Source of signer configs for an existing issuer key
pub trait SignerConfigGenerator {
    /// Generate a serialized signer config
    fn generate_signer_config(
        &self,
        is_admin: bool,
        org_unit: &str,
        issuer_key: &IssuerKey,
    ) -> Result<Vec<u8>>;
}

impl SignerConfigGenerator for IdemixCa {
    fn generate_signer_config(
        &self,
        is_admin: bool,
        org_unit: &str,
        issuer_key: &IssuerKey,
    ) -> Result<Vec<u8>> {
        let ipk = issuer_key.public();
        ipk.validate()?;
        if ipk.attribute_names != ATTRIBUTE_NAMES {
            return Err(Error::InvalidKey(format!(
                "unsupported attribute names: {:?}",
                ipk.attribute_names
            )));
        }
        let isk = issuer_secret(issuer_key)?;

        let mut attrs = vec![Scalar::ZERO; ipk.attribute_names.len()];
        attrs[ATTRIBUTE_INDEX_OU] = ou_attribute(org_unit);
        attrs[ATTRIBUTE_INDEX_ROLE] = Scalar::from(Role::from_admin_flag(is_admin) as u64);

        let sk = random_scalar();
        let nym = decode_point(&ipk.h_sk)? * sk;
        let commitment = attribute_commitment(ipk, &nym, &attrs)?;

        // Issuer Schnorr signature over the commitment
        let k = random_scalar();
        let r = ProjectivePoint::GENERATOR * k;
        let e = signature_challenge(ipk, &r, &commitment);
        let s = k + e * isk;

        let credential = Credential {
            nym: encode_point(&nym),
            attrs: attrs.iter().map(encode_scalar).collect(),
            r: encode_point(&r),
            s: encode_scalar(&s),
        };

        let sk_bytes = encode_scalar(&sk);
        verify_credential(&credential, ipk, Some(sk_bytes.as_slice()))?;

        let config = SignerConfig {
            cred: prost::Message::encode_to_vec(&credential),
            sk: sk_bytes,
            organizational_unit_identifier: org_unit.to_string(),
            is_admin,
        };

        Ok(config.to_bytes())
    }
}

/// Scalar value certified for an organizational unit
pub fn ou_attribute(org_unit: &str) -> Scalar {
    hash_to_scalar(&[b"idemix-ou".as_slice(), org_unit.as_bytes()])
}

/// Verify a credential against an issuer public key.
///
/// When `sk` is given the pseudonym must also open to it.
pub fn verify_credential(
    credential: &Credential,
    ipk: &IssuerPublicKey,
    sk: Option<&[u8]>,
) -> Result<()> {
    if credential.attrs.len() != ipk.attribute_names.len() {
        return Err(Error::CredentialVerificationFailed);
    }

    let nym = decode_point(&credential.nym)?;
    if let Some(sk) = sk {
        let sk = decode_scalar(sk)?;
        if decode_point(&ipk.h_sk)? * sk != nym {
            return Err(Error::CredentialVerificationFailed);
        }
    }

    let attrs = credential
        .attrs
        .iter()
        .map(|a| decode_scalar(a))
        .collect::<Result<Vec<_>>>()?;
    let commitment = attribute_commitment(ipk, &nym, &attrs)?;

    let r = decode_point(&credential.r)?;
    let s = decode_scalar(&credential.s)?;
    let w = decode_point(&ipk.w)?;
    let e = signature_challenge(ipk, &r, &commitment);

    if ProjectivePoint::GENERATOR * s != r + w * e {
        return Err(Error::CredentialVerificationFailed);
    }

    Ok(())
}

fn attribute_commitment(
    ipk: &IssuerPublicKey,
    nym: &ProjectivePoint,
    attrs: &[Scalar],
) -> Result<ProjectivePoint> {
    let mut commitment = *nym;
    for (base, value) in ipk.h_attrs.iter().zip(attrs) {
        commitment += decode_point(base)? * value;
    }
    Ok(commitment)
}

fn signature_challenge(ipk: &IssuerPublicKey, r: &ProjectivePoint, commitment: &ProjectivePoint) -> Scalar {
    hash_to_scalar(&[
        b"idemix-credential".as_slice(),
        encode_point(r).as_slice(),
        encode_point(commitment).as_slice(),
        ipk.hash.as_slice(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::IssuerKeyGenerator;

    fn issue(is_admin: bool, org_unit: &str) -> (IssuerKey, SignerConfig) {
        let ca = IdemixCa::new();
        let key = ca.generate_issuer_key().unwrap();
        let bytes = ca.generate_signer_config(is_admin, org_unit, &key).unwrap();
        (key, SignerConfig::from_bytes(&bytes).unwrap())
    }

    #[test]
    fn test_signer_config_carries_attributes() {
        let (key, config) = issue(true, "dept1");

        assert_eq!(config.organizational_unit_identifier, "dept1");
        assert!(config.is_admin);

        let credential = config.credential().unwrap();
        verify_credential(&credential, key.public(), Some(config.sk.as_slice())).unwrap();

        assert_eq!(
            credential.attrs[ATTRIBUTE_INDEX_OU],
            encode_scalar(&ou_attribute("dept1"))
        );
        assert_eq!(
            credential.attrs[ATTRIBUTE_INDEX_ROLE],
            encode_scalar(&Scalar::ONE)
        );
    }

    #[test]
    fn test_member_role_and_empty_ou() {
        let (key, config) = issue(false, "");

        assert!(!config.is_admin);
        assert_eq!(config.organizational_unit_identifier, "");

        let credential = config.credential().unwrap();
        assert_eq!(
            credential.attrs[ATTRIBUTE_INDEX_ROLE],
            encode_scalar(&Scalar::ZERO)
        );
        verify_credential(&credential, key.public(), None).unwrap();
    }

    #[test]
    fn test_credential_rejected_under_other_issuer() {
        let (_, config) = issue(false, "dept1");
        let other = IdemixCa::new().generate_issuer_key().unwrap();

        let credential = config.credential().unwrap();
        assert!(verify_credential(&credential, other.public(), None).is_err());
    }

    #[test]
    fn test_tampered_attribute_fails_verification() {
        let (key, config) = issue(false, "dept1");
        let mut credential = config.credential().unwrap();
        credential.attrs[ATTRIBUTE_INDEX_ROLE] = encode_scalar(&Scalar::ONE);

        assert!(matches!(
            verify_credential(&credential, key.public(), None),
            Err(Error::CredentialVerificationFailed)
        ));
    }

    #[test]
    fn test_mismatched_issuer_pair_is_refused() {
        let ca = IdemixCa::new();
        let a = ca.generate_issuer_key().unwrap();
        let b = ca.generate_issuer_key().unwrap();
        let mixed = IssuerKey::new(a.secret().clone(), b.public().clone());

        assert!(ca.generate_signer_config(true, "dept1", &mixed).is_err());
    }
}
