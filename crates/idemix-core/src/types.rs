//! Issuer key, credential and signer config records
//!
//! The public records are protobuf messages so that downstream MSP
//! components can decode them without sharing Rust types.

use prost::Message;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{decode_point, decode_scalar, sha256_multi};
use crate::error::{Error, Result};

/// Attribute names certified in every credential, in order
pub const ATTRIBUTE_NAMES: [&str; 2] = ["OU", "Role"];

/// Index of the organizational unit attribute
pub const ATTRIBUTE_INDEX_OU: usize = 0;

/// Index of the role attribute
pub const ATTRIBUTE_INDEX_ROLE: usize = 1;

/// MSP role carried in the role attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member = 0,
    Admin = 1,
}

impl Role {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::Member
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Member => write!(f, "member"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Public half of an issuer key
#[derive(Clone, PartialEq, Message)]
pub struct IssuerPublicKey {
    /// Names of the certified attributes
    #[prost(string, repeated, tag = "1")]
    pub attribute_names: Vec<String>,

    /// Base for the user secret
    #[prost(bytes = "vec", tag = "2")]
    pub h_sk: Vec<u8>,

    /// Base for the blinding randomness
    #[prost(bytes = "vec", tag = "3")]
    pub h_rand: Vec<u8>,

    /// One base per attribute
    #[prost(bytes = "vec", repeated, tag = "4")]
    pub h_attrs: Vec<Vec<u8>>,

    /// Issuer public point (isk * G)
    #[prost(bytes = "vec", tag = "5")]
    pub w: Vec<u8>,

    /// Proof of knowledge of isk: challenge
    #[prost(bytes = "vec", tag = "6")]
    pub proof_c: Vec<u8>,

    /// Proof of knowledge of isk: response
    #[prost(bytes = "vec", tag = "7")]
    pub proof_s: Vec<u8>,

    /// SHA-256 over the record with this field empty
    #[prost(bytes = "vec", tag = "8")]
    pub hash: Vec<u8>,
}

impl IssuerPublicKey {
    /// Serialize to protobuf bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Deserialize from protobuf bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    /// Digest over every field except `hash`
    pub fn compute_hash(&self) -> [u8; 32] {
        let mut unhashed = self.clone();
        unhashed.hash.clear();
        sha256_multi(&[b"idemix-ipk".as_slice(), unhashed.encode_to_vec().as_slice()])
    }

    /// Short hex fingerprint for display
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.compute_hash()[..8])
    }

    /// Structural validation: every point and scalar decodes and the
    /// attribute bases line up with the attribute names.
    ///
    /// This does not verify the proof of knowledge; see
    /// [`IssuerPublicKey::check`] for that.
    pub fn validate(&self) -> Result<()> {
        if self.attribute_names.is_empty() {
            return Err(Error::InvalidKey("no attribute names".to_string()));
        }

        if self.attribute_names.len() != self.h_attrs.len() {
            return Err(Error::InvalidKey(format!(
                "{} attribute names but {} attribute bases",
                self.attribute_names.len(),
                self.h_attrs.len()
            )));
        }

        for (name, field) in [("h_sk", &self.h_sk), ("h_rand", &self.h_rand), ("w", &self.w)] {
            decode_point(field).map_err(|e| Error::InvalidKey(format!("{}: {}", name, e)))?;
        }

        for (i, base) in self.h_attrs.iter().enumerate() {
            decode_point(base).map_err(|e| Error::InvalidKey(format!("h_attrs[{}]: {}", i, e)))?;
        }

        decode_scalar(&self.proof_c).map_err(|e| Error::InvalidKey(format!("proof_c: {}", e)))?;
        decode_scalar(&self.proof_s).map_err(|e| Error::InvalidKey(format!("proof_s: {}", e)))?;

        Ok(())
    }
}

/// Secret half of an issuer key, opaque outside the issuer module
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct IssuerSecretKey(Vec<u8>);

impl IssuerSecretKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for IssuerSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IssuerSecretKey(<redacted {} bytes>)", self.0.len())
    }
}

/// Issuer key pair. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct IssuerKey {
    secret: IssuerSecretKey,
    public: IssuerPublicKey,
}

impl IssuerKey {
    pub fn new(secret: IssuerSecretKey, public: IssuerPublicKey) -> Self {
        Self { secret, public }
    }

    pub fn secret(&self) -> &IssuerSecretKey {
        &self.secret
    }

    pub fn public(&self) -> &IssuerPublicKey {
        &self.public
    }
}

/// Issuer-signed credential over a user pseudonym and attribute values
#[derive(Clone, PartialEq, Message)]
pub struct Credential {
    /// Pseudonym commitment (sk * h_sk)
    #[prost(bytes = "vec", tag = "1")]
    pub nym: Vec<u8>,

    /// Attribute values as scalars, ordered like `attribute_names`
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub attrs: Vec<Vec<u8>>,

    /// Signature commitment
    #[prost(bytes = "vec", tag = "3")]
    pub r: Vec<u8>,

    /// Signature response
    #[prost(bytes = "vec", tag = "4")]
    pub s: Vec<u8>,
}

/// Signer config consumed by an Identity Mixer MSP
#[derive(Clone, PartialEq, Message)]
pub struct SignerConfig {
    /// Serialized [`Credential`]
    #[prost(bytes = "vec", tag = "1")]
    pub cred: Vec<u8>,

    /// User secret key
    #[prost(bytes = "vec", tag = "2")]
    pub sk: Vec<u8>,

    #[prost(string, tag = "3")]
    pub organizational_unit_identifier: String,

    #[prost(bool, tag = "4")]
    pub is_admin: bool,
}

impl SignerConfig {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    /// Decode the embedded credential
    pub fn credential(&self) -> Result<Credential> {
        Ok(Credential::decode(self.cred.as_slice())?)
    }
}
