//! Idemix Core - Issuer keys, credentials and signer configs
//!
//! This crate provides the key material consumed by the Identity Mixer MSP:
//! - Issuer key pairs with a proof of knowledge of the secret
//! - Credentials over the OU and role attributes
//! - Signer configs bundling a credential with the user secret
//!
//! Provisioning tools depend on the [`IssuerKeyGenerator`] and
//! [`SignerConfigGenerator`] traits; [`IdemixCa`] is the secp256k1 backend.

pub mod crypto;
pub mod error;
pub mod issuer;
pub mod signer;
pub mod types;

pub use error::{Error, Result};
pub use issuer::{IdemixCa, IssuerKeyGenerator};
pub use signer::{ou_attribute, verify_credential, SignerConfigGenerator};
pub use types::{
    Credential, IssuerKey, IssuerPublicKey, IssuerSecretKey, Role, SignerConfig, ATTRIBUTE_NAMES,
};
