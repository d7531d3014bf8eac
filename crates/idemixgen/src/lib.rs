//! idemixgen - Identity Mixer MSP provisioning
//!
//! This crate generates the on-disk key material used by an Identity
//! Mixer MSP:
//! - `ca-keygen`: issuer key pair into `ca/` and the public key into `msp/`
//! - `signerconfig`: a default signer credential into `msp/signer/`
//! - `version`: build information
//!
//! Provisioning never overwrites existing material. A run that finds its
//! target directories already present fails before creating anything.

pub mod commands;
pub mod config;
pub mod error;
pub mod key_material;
pub mod store;
pub mod version;

pub use commands::{run, Command, Report};
pub use config::{Layout, ProvisionConfig, SignerOptions};
pub use error::{ProvisionError, Result};
pub use key_material::IssuerKeyStore;
