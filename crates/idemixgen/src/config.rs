//! Provisioning configuration and on-disk layout

use std::path::{Path, PathBuf};

/// Issuer root, holds the secret and public issuer key
pub const ISSUER_DIR: &str = "ca";

/// MSP root, holds the public issuer key and the signer directory
pub const MSP_DIR: &str = "msp";

/// Signer directory inside the MSP root
pub const SIGNER_DIR: &str = "signer";

pub const ISSUER_SECRET_KEY_FILE: &str = "IssuerSecretKey";
pub const ISSUER_PUBLIC_KEY_FILE: &str = "IssuerPublicKey";
pub const SIGNER_CONFIG_FILE: &str = "SignerConfig";

/// Configuration shared by every command, built once from the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// Directory in which the issuer and MSP roots live
    pub base_dir: PathBuf,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }
}

impl ProvisionConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Artifact paths under the configured base directory
    pub fn layout(&self) -> Layout {
        Layout::new(&self.base_dir)
    }
}

/// Options for the `signerconfig` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerOptions {
    /// Organizational unit of the signer, may be empty
    pub org_unit: String,

    /// Whether the signer gets the admin role
    pub admin: bool,
}

/// Paths of every artifact this tool reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn issuer_dir(&self) -> PathBuf {
        self.base_dir.join(ISSUER_DIR)
    }

    pub fn msp_dir(&self) -> PathBuf {
        self.base_dir.join(MSP_DIR)
    }

    pub fn signer_dir(&self) -> PathBuf {
        self.msp_dir().join(SIGNER_DIR)
    }

    /// `ca/IssuerSecretKey`
    pub fn issuer_secret_key(&self) -> PathBuf {
        self.issuer_dir().join(ISSUER_SECRET_KEY_FILE)
    }

    /// `ca/IssuerPublicKey`
    pub fn issuer_public_key(&self) -> PathBuf {
        self.issuer_dir().join(ISSUER_PUBLIC_KEY_FILE)
    }

    /// `msp/IssuerPublicKey`
    pub fn msp_issuer_public_key(&self) -> PathBuf {
        self.msp_dir().join(ISSUER_PUBLIC_KEY_FILE)
    }

    /// `msp/signer/SignerConfig`
    pub fn signer_config(&self) -> PathBuf {
        self.signer_dir().join(SIGNER_CONFIG_FILE)
    }
}
