//! Error types for provisioning runs

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that abort a provisioning run
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A target path is already present; `within_msp` marks an entry
    /// nested inside an existing MSP root
    #[error("{}", refusal(.path, *.within_msp))]
    AlreadyProvisioned { path: PathBuf, within_msp: bool },

    /// Directory or file could not be created, written or probed
    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Issuer key file could not be read back
    #[error("Failed to open issuer key file: {}", .path.display())]
    MissingKeyMaterial {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Issuer public key file does not hold a usable record
    #[error("Malformed issuer public key {}: {reason}", .path.display())]
    MalformedKey { path: PathBuf, reason: String },

    /// Key or signer config generation failed
    #[error("Generation failed: {0}")]
    Generation(#[from] idemix_core::Error),
}

fn refusal(path: &Path, within_msp: bool) -> String {
    if within_msp {
        format!(
            "This MSP config already contains a directory \"{}\"",
            path.display()
        )
    } else {
        format!("Directory {} already exists", path.display())
    }
}

impl ProvisionError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ProvisionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_messages() {
        let root = ProvisionError::AlreadyProvisioned {
            path: PathBuf::from("ca"),
            within_msp: false,
        };
        assert_eq!(root.to_string(), "Directory ca already exists");

        let signer = ProvisionError::AlreadyProvisioned {
            path: PathBuf::from("msp/signer"),
            within_msp: true,
        };
        assert_eq!(
            signer.to_string(),
            "This MSP config already contains a directory \"msp/signer\""
        );
    }
}
