//! Issuer key round-trip
//!
//! `ca-keygen` persists the issuer key pair; `signerconfig` reads it back
//! from the same layout. The public key is written twice with identical
//! bytes so that the MSP root can be shipped without the issuer root.

use std::path::Path;
use tracing::{debug, info};

use idemix_core::{IssuerKey, IssuerPublicKey, IssuerSecretKey};

use crate::config::Layout;
use crate::error::{ProvisionError, Result};
use crate::store::{read_artifact, write_artifact};

/// Reads and writes issuer key material under a [`Layout`]
pub struct IssuerKeyStore<'a> {
    layout: &'a Layout,
}

impl<'a> IssuerKeyStore<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    /// Write the secret key and both copies of the public key.
    ///
    /// Both roots must already exist.
    pub fn persist(&self, key: &IssuerKey) -> Result<()> {
        let public_bytes = key.public().to_bytes();

        write_artifact(&self.layout.issuer_secret_key(), key.secret().as_bytes())?;
        write_artifact(&self.layout.issuer_public_key(), &public_bytes)?;
        write_artifact(&self.layout.msp_issuer_public_key(), &public_bytes)?;

        info!(
            fingerprint = %key.public().fingerprint(),
            "issuer key material written"
        );
        Ok(())
    }

    /// Reassemble the issuer key pair from `ca/`
    pub fn reconstruct(&self) -> Result<IssuerKey> {
        let secret_path = self.layout.issuer_secret_key();
        let secret = IssuerSecretKey::new(read_key_file(&secret_path)?);

        let public_path = self.layout.issuer_public_key();
        let public_bytes = read_key_file(&public_path)?;

        let public = IssuerPublicKey::from_bytes(&public_bytes).map_err(|e| {
            ProvisionError::MalformedKey {
                path: public_path.clone(),
                reason: e.to_string(),
            }
        })?;
        public
            .validate()
            .map_err(|e| ProvisionError::MalformedKey {
                path: public_path.clone(),
                reason: e.to_string(),
            })?;

        debug!(fingerprint = %public.fingerprint(), "issuer key reconstructed");
        Ok(IssuerKey::new(secret, public))
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>> {
    read_artifact(path).map_err(|source| ProvisionError::MissingKeyMaterial {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_directory;
    use idemix_core::{IdemixCa, IssuerKeyGenerator};
    use std::fs;
    use tempfile::tempdir;

    fn prepared_layout(dir: &Path) -> Layout {
        let layout = Layout::new(dir);
        create_directory(&layout.issuer_dir()).unwrap();
        create_directory(&layout.msp_dir()).unwrap();
        layout
    }

    #[test]
    fn test_persist_then_reconstruct() {
        let dir = tempdir().unwrap();
        let layout = prepared_layout(dir.path());
        let key = IdemixCa::new().generate_issuer_key().unwrap();

        let store = IssuerKeyStore::new(&layout);
        store.persist(&key).unwrap();
        let restored = store.reconstruct().unwrap();

        assert_eq!(restored.public().to_bytes(), key.public().to_bytes());
        assert_eq!(restored.secret(), key.secret());
    }

    #[test]
    fn test_public_key_copies_are_identical() {
        let dir = tempdir().unwrap();
        let layout = prepared_layout(dir.path());
        let key = IdemixCa::new().generate_issuer_key().unwrap();

        IssuerKeyStore::new(&layout).persist(&key).unwrap();

        let issuer_copy = fs::read(layout.issuer_public_key()).unwrap();
        let msp_copy = fs::read(layout.msp_issuer_public_key()).unwrap();
        assert_eq!(issuer_copy, msp_copy);
    }

    #[test]
    fn test_missing_secret_key() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());

        match IssuerKeyStore::new(&layout).reconstruct() {
            Err(ProvisionError::MissingKeyMaterial { path, .. }) => {
                assert_eq!(path, layout.issuer_secret_key())
            }
            other => panic!("Expected MissingKeyMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_public_key() {
        let dir = tempdir().unwrap();
        let layout = prepared_layout(dir.path());
        write_artifact(&layout.issuer_secret_key(), &[0x11; 32]).unwrap();

        match IssuerKeyStore::new(&layout).reconstruct() {
            Err(ProvisionError::MissingKeyMaterial { path, .. }) => {
                assert_eq!(path, layout.issuer_public_key())
            }
            other => panic!("Expected MissingKeyMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_public_key() {
        let dir = tempdir().unwrap();
        let layout = prepared_layout(dir.path());
        write_artifact(&layout.issuer_secret_key(), &[0x11; 32]).unwrap();
        // Truncated length-delimited field
        write_artifact(&layout.issuer_public_key(), &[0x0a, 0xff, 0x01]).unwrap();

        assert!(matches!(
            IssuerKeyStore::new(&layout).reconstruct(),
            Err(ProvisionError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_empty_public_key_is_malformed() {
        let dir = tempdir().unwrap();
        let layout = prepared_layout(dir.path());
        write_artifact(&layout.issuer_secret_key(), &[0x11; 32]).unwrap();
        write_artifact(&layout.issuer_public_key(), &[]).unwrap();

        assert!(matches!(
            IssuerKeyStore::new(&layout).reconstruct(),
            Err(ProvisionError::MalformedKey { .. })
        ));
    }
}
