//! Error types for idemix-core

use thiserror::Error;

/// Result type alias for idemix-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by key generation, credential issuance and encoding
#[derive(Debug, Error)]
pub enum Error {
    /// Cryptographic failure (bad point, bad scalar, failed proof)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Structurally invalid issuer key
    #[error("Invalid issuer key: {0}")]
    InvalidKey(String),

    /// Protobuf decoding failed
    #[error("Decoding error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Credential does not verify against the issuer public key
    #[error("Credential is not cryptographically valid")]
    CredentialVerificationFailed,
}
