pub mod block;
pub mod convert;
pub mod jwks;
pub mod key;
pub mod resource;

pub use convert::{convert, Conversion};
pub use jwks::{Jwk, Jwks, KeyAlgorithm, KeyType, KeyUse};
pub use key::{compute_key_id, PublicKey};
pub use resource::{Change, KeyDocument};

/// Environment variable holding the certificate PEM when no file is given.
pub const CERT_PEM_ENV: &str = "CERT_PEM";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to decode PEM: {0}")]
    InvalidPEM(#[source] pem::PemError),
    #[error("failed to parse certificate: {0}")]
    InvalidCertificate(#[source] CertificateError),
    #[error("unsupported public key type {0}, must be RSA")]
    UnsupportedKeyType(String),
    #[error("failed to serialize public key to DER: {0}")]
    KeyEncodingError(#[source] openssl::error::ErrorStack),
    #[error("JSON serialization error: {0}")]
    SerializationError(#[source] serde_json::Error),
    #[error("invalid key set document: {0}")]
    InvalidDocument(#[source] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum CertificateError {
    #[error("{0}")]
    Parse(#[from] openssl::error::ErrorStack),
    #[error("{0} byte(s) of trailing data after certificate")]
    TrailingData(usize),
}
