use openssl::x509::X509;

use crate::block::decode_first_block;
use crate::jwks::Jwks;
use crate::key::{compute_key_id, PublicKey};
use crate::{CertificateError, Error};

/// Result of converting a certificate: the rendered key set and the ID of
/// the key it contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub document: String,
    pub key_id: String,
}

/// Converts a PEM encoded X.509 certificate into a JWK Set document holding
/// its public key.
///
/// Only the first PEM block is read and its label is not checked. The
/// certificate itself is not validated beyond parsing: no chain, expiry or
/// revocation checks are made.
pub fn convert(pem_text: &str) -> Result<Conversion, Error> {
    let block = decode_first_block(pem_text)?;

    let certificate = parse_certificate(block.contents())?;
    let public_key = certificate
        .public_key()
        .map_err(|e| Error::InvalidCertificate(e.into()))
        .and_then(PublicKey::from_pkey)?;

    let jwk = public_key.to_jwk()?;
    let key_id = compute_key_id(&public_key)?;

    tracing::debug!(
        kid = key_id.as_str(),
        alg = jwk.algorithm().map(|a| a.as_str()).unwrap_or_default(),
        "derived key ID for certificate public key"
    );

    let document = Jwks::new(vec![jwk.with_key_id(key_id.clone())]).to_pretty_json()?;

    Ok(Conversion { document, key_id })
}

/// Parses exactly one DER certificate. openssl stops reading after the
/// outer SEQUENCE, so anything left over is rejected here.
fn parse_certificate(der: &[u8]) -> Result<X509, Error> {
    let certificate = X509::from_der(der).map_err(|e| Error::InvalidCertificate(e.into()))?;

    match encoded_len(der) {
        Some(len) if len < der.len() => Err(Error::InvalidCertificate(
            CertificateError::TrailingData(der.len() - len),
        )),
        _ => Ok(certificate),
    }
}

/// Total length (header plus contents) of the DER element at the start of
/// `der`, when its header is well formed.
fn encoded_len(der: &[u8]) -> Option<usize> {
    let first = *der.get(1)?;
    if first < 0x80 {
        return Some(2 + first as usize);
    }

    let count = (first & 0x7f) as usize;
    if count == 0 || count > std::mem::size_of::<usize>() {
        return None;
    }
    let len = der
        .get(2..2 + count)?
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);
    len.checked_add(2 + count)
}
