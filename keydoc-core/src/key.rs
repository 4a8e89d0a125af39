use openssl::hash::{Hasher, MessageDigest};
use openssl::nid::Nid;
use openssl::pkey::{Id, PKey, Public};
use openssl::rsa::Rsa;

use crate::jwks::{Jwk, KeyAlgorithm};
use crate::Error;

/// Public key taken from a certificate, tagged by algorithm family.
///
/// Only [`PublicKey::Rsa`] can currently be published; the other variants
/// exist so that the rejection carries a meaningful key type, and so a new
/// family only needs an arm in [`PublicKey::to_jwk`].
#[derive(Debug)]
pub enum PublicKey {
    Rsa(Rsa<Public>),
    Ec(PKey<Public>),
    Ed25519(PKey<Public>),
    Unsupported(PKey<Public>),
}

impl PublicKey {
    pub fn from_pkey(pkey: PKey<Public>) -> Result<Self, Error> {
        Ok(match pkey.id() {
            Id::RSA => PublicKey::Rsa(pkey.rsa().map_err(Error::KeyEncodingError)?),
            Id::EC => PublicKey::Ec(pkey),
            Id::ED25519 => PublicKey::Ed25519(pkey),
            _ => PublicKey::Unsupported(pkey),
        })
    }

    pub fn name(&self) -> String {
        match self {
            PublicKey::Rsa(_) => "RSA".to_string(),
            PublicKey::Ec(_) => "EC".to_string(),
            PublicKey::Ed25519(_) => "Ed25519".to_string(),
            PublicKey::Unsupported(pkey) => {
                let id = pkey.id();
                Nid::from_raw(id.as_raw())
                    .short_name()
                    .map(str::to_string)
                    .unwrap_or_else(|_| format!("unknown ({})", id.as_raw()))
            }
        }
    }

    /// The JWK for this key, without a key ID.
    ///
    /// This is the one place that decides which key families are published
    /// and which signature algorithm each is tagged with. RSA keys are always
    /// RS256, whatever their size or the certificate's own signature
    /// algorithm.
    pub fn to_jwk(&self) -> Result<Jwk, Error> {
        match self {
            PublicKey::Rsa(rsa) => Ok(Jwk::rsa(rsa, KeyAlgorithm::Rs256)),
            PublicKey::Ec(_) | PublicKey::Ed25519(_) | PublicKey::Unsupported(_) => {
                Err(Error::UnsupportedKeyType(self.name()))
            }
        }
    }

    /// DER encoded SubjectPublicKeyInfo.
    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        let der = match self {
            PublicKey::Rsa(rsa) => rsa.public_key_to_der(),
            PublicKey::Ec(pkey) | PublicKey::Ed25519(pkey) | PublicKey::Unsupported(pkey) => {
                pkey.public_key_to_der()
            }
        };
        der.map_err(Error::KeyEncodingError)
    }
}

/// Key ID: unpadded base64url SHA-256 of the DER SubjectPublicKeyInfo.
pub fn compute_key_id(public_key: &PublicKey) -> Result<String, Error> {
    let public_key_der = public_key.to_der()?;
    let mut hasher = Hasher::new(MessageDigest::sha256()).map_err(Error::KeyEncodingError)?;
    hasher
        .update(&public_key_der)
        .map_err(Error::KeyEncodingError)?;
    let digest_bytes = hasher.finish().map_err(Error::KeyEncodingError)?;
    let kid = base64::encode_config(&digest_bytes, base64::URL_SAFE_NO_PAD);
    Ok(kid)
}
