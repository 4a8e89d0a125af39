use openssl::pkey::Public;
use openssl::rsa::Rsa;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// A JSON Web Key Set, as published in an OIDC discovery document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwks {
    keys: Vec<Jwk>,
}

impl Jwks {
    pub fn new(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    pub fn key_ids(&self) -> Vec<&str> {
        self.keys.iter().filter_map(|k| k.kid.as_deref()).collect()
    }

    /// Renders the set as JSON indented by two spaces.
    pub fn to_pretty_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::SerializationError)
    }
}

impl FromStr for Jwks {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::InvalidDocument)
    }
}

// Field order here is the field order on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwk {
    kty: KeyType,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    key_use: Option<KeyUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alg: Option<KeyAlgorithm>,
    n: String,
    e: String,
}

impl Jwk {
    /// Signature verification key carrying the modulus and exponent of `key`.
    pub fn rsa(key: &Rsa<Public>, alg: KeyAlgorithm) -> Self {
        Self {
            kty: KeyType::Rsa,
            key_use: Some(KeyUse::Sig),
            kid: None,
            alg: Some(alg),
            n: base64::encode_config(key.n().to_vec(), base64::URL_SAFE_NO_PAD),
            e: base64::encode_config(key.e().to_vec(), base64::URL_SAFE_NO_PAD),
        }
    }

    pub fn with_key_id(mut self, kid: String) -> Self {
        self.kid = Some(kid);
        self
    }

    pub fn key_type(&self) -> &KeyType {
        &self.kty
    }

    pub fn key_use(&self) -> Option<&KeyUse> {
        self.key_use.as_ref()
    }

    pub fn key_id(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    pub fn algorithm(&self) -> Option<&KeyAlgorithm> {
        self.alg.as_ref()
    }

    /// Base64url (unpadded) big-endian RSA modulus.
    pub fn modulus(&self) -> &str {
        &self.n
    }

    /// Base64url (unpadded) big-endian RSA public exponent.
    pub fn exponent(&self) -> &str {
        &self.e
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyAlgorithm {
    Rs256,
}

impl KeyAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rs256 => "RS256",
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Rsa,
}

/// Only signature keys are published; `enc` is never emitted.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyUse {
    Sig,
}
