//! Create / read / delete lifecycle around [`convert`].
//!
//! The certificate is the only input and it is create-once: a different
//! certificate never updates an existing document, it replaces it. Nothing
//! here is persisted; callers keep the serialized [`KeyDocument`] in whatever
//! state store they already have.

use serde::{Deserialize, Serialize};

use crate::convert::convert;
use crate::Error;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyDocument {
    id: Option<String>,
    cert_pem: String,
    document: Option<String>,
}

/// What applying a certificate to an existing [`KeyDocument`] would do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    None,
    Create,
    Replace,
}

impl KeyDocument {
    pub fn create(cert_pem: impl Into<String>) -> Result<Self, Error> {
        let cert_pem = cert_pem.into();
        let conversion = convert(&cert_pem)?;

        tracing::info!(id = conversion.key_id.as_str(), "key document created");

        Ok(Self {
            id: Some(conversion.key_id),
            cert_pem,
            document: Some(conversion.document),
        })
    }

    /// The document is fully determined by the certificate, so there is
    /// nothing to refresh.
    pub fn read(&self) -> &Self {
        self
    }

    pub fn delete(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::info!(id = id.as_str(), "key document deleted");
        }
        self.document = None;
    }

    pub fn plan(&self, cert_pem: &str) -> Change {
        if !self.exists() {
            Change::Create
        } else if self.cert_pem == cert_pem {
            Change::None
        } else {
            Change::Replace
        }
    }

    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn cert_pem(&self) -> &str {
        &self.cert_pem
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}
