use crate::Error;

/// The first PEM block found in a piece of text.
///
/// The label (`CERTIFICATE`, `PUBLIC KEY`, ...) is kept for diagnostics only;
/// nothing downstream checks it, the payload bytes alone decide whether the
/// block holds a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    label: String,
    contents: Vec<u8>,
}

impl Block {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

const BEGIN_MARKER: &str = "-----BEGIN ";

/// Decodes the first well formed PEM block in `text`. Anything after it is
/// ignored.
///
/// A candidate block that fails to decode (bad base64, mismatched END label,
/// missing END line) is skipped and scanning resumes after its BEGIN line.
/// Only when no candidate decodes is the input rejected, with the error of
/// the first candidate.
pub fn decode_first_block(text: &str) -> Result<Block, Error> {
    let mut rest = text;
    let mut first_error = None;

    while let Some(start) = rest.find(BEGIN_MARKER) {
        let candidate = &rest[start..];
        match pem::parse(candidate) {
            Ok(pem) => {
                let label = pem.tag().to_string();
                tracing::debug!(label = label.as_str(), "decoded PEM block");
                return Ok(Block {
                    label,
                    contents: pem.into_contents(),
                });
            }
            Err(e) => {
                tracing::debug!("skipping malformed PEM block: {}", e);
                first_error.get_or_insert(e);
                rest = &candidate[BEGIN_MARKER.len()..];
            }
        }
    }

    Err(Error::InvalidPEM(
        first_error.unwrap_or(pem::PemError::MissingBeginTag),
    ))
}
