use std::fs;
use std::io::Write;

use argh::FromArgs;
use camino::Utf8PathBuf;

use crate::{read_certificate, CliError};

/// Generate JSON Web Key Set for the public key of a certificate.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "jwks")]
pub struct GenerateJwks {
    /// path to PEM file containing the certificate (default: CERT_PEM environment variable)
    #[argh(option)]
    cert_file: Option<Utf8PathBuf>,
    /// path to output JWKS file (default: standard output)
    #[argh(option)]
    output: Option<Utf8PathBuf>,
}

impl GenerateJwks {
    pub async fn run(&self) -> Result<(), CliError> {
        let pem = read_certificate(self.cert_file.as_deref())?;

        let conversion = keydoc_core::convert(&pem).map_err(CliError::KeyDocumentError)?;

        tracing::info!(kid = conversion.key_id.as_str(), "generated JWKS");

        match &self.output {
            Some(file_name) => {
                tracing::info!("saving JWKS to {}", file_name);
                fs::write(file_name, conversion.document.as_bytes())?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(conversion.document.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}
