use std::fs;

use argh::FromArgs;
use camino::Utf8PathBuf;
use keydoc_core::Jwks;

use crate::CliError;

/// List the keys in a JSON Web Key Set file.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "jwks")]
pub struct InspectJwks {
    /// path to JWKS file
    #[argh(positional)]
    file_name: Utf8PathBuf,
}

impl InspectJwks {
    pub async fn run(&self) -> Result<(), CliError> {
        tracing::info!("inspecting JWKS in {}", self.file_name);

        let jwks: Jwks = fs::read_to_string(&self.file_name)?
            .parse()
            .map_err(CliError::KeyDocumentError)?;

        let key_ids = jwks.key_ids();
        tracing::info!(
            "{} key(s), {} with key ID: {}",
            jwks.keys().len(),
            key_ids.len(),
            key_ids.join(", ")
        );

        for jwk in jwks.keys() {
            tracing::info!(
                kid = jwk.key_id().unwrap_or("-"),
                kty = ?jwk.key_type(),
                alg = jwk.algorithm().map(|a| a.as_str()).unwrap_or("-"),
                "key"
            );
        }

        Ok(())
    }
}
