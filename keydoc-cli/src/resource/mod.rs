use std::fs;
use std::io::Write;

use argh::FromArgs;
use camino::{Utf8Path, Utf8PathBuf};
use keydoc_core::{Change, KeyDocument};

use crate::{read_certificate, CliError};

/// Manages a key document resource whose state is kept in a JSON file.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "resource")]
pub struct ResourceCommand {
    #[argh(subcommand)]
    subcommand: ResourceSubCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum ResourceSubCommand {
    Create(CreateResource),
    Read(ReadResource),
    Plan(PlanResource),
    Delete(DeleteResource),
}

impl ResourceCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.subcommand {
            ResourceSubCommand::Create(cmd) => cmd.run().await,
            ResourceSubCommand::Read(cmd) => cmd.run().await,
            ResourceSubCommand::Plan(cmd) => cmd.run().await,
            ResourceSubCommand::Delete(cmd) => cmd.run().await,
        }
    }
}

/// Create the key document for a certificate.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "create")]
pub struct CreateResource {
    /// path to resource state file
    #[argh(positional)]
    state_file: Utf8PathBuf,
    /// path to PEM file containing the certificate (default: CERT_PEM environment variable)
    #[argh(option)]
    cert_file: Option<Utf8PathBuf>,
}

impl CreateResource {
    pub async fn run(&self) -> Result<(), CliError> {
        if let Some(existing) = load_state(&self.state_file)? {
            if existing.exists() {
                return Err(CliError::ResourceExists(self.state_file.to_string()));
            }
        }

        let pem = read_certificate(self.cert_file.as_deref())?;
        let resource = KeyDocument::create(pem).map_err(CliError::KeyDocumentError)?;

        save_state(&self.state_file, &resource)
    }
}

/// Print the key document held in a state file.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "read")]
pub struct ReadResource {
    /// path to resource state file
    #[argh(positional)]
    state_file: Utf8PathBuf,
}

impl ReadResource {
    pub async fn run(&self) -> Result<(), CliError> {
        let resource = require_state(&self.state_file)?;
        let resource = resource.read();

        match (resource.id(), resource.document()) {
            (Some(id), Some(document)) => {
                tracing::info!(id, "key document");
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.write_all(b"\n")?;
                Ok(())
            }
            _ => Err(CliError::MissingResource(self.state_file.to_string())),
        }
    }
}

/// Show what applying a certificate to a state file would do.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "plan")]
pub struct PlanResource {
    /// path to resource state file
    #[argh(positional)]
    state_file: Utf8PathBuf,
    /// path to PEM file containing the certificate (default: CERT_PEM environment variable)
    #[argh(option)]
    cert_file: Option<Utf8PathBuf>,
}

impl PlanResource {
    pub async fn run(&self) -> Result<(), CliError> {
        let pem = read_certificate(self.cert_file.as_deref())?;
        let change = match load_state(&self.state_file)? {
            Some(resource) => resource.plan(&pem),
            None => Change::Create,
        };

        match change {
            Change::None => tracing::info!("no changes, key document is up to date"),
            Change::Create => tracing::info!("key document will be created"),
            Change::Replace => {
                tracing::info!("certificate changed, key document must be deleted and created again")
            }
        }

        Ok(())
    }
}

/// Delete the key document held in a state file.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "delete")]
pub struct DeleteResource {
    /// path to resource state file
    #[argh(positional)]
    state_file: Utf8PathBuf,
}

impl DeleteResource {
    pub async fn run(&self) -> Result<(), CliError> {
        let mut resource = require_state(&self.state_file)?;
        resource.delete();
        save_state(&self.state_file, &resource)
    }
}

fn load_state(path: &Utf8Path) -> Result<Option<KeyDocument>, CliError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

fn require_state(path: &Utf8Path) -> Result<KeyDocument, CliError> {
    load_state(path)?.ok_or_else(|| CliError::MissingResource(path.to_string()))
}

fn save_state(path: &Utf8Path, resource: &KeyDocument) -> Result<(), CliError> {
    tracing::info!("saving resource state to {}", path);
    fs::write(path, serde_json::to_string_pretty(resource)?)?;
    Ok(())
}
