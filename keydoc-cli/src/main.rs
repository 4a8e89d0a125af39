use argh::FromArgs;
use camino::Utf8Path;
use keydoc_core::CERT_PEM_ENV;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod generate;
mod inspect;
mod resource;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    JSONSerializationError(#[from] serde_json::Error),
    #[error("key document error: {0}")]
    KeyDocumentError(#[source] keydoc_core::Error),
    #[error("no certificate given, pass --cert-file or set {0}")]
    MissingCertificate(&'static str),
    #[error("resource in {0} already exists, delete it first")]
    ResourceExists(String),
    #[error("no resource state in {0}")]
    MissingResource(String),
}

/// Publishes the public key of an X.509 certificate as a JSON Web Key Set.
#[derive(FromArgs, PartialEq, Eq, Debug)]
pub struct Arguments {
    /// use JSON for log messages
    #[argh(switch)]
    json: bool,

    #[argh(subcommand)]
    command: RootCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum RootCommand {
    Generate(generate::GenerateCommand),
    Inspect(inspect::InspectCommand),
    Resource(resource::ResourceCommand),
}

impl RootCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match self {
            RootCommand::Generate(cmd) => cmd.run().await,
            RootCommand::Inspect(cmd) => cmd.run().await,
            RootCommand::Resource(cmd) => cmd.run().await,
        }
    }
}

/// Certificate PEM from `cert_file`, falling back to the `CERT_PEM`
/// environment variable (which may come from a `.env` file).
pub fn read_certificate(cert_file: Option<&Utf8Path>) -> Result<String, CliError> {
    match cert_file {
        Some(path) => {
            tracing::debug!("reading certificate from {}", path);
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            tracing::debug!("reading certificate from {}", CERT_PEM_ENV);
            std::env::var(CERT_PEM_ENV).map_err(|_| CliError::MissingCertificate(CERT_PEM_ENV))
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1")
    }

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "keydoc_cli=info,keydoc_core=info")
    }

    let args: Arguments = argh::from_env();

    if args.json {
        tracing_subscriber::fmt::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = args.command.run().await {
        tracing::error!("command failed: {}", e);
        std::process::exit(1);
    }
}
