use argh::FromArgs;

use crate::CliError;

mod jwks;

/// Inspects existing key documents.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "inspect")]
pub struct InspectCommand {
    #[argh(subcommand)]
    subcommand: InspectSubCommand,
}

#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum InspectSubCommand {
    Jwks(jwks::InspectJwks),
}

impl InspectCommand {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.subcommand {
            InspectSubCommand::Jwks(cmd) => cmd.run().await,
        }
    }
}
