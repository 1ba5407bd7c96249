//! `scitt` command line tool.
use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;
mod files;

use commands::{
    CreateStatementCommand, GenerateKeyCommand, RegisterStatementCommand, VerifyStatementCommand,
};

/**
    Create, verify and register SCITT hashed signed statements.
*/
#[derive(Parser, Debug)]
#[command(name = "scitt", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a statement over the digest of a payload file.
    CreateStatement(CreateStatementCommand),

    /// Decode a signed statement and check its signature.
    VerifyStatement(VerifyStatementCommand),

    /// Generate a P-256 signing key.
    GenerateKey(GenerateKeyCommand),

    /// Record a signed statement on the DataTrails ledger.
    RegisterStatement(RegisterStatementCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::CreateStatement(cmd) => cmd.run(),
            Command::VerifyStatement(cmd) => cmd.run(),
            Command::GenerateKey(cmd) => cmd.run(),
            Command::RegisterStatement(cmd) => cmd.run().await,
        }
    }
}
