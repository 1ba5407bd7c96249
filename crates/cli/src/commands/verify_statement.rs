use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use scitt_cose::{DecodedStatement, SignedStatement, SigningKey};

use crate::files;

/**
    Decode a signed statement and verify its signature against the key of
    its confirmation claim.
*/
#[derive(Args, Debug)]
pub struct VerifyStatementCommand {
    /// Signed statement to verify.
    #[arg(long)]
    pub statement_file: PathBuf,

    /// Signing key the confirmation key must match.
    #[arg(long)]
    pub signing_key_file: Option<PathBuf>,
}

impl VerifyStatementCommand {
    pub fn run(self) -> Result<()> {
        let decoded = self.verify()?;
        let header = decoded.header();

        println!("Issuer:         {}", header.issuer());
        println!("Subject:        {}", header.subject());
        println!(
            "Key ID:         {}",
            header
                .key_id_str()
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| hex::encode(header.key_id()))
        );
        println!("Hash algorithm: {}", decoded.digest().algorithm());
        println!("Payload:        {}", decoded.digest().to_hex());
        if let Some(location) = &header.envelope().location {
            println!("Location:       {location}");
        }
        if let Some(content_type) = &header.envelope().pre_image_content_type {
            println!("Content type:   {content_type}");
        }
        if let Some(meta_map) = &header.envelope().meta_map {
            for (key, value) in meta_map.iter() {
                println!("  {key}: {value}");
            }
        }

        Ok(())
    }

    fn verify(&self) -> Result<DecodedStatement> {
        let bytes = files::read(&self.statement_file, "statement")?;
        let decoded = SignedStatement::new(bytes)
            .verify(None)
            .context("statement verification failed")?;

        if let Some(path) = &self.signing_key_file {
            let pem = files::read_to_string(path, "signing key")?;
            let key = SigningKey::from_pem(&pem)?;
            if &key.public_coordinates()? != decoded.header().confirmation_key() {
                bail!("confirmation key does not match `{}`", path.display());
            }
        }

        log::info!("statement signature is valid");
        Ok(decoded)
    }
}
