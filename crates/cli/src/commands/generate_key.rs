use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use scitt_cose::SigningKey;

use crate::files;

/**
    Generate a P-256 signing key, PKCS#8 PEM encoded.
*/
#[derive(Args, Debug)]
pub struct GenerateKeyCommand {
    /// Where to write the key.
    #[arg(long, default_value = "scitt-signing-key.pem")]
    pub output_file: PathBuf,

    /// Replace the output file if it exists.
    #[arg(long)]
    pub force: bool,
}

impl GenerateKeyCommand {
    pub fn run(self) -> Result<()> {
        if self.output_file.exists() && !self.force {
            bail!(
                "`{}` already exists, use --force to replace it",
                self.output_file.display()
            );
        }

        let key = SigningKey::generate();
        files::write_atomic(&self.output_file, key.to_pkcs8_pem()?.as_bytes())?;

        log::info!("wrote P-256 signing key to `{}`", self.output_file.display());
        Ok(())
    }
}
