use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scitt_cose::SignedStatement;
use scitt_datatrails::{record_statement, ArchivistClient, LinkOptions, Session, TokenClient};

use crate::files;

/**
    Record a signed statement as an event of a DataTrails asset.
*/
#[derive(Args, Debug)]
pub struct RegisterStatementCommand {
    /// Signed statement to register.
    #[arg(long, default_value = "signed-statement.cbor")]
    pub statement_file: PathBuf,

    /// Existing asset to record the event on, such as `assets/{uuid}`.
    /// A new asset is created when omitted.
    #[arg(long)]
    pub asset_id: Option<String>,

    /// JSON file of link options overriding the defaults.
    #[arg(long)]
    pub options_file: Option<PathBuf>,

    /// DataTrails client ID.
    #[arg(long, env = "DATATRAILS_CLIENT_ID")]
    pub client_id: Option<String>,

    /// DataTrails client secret.
    #[arg(long, env = "DATATRAILS_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
}

impl RegisterStatementCommand {
    pub fn options(&self) -> Result<LinkOptions> {
        let options = match &self.options_file {
            Some(path) => {
                let json = files::read_to_string(path, "options")?;
                LinkOptions::from_json(&json)
                    .with_context(|| format!("invalid link options in `{}`", path.display()))?
            }
            None => LinkOptions::default(),
        };

        Ok(options.with_credentials(self.client_id.clone(), self.client_secret.clone()))
    }

    pub async fn run(self) -> Result<()> {
        let options = self.options()?;
        let credentials = options.credentials()?;

        let statement = SignedStatement::new(files::read(&self.statement_file, "statement")?);

        let token_client = TokenClient::new(&options.auth_url)?;
        let archivist = ArchivistClient::new(&options.api_url, &options.event_type)?;

        let mut session = Session::new(credentials);
        let token = session.token(&token_client).await?;

        let record = record_statement(
            &archivist,
            token,
            &options,
            &statement,
            self.asset_id.as_deref(),
        )
        .await?;

        println!("Asset: {}", record.asset_id);
        println!("Event: {}", record.event_id);
        Ok(())
    }
}
