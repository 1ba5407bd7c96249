use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scitt_cose::{HashAlgorithm, HashedStatementBuilder, MetaMap, SigningKey, DEFAULT_KEY_ID};

use crate::files;

/**
    Create a signed statement over the digest of a payload file.
*/
#[derive(Args, Debug)]
pub struct CreateStatementCommand {
    /// Media type of the payload content.
    #[arg(long, default_value = "application/json")]
    pub content_type: String,

    /// Issuer owning the signing key.
    #[arg(long)]
    pub issuer: String,

    /// Key identifier.
    #[arg(long, default_value = DEFAULT_KEY_ID)]
    pub kid: String,

    /// JSON file holding an object of string key/value pairs of indexed
    /// metadata.
    #[arg(long)]
    pub meta_map_file: Option<PathBuf>,

    /// Where to write the signed statement.
    #[arg(long, default_value = "signed-statement.cbor")]
    pub output_file: PathBuf,

    /// Content to be hashed into the statement payload.
    #[arg(long, default_value = "scitt-payload.json")]
    pub payload_file: PathBuf,

    /// Location hint of the original content.
    #[arg(long)]
    pub payload_location: Option<String>,

    /// Payload hash algorithm: SHA-256, SHA-384 or SHA-512.
    #[arg(long, default_value = "SHA-256")]
    pub payload_hash_alg: String,

    /// P-256 signing key, PEM encoded (PKCS#8 or SEC1).
    #[arg(long, default_value = "scitt-signing-key.pem")]
    pub signing_key_file: PathBuf,

    /// Subject correlating statements made about an artifact.
    #[arg(long)]
    pub subject: String,
}

impl CreateStatementCommand {
    pub fn run(self) -> Result<()> {
        // Checked before touching any file.
        let hash_algorithm: HashAlgorithm = self.payload_hash_alg.parse()?;

        let meta_map = self
            .meta_map_file
            .as_deref()
            .map(|path| -> Result<MetaMap> {
                let json = files::read_to_string(path, "meta-map")?;
                Ok(MetaMap::from_json(&json)?)
            })
            .transpose()?;

        let pem = files::read_to_string(&self.signing_key_file, "signing key")?;
        let signing_key = SigningKey::from_pem(&pem).with_context(|| {
            format!(
                "failed to load signing key `{}`",
                self.signing_key_file.display()
            )
        })?;

        let payload = files::read(&self.payload_file, "payload")?;

        let mut builder = HashedStatementBuilder::new(&self.issuer, &self.subject)
            .signing_key(&signing_key)
            .key_id(self.kid.as_bytes())
            .hash_algorithm(hash_algorithm)
            .pre_image_content_type(&self.content_type);

        if let Some(location) = &self.payload_location {
            builder = builder.payload_location(location);
        }

        if let Some(meta_map) = meta_map {
            log::info!("meta_map: {} entries", meta_map.len());
            builder = builder.meta_map(meta_map);
        }

        let statement = builder.sign(&payload)?;
        files::write_atomic(&self.output_file, statement.as_bytes())?;

        log::info!(
            "wrote signed statement for subject `{}` to `{}`",
            self.subject,
            self.output_file.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scitt_cose::SignedStatement;
    use std::path::Path;

    fn command(dir: &Path) -> CreateStatementCommand {
        CreateStatementCommand {
            content_type: "application/json".to_owned(),
            issuer: "did:web:example.com".to_owned(),
            kid: DEFAULT_KEY_ID.to_owned(),
            meta_map_file: None,
            output_file: dir.join("signed-statement.cbor"),
            payload_file: dir.join("scitt-payload.json"),
            payload_location: None,
            payload_hash_alg: "SHA-256".to_owned(),
            signing_key_file: dir.join("scitt-signing-key.pem"),
            subject: "sbom".to_owned(),
        }
    }

    fn setup(dir: &Path) -> SigningKey {
        let key = SigningKey::generate();
        std::fs::write(
            dir.join("scitt-signing-key.pem"),
            key.to_pkcs8_pem().unwrap().as_bytes(),
        )
        .unwrap();
        std::fs::write(dir.join("scitt-payload.json"), "hello").unwrap();
        key
    }

    #[test]
    fn create() {
        let dir = tempfile::tempdir().unwrap();
        let key = setup(dir.path());
        std::fs::write(dir.path().join("meta.json"), r#"{"version": "1"}"#).unwrap();

        let mut cmd = command(dir.path());
        cmd.meta_map_file = Some(dir.path().join("meta.json"));
        cmd.payload_location = Some("https://example.com/payload.json".to_owned());
        cmd.run().unwrap();

        let bytes = std::fs::read(dir.path().join("signed-statement.cbor")).unwrap();
        let decoded = SignedStatement::new(bytes)
            .verify(Some(&key.public_coordinates().unwrap()))
            .unwrap();
        let header = decoded.header();
        assert_eq!(
            hex::encode(decoded.payload()),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(header.key_id_str(), Some("testkey"));
        assert_eq!(
            header.envelope().pre_image_content_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(
            header.envelope().meta_map.as_ref().and_then(|m| m.get("version")),
            Some("1")
        );
    }

    #[test]
    fn unsupported_algorithm_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        // No key or payload file exists: only the algorithm can fail.
        let mut cmd = command(dir.path());
        cmd.payload_hash_alg = "SHA-512/256".to_owned();

        let error = cmd.run().unwrap_err();
        assert!(error.downcast_ref::<scitt_cose::UnsupportedAlgorithm>().is_some());
        assert!(!dir.path().join("signed-statement.cbor").exists());
    }

    #[test]
    fn reject_empty_kid() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());

        let mut cmd = command(dir.path());
        cmd.kid = String::new();

        let error = cmd.run().unwrap_err();
        assert!(matches!(
            error.downcast_ref::<scitt_cose::StatementError>(),
            Some(scitt_cose::StatementError::EmptyKeyId)
        ));
        assert!(!dir.path().join("signed-statement.cbor").exists());
    }

    #[test]
    fn malformed_meta_map() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path());
        std::fs::write(dir.path().join("meta.json"), r#"{"count": 1}"#).unwrap();

        let mut cmd = command(dir.path());
        cmd.meta_map_file = Some(dir.path().join("meta.json"));
        assert!(cmd.run().is_err());
        assert!(!dir.path().join("signed-statement.cbor").exists());
    }
}
