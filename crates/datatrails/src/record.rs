use base64::Engine;
use scitt_cose::{HashAlgorithm, SignedStatement};
use serde_json::{Map, Value};

use crate::{ArchivistClient, BearerToken, Error, LinkOptions};

/// Outcome of [`record_statement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRecord {
    pub asset_id: String,
    pub event_id: String,

    /// Whether the asset was created for this statement.
    pub asset_created: bool,
}

/// Records `statement` as an event of the asset `asset_id`, creating the
/// asset first when no id is given.
///
/// The statement must verify against its confirmation key; nothing is
/// sent otherwise.
///
/// The event carries the statement's subject and issuer, the SHA-256
/// digest of the encoded statement and the statement itself, base64
/// encoded.
pub async fn record_statement(
    archivist: &ArchivistClient,
    token: &BearerToken,
    options: &LinkOptions,
    statement: &SignedStatement,
    asset_id: Option<&str>,
) -> Result<StatementRecord, Error> {
    let decoded = statement.verify(None)?;
    let header = decoded.header();
    let statement_hash = HashAlgorithm::Sha256.digest(statement.as_bytes()).to_hex();

    let (asset_id, asset_created) = match asset_id {
        Some(id) => {
            log::info!("DataTrails asset found: {id}");
            (id.to_owned(), false)
        }
        None => {
            let mut attributes = options.asset_attributes.clone();
            attributes.insert("arc_display_name".into(), header.subject().into());
            attributes.insert("document_hash_value".into(), statement_hash.clone().into());
            attributes.insert("subject".into(), header.subject().into());

            log::info!(
                "creating DataTrails asset for subject `{}`",
                header.subject()
            );
            let asset = archivist
                .create_asset(token, attributes, &options.behaviours)
                .await?;
            (asset.identity, true)
        }
    };

    let attributes = event_attributes(
        options,
        statement,
        header.issuer(),
        header.subject(),
        statement_hash,
    );
    let event = archivist.create_event(token, &asset_id, attributes).await?;

    Ok(StatementRecord {
        asset_id,
        event_id: event.identity,
        asset_created,
    })
}

fn event_attributes(
    options: &LinkOptions,
    statement: &SignedStatement,
    issuer: &str,
    subject: &str,
    statement_hash: String,
) -> Map<String, Value> {
    let mut attributes = options.event_attributes.clone();
    attributes.insert(
        "document_hash_alg".into(),
        HashAlgorithm::Sha256.name().into(),
    );
    attributes.insert("document_hash_value".into(), statement_hash.into());
    attributes.insert("issuer".into(), issuer.into());
    attributes.insert("subject".into(), subject.into());
    attributes.insert(
        "signed_statement".into(),
        base64::engine::general_purpose::STANDARD
            .encode(statement.as_bytes())
            .into(),
    );
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{web_server, Route};
    use chrono::{Duration, Utc};
    use scitt_cose::{HashedStatementBuilder, SigningKey};

    const ROUTES: &[Route] = &[
        Route {
            path: "/assets",
            status: 200,
            body: r#"{"identity": "assets/aaaa"}"#,
        },
        Route {
            path: "/assets/aaaa/events",
            status: 200,
            body: r#"{"identity": "assets/aaaa/events/1111"}"#,
        },
        Route {
            path: "/assets/bbbb/events",
            status: 200,
            body: r#"{"identity": "assets/bbbb/events/2222"}"#,
        },
    ];

    fn statement() -> SignedStatement {
        let key = SigningKey::generate();
        HashedStatementBuilder::new("did:web:example.com", "sbom:acme")
            .signing_key(&key)
            .sign(b"{}")
            .unwrap()
    }

    fn token() -> BearerToken {
        BearerToken::new("abc".to_owned(), Utc::now() + Duration::hours(1))
    }

    #[tokio::test]
    async fn record_creates_asset() {
        let (url, requests, shutdown) = web_server(ROUTES).unwrap();
        let archivist = ArchivistClient::new(url, "Update").unwrap();
        let options = LinkOptions::default();
        let statement = statement();

        let record = record_statement(&archivist, &token(), &options, &statement, None)
            .await
            .unwrap();
        assert_eq!(
            record,
            StatementRecord {
                asset_id: "assets/aaaa".to_owned(),
                event_id: "assets/aaaa/events/1111".to_owned(),
                asset_created: true,
            }
        );

        let requests = requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);

        let asset = requests[0].json();
        assert_eq!(asset["attributes"]["arc_display_name"], "sbom:acme");
        assert_eq!(
            asset["attributes"]["arc_description"],
            "DataTrails Conserver Link"
        );

        let event = requests[1].json();
        let attributes = &event["event_attributes"];
        let expected_hash = HashAlgorithm::Sha256.digest(statement.as_bytes()).to_hex();
        assert_eq!(attributes["document_hash_alg"], "SHA-256");
        assert_eq!(attributes["document_hash_value"], expected_hash.as_str());
        assert_eq!(attributes["issuer"], "did:web:example.com");
        assert_eq!(attributes["subject"], "sbom:acme");

        let encoded = attributes["signed_statement"].as_str().unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(decoded, statement.as_bytes());
        shutdown().ok();
    }

    #[tokio::test]
    async fn record_on_existing_asset() {
        let (url, requests, shutdown) = web_server(ROUTES).unwrap();
        let archivist = ArchivistClient::new(url, "Update").unwrap();

        let record = record_statement(
            &archivist,
            &token(),
            &LinkOptions::default(),
            &statement(),
            Some("assets/bbbb"),
        )
        .await
        .unwrap();
        assert_eq!(record.event_id, "assets/bbbb/events/2222");
        assert!(!record.asset_created);

        let requests = requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/assets/bbbb/events");
        shutdown().ok();
    }

    #[tokio::test]
    async fn reject_forged_signature() {
        let (url, requests, shutdown) = web_server(ROUTES).unwrap();
        let archivist = ArchivistClient::new(url, "Update").unwrap();

        let mut bytes = statement().into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let forged = SignedStatement::new(bytes);

        let result = record_statement(
            &archivist,
            &token(),
            &LinkOptions::default(),
            &forged,
            None,
        )
        .await;
        assert!(matches!(
            result,
            Err(Error::Statement(scitt_cose::VerifyError::Signature(_)))
        ));
        assert!(requests.lock().unwrap().is_empty());
        shutdown().ok();
    }

    #[tokio::test]
    async fn reject_invalid_statement() {
        let (url, requests, shutdown) = web_server(ROUTES).unwrap();
        let archivist = ArchivistClient::new(url, "Update").unwrap();

        let result = record_statement(
            &archivist,
            &token(),
            &LinkOptions::default(),
            &SignedStatement::new(vec![0xa0]),
            None,
        )
        .await;
        assert!(matches!(result, Err(Error::Statement(_))));
        assert!(requests.lock().unwrap().is_empty());
        shutdown().ok();
    }
}
