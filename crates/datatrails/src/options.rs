use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Credentials, Error};

pub const DEFAULT_API_URL: &str = "https://app.datatrails.ai/archivist/v2/";
pub const DEFAULT_AUTH_URL: &str = "https://app.datatrails.ai/archivist/iam/v1/appidp/token";
pub const DEFAULT_DESCRIPTION: &str = "DataTrails Conserver Link";

/// Client secret, redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ClientSecret(***)")
    }
}

/// Options of the DataTrails link.
///
/// Every field is optional in the JSON form; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    /// Base URL of the archivist API.
    pub api_url: String,

    /// Token endpoint.
    pub auth_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<ClientSecret>,

    /// Behaviours enabled on created assets.
    pub behaviours: Vec<String>,

    /// Base attributes of created assets.
    pub asset_attributes: Map<String, Value>,

    /// Base attributes of recorded events.
    pub event_attributes: Map<String, Value>,

    /// Display type of recorded events.
    pub event_type: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        let mut asset_attributes = Map::new();
        asset_attributes.insert("arc_description".into(), DEFAULT_DESCRIPTION.into());

        let mut event_attributes = Map::new();
        event_attributes.insert("arc_description".into(), DEFAULT_DESCRIPTION.into());
        event_attributes.insert("document_hash_alg".into(), "SHA-256".into());

        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            client_id: None,
            client_secret: None,
            behaviours: vec!["RecordEvidence".to_owned()],
            asset_attributes,
            event_attributes,
            event_type: "Update".to_owned(),
        }
    }
}

impl LinkOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overrides the credentials with the given values, when present.
    pub fn with_credentials(
        mut self,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        if client_id.is_some() {
            self.client_id = client_id;
        }

        if let Some(secret) = client_secret {
            self.client_secret = Some(ClientSecret::new(secret));
        }

        self
    }

    /// Client credentials, which must both be set and non-empty.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Ok(Credentials::new(id.clone(), secret.clone()))
            }
            _ => Err(Error::MissingCredentials),
        }
    }
}
