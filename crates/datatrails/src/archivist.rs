use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{http_client, join_url, send_json, BearerToken, Error};

/// Created asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identity, of the form `assets/{uuid}`.
    pub identity: String,
}

/// Recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identity, of the form `assets/{uuid}/events/{uuid}`.
    pub identity: String,
}

/// Client of the archivist assets and events API.
#[derive(Debug, Clone)]
pub struct ArchivistClient {
    client: reqwest::Client,
    api_url: String,
    event_type: String,
}

impl ArchivistClient {
    pub fn new(api_url: impl Into<String>, event_type: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::with_client(http_client()?, api_url, event_type))
    }

    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            event_type: event_type.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Creates a private asset with the given behaviours.
    ///
    /// The asset is displayed as `Publish` unless `attributes` overrides
    /// `arc_display_type`.
    pub async fn create_asset(
        &self,
        token: &BearerToken,
        attributes: Map<String, Value>,
        behaviours: &[String],
    ) -> Result<Asset, Error> {
        let mut all_attributes = Map::new();
        all_attributes.insert("arc_display_type".into(), "Publish".into());
        all_attributes.extend(attributes);

        let body = json!({
            "behaviours": behaviours,
            "attributes": all_attributes,
            "public": false,
        });

        let url = join_url(&self.api_url, "assets");
        let request = self
            .client
            .post(&url)
            .header(http::header::AUTHORIZATION, token.authorization())
            .json(&body);

        let asset: Asset = send_json(request, &url).await?;
        log::info!("created DataTrails asset `{}`", asset.identity);
        Ok(asset)
    }

    /// Records an evidence event on the asset `asset_id`.
    pub async fn create_event(
        &self,
        token: &BearerToken,
        asset_id: &str,
        attributes: Map<String, Value>,
    ) -> Result<Event, Error> {
        let mut event_attributes = Map::new();
        event_attributes.insert("arc_display_type".into(), self.event_type.clone().into());
        event_attributes.extend(attributes);

        let body = json!({
            "operation": "Record",
            "behaviour": "RecordEvidence",
            "event_attributes": event_attributes,
        });

        let url = join_url(&self.api_url, &format!("{asset_id}/events"));
        let request = self
            .client
            .post(&url)
            .header(http::header::AUTHORIZATION, token.authorization())
            .json(&body);

        let event: Event = send_json(request, &url).await?;
        log::info!("created DataTrails event `{}`", event.identity);
        Ok(event)
    }
}
