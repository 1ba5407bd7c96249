use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::{http_client, send_json, ClientSecret, Error};

/// Tokens are refreshed this many seconds before they actually expire.
pub const REFRESH_MARGIN_SECS: i64 = 300;

// Upper bound on a token lifetime, keeping expiry arithmetic in range.
const MAX_LIFETIME_SECS: i64 = 366 * 24 * 60 * 60;

/// OAuth2 client credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: ClientSecret,
}

impl Credentials {
    pub fn new(client_id: String, client_secret: ClientSecret) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

/// Bearer token along with the instant it should no longer be used.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl BearerToken {
    pub fn new(access_token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    /// Token issued at `issued_at` for `expires_in` seconds.
    ///
    /// The expiry is moved [`REFRESH_MARGIN_SECS`] earlier, without going
    /// before `issued_at`.
    pub fn from_lifetime(access_token: String, issued_at: DateTime<Utc>, expires_in: i64) -> Self {
        let lifetime = expires_in
            .saturating_sub(REFRESH_MARGIN_SECS)
            .clamp(0, MAX_LIFETIME_SECS);

        Self {
            access_token,
            expires_at: issued_at + Duration::seconds(lifetime),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Client of the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenClient {
    client: reqwest::Client,
    auth_url: String,
}

impl TokenClient {
    pub fn new(auth_url: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::with_client(http_client()?, auth_url))
    }

    pub fn with_client(client: reqwest::Client, auth_url: impl Into<String>) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
        }
    }

    /// Requests a new token with the client-credentials grant.
    pub async fn fetch(&self, credentials: &Credentials) -> Result<BearerToken, Error> {
        let issued_at = Utc::now();
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose()),
        ];

        let request = self.client.post(&self.auth_url).form(&form);
        let response: TokenResponse = send_json(request, &self.auth_url).await?;
        let token =
            BearerToken::from_lifetime(response.access_token, issued_at, response.expires_in);

        log::info!(
            "obtained DataTrails token for client `{}`, valid until {}",
            credentials.client_id,
            token.expires_at
        );
        Ok(token)
    }
}

/// Authenticated session, refreshing its token ahead of expiry.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
    token: Option<BearerToken>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns a valid token, fetching a new one when needed.
    pub async fn token(&mut self, client: &TokenClient) -> Result<&BearerToken, Error> {
        self.token_at(client, Utc::now()).await
    }

    pub async fn token_at(
        &mut self,
        client: &TokenClient,
        now: DateTime<Utc>,
    ) -> Result<&BearerToken, Error> {
        let token = match self.token.take() {
            Some(token) if !token.is_expired_at(now) => token,
            _ => client.fetch(&self.credentials).await?,
        };

        Ok(self.token.insert(token))
    }
}
