//! [DataTrails] ledger client.
//!
//! Records hashed signed statements as events of a DataTrails asset,
//! authenticating with an OAuth2 client-credentials grant.
//!
//! [DataTrails]: <https://docs.datatrails.ai/>
use serde::de::DeserializeOwned;

mod options;
pub use options::*;

mod auth;
pub use auth::*;

mod archivist;
pub use archivist::*;

mod record;
pub use record::*;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error building HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Error sending HTTP request ({0}): {1}")]
    Request(String, reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Error reading HTTP response: {0}")]
    Response(reqwest::Error),

    #[error("DataTrails client ID and client secret must be provided")]
    MissingCredentials,

    #[error("invalid signed statement: {0}")]
    Statement(#[from] scitt_cose::VerifyError),
}

/// Builds the HTTP client shared by the token and archivist clients.
pub fn http_client() -> Result<reqwest::Client, Error> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        "User-Agent",
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );

    #[cfg(target_os = "android")]
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .default_headers(headers)
        .build()
        .map_err(Error::Client)?;

    #[cfg(not(target_os = "android"))]
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(Error::Client)?;

    Ok(client)
}

/// Sends `request` and decodes its JSON response.
async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<T, Error> {
    let resp = request
        .send()
        .await
        .map_err(|e| Error::Request(url.to_owned(), e))?;

    resp.error_for_status_ref()
        .map_err(|err| Error::Server(err.to_string()))?;

    resp.json().await.map_err(Error::Response)
}

/// Joins `path` to a base URL, with or without its trailing slash.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
