//! HTTP clients for the catalog API and the account backend.
//!
//! - [`catalog`] - read-only category catalog (TheMealDB)
//! - [`favourites`] - the user's favourite item ids, read and add
//! - [`auth`] - login, signup and logout
//!
//! All clients share one `reqwest::Client` with a cookie store, so the session
//! cookie set by a login is sent with every favourites call. Base addresses are
//! passed in at construction; nothing here reads the environment.

mod auth;
mod catalog;
mod favourites;

pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use favourites::FavouritesClient;

use crate::config::Endpoints;
use futures::StreamExt;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upper bound on any response body we are willing to buffer.
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Not logged in (status {0})")]
    Unauthenticated(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns true if the failure is transient and the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout | ApiError::Network(_) => true,
            ApiError::HttpStatus(status) => *status >= 500,
            ApiError::Unauthenticated(_)
            | ApiError::ResponseTooLarge(_)
            | ApiError::Decode(_)
            | ApiError::InvalidUrl(_) => false,
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

// ============================================================================
// Client Bundle
// ============================================================================

/// All API clients, sharing one HTTP connection pool and cookie store.
#[derive(Clone)]
pub struct Api {
    pub catalog: CatalogClient,
    pub favourites: FavouritesClient,
    pub auth: AuthClient,
}

impl Api {
    pub fn new(endpoints: &Endpoints, timeout: Duration) -> Result<Self, ApiError> {
        let http = build_http_client(timeout)?;
        Ok(Self::with_client(http, endpoints))
    }

    /// Build the clients on top of an existing HTTP client.
    pub fn with_client(http: reqwest::Client, endpoints: &Endpoints) -> Self {
        Self {
            catalog: CatalogClient::new(http.clone(), endpoints.catalog.clone()),
            favourites: FavouritesClient::new(http.clone(), endpoints.api_base.clone()),
            auth: AuthClient::new(http, endpoints.api_base.clone()),
        }
    }
}

/// Create the shared HTTP client.
///
/// Cookies are kept in memory for the lifetime of the process; the backend
/// session cookie is the only credential.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .redirect(create_redirect_policy())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Follow at most 3 redirects and refuse loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

// ============================================================================
// Request Helpers
// ============================================================================

/// Append a single path segment to a base address.
///
/// `http://host/api` and `http://host/api/` both become `http://host/api/<segment>`.
pub(crate) fn endpoint(base: &Url, segment: &str) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Send a request, mapping transport failures to [`ApiError`].
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
    request.send().await.map_err(ApiError::from_transport)
}

/// Write endpoints on the backend report success with 200 or 201 only.
pub(crate) fn is_write_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

/// Read a response body into memory, refusing anything above [`MAX_BODY_SIZE`].
pub(crate) async fn read_limited_body(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
    if let Some(len) = response.content_length() {
        if len as usize > MAX_BODY_SIZE {
            return Err(ApiError::ResponseTooLarge(MAX_BODY_SIZE));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::from_transport)?;
        if bytes.len().saturating_add(chunk.len()) > MAX_BODY_SIZE {
            return Err(ApiError::ResponseTooLarge(MAX_BODY_SIZE));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Deserialize each element of a JSON array independently, skipping bad ones.
///
/// One malformed entry must not discard an otherwise good list.
pub(crate) fn decode_each<T: serde::de::DeserializeOwned>(
    items: Vec<serde_json::Value>,
    what: &'static str,
) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(kind = what, index, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}
