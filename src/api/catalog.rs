use super::{decode_each, read_limited_body, send, ApiError};
use crate::model::Category;
use serde::Deserialize;
use url::Url;

/// `{ "categories": [...] }`; TheMealDB sends `null` instead of an empty list.
#[derive(Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    categories: Option<Vec<serde_json::Value>>,
}

/// Read-only client for the external category catalog.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    url: Url,
}

impl CatalogClient {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Fetch the full catalog in the order the API returns it.
    ///
    /// Any failure is returned as an error; a partial list is never produced.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        tracing::debug!(url = %self.url, "Fetching category catalog");

        let response = send(self.http.get(self.url.clone())).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Catalog request rejected");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body = read_limited_body(response).await?;
        let parsed: CatalogResponse = serde_json::from_slice(&body)?;
        let categories: Vec<Category> =
            decode_each(parsed.categories.unwrap_or_default(), "category");

        tracing::info!(count = categories.len(), "Loaded category catalog");
        Ok(categories)
    }
}
