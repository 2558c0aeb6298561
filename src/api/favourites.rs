use super::{decode_each, endpoint, is_write_success, read_limited_body, send, ApiError};
use crate::model::{FavouriteRecord, ItemId};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Deserialize)]
struct FavouritesResponse {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
struct AddFavouriteBody<'a> {
    id: ItemId,
    name: &'a str,
}

/// Client for the user's favourites on the account backend.
///
/// Requests rely on the session cookie held by the shared HTTP client.
#[derive(Clone)]
pub struct FavouritesClient {
    http: reqwest::Client,
    base: Url,
}

impl FavouritesClient {
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Fetch the current user's favourite records.
    ///
    /// Any non-2xx response means the session is missing or expired and is
    /// reported as [`ApiError::Unauthenticated`].
    pub async fn list(&self) -> Result<Vec<FavouriteRecord>, ApiError> {
        let url = endpoint(&self.base, "favourites")?;
        let response = send(self.http.get(url)).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "Favourites read rejected, session required");
            return Err(ApiError::Unauthenticated(status.as_u16()));
        }

        let body = read_limited_body(response).await?;
        let parsed: FavouritesResponse = serde_json::from_slice(&body)?;
        let records: Vec<FavouriteRecord> =
            decode_each(parsed.data.unwrap_or_default(), "favourite");

        tracing::debug!(count = records.len(), "Loaded favourite records");
        Ok(records)
    }

    /// Register a category as a favourite.
    ///
    /// Not idempotent on our side: calling twice sends two requests.
    pub async fn add(&self, id: ItemId, name: &str) -> Result<(), ApiError> {
        let url = endpoint(&self.base, "add-to-favourite")?;
        let response = send(self.http.post(url).json(&AddFavouriteBody { id, name })).await?;

        let status = response.status();
        if !is_write_success(status) {
            tracing::warn!(id = %id, status = status.as_u16(), "Add favourite failed");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        tracing::info!(id = %id, name, "Added favourite");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> FavouritesClient {
        FavouritesClient::new(reqwest::Client::new(), Url::parse(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_list_mixed_id_shapes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favourites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"item_id": 3, "user": "u1"},
                    {"item_id": "7", "user": "u1"}
                ]
            })))
            .mount(&server)
            .await;

        let records = client_for(&server).list().await.unwrap();
        assert_eq!(
            records,
            vec![
                FavouriteRecord { item_id: ItemId::new(3) },
                FavouriteRecord { item_id: ItemId::new(7) },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_missing_data_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favourites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        assert!(client_for(&server).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_401_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favourites"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;
        assert!(matches!(result, Err(ApiError::Unauthenticated(401))));
    }

    #[tokio::test]
    async fn test_list_any_non_success_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favourites"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;
        assert!(matches!(result, Err(ApiError::Unauthenticated(500))));
    }

    #[tokio::test]
    async fn test_add_posts_id_and_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add-to-favourite"))
            .and(body_json(serde_json::json!({"id": 4, "name": "Pasta"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .add(ItemId::new(4), "Pasta")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_500_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add-to-favourite"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server).add(ItemId::new(4), "Pasta").await;
        assert!(matches!(result, Err(ApiError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_add_204_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/add-to-favourite"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = client_for(&server).add(ItemId::new(4), "Pasta").await;
        assert!(matches!(result, Err(ApiError::HttpStatus(204))));
    }
}
