use super::{endpoint, is_write_success, send, ApiError};
use crate::forms::{LoginForm, SignupForm};
use url::Url;

/// Client for the backend's session endpoints.
///
/// A successful login stores the session cookie in the shared HTTP client,
/// which is what authenticates later favourites calls.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base: Url,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<(), ApiError> {
        self.post("login-user", Some(form.to_json())).await?;
        tracing::info!(email = %form.email, "Logged in");
        Ok(())
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        self.post("singup-user", Some(form.to_json())).await?;
        tracing::info!(email = %form.email, "Signed up");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post("logout-user", None).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn post(&self, segment: &str, body: Option<serde_json::Value>) -> Result<(), ApiError> {
        let url = endpoint(&self.base, segment)?;
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = send(request).await?;
        let status = response.status();
        if !is_write_success(status) {
            tracing::warn!(endpoint = segment, status = status.as_u16(), "Auth request failed");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
