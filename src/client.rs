use std::future::Future;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::models::{ParseRequest, Recipe};
use crate::config::DEFAULT_PARSE_ENDPOINT;
use crate::error::ClientError;

/// Anything the page controller can ask for a parsed recipe.
pub trait RecipeSource {
    fn fetch_recipe(&self, url: &str) -> impl Future<Output = Result<Recipe, ClientError>> + Send;
}

/// HTTP client for the parse service.
#[derive(Clone, Debug)]
pub struct ParseClient {
    http: Client,
    endpoint: String,
}

impl Default for ParseClient {
    fn default() -> Self {
        Self::new(DEFAULT_PARSE_ENDPOINT)
    }
}

impl ParseClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ParseClient {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one parse request for `url`.
    ///
    /// Every failure is reported as [`ClientError::ParseFailed`].
    pub async fn parse_website(&self, url: &str) -> Result<Recipe, ClientError> {
        let body = ParseRequest { url: url.to_string() };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "parse request failed");
                ClientError::ParseFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "parse service returned an error status");
            return Err(ClientError::ParseFailed);
        }

        let payload: Value = response.json().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "parse response is not JSON");
            ClientError::ParseFailed
        })?;
        debug!(%payload, "parse response received");

        Ok(Recipe::from_value(&payload))
    }
}

impl RecipeSource for ParseClient {
    async fn fetch_recipe(&self, url: &str) -> Result<Recipe, ClientError> {
        self.parse_website(url).await
    }
}
