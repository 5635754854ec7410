//! HTTP client for the scaling service API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ProviderError;

/// API client for communicating with the scaling service control plane.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for an endpoint, with an optional bearer token.
    pub fn new(endpoint: &str, token: Option<&str>) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ProviderError::Config("invalid token format".to_string()))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let response = self.client.get(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a PATCH request with an optional Idempotency-Key.
    pub async fn patch_with_idempotency_key<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T, ProviderError> {
        let mut request = self.client.patch(self.url(path)).json(body);
        if let Some(key) = idempotency_key {
            request = request.header(crate::idempotency::IDEMPOTENCY_KEY_HEADER, key);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ProviderError::Decode(e.to_string()))
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle an error response.
    async fn handle_error<T>(&self, response: reqwest::Response) -> Result<T, ProviderError> {
        let status = response.status().as_u16();

        // Try to parse the structured error envelope
        let error_body: ApiErrorResponse =
            response.json().await.unwrap_or_else(|_| ApiErrorResponse {
                code: "unknown".to_string(),
                message: "unknown error".to_string(),
                request_id: None,
            });

        Err(ProviderError::api(
            status,
            error_body.code,
            error_body.message,
            error_body.request_id,
        ))
    }
}

/// API error response structure.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    code: String,
    message: String,
    #[serde(default)]
    request_id: Option<String>,
}
