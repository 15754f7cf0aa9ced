//! HTTP client for the TechBirds admin API.
//!
//! Provides a minimal client whose auth comes from an injected [`SessionProvider`],
//! generic GET/POST/PATCH/DELETE helpers that keep the raw HTTP failure intact,
//! and the media domain methods (list, upload, update, soft and hard delete).
//! The [`MediaService`] trait is the seam the media library controllers use.

pub mod api;
pub mod error;
pub mod response;
pub mod service;
pub mod upload;
pub mod urls;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use techbirds_core::ClientConfig;

pub use error::ApiError;
pub use response::{MediaListResponse, MediaPage, PaginationPayload};
pub use service::MediaService;
pub use upload::{guess_content_type, FileUpload, UploadRequest};
pub use urls::MediaUrls;

/// Authentication strategy for the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// Supplies the credentials for the current session.
///
/// Asked on every request, so implementations can rotate or revoke tokens
/// without rebuilding the client.
pub trait SessionProvider: Send + Sync + fmt::Debug {
    fn auth(&self) -> Option<Auth>;
}

/// A session whose credentials never change.
#[derive(Clone, Debug, Default)]
pub struct StaticSession(Option<Auth>);

impl StaticSession {
    pub fn new(auth: Auth) -> Self {
        Self(Some(auth))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl SessionProvider for StaticSession {
    fn auth(&self) -> Option<Auth> {
        self.0.clone()
    }
}

/// HTTP client for the TechBirds API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    urls: MediaUrls,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<dyn SessionProvider>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| ApiError::transport("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            urls: MediaUrls::new(&config),
            config,
            session,
        })
    }

    /// Create client from environment (see [`ClientConfig::from_env`]).
    /// Uses Bearer auth when TECHBIRDS_API_TOKEN (or API_TOKEN) is set.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        let session = match &config.api_token {
            Some(token) => StaticSession::new(Auth::Bearer(token.clone())),
            None => StaticSession::anonymous(),
        };
        Ok(Self::new(config, Arc::new(session))?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn urls(&self) -> &MediaUrls {
        &self.urls
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.urls.api_base(), path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.auth() {
            Some(Auth::Bearer(token)) => {
                request.header("Authorization", format!("Bearer {}", token))
            }
            Some(Auth::XApiKey(key)) => request.header("X-API-Key", key),
            None => request,
        }
    }

    /// Send with auth applied; non-2xx statuses become [`ApiError::Status`]
    /// carrying the raw body.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| ApiError::transport("Failed to send request", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(status = status.as_u16(), "API request failed");
            return Err(ApiError::from_status(status.as_u16(), error_text));
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport("Failed to read response body", e))?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// Send a JSON body with the given method and deserialize the response.
    pub async fn send_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.client.request(method, self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// DELETE request. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.client.delete(self.build_url(path));
        self.send(request).await?;
        Ok(())
    }
}
