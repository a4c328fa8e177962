//! HTTP client for the Azure OpenAI v1 API surface.
//!
//! This module provides [`AoaiClient`], the entry point shared by every
//! operation: it binds one endpoint to one credential and issues single
//! request/response exchanges. There is deliberately no retry loop and no
//! streaming support; each call is one attempt with exactly two outcomes.
//!
//! # Examples
//!
//! ## Using API Key
//! ```rust,no_run
//! use aoai_core::client::AoaiClient;
//! use aoai_core::auth::AoaiCredential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AoaiClient::builder()
//!     .endpoint("https://your-resource.openai.azure.com")
//!     .credential(AoaiCredential::api_key("your-key"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Entra ID
//! ```rust,no_run
//! use aoai_core::client::AoaiClient;
//! use aoai_core::auth::AoaiCredential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AoaiClient::builder()
//!     .endpoint("https://your-resource.openai.azure.com")
//!     .credential(AoaiCredential::entra_id()?)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::auth::AoaiCredential;
use crate::error::{AoaiError, AoaiResult};
use reqwest::Client as HttpClient;
use url::Url;

use std::time::Duration;

/// Default API version sent with every request.
pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// The client for issuing Azure OpenAI API calls.
///
/// Immutable after construction, cheaply cloneable, and safe to reuse for
/// many sequential calls; it holds no per-call state. Construction performs
/// no network I/O.
#[derive(Debug, Clone)]
pub struct AoaiClient {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
    pub(crate) credential: AoaiCredential,
    pub(crate) api_version: String,
}

/// Builder for constructing an [`AoaiClient`].
///
/// Use [`AoaiClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct AoaiClientBuilder {
    endpoint: Option<String>,
    credential: Option<AoaiCredential>,
    api_version: Option<String>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl AoaiClient {
    /// Create a new builder for configuring an `AoaiClient`.
    pub fn builder() -> AoaiClientBuilder {
        AoaiClientBuilder::default()
    }

    /// Get the base endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get the API version being used.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build a full URL for an API path.
    pub fn url(&self, path: &str) -> AoaiResult<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| AoaiError::invalid_endpoint("failed to construct URL", e))
    }

    /// Send a POST request with a JSON body.
    ///
    /// Resolves the credential, attaches the `Authorization` and
    /// `api-version` headers, and issues exactly one attempt. Non-success
    /// responses are decoded into [`AoaiError::Api`] when the body carries
    /// the service's error envelope, otherwise [`AoaiError::Http`].
    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> AoaiResult<reqwest::Response> {
        let url = self.url(path)?;
        let auth = self.credential.resolve().await?;

        tracing::debug!(%url, "sending request");

        let response = self
            .http
            .post(url)
            .header("Authorization", &auth)
            .header("api-version", &self.api_version)
            .json(body)
            .send()
            .await?;

        tracing::debug!(status = response.status().as_u16(), "response received");
        Self::check_response(response).await
    }

    /// Maximum length for error messages carried out of response bodies.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Redact bearer tokens and `sk-` style keys from an error message, then
    /// truncate it to [`Self::MAX_ERROR_MESSAGE_LEN`].
    pub(crate) fn sanitize_message(msg: &str) -> String {
        let mut out = String::with_capacity(msg.len());
        let mut rest = msg;

        while !rest.is_empty() {
            let bearer = rest.find("Bearer ");
            let sk = rest.find("sk-");
            let (pos, skip) = match (bearer, sk) {
                (Some(b), Some(s)) if b <= s => (b, 7),
                (Some(b), None) => (b, 7),
                (_, Some(s)) => (s, 0),
                (None, None) => break,
            };

            out.push_str(&rest[..pos + skip]);
            let secret = &rest[pos + skip..];
            let end = secret
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
                .unwrap_or(secret.len());
            out.push_str("[REDACTED]");
            rest = &secret[end..];
        }
        out.push_str(rest);

        if out.len() > Self::MAX_ERROR_MESSAGE_LEN {
            let cut = out
                .char_indices()
                .map(|(i, _)| i)
                .take_while(|&i| i <= Self::MAX_ERROR_MESSAGE_LEN)
                .last()
                .unwrap_or(0);
            out.truncate(cut);
            out.push_str("... (truncated)");
        }
        out
    }

    /// Check the response status and return an error if not successful.
    async fn check_response(response: reqwest::Response) -> AoaiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        // The service wraps failures in an {"error": {code, message}} envelope.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(err_obj) = value.get("error") {
                return Err(AoaiError::Api {
                    code: err_obj
                        .get("code")
                        .and_then(|c| c.as_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    message: Self::sanitize_message(
                        err_obj
                            .get("message")
                            .and_then(|m| m.as_str())
                            .unwrap_or(&body),
                    ),
                });
            }
        }

        Err(AoaiError::Http {
            status,
            message: Self::sanitize_message(&body),
        })
    }
}

impl AoaiClientBuilder {
    /// Set the Azure OpenAI endpoint URL.
    ///
    /// This should be in the format:
    /// `https://<resource-name>.openai.azure.com`
    ///
    /// If not set, the builder will check the `AZURE_OPENAI_ENDPOINT`
    /// environment variable.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credential to use for authentication.
    ///
    /// If not set, the builder will use [`AoaiCredential::from_env()`],
    /// which checks for an API key in `AZURE_OPENAI_API_KEY` and falls back
    /// to the Entra ID developer-tools chain.
    pub fn credential(mut self, credential: AoaiCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set the API version.
    ///
    /// Defaults to [`DEFAULT_API_VERSION`].
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set a custom HTTP client.
    ///
    /// **Note:** If you provide a custom HTTP client, timeout configuration
    /// via [`connect_timeout`](Self::connect_timeout) and
    /// [`read_timeout`](Self::read_timeout) is ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout, covering the full request/response cycle.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Build the `AoaiClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint is provided and `AZURE_OPENAI_ENDPOINT` is not set
    /// - The endpoint URL is invalid
    /// - Credential creation fails (when using environment-based credentials)
    pub fn build(self) -> AoaiResult<AoaiClient> {
        let http = self.http_client.unwrap_or_else(|| {
            let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
            let read_timeout = self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT);

            reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(read_timeout)
                .build()
                .expect("failed to build HTTP client")
        });

        let endpoint_str = self
            .endpoint
            .or_else(|| std::env::var("AZURE_OPENAI_ENDPOINT").ok())
            .ok_or_else(|| {
                AoaiError::MissingConfig(
                    "endpoint is required. Set it via builder or AZURE_OPENAI_ENDPOINT env var."
                        .into(),
                )
            })?;

        let endpoint = Url::parse(&endpoint_str)
            .map_err(|e| AoaiError::invalid_endpoint("invalid endpoint URL", e))?;

        let credential = self
            .credential
            .map(Ok)
            .unwrap_or_else(AoaiCredential::from_env)?;

        Ok(AoaiClient {
            http,
            endpoint,
            credential,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}
