//! Embeddings types and API calls.
//!
//! Converts input text into fixed-length numeric vectors. Vector
//! dimensionality depends on the model (and the optional `dimensions`
//! parameter); callers must not assume a particular length.
//!
//! # Example
//!
//! ```rust,no_run
//! # use aoai_core::client::AoaiClient;
//! # use aoai_models::embeddings::*;
//! # async fn example(client: &AoaiClient) -> aoai_core::error::AoaiResult<()> {
//! let request = EmbeddingRequest::builder()
//!     .model("text-embedding-3-small")
//!     .input("How do I use Rust in VS Code?")
//!     .build();
//!
//! let response = embed(client, &request).await?;
//! match response.data.first() {
//!     Some(record) => println!("{} dimensions", record.embedding.len()),
//!     None => println!("no embedding data returned"),
//! }
//! # Ok(())
//! # }
//! ```

use aoai_core::client::AoaiClient;
use aoai_core::error::{AoaiError, AoaiResult};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// An embedding request.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: EmbeddingInput,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EncodingFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Input for an embedding request.
///
/// Can be a single string or multiple strings for batch processing.
#[derive(Debug, Clone)]
pub enum EmbeddingInput {
    Single(String),
    Multiple(Vec<String>),
}

impl Serialize for EmbeddingInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Single(s) => s.serialize(serializer),
            Self::Multiple(v) => v.serialize(serializer),
        }
    }
}

/// Encoding format for embeddings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    Float,
    Base64,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An embedding response.
///
/// `data` carries one record per input element. A zero-length `data` is a
/// valid outcome; check emptiness before indexing.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    pub object: String,
    pub model: String,
    pub data: Vec<EmbeddingData>,
    pub usage: EmbeddingUsage,
}

/// A single embedding in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingData {
    pub index: u32,
    pub embedding: Vec<f32>,
}

/// Usage statistics for an embedding request.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Send an embedding request.
#[tracing::instrument(name = "aoai::embeddings::embed", skip(client, request), fields(model = %request.model))]
pub async fn embed(
    client: &AoaiClient,
    request: &EmbeddingRequest,
) -> AoaiResult<EmbeddingResponse> {
    tracing::debug!("requesting embeddings");

    let response = client.post("/openai/v1/embeddings", request).await?;
    let body = response.json::<EmbeddingResponse>().await?;

    tracing::debug!(records = body.data.len(), "embeddings received");
    Ok(body)
}

/// Builder for [`EmbeddingRequest`].
pub struct EmbeddingRequestBuilder {
    model: Option<String>,
    input: Option<EmbeddingInput>,
    dimensions: Option<u32>,
    encoding_format: Option<EncodingFormat>,
    user: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new builder.
    pub fn builder() -> EmbeddingRequestBuilder {
        EmbeddingRequestBuilder {
            model: None,
            input: None,
            dimensions: None,
            encoding_format: None,
            user: None,
        }
    }
}

impl EmbeddingRequestBuilder {
    /// Set the deployment to use for embedding generation.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a single text input to embed.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(EmbeddingInput::Single(input.into()));
        self
    }

    /// Set multiple text inputs for batch embedding.
    pub fn inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input = Some(EmbeddingInput::Multiple(
            inputs.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the number of dimensions for the output embeddings.
    ///
    /// Only supported by some models (e.g., `text-embedding-3-small`).
    pub fn dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the encoding format for the embeddings.
    ///
    /// Defaults to `Float` if not specified.
    pub fn encoding_format(mut self, format: EncodingFormat) -> Self {
        self.encoding_format = Some(format);
        self
    }

    /// Set a unique identifier for the end-user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Build the request, returning an error if required fields are missing.
    pub fn try_build(self) -> AoaiResult<EmbeddingRequest> {
        let model = self
            .model
            .ok_or_else(|| AoaiError::Builder("model is required".into()))?;
        let input = self
            .input
            .ok_or_else(|| AoaiError::Builder("input is required".into()))?;

        Ok(EmbeddingRequest {
            model,
            input,
            dimensions: self.dimensions,
            encoding_format: self.encoding_format,
            user: self.user,
        })
    }

    /// Build the request. Panics if `model` or `input` is not set.
    ///
    /// Consider using [`try_build`](Self::try_build) for fallible
    /// construction.
    pub fn build(self) -> EmbeddingRequest {
        self.try_build().expect("builder validation failed")
    }
}
