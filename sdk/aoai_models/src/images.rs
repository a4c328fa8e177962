//! Image generation types and API calls.
//!
//! # Example
//!
//! ```rust,no_run
//! # use aoai_core::client::AoaiClient;
//! # use aoai_models::images::*;
//! # async fn example(client: &AoaiClient) -> aoai_core::error::AoaiResult<()> {
//! let request = ImageGenerationRequest::builder()
//!     .model("dall-e-3")
//!     .prompt("A cute baby polar bear")
//!     .n(1)
//!     .response_format(ImageResponseFormat::Url)
//!     .build();
//!
//! let response = generate(client, &request).await?;
//! if let Some(url) = response.data[0].url.as_deref() {
//!     println!("Image URL: {url}");
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

/// An image generation request.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ImageQuality>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ImageResponseFormat>,
}

/// Output dimensions for generated images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageSize {
    #[serde(rename = "1024x1024")]
    Square1024,
    #[serde(rename = "1792x1024")]
    Wide1792x1024,
    #[serde(rename = "1024x1792")]
    Tall1024x1792,
}

/// Rendering quality for generated images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

/// Rendering style for generated images.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Vivid,
    Natural,
}

/// How generated images are returned: as a short-lived URL or as
/// base64-encoded bytes inline in the response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    Url,
    B64Json,
}

/// Builder for [`ImageGenerationRequest`].
pub struct ImageGenerationRequestBuilder {
    model: Option<String>,
    prompt: Option<String>,
    n: Option<u32>,
    size: Option<ImageSize>,
    quality: Option<ImageQuality>,
    style: Option<ImageStyle>,
    response_format: Option<ImageResponseFormat>,
}

impl ImageGenerationRequest {
    /// Create a new builder.
    pub fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder {
            model: None,
            prompt: None,
            n: None,
            size: None,
            quality: None,
            style: None,
            response_format: None,
        }
    }
}

impl ImageGenerationRequestBuilder {
    /// Set the deployment to use for image generation.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the text prompt describing the desired image.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the number of images to generate (must be >= 1).
    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn style(mut self, style: ImageStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn response_format(mut self, format: ImageResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Build the request, returning an error if required fields are missing
    /// or `n` is zero.
    pub fn try_build(self) -> AoaiResult<ImageGenerationRequest> {
        let model = self
            .model
            .ok_or_else(|| AoaiError::Builder("model is required".into()))?;
        let prompt = self
            .prompt
            .ok_or_else(|| AoaiError::Builder("prompt is required".into()))?;

        if self.n == Some(0) {
            return Err(AoaiError::Builder("n must be at least 1".into()));
        }

        Ok(ImageGenerationRequest {
            model,
            prompt,
            n: self.n,
            size: self.size,
            quality: self.quality,
            style: self.style,
            response_format: self.response_format,
        })
    }

    /// Build the request. Panics if `model` or `prompt` is not set.
    ///
    /// Consider using [`try_build`](Self::try_build) for fallible
    /// construction.
    pub fn build(self) -> ImageGenerationRequest {
        self.try_build().expect("builder validation failed")
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An image generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    pub created: u64,
    pub data: Vec<GeneratedImage>,
}

/// A single generated image reference.
///
/// Exactly one of `url` and `b64_json` is populated, depending on the
/// requested [`ImageResponseFormat`].
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Send an image generation request.
///
/// A successful response carries one [`GeneratedImage`] per requested image,
/// so `data[0]` is always readable when at least one image was requested.
#[tracing::instrument(name = "aoai::images::generate", skip(client, request), fields(model = %request.model))]
pub async fn generate(
    client: &AoaiClient,
    request: &ImageGenerationRequest,
) -> AoaiResult<ImageGenerationResponse> {
    tracing::debug!(n = request.n, "requesting image generation");

    let response = client.post("/openai/v1/images/generations", request).await?;
    let body = response.json::<ImageGenerationResponse>().await?;

    tracing::debug!(images = body.data.len(), "images generated");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_mock_client;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // --- Builder tests ---

    #[test]
    fn builder_with_required_fields_only() {
        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A cute baby polar bear")
            .build();

        assert_eq!(request.model, "dall-e-3");
        assert_eq!(request.prompt, "A cute baby polar bear");
        assert!(request.n.is_none());
        assert!(request.size.is_none());
        assert!(request.quality.is_none());
        assert!(request.style.is_none());
        assert!(request.response_format.is_none());
    }

    #[test]
    fn builder_with_all_fields() {
        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A lighthouse in a storm")
            .n(2)
            .size(ImageSize::Wide1792x1024)
            .quality(ImageQuality::Hd)
            .style(ImageStyle::Vivid)
            .response_format(ImageResponseFormat::Url)
            .build();

        assert_eq!(request.n, Some(2));
        assert_eq!(request.size, Some(ImageSize::Wide1792x1024));
        assert_eq!(request.quality, Some(ImageQuality::Hd));
        assert_eq!(request.style, Some(ImageStyle::Vivid));
        assert_eq!(request.response_format, Some(ImageResponseFormat::Url));
    }

    #[test]
    #[should_panic(expected = "prompt is required")]
    fn builder_without_prompt_panics() {
        ImageGenerationRequest::builder().model("dall-e-3").build();
    }

    #[test]
    fn try_build_rejects_zero_count() {
        let result = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A cute baby polar bear")
            .n(0)
            .try_build();

        assert!(matches!(result, Err(AoaiError::Builder(_))));
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn try_build_returns_error_when_model_missing() {
        let result = ImageGenerationRequest::builder()
            .prompt("A cute baby polar bear")
            .try_build();

        assert!(matches!(result, Err(AoaiError::Builder(_))));
    }

    // --- Serialization tests ---

    #[test]
    fn request_serialization_skips_none_fields() {
        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A cute baby polar bear")
            .build();

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["prompt"], "A cute baby polar bear");
        assert!(json.get("n").is_none());
        assert!(json.get("size").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn request_serialization_uses_wire_names() {
        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A lighthouse")
            .n(1)
            .size(ImageSize::Wide1792x1024)
            .quality(ImageQuality::Hd)
            .style(ImageStyle::Vivid)
            .response_format(ImageResponseFormat::B64Json)
            .build();

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1792x1024");
        assert_eq!(json["quality"], "hd");
        assert_eq!(json["style"], "vivid");
        assert_eq!(json["response_format"], "b64_json");
    }

    #[test]
    fn response_deserialization_url_format() {
        let json = serde_json::json!({
            "created": 1700000000,
            "data": [{
                "url": "https://example.com/generated/1.png",
                "revised_prompt": "A photorealistic cute baby polar bear"
            }]
        });

        let response: ImageGenerationResponse = serde_json::from_value(json).unwrap();

        assert_eq!(response.created, 1700000000);
        assert_eq!(response.data.len(), 1);
        assert_eq!(
            response.data[0].url.as_deref(),
            Some("https://example.com/generated/1.png")
        );
        assert!(response.data[0].b64_json.is_none());
    }

    #[test]
    fn response_deserialization_b64_format() {
        let json = serde_json::json!({
            "created": 1700000000,
            "data": [{"b64_json": "aGVsbG8="}]
        });

        let response: ImageGenerationResponse = serde_json::from_value(json).unwrap();

        assert!(response.data[0].url.is_none());
        assert_eq!(response.data[0].b64_json.as_deref(), Some("aGVsbG8="));
    }

    // --- Integration tests with wiremock ---

    #[tokio::test]
    async fn generate_single_image_success() {
        let server = MockServer::start().await;

        let expected_request = serde_json::json!({
            "model": "dall-e-3",
            "prompt": "A cute baby polar bear",
            "n": 1,
            "response_format": "url"
        });

        Mock::given(method("POST"))
            .and(path("/openai/v1/images/generations"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_json(&expected_request))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "created": 1700000000,
                "data": [{"url": "https://example.com/bear.png"}]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);

        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A cute baby polar bear")
            .n(1)
            .response_format(ImageResponseFormat::Url)
            .build();

        let response = generate(&client, &request).await.expect("should succeed");

        assert_eq!(response.data.len(), 1);
        assert_eq!(
            response.data[0].url.as_deref(),
            Some("https://example.com/bear.png")
        );
    }

    #[tokio::test]
    async fn generate_returns_one_reference_per_requested_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/openai/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "created": 1700000000,
                "data": [
                    {"url": "https://example.com/1.png"},
                    {"url": "https://example.com/2.png"},
                    {"url": "https://example.com/3.png"}
                ]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);

        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A lighthouse")
            .n(3)
            .build();

        let response = generate(&client, &request).await.expect("should succeed");
        assert_eq!(response.data.len(), 3);
    }

    #[tokio::test]
    async fn generate_api_error() {
        let server = MockServer::start().await;

        let error_response = serde_json::json!({
            "error": {
                "code": "contentFilter",
                "message": "The prompt was rejected by the content filter"
            }
        });

        Mock::given(method("POST"))
            .and(path("/openai/v1/images/generations"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_response))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server);

        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("A cute baby polar bear")
            .build();

        let result = generate(&client, &request).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("contentFilter"));
    }
}
