//! Chat completion types and API calls.

use aoai_core::client::AoaiClient;
use aoai_core::error::AoaiResult;
use aoai_core::models::Usage;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

/// Builder for [`ChatCompletionRequest`].
pub struct ChatCompletionRequestBuilder {
    model: Option<String>,
    messages: Vec<Message>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    max_tokens: Option<u32>,
    n: Option<u32>,
    stop: Option<Vec<String>>,
    presence_penalty: Option<f32>,
    frequency_penalty: Option<f32>,
}

impl ChatCompletionRequest {
    /// Create a new builder.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder {
            model: None,
            messages: Vec::new(),
            temperature: None,
            top_p: None,
            max_tokens: None,
            n: None,
            stop: None,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }
}

impl ChatCompletionRequestBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Number of candidate completions to request.
    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Build the request. Panics if `model` is not set.
    pub fn build(self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.expect("model is required"),
            messages: self.messages,
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            n: self.n,
            stop: self.stop,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
        }
    }
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
        }
    }
}

/// The role of a message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Iterate over choices that carry non-empty content, as
    /// `(index, content)` pairs.
    ///
    /// A choice with absent or empty content is a valid response and is
    /// skipped here rather than treated as an error.
    pub fn non_empty_choices(&self) -> impl Iterator<Item = (u32, &str)> {
        self.choices.iter().filter_map(|choice| {
            choice
                .message
                .content
                .as_deref()
                .filter(|content| !content.is_empty())
                .map(|content| (choice.index, content))
        })
    }
}

/// A single choice in a chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// API functions
// ---------------------------------------------------------------------------

/// Send a chat completion request.
///
/// # Example
///
/// ```rust,no_run
/// # use aoai_core::client::AoaiClient;
/// # use aoai_models::chat::*;
/// # async fn example(client: &AoaiClient) -> aoai_core::error::AoaiResult<()> {
/// let request = ChatCompletionRequest::builder()
///     .model("gpt-4o")
///     .message(Message::system("You are a helpful assistant."))
///     .message(Message::user("What is Rust?"))
///     .temperature(0.7)
///     .build();
///
/// let response = complete(client, &request).await?;
/// println!("{:?}", response.choices[0].message.content);
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(name = "aoai::chat::complete", skip(client, request), fields(model = %request.model))]
pub async fn complete(
    client: &AoaiClient,
    request: &ChatCompletionRequest,
) -> AoaiResult<ChatCompletionResponse> {
    tracing::debug!(messages = request.messages.len(), "requesting chat completion");

    let response = client.post("/openai/v1/chat/completions", request).await?;
    let body = response.json::<ChatCompletionResponse>().await?;

    tracing::debug!(choices = body.choices.len(), "chat completion received");
    Ok(body)
}
