//! Chat completion against an Azure OpenAI deployment using Entra ID auth.

use aoai_core::auth::AoaiCredential;
use aoai_core::client::AoaiClient;
use aoai_core::error::AoaiResult;
use aoai_models::chat::{self, ChatCompletionRequest, Message};
use aoai_samples::{init_tracing, SampleConfig};

#[tokio::main]
async fn main() -> AoaiResult<()> {
    init_tracing();

    let config = SampleConfig::from_env()?;
    // Credential construction fails fast when no ambient identity exists;
    // no request is attempted in that case.
    let client = AoaiClient::builder()
        .endpoint(&config.endpoint)
        .credential(AoaiCredential::entra_id()?)
        .build()?;

    let request = ChatCompletionRequest::builder()
        .model(&config.deployment)
        .message(Message::system(
            "You are a helpful assistant. You will talk like a pirate.",
        ))
        .message(Message::user("What's the best way to train a parrot?"))
        .build();

    let response = chat::complete(&client, &request).await?;

    for (index, content) in response.non_empty_choices() {
        println!("Content[{index}]: {content}");
    }

    Ok(())
}
