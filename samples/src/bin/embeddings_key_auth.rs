//! Text embeddings against an Azure OpenAI deployment using API key auth.

use aoai_core::auth::AoaiCredential;
use aoai_core::client::AoaiClient;
use aoai_core::error::AoaiResult;
use aoai_models::embeddings::{self, EmbeddingRequest};
use aoai_samples::{api_key_from_env, init_tracing, SampleConfig};

#[tokio::main]
async fn main() -> AoaiResult<()> {
    init_tracing();

    let config = SampleConfig::from_env()?;
    let client = AoaiClient::builder()
        .endpoint(&config.endpoint)
        .credential(AoaiCredential::api_key(api_key_from_env()?))
        .build()?;

    let request = EmbeddingRequest::builder()
        .model(&config.deployment)
        .input("How do I use Rust in VS Code?")
        .build();

    let response = embeddings::embed(&client, &request).await?;

    // A zero-length result is valid; check before indexing.
    match response.data.first() {
        Some(record) => {
            let preview: Vec<f32> = record.embedding.iter().copied().take(8).collect();
            println!(
                "Embedding ({} dimensions), first values: {:?}",
                record.embedding.len(),
                preview
            );
        }
        None => println!("no embedding data returned"),
    }

    Ok(())
}
