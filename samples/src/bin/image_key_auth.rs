//! Image generation against an Azure OpenAI deployment using API key auth.

use aoai_core::auth::AoaiCredential;
use aoai_core::client::AoaiClient;
use aoai_core::error::AoaiResult;
use aoai_models::images::{self, ImageGenerationRequest, ImageResponseFormat};
use aoai_samples::{api_key_from_env, init_tracing, SampleConfig};

#[tokio::main]
async fn main() -> AoaiResult<()> {
    init_tracing();

    let config = SampleConfig::from_env()?;
    let client = AoaiClient::builder()
        .endpoint(&config.endpoint)
        .credential(AoaiCredential::api_key(api_key_from_env()?))
        .build()?;

    let request = ImageGenerationRequest::builder()
        .model(&config.deployment)
        .prompt("A cute baby polar bear")
        .n(1)
        .response_format(ImageResponseFormat::Url)
        .build();

    let response = images::generate(&client, &request).await?;

    match response.data.first().and_then(|image| image.url.as_deref()) {
        Some(url) => {
            println!("Image URL:");
            println!("{url}");
        }
        None => println!("no image data returned"),
    }

    Ok(())
}
