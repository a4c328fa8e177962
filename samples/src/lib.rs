//! Shared plumbing for the sample binaries: environment-sourced
//! configuration and tracing setup.
//!
//! Every sample follows the same linear shape: read configuration, build a
//! credential, build a client, issue one request, print the result. Any
//! failure propagates out of `main` and exits the process with a non-zero
//! status; no operation is silently swallowed.

use aoai_core::error::{AoaiError, AoaiResult};
use tracing_subscriber::EnvFilter;

/// Configuration shared by all samples, sourced from the environment.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Base URL of the Azure OpenAI resource.
    pub endpoint: String,
    /// Name of the model deployment to call.
    pub deployment: String,
}

impl SampleConfig {
    /// Read `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_DEPLOYMENT`.
    pub fn from_env() -> AoaiResult<Self> {
        Ok(Self {
            endpoint: require_env("AZURE_OPENAI_ENDPOINT")?,
            deployment: require_env("AZURE_OPENAI_DEPLOYMENT")?,
        })
    }
}

/// Read the static API key from `AZURE_OPENAI_API_KEY`.
pub fn api_key_from_env() -> AoaiResult<String> {
    require_env("AZURE_OPENAI_API_KEY")
}

fn require_env(name: &str) -> AoaiResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AoaiError::MissingConfig(format!(
            "{name} environment variable is required"
        ))),
    }
}

/// Initialize tracing for a sample binary.
///
/// Defaults to `info`; override with `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn config_from_env_reads_both_variables() {
        std::env::set_var("AZURE_OPENAI_ENDPOINT", "https://test.openai.azure.com");
        std::env::set_var("AZURE_OPENAI_DEPLOYMENT", "gpt-4o");

        let config = SampleConfig::from_env().expect("should read config");
        assert_eq!(config.endpoint, "https://test.openai.azure.com");
        assert_eq!(config.deployment, "gpt-4o");

        std::env::remove_var("AZURE_OPENAI_ENDPOINT");
        std::env::remove_var("AZURE_OPENAI_DEPLOYMENT");
    }

    #[test]
    #[serial]
    fn config_from_env_requires_endpoint() {
        std::env::remove_var("AZURE_OPENAI_ENDPOINT");
        std::env::set_var("AZURE_OPENAI_DEPLOYMENT", "gpt-4o");

        let result = SampleConfig::from_env();
        assert!(matches!(result, Err(AoaiError::MissingConfig(_))));

        std::env::remove_var("AZURE_OPENAI_DEPLOYMENT");
    }

    #[test]
    #[serial]
    fn api_key_from_env_rejects_empty_value() {
        std::env::set_var("AZURE_OPENAI_API_KEY", "");

        let result = api_key_from_env();
        assert!(matches!(result, Err(AoaiError::MissingConfig(_))));

        std::env::remove_var("AZURE_OPENAI_API_KEY");
    }
}
