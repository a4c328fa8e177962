use crate::error::{AoaiError, AoaiResult};
use azure_core::credentials::TokenCredential;
use azure_identity::{AzureCliCredential, DeveloperToolsCredential};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Token scope for Azure OpenAI / Cognitive Services resources.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Credential types supported by the Azure OpenAI sample SDK.
///
/// Both variants answer the same question at request time: "what goes in the
/// `Authorization` header for the next call?" Static keys answer it without
/// I/O; token credentials defer to `azure_identity`, which acquires and
/// refreshes Entra ID tokens on demand.
#[derive(Clone)]
pub enum AoaiCredential {
    /// Static API key authentication.
    ApiKey(SecretString),

    /// Microsoft Entra ID token-based authentication, backed by any
    /// `azure_core` token credential implementation.
    Token(Arc<dyn TokenCredential>),
}

impl AoaiCredential {
    /// Create a credential from the `AZURE_OPENAI_API_KEY` environment
    /// variable, falling back to the Entra ID developer-tools chain when the
    /// variable is not set.
    pub fn from_env() -> AoaiResult<Self> {
        match std::env::var("AZURE_OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::ApiKey(SecretString::from(key))),
            _ => Self::entra_id(),
        }
    }

    /// Create an API key credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    /// Create an Entra ID credential that resolves ambient developer
    /// identity (Azure CLI, Azure Developer CLI).
    ///
    /// Fails when no identity source can be constructed in the current
    /// environment; no request should be attempted after that.
    pub fn entra_id() -> AoaiResult<Self> {
        let credential = DeveloperToolsCredential::new(None)
            .map_err(|e| AoaiError::Credential(format!("developer tools credential: {e}")))?;
        Ok(Self::Token(credential))
    }

    /// Create an Entra ID credential backed by the Azure CLI login.
    pub fn azure_cli() -> AoaiResult<Self> {
        let credential = AzureCliCredential::new(None)
            .map_err(|e| AoaiError::Credential(format!("azure cli credential: {e}")))?;
        Ok(Self::Token(credential))
    }

    /// Wrap a caller-supplied token credential (service principal, managed
    /// identity, ...).
    pub fn token_credential(credential: Arc<dyn TokenCredential>) -> Self {
        Self::Token(credential)
    }

    /// Resolve the credential to an `Authorization` header value.
    ///
    /// The key path never performs I/O. The token path requests a token for
    /// [`COGNITIVE_SERVICES_SCOPE`] on every call; caching and refresh are
    /// the identity library's concern.
    pub async fn resolve(&self) -> AoaiResult<String> {
        match self {
            Self::ApiKey(key) => Ok(format!("Bearer {}", key.expose_secret())),
            Self::Token(credential) => {
                let token = credential
                    .get_token(&[COGNITIVE_SERVICES_SCOPE], None)
                    .await
                    .map_err(|e| AoaiError::Credential(format!("token acquisition: {e}")))?;
                Ok(format!("Bearer {}", token.token.secret()))
            }
        }
    }
}

impl std::fmt::Debug for AoaiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => write!(f, "AoaiCredential::ApiKey(****)"),
            Self::Token(_) => write!(f, "AoaiCredential::Token(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_core::credentials::{AccessToken, Secret, TokenRequestOptions};
    use azure_core::error::ErrorKind;
    use azure_core::time::{Duration, OffsetDateTime};
    use serial_test::serial;

    #[derive(Debug)]
    struct StaticTokenCredential(&'static str);

    #[async_trait::async_trait]
    impl TokenCredential for StaticTokenCredential {
        async fn get_token(
            &self,
            _scopes: &[&str],
            _options: Option<TokenRequestOptions<'_>>,
        ) -> azure_core::Result<AccessToken> {
            Ok(AccessToken::new(
                Secret::new(self.0),
                OffsetDateTime::now_utc() + Duration::minutes(5),
            ))
        }
    }

    #[derive(Debug)]
    struct FailingTokenCredential;

    #[async_trait::async_trait]
    impl TokenCredential for FailingTokenCredential {
        async fn get_token(
            &self,
            _scopes: &[&str],
            _options: Option<TokenRequestOptions<'_>>,
        ) -> azure_core::Result<AccessToken> {
            Err(azure_core::Error::with_message(
                ErrorKind::Credential,
                "no identity available",
            ))
        }
    }

    #[tokio::test]
    async fn api_key_resolves_without_io() {
        let credential = AoaiCredential::api_key("test-key");
        let header = credential.resolve().await.expect("should resolve");
        assert_eq!(header, "Bearer test-key");
    }

    #[tokio::test]
    async fn token_credential_resolves_to_bearer_header() {
        let credential =
            AoaiCredential::token_credential(Arc::new(StaticTokenCredential("mock-token")));
        let header = credential.resolve().await.expect("should resolve");
        assert_eq!(header, "Bearer mock-token");
    }

    #[tokio::test]
    async fn token_acquisition_failure_is_credential_error() {
        let credential = AoaiCredential::token_credential(Arc::new(FailingTokenCredential));
        let result = credential.resolve().await;

        assert!(matches!(result, Err(AoaiError::Credential(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("token acquisition"));
    }

    #[test]
    fn debug_never_prints_key_material() {
        let credential = AoaiCredential::api_key("super-secret-key");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("****"));
    }

    #[test]
    #[serial]
    fn from_env_prefers_api_key() {
        std::env::set_var("AZURE_OPENAI_API_KEY", "env-key");

        let credential = AoaiCredential::from_env().expect("should build");
        assert!(matches!(credential, AoaiCredential::ApiKey(_)));

        std::env::remove_var("AZURE_OPENAI_API_KEY");
    }

    #[test]
    #[serial]
    fn from_env_ignores_empty_api_key() {
        std::env::set_var("AZURE_OPENAI_API_KEY", "");

        // An empty key falls through to the Entra chain, which either builds
        // or reports a credential error; it must not produce an ApiKey.
        if let Ok(credential) = AoaiCredential::from_env() {
            assert!(matches!(credential, AoaiCredential::Token(_)));
        }

        std::env::remove_var("AZURE_OPENAI_API_KEY");
    }
}
