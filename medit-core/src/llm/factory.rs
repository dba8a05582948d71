use super::bedrock::BedrockClient;
use super::openai::OpenAiClient;
use super::traits::LlmService;
use super::types::LlmError;
use crate::config::model::{LlmProvider, LlmSettings};
use std::sync::Arc;
use std::time::Duration;

/// Build the configured LLM service.
///
/// Credentials are resolved from the settings (the config loader already
/// merged environment overrides); missing credentials name the variable the
/// operator has to set.
pub async fn build_llm_service(settings: &LlmSettings) -> Result<Arc<dyn LlmService>, LlmError> {
    let timeout = Duration::from_secs(settings.request_timeout_seconds);

    match settings.provider {
        LlmProvider::OpenAi => {
            if settings.openai.api_key.is_empty() {
                return Err(LlmError::MissingCredentials(
                    "OpenAI API key required. Set OPENAI_API_KEY or llm.openai.api_key".to_string(),
                ));
            }
            let client = OpenAiClient::new(&settings.openai, timeout)?;
            Ok(Arc::new(client))
        }
        LlmProvider::Bedrock => {
            // The SDK credential chain is broader, but explicit keys are the
            // deployment contract here.
            if std::env::var("AWS_ACCESS_KEY_ID").is_err()
                || std::env::var("AWS_SECRET_ACCESS_KEY").is_err()
            {
                return Err(LlmError::MissingCredentials(
                    "AWS credentials required. Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"
                        .to_string(),
                ));
            }
            let client = BedrockClient::new(&settings.bedrock).await?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::LlmSettings;

    #[tokio::test]
    async fn test_factory_rejects_missing_openai_key() {
        let settings = LlmSettings::default();
        let err = build_llm_service(&settings).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredentials(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_factory_builds_openai_client() {
        let mut settings = LlmSettings::default();
        settings.openai.api_key = "sk-test-1234567890".to_string();
        let service = build_llm_service(&settings).await.unwrap();
        assert_eq!(service.provider_name(), "openai");
    }

    #[tokio::test]
    async fn test_factory_rejects_bad_bedrock_model_id() {
        let mut settings = LlmSettings::default();
        settings.provider = LlmProvider::Bedrock;
        settings.bedrock.model_id = "amazon.titan-text-express-v1".to_string();
        unsafe {
            std::env::set_var("AWS_ACCESS_KEY_ID", "AKIATEST");
            std::env::set_var("AWS_SECRET_ACCESS_KEY", "secret-test");
        }
        let err = build_llm_service(&settings).await.unwrap_err();
        assert!(matches!(err, LlmError::Bedrock(_)));
        unsafe {
            std::env::remove_var("AWS_ACCESS_KEY_ID");
            std::env::remove_var("AWS_SECRET_ACCESS_KEY");
        }
    }
}
