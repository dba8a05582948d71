use super::traits::LlmService;
use super::types::{
    AnalysisTask, ChatMessage, ChatOptions, ChatRole, LlmError, ANALYSIS_MAX_TOKENS,
    ANALYSIS_TEMPERATURE, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
use crate::config::model::BedrockSettings;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde_json::{json, Value};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Client for AWS Bedrock. Only Anthropic model ids are supported; the
/// request/response shape is the Anthropic messages format.
#[derive(Clone, Debug)]
pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    pub async fn new(settings: &BedrockSettings) -> Result<Self, LlmError> {
        model_provider(&settings.model_id)?;

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;
        let client = Client::new(&shared_config);

        Ok(Self {
            client,
            model_id: settings.model_id.clone(),
        })
    }

    async fn invoke(&self, request_body: &Value) -> Result<Value, LlmError> {
        let body = serde_json::to_vec(request_body)
            .map_err(|e| LlmError::Bedrock(format!("failed to encode request body: {e}")))?;

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| LlmError::Bedrock(e.to_string()))?;

        serde_json::from_slice(response.body().as_ref())
            .map_err(|e| LlmError::MalformedResponse(format!("invalid response JSON: {e}")))
    }
}

#[async_trait]
impl LlmService for BedrockClient {
    async fn generate_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, LlmError> {
        let request_body = build_anthropic_body(
            messages,
            options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        );
        let response_body = self.invoke(&request_body).await?;
        extract_anthropic_text(&response_body)
    }

    async fn analyze(
        &self,
        text: &str,
        task: &AnalysisTask,
        options: &ChatOptions,
    ) -> Result<Value, LlmError> {
        let messages = [
            ChatMessage::system(task.system_instruction()),
            ChatMessage::user(format!("{text}\n\nReturn the result as JSON.")),
        ];
        let request_body = build_anthropic_body(
            &messages,
            options.temperature.unwrap_or(ANALYSIS_TEMPERATURE),
            options.max_tokens.unwrap_or(ANALYSIS_MAX_TOKENS),
        );
        let response_body = self.invoke(&request_body).await?;
        let content = extract_anthropic_text(&response_body)?;
        serde_json::from_str(&content).map_err(|_| LlmError::MalformedResponse(content))
    }

    fn provider_name(&self) -> &'static str {
        "bedrock"
    }
}

/// The segment before the first '.' names the model vendor (anthropic,
/// amazon, ai21, ...). Only anthropic request shapes are implemented.
fn model_provider(model_id: &str) -> Result<&str, LlmError> {
    let provider = model_id.split('.').next().unwrap_or_default();
    if provider == "anthropic" {
        Ok(provider)
    } else {
        Err(LlmError::Bedrock(format!(
            "unsupported model provider: '{provider}' (model id '{model_id}')"
        )))
    }
}

/// Anthropic messages body. System messages move into the top-level `system`
/// field; the messages array only carries user/assistant turns.
fn build_anthropic_body(messages: &[ChatMessage], temperature: f32, max_tokens: u32) -> Value {
    let mut system_message = String::new();
    let mut turns = Vec::new();

    for message in messages {
        match message.role {
            ChatRole::System => {
                if !system_message.is_empty() {
                    system_message.push('\n');
                }
                system_message.push_str(&message.content);
            }
            ChatRole::User | ChatRole::Assistant => {
                turns.push(json!({
                    "role": message.role.as_str(),
                    "content": message.content
                }));
            }
        }
    }

    let mut body = json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": max_tokens,
        "temperature": temperature,
        "messages": turns
    });

    if !system_message.is_empty() {
        body["system"] = json!(system_message);
    }

    body
}

/// Pull `content[0].text` out of an Anthropic messages response.
fn extract_anthropic_text(body: &Value) -> Result<String, LlmError> {
    body.get("content")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("text"))
        .and_then(|t| t.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            LlmError::MalformedResponse(format!("missing content[0].text in: {body}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_provider_accepts_anthropic() {
        assert!(model_provider("anthropic.claude-3-opus-20240229-v1:0").is_ok());
    }

    #[test]
    fn test_model_provider_rejects_others() {
        let err = model_provider("amazon.titan-text-express-v1").unwrap_err();
        assert!(err.to_string().contains("amazon"));
    }

    #[test]
    fn test_build_anthropic_body_moves_system_prompt() {
        let messages = [
            ChatMessage::system("Be kind."),
            ChatMessage::user("I have a headache."),
            ChatMessage::assistant("Since when?"),
        ];
        let body = build_anthropic_body(&messages, 0.7, 1000);

        assert_eq!(body["anthropic_version"], ANTHROPIC_VERSION);
        assert_eq!(body["system"], "Be kind.");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "assistant");
    }

    #[test]
    fn test_build_anthropic_body_without_system() {
        let messages = [ChatMessage::user("hello")];
        let body = build_anthropic_body(&messages, 0.2, 2000);
        assert!(body.get("system").is_none());
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["temperature"], 0.2);
    }

    #[test]
    fn test_build_anthropic_body_concatenates_system_prompts() {
        let messages = [
            ChatMessage::system("First."),
            ChatMessage::system("Second."),
            ChatMessage::user("hi"),
        ];
        let body = build_anthropic_body(&messages, 0.7, 100);
        assert_eq!(body["system"], "First.\nSecond.");
    }

    #[test]
    fn test_extract_anthropic_text() {
        let body = json!({"content": [{"type": "text", "text": " All good. "}]});
        assert_eq!(extract_anthropic_text(&body).unwrap(), "All good.");
    }

    #[test]
    fn test_extract_anthropic_text_missing() {
        let body = json!({"content": []});
        assert!(matches!(
            extract_anthropic_text(&body),
            Err(LlmError::MalformedResponse(_))
        ));
    }
}
