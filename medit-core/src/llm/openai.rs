use super::traits::LlmService;
use super::types::{
    AnalysisTask, ChatMessage, ChatOptions, LlmError, ANALYSIS_TEMPERATURE, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
use crate::config::model::OpenAiSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for the OpenAI chat completions API (and compatible backends).
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    fn build_chat_payload(&self, messages: &[ChatMessage], options: &ChatOptions) -> Value {
        build_chat_payload(&self.model, messages, options)
    }

    async fn post_chat(&self, payload: &Value) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        serde_json::from_str(&body).map_err(|_| LlmError::MalformedResponse(truncate(&body, 200)))
    }
}

#[async_trait]
impl LlmService for OpenAiClient {
    async fn generate_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, LlmError> {
        let payload = self.build_chat_payload(messages, options);
        let body = self.post_chat(&payload).await?;
        extract_message_content(&body)
    }

    async fn analyze(
        &self,
        text: &str,
        task: &AnalysisTask,
        options: &ChatOptions,
    ) -> Result<Value, LlmError> {
        let messages = [
            ChatMessage::system(task.system_instruction()),
            ChatMessage::user(text),
        ];
        let analysis_options = ChatOptions {
            temperature: Some(options.temperature.unwrap_or(ANALYSIS_TEMPERATURE)),
            max_tokens: options.max_tokens,
        };
        let mut payload = build_chat_payload(&self.model, &messages, &analysis_options);
        payload["response_format"] = json!({"type": "json_object"});

        let body = self.post_chat(&payload).await?;
        let content = extract_message_content(&body)?;
        serde_json::from_str(&content).map_err(|_| LlmError::MalformedResponse(content))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

fn build_chat_payload(model: &str, messages: &[ChatMessage], options: &ChatOptions) -> Value {
    let messages: Vec<Value> = messages
        .iter()
        .map(|msg| {
            json!({
                "role": msg.role.as_str(),
                "content": msg.content
            })
        })
        .collect();

    let temperature = options.temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    json!({
        "model": model,
        "messages": messages,
        "temperature": temperature,
        "max_tokens": max_tokens
    })
}

/// Pull `choices[0].message.content` out of a chat completions response.
fn extract_message_content(body: &Value) -> Result<String, LlmError> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| LlmError::MalformedResponse(truncate(&body.to_string(), 200)))
}

/// Backends return `{"error": {"message": ...}}`; fall back to the raw body.
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| truncate(body, 200))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}
