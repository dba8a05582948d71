use thiserror::Error;

/// Errors surfaced by LLM provider clients.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Bedrock invocation failed: {0}")]
    Bedrock(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-request generation knobs. Providers fall back to their own defaults
/// for fields left unset.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Analysis temperature is pinned low so JSON answers stay deterministic.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;
pub const ANALYSIS_MAX_TOKENS: u32 = 2000;

/// Structured-analysis task. Each task carries the system instruction that
/// tells the model which JSON shape to return.
#[derive(Debug, Clone)]
pub enum AnalysisTask {
    MedicalAnalysis,
    SymptomDetection,
    Custom(String),
}

impl AnalysisTask {
    pub fn system_instruction(&self) -> String {
        match self {
            AnalysisTask::MedicalAnalysis => r#"You are a medical text analysis expert. From the provided conversation, extract the mentioned symptoms, the plausible diseases, and appropriate health suggestions, and return them as JSON.
Return format:
{
    "symptoms": ["symptom1", "symptom2", ...],
    "possible_diseases": [{"name": "disease name", "probability": probability}, ...],
    "health_suggestions": ["suggestion1", "suggestion2", ...]
}"#
                .to_string(),
            AnalysisTask::SymptomDetection => r#"You are a medical symptom detection expert. Find every health-related symptom mentioned in the provided text and return them as a JSON array.
Return format:
["symptom1", "symptom2", ...]"#
                .to_string(),
            AnalysisTask::Custom(task) => {
                format!("You are a text analysis expert. Perform a '{task}' analysis and return the result as JSON.")
            }
        }
    }
}
