//! The assistant facade: every LLM-backed operation with its rule-based
//! fallback.

use crate::analysis::{self, ConversationAnalysis};
use crate::prompts;
use crate::report::{self, ReportDraft, Severity};
use medit_core::llm::{AnalysisTask, ChatMessage, ChatOptions, LlmService};
use std::sync::Arc;
use tracing::{info, warn};

/// The slice of user data the prompts need. Decouples this crate from the
/// storage models.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub usual_illness: Vec<String>,
}

/// AI health assistant. LLM failures never propagate out of this type;
/// every operation degrades to its rule-based fallback.
#[derive(Clone)]
pub struct Assistant {
    llm: Arc<dyn LlmService>,
}

impl Assistant {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn provider_name(&self) -> &'static str {
        self.llm.provider_name()
    }

    /// Answer a user message in an ongoing consultation.
    pub async fn reply(&self, user_message: &str) -> String {
        let messages = [
            ChatMessage::system(prompts::ASSISTANT_SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ];
        match self
            .llm
            .generate_chat(&messages, &ChatOptions::default())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("LLM reply failed, using rule-based fallback: {e}");
                fallback_reply(user_message)
            }
        }
    }

    /// Personalized opening message for a new conversation.
    pub async fn greet(&self, profile: &UserProfile) -> String {
        let messages = [
            ChatMessage::system(prompts::GREETING_SYSTEM_PROMPT),
            ChatMessage::user(prompts::greeting_prompt(profile)),
        ];
        match self
            .llm
            .generate_chat(&messages, &ChatOptions::default())
            .await
        {
            Ok(greeting) => greeting,
            Err(e) => {
                warn!("LLM greeting failed, using rule-based fallback: {e}");
                fallback_greeting(profile)
            }
        }
    }

    /// Analyze the user-authored side of a conversation for symptoms and
    /// probable conditions.
    pub async fn analyze_conversation(&self, user_text: &str) -> ConversationAnalysis {
        if user_text.trim().is_empty() {
            return analysis::empty_analysis();
        }

        match self
            .llm
            .analyze(
                user_text,
                &AnalysisTask::MedicalAnalysis,
                &ChatOptions::default(),
            )
            .await
        {
            Ok(value) => {
                info!("conversation analyzed via {}", self.llm.provider_name());
                analysis::parse_llm_analysis(&value)
            }
            Err(e) => {
                warn!("LLM analysis failed, using rule-based fallback: {e}");
                analysis::fallback_analysis(user_text)
            }
        }
    }

    /// Compose the health report for an analyzed conversation. A reported
    /// pain intensity (0-10) overrides the model's severity call.
    pub async fn compose_report(
        &self,
        profile: &UserProfile,
        transcript: &str,
        analysis: &ConversationAnalysis,
        pain_intensity: Option<f64>,
    ) -> ReportDraft {
        let messages = [
            ChatMessage::system(prompts::REPORT_SYSTEM_PROMPT),
            ChatMessage::user(prompts::report_prompt(profile, transcript, analysis)),
        ];
        let mut draft = match self
            .llm
            .generate_chat(&messages, &ChatOptions::default())
            .await
        {
            Ok(raw_report) => {
                let (content, severity) = report::extract_severity(&raw_report);
                ReportDraft { content, severity }
            }
            Err(e) => {
                warn!("LLM report failed, using rule-based fallback: {e}");
                ReportDraft {
                    content: report::fallback_report(profile, analysis),
                    severity: Severity::Green,
                }
            }
        };

        if let Some(pain) = pain_intensity {
            draft.severity = report::severity_from_pain(pain);
        }

        draft
    }
}

/// Keyword-routed replies for when the LLM is unreachable.
pub fn fallback_reply(user_message: &str) -> String {
    let message = user_message.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| message.contains(k));

    if contains_any(&["hello", "hi ", "good morning", "good evening"]) || message == "hi" {
        return "Hello! How can I help you today? Do you have any health questions on your mind?"
            .to_string();
    }
    if contains_any(&["thank", "thanks"]) {
        return "You're welcome! I'm glad I could help. Let me know anytime you need anything else."
            .to_string();
    }
    if contains_any(&["symptom", "hurt", "pain", "ache", "fever", "dizzy", "sick"]) {
        return "Could you tell me a bit more about your symptoms? When did they start? Are there any accompanying symptoms?"
            .to_string();
    }
    if contains_any(&["medicine", "medication", "prescription", "dose", "side effect"]) {
        return "For questions about medication, please consult a medical professional. It is safest to take medicine exactly as prescribed by your doctor."
            .to_string();
    }
    if contains_any(&["diet", "food", "nutrition", "meal", "eat"]) {
        return "A balanced diet is very important for staying healthy. I recommend a variety of vegetables and fruit with adequate protein. For diet plans tied to a specific condition, please consult a specialist."
            .to_string();
    }
    if contains_any(&["exercise", "workout", "fitness", "walking", "gym"]) {
        return "Regular exercise is great for both physical and mental health. Try starting with about 30 minutes of light aerobic exercise a day, at an intensity that suits your current condition."
            .to_string();
    }

    "If you can tell me more about what you're experiencing, I can give you more accurate information. Please describe your health status or any specific symptoms.".to_string()
}

/// Rule-based greeting assembled from the profile.
pub fn fallback_greeting(profile: &UserProfile) -> String {
    let name_greeting = match &profile.nickname {
        Some(nickname) => format!("Hello, {nickname}!"),
        None => "Hello!".to_string(),
    };

    let health_greeting = if profile.usual_illness.is_empty() {
        String::new()
    } else {
        format!(
            "\nI understand you have been dealing with {}. How are you feeling today?",
            profile.usual_illness.join(", ")
        )
    };

    format!(
        "{name_greeting}{health_greeting}\n\nI'm your health consultation assistant. Feel free to ask me anything about your health."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medit_core::llm::{AnalysisTask, ChatMessage, ChatOptions, LlmError};
    use serde_json::{json, Value};

    /// Test double returning canned answers.
    #[derive(Debug)]
    struct CannedLlm {
        chat: String,
        analysis: Value,
    }

    #[async_trait]
    impl LlmService for CannedLlm {
        async fn generate_chat(
            &self,
            _messages: &[ChatMessage],
            _options: &ChatOptions,
        ) -> Result<String, LlmError> {
            Ok(self.chat.clone())
        }

        async fn analyze(
            &self,
            _text: &str,
            _task: &AnalysisTask,
            _options: &ChatOptions,
        ) -> Result<Value, LlmError> {
            Ok(self.analysis.clone())
        }

        fn provider_name(&self) -> &'static str {
            "canned"
        }
    }

    /// Test double that always errors.
    #[derive(Debug)]
    struct FailingLlm;

    #[async_trait]
    impl LlmService for FailingLlm {
        async fn generate_chat(
            &self,
            _messages: &[ChatMessage],
            _options: &ChatOptions,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "backend down".to_string(),
            })
        }

        async fn analyze(
            &self,
            _text: &str,
            _task: &AnalysisTask,
            _options: &ChatOptions,
        ) -> Result<Value, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "backend down".to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            nickname: Some("Kim".to_string()),
            gender: Some("male".to_string()),
            age_range: Some("38".to_string()),
            usual_illness: vec!["hypertension".to_string()],
        }
    }

    #[tokio::test]
    async fn test_reply_uses_llm_answer() {
        let assistant = Assistant::new(Arc::new(CannedLlm {
            chat: "Please drink more water.".to_string(),
            analysis: json!({}),
        }));
        assert_eq!(assistant.reply("I feel thirsty").await, "Please drink more water.");
    }

    #[tokio::test]
    async fn test_reply_falls_back_on_error() {
        let assistant = Assistant::new(Arc::new(FailingLlm));
        let reply = assistant.reply("I have a headache and pain").await;
        assert!(reply.contains("symptoms"));
    }

    #[tokio::test]
    async fn test_greet_falls_back_with_profile() {
        let assistant = Assistant::new(Arc::new(FailingLlm));
        let greeting = assistant.greet(&profile()).await;
        assert!(greeting.contains("Hello, Kim!"));
        assert!(greeting.contains("hypertension"));
    }

    #[tokio::test]
    async fn test_analyze_conversation_parses_llm_json() {
        let assistant = Assistant::new(Arc::new(CannedLlm {
            chat: String::new(),
            analysis: json!({
                "symptoms": ["cough"],
                "possible_diseases": [{"name": "bronchitis", "probability": 64.0}],
                "health_suggestions": ["rest your voice"]
            }),
        }));
        let analysis = assistant.analyze_conversation("I keep coughing").await;
        assert_eq!(analysis.symptoms, vec!["cough"]);
        assert_eq!(analysis.diseases[0].name, "bronchitis");
    }

    #[tokio::test]
    async fn test_analyze_conversation_empty_input() {
        let assistant = Assistant::new(Arc::new(FailingLlm));
        let analysis = assistant.analyze_conversation("   ").await;
        assert!(analysis.symptoms.is_empty());
        assert_eq!(analysis.suggestions.len(), 5);
    }

    #[tokio::test]
    async fn test_analyze_conversation_falls_back() {
        let assistant = Assistant::new(Arc::new(FailingLlm));
        let analysis = assistant.analyze_conversation("I have a sore throat").await;
        assert!(analysis.symptoms.contains(&"sore throat".to_string()));
    }

    #[tokio::test]
    async fn test_compose_report_extracts_severity() {
        let assistant = Assistant::new(Arc::new(CannedLlm {
            chat: "# Report\nSee a doctor soon.\n\nSEVERITY_LEVEL: orange".to_string(),
            analysis: json!({}),
        }));
        let draft = assistant
            .compose_report(&profile(), "User: chest pain", &Default::default(), None)
            .await;
        assert_eq!(draft.severity, Severity::Orange);
        assert!(!draft.content.contains("SEVERITY_LEVEL"));
    }

    #[tokio::test]
    async fn test_compose_report_pain_override() {
        let assistant = Assistant::new(Arc::new(CannedLlm {
            chat: "All good.\n\nSEVERITY_LEVEL: green".to_string(),
            analysis: json!({}),
        }));
        let draft = assistant
            .compose_report(&profile(), "", &Default::default(), Some(8.0))
            .await;
        assert_eq!(draft.severity, Severity::Red);
    }

    #[tokio::test]
    async fn test_compose_report_fallback_is_green() {
        let assistant = Assistant::new(Arc::new(FailingLlm));
        let draft = assistant
            .compose_report(&profile(), "", &Default::default(), None)
            .await;
        assert_eq!(draft.severity, Severity::Green);
        assert!(draft.content.starts_with("# Health Analysis Report"));
    }

    #[test]
    fn test_fallback_reply_keyword_routing() {
        assert!(fallback_reply("hello there").contains("How can I help"));
        assert!(fallback_reply("thanks a lot").contains("You're welcome"));
        assert!(fallback_reply("my head hurts").contains("symptoms"));
        assert!(fallback_reply("can I change my medication dose?").contains("medical professional"));
        assert!(fallback_reply("what should I eat?").contains("balanced diet"));
        assert!(fallback_reply("is walking good exercise?").contains("aerobic"));
        assert!(fallback_reply("blah").contains("more accurate information"));
    }

    #[test]
    fn test_fallback_greeting_without_profile() {
        let greeting = fallback_greeting(&UserProfile::default());
        assert!(greeting.starts_with("Hello!"));
        assert!(!greeting.contains("dealing with"));
    }
}
