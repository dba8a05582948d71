pub mod bedrock;
pub mod factory;
pub mod openai;
pub mod traits;
pub mod types;

pub use bedrock::BedrockClient;
pub use factory::build_llm_service;
pub use openai::OpenAiClient;
pub use traits::LlmService;
pub use types::{AnalysisTask, ChatMessage, ChatOptions, ChatRole, LlmError};
