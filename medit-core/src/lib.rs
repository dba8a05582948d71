//! Medit Core Library
//!
//! This library provides core functionality for the Medit backend including:
//! - Configuration management
//! - LLM provider clients and shared chat types

pub mod config;
pub mod llm;

// Re-export commonly used types
pub use config::model::{
    AppConfig, AuthSettings, BedrockSettings, DatabaseSettings, LlmProvider, LlmSettings,
    OpenAiSettings, ServerSettings,
};
pub use llm::{
    build_llm_service, AnalysisTask, BedrockClient, ChatMessage, ChatOptions, ChatRole, LlmError,
    LlmService, OpenAiClient,
};
