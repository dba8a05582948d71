use crate::config::model::AppConfig;
use anyhow::{Context, Result};

/// Resolve the configuration file path. `MEDIT_CONFIG` wins over the default.
pub fn get_config_path() -> String {
    std::env::var("MEDIT_CONFIG").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from_path(&get_config_path())
}

pub fn load_config_from_path(config_path: &str) -> Result<AppConfig> {
    let config_str = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file '{config_path}'"))?;
    let mut config: AppConfig = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file '{config_path}'"))?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Secrets are usually injected through the environment rather than committed
/// to config.toml. Environment values win over file values.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.is_empty() {
            config.database.url = url;
        }
    }
    if let Ok(secret) = std::env::var("SECRET_KEY") {
        if !secret.is_empty() {
            config.auth.secret_key = secret;
        }
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        if !key.is_empty() {
            config.llm.openai.api_key = key;
        }
    }
    if let Ok(region) = std::env::var("AWS_REGION") {
        if !region.is_empty() {
            config.llm.bedrock.region = region;
        }
    }
}
