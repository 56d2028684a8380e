use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::page::{default_page_config, PageConfig, DEFAULT_MAX_PAGES};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// The API key is optional here; only commands that call the model require it.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub max_pages: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_pages = parse_or(&lookup, "MAX_PAGES", DEFAULT_MAX_PAGES)?;
        if max_pages == 0 {
            anyhow::bail!("MAX_PAGES must be at least 1");
        }

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            model: lookup("CHEATSHEET_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_pages,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.anthropic_api_key
            .as_deref()
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn page_config(&self) -> PageConfig {
        default_page_config().with_max_pages(self.max_pages)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.llm_max_tokens, 8000);
        assert_eq!(config.llm_timeout(), Duration::from_secs(120));
        assert_eq!(config.max_pages, 2);
        assert_eq!(config.rust_log, "info");
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_values_are_read_from_environment() {
        let config = config_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("CHEATSHEET_MODEL", "claude-x"),
            ("LLM_MAX_TOKENS", "4000"),
            ("MAX_PAGES", " 3 "),
        ])
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.model, "claude-x");
        assert_eq!(config.llm_max_tokens, 4000);
        assert_eq!(config.page_config().max_pages, 3);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = config_from(&[("LLM_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("LLM_TIMEOUT_SECS"));
        assert!(config_from(&[("MAX_PAGES", "0")]).is_err());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "  ")]).unwrap();
        assert!(config.anthropic_api_key.is_none());
    }
}
