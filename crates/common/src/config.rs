use crate::error::CyonsError;
use crate::style::Style;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name (looked up in the working directory)
pub const CONFIG_FILE_NAME: &str = "cyons";

/// Prefix for environment overrides (`CYONS_LLM_MODEL`, ...)
pub const ENV_PREFIX: &str = "CYONS";

/// Upper bound for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// cyons application configuration
///
/// Built once at process start and handed to the components that need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API key for the completion service
    pub openai_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    pub openai_base_url: String,

    /// Chat completion model name
    pub llm_model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate per summary
    pub max_tokens: u32,

    /// HTTP timeout for completion calls
    pub request_timeout_secs: u64,

    /// Attempts per completion (1 = no retry)
    pub max_retries: u32,

    /// Directory of `<style>.txt` manifesto overrides
    pub manifesto_dir: PathBuf,

    /// Style used when a requested style is unknown or has no manifesto
    pub default_style: Style,

    /// Run the heuristic review on error text from a failed generation
    pub review_failed_output: bool,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            llm_model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            request_timeout_secs: 120,
            max_retries: 1,
            manifesto_dir: PathBuf::from("./prompts"),
            default_style: Style::Sherlock,
            review_failed_output: false,
            server_host: "127.0.0.1".to_string(),
            server_port: 8501,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional TOML file and `CYONS_*` env vars
    ///
    /// When `config_file` is given it must exist; otherwise `cyons.toml` in the
    /// working directory is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, CyonsError> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let mut config: AppConfig = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.openai_api_key.is_none() {
            config.openai_api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), CyonsError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                CyonsError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// API key, or a config error naming where to set it
    pub fn require_api_key(&self) -> Result<&str, CyonsError> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            CyonsError::config(
                "No API key configured. Set OPENAI_API_KEY, CYONS_OPENAI_API_KEY or openai_api_key in cyons.toml",
            )
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CyonsError> {
        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://")
        {
            return Err(CyonsError::config(
                "API base URL must start with http:// or https://",
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(CyonsError::config("LLM model name cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CyonsError::config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(CyonsError::config("max_tokens must be greater than 0"));
        }

        if self.max_retries == 0 || self.max_retries > MAX_RETRIES_LIMIT {
            return Err(CyonsError::config(format!(
                "max_retries must be between 1 and {}, got {}",
                MAX_RETRIES_LIMIT, self.max_retries
            )));
        }

        if self.server_port == 0 {
            return Err(CyonsError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
