//! Runtime configuration from environment variables.
//!
//! Read once at startup. Generation length and padding token are fixed
//! constants in [`crate::ports`], not settings.

use std::path::PathBuf;

pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_TEXTGEN_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_TEXTGEN_MODEL: &str = "microsoft/DialoGPT-medium";
pub const DEFAULT_LOG_FILE: &str = "glycodash.log";

/// Error type for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Unknown log mode {0:?} (expected auto, file or stdout)")]
    LogMode(String),
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl std::str::FromStr for LogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(ConfigError::LogMode(other.to_string())),
        }
    }
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

/// Runtime settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    /// Directory holding the classifier and encoder artifacts
    pub model_dir: PathBuf,
    /// Base URL of the text generation service
    pub textgen_url: String,
    /// Model identifier appended to `textgen_url`
    pub textgen_model: String,
    /// Optional bearer token for the generation service
    pub textgen_token: Option<String>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("model_dir", &self.model_dir)
            .field("textgen_url", &self.textgen_url)
            .field("textgen_model", &self.textgen_model)
            .field("textgen_token", &self.textgen_token.as_ref().map(|_| "<set>"))
            .field("log_mode", &self.log_mode)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` for empty required values or an unknown log mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` for empty required values or an unknown log mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let textgen_url = or_default("GLYCODASH_TEXTGEN_URL", DEFAULT_TEXTGEN_URL);
        if textgen_url.trim().is_empty() {
            return Err(ConfigError::Empty("GLYCODASH_TEXTGEN_URL"));
        }
        let textgen_model = or_default("GLYCODASH_TEXTGEN_MODEL", DEFAULT_TEXTGEN_MODEL);
        if textgen_model.trim().is_empty() {
            return Err(ConfigError::Empty("GLYCODASH_TEXTGEN_MODEL"));
        }
        let model_dir = or_default("GLYCODASH_MODEL_DIR", DEFAULT_MODEL_DIR);
        if model_dir.trim().is_empty() {
            return Err(ConfigError::Empty("GLYCODASH_MODEL_DIR"));
        }

        let textgen_token = lookup("GLYCODASH_TEXTGEN_TOKEN")
            .or_else(|| lookup("HF_TOKEN"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let log_mode = lookup("GLYCODASH_LOG_MODE")
            .map(|m| m.parse::<LogMode>())
            .transpose()?
            .unwrap_or(LogMode::Auto);

        Ok(Self {
            model_dir: PathBuf::from(model_dir),
            textgen_url: textgen_url.trim().to_string(),
            textgen_model: textgen_model.trim().to_string(),
            textgen_token,
            log_mode,
            log_file: PathBuf::from(or_default("GLYCODASH_LOG_FILE", DEFAULT_LOG_FILE)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.textgen_model, "microsoft/DialoGPT-medium");
        assert_eq!(config.textgen_url, DEFAULT_TEXTGEN_URL);
        assert!(config.textgen_token.is_none());
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_overrides_and_token_fallback() {
        let config = Config::from_lookup(lookup(&[
            ("GLYCODASH_MODEL_DIR", "/opt/models"),
            ("GLYCODASH_TEXTGEN_URL", "http://localhost:8080"),
            ("HF_TOKEN", "hf_abc"),
            ("GLYCODASH_LOG_MODE", "STDOUT"),
        ]))
        .expect("config");

        assert_eq!(config.model_dir, PathBuf::from("/opt/models"));
        assert_eq!(config.textgen_url, "http://localhost:8080");
        assert_eq!(config.textgen_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_specific_token_wins() {
        let config = Config::from_lookup(lookup(&[
            ("GLYCODASH_TEXTGEN_TOKEN", "primary"),
            ("HF_TOKEN", "fallback"),
        ]))
        .expect("config");
        assert_eq!(config.textgen_token.as_deref(), Some("primary"));
        assert!(!format!("{config:?}").contains("primary"));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("GLYCODASH_TEXTGEN_MODEL", " ")])).expect_err("empty"),
            ConfigError::Empty("GLYCODASH_TEXTGEN_MODEL")
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[("GLYCODASH_LOG_MODE", "syslog")])),
            Err(ConfigError::LogMode(_))
        ));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
