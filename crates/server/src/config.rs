//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ESTATE_HOST` - Bind address (default: 127.0.0.1)
//! - `ESTATE_PORT` - Listen port (default: 3001)
//! - `ESTATE_DATA_DIR` - Directory holding the project store (default: ./data)
//! - `ESTATE_STARTUP_ROLE` - Session role at startup, `admin` or `editor` (default: editor)
//! - `ESTATE_LOG_JSON` - Emit JSON logs when set
//! - `GEMINI_API_KEY` - Gemini API key; insights fall back to a fixed message without it
//! - `GEMINI_MODEL` - Gemini model ID (default: gemini-3-flash-preview)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use estate_pulse_core::UserRole;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory of the file-backed project store
    pub data_dir: PathBuf,
    /// Role the session starts in
    pub startup_role: UserRole,
    /// Structured JSON logging
    pub log_json: bool,
    /// Gemini configuration (optional - insights fall back without it)
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Google AI API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-3-flash-preview)
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiConfig {
    /// Returns `None` if `GEMINI_API_KEY` is not set.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(key) = get_optional_env("GEMINI_API_KEY") else {
            return Ok(None);
        };
        validate_secret_strength(&key, "GEMINI_API_KEY")?;
        Ok(Some(Self {
            api_key: SecretString::from(key),
            model: get_env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        }))
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the API key looks
    /// like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ESTATE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ESTATE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ESTATE_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ESTATE_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("ESTATE_DATA_DIR", "./data"));
        let startup_role = get_env_or_default("ESTATE_STARTUP_ROLE", "editor")
            .parse::<UserRole>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ESTATE_STARTUP_ROLE".to_string(), e.to_string())
            })?;
        let log_json = get_optional_env("ESTATE_LOG_JSON").is_some();
        let gemini = GeminiConfig::from_env()?;

        Ok(Self {
            host,
            port,
            data_dir,
            startup_role,
            log_json,
            gemini,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the Gemini configuration, if an API key was provided.
    #[must_use]
    pub const fn gemini(&self) -> Option<&GeminiConfig> {
        self.gemini.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
