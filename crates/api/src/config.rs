use axum::http::HeaderValue;
use katha_gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Errors raised while loading [`ServerConfig`]. Any of these stops startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is not set; add your Google AI Studio API key to the .env file")]
    MissingApiKey,

    #[error("{var} must be a valid {expected} (got '{value}')")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Upstream text-generation settings.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Fixed-window limits applied to every `/api` route.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Window length in seconds (default: 15 minutes).
    pub window_secs: u64,
    /// Requests allowed per client per window.
    pub max_requests: u32,
    /// Key clients by the first `X-Forwarded-For` entry instead of the
    /// socket peer. Only enable behind a trusted reverse proxy.
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 15 * 60,
            max_requests: 50,
            trust_proxy: false,
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// The single origin allowed by CORS (default: `http://localhost:5173`).
    pub frontend_origin: HeaderValue,
    pub gemini: GeminiConfig,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                                      |
    /// |--------------------------|----------------------------------------------|
    /// | `GOOGLE_API_KEY`         | required                                     |
    /// | `HOST`                   | `0.0.0.0`                                    |
    /// | `PORT`                   | `5000`                                       |
    /// | `FRONTEND_URL`           | `http://localhost:5173`                      |
    /// | `GEMINI_MODEL`           | `gemini-2.0-flash`                           |
    /// | `GEMINI_BASE_URL`        | `https://generativelanguage.googleapis.com`  |
    /// | `RATE_LIMIT_WINDOW_SECS` | `900`                                        |
    /// | `RATE_LIMIT_MAX`         | `50`                                         |
    /// | `TRUST_PROXY`            | `false`                                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 5000u16, "u16")?;

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:5173".into());
        let frontend_origin =
            HeaderValue::from_str(frontend_url.trim()).map_err(|_| ConfigError::Invalid {
                var: "FRONTEND_URL",
                expected: "header value",
                value: frontend_url.clone(),
            })?;

        let gemini = GeminiConfig {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            window_secs: parse_or(
                "RATE_LIMIT_WINDOW_SECS",
                lookup("RATE_LIMIT_WINDOW_SECS"),
                defaults.window_secs,
                "u64",
            )?,
            max_requests: parse_or(
                "RATE_LIMIT_MAX",
                lookup("RATE_LIMIT_MAX"),
                defaults.max_requests,
                "u32",
            )?,
            trust_proxy: parse_or("TRUST_PROXY", lookup("TRUST_PROXY"), false, "bool")?,
        };

        Ok(Self {
            host,
            port,
            frontend_origin,
            gemini,
            rate_limit,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}
