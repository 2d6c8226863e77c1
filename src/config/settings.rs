//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_AI_MODEL, DEFAULT_AI_REQUEST_TIMEOUT_SECONDS, DEFAULT_DATABASE_URL,
    DEFAULT_GENERATION_CACHE_MAX_ENTRIES, DEFAULT_GENERATION_CACHE_TTL_SECONDS,
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_OPENROUTER_API_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_API_KEY_LENGTH, MIN_JWT_SECRET_LENGTH,
};

/// How much of a generation is delegated to the text-generation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceMode {
    /// Templates only, no outbound calls
    Fast,
    /// Itinerary and budget from the API
    Ai,
    /// Template itinerary with API recommendations, budget from the API
    #[default]
    Hybrid,
}

impl PerformanceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMode::Fast => "fast",
            PerformanceMode::Ai => "ai",
            PerformanceMode::Hybrid => "hybrid",
        }
    }
}

impl std::str::FromStr for PerformanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(PerformanceMode::Fast),
            "ai" => Ok(PerformanceMode::Ai),
            "hybrid" => Ok(PerformanceMode::Hybrid),
            other => Err(format!("unknown performance mode: {}", other)),
        }
    }
}

/// Text-generation settings
#[derive(Clone)]
pub struct AiSettings {
    api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub mode: PerformanceMode,
    pub request_timeout_secs: u64,
}

impl AiSettings {
    /// API key, if one usable for outbound calls is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| key.len() >= MIN_API_KEY_LENGTH)
    }

    /// Mode actually applied: without a usable key nothing can be generated remotely.
    pub fn effective_mode(&self) -> PerformanceMode {
        if self.api_key().is_some() {
            self.mode
        } else {
            PerformanceMode::Fast
        }
    }

    /// Settings for local runs and tests: no key, templates only.
    pub fn offline() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_OPENROUTER_API_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            mode: PerformanceMode::Fast,
            request_timeout_secs: DEFAULT_AI_REQUEST_TIMEOUT_SECONDS,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub ai: AiSettings,
    pub generation_cache_ttl_secs: u64,
    pub generation_cache_max_entries: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("ai", &self.ai)
            .field("generation_cache_ttl_secs", &self.generation_cache_ttl_secs)
            .field(
                "generation_cache_max_entries",
                &self.generation_cache_max_entries,
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let mode = env::var("AI_PERFORMANCE_MODE")
            .ok()
            .and_then(|v| match v.parse() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!("{}, falling back to hybrid", e);
                    None
                }
            })
            .unwrap_or_default();

        let ai = AiSettings {
            api_key: env::var("OPENROUTER_API_KEY").ok().filter(|k| !k.is_empty()),
            api_url: env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_API_URL.to_string()),
            model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            mode,
            request_timeout_secs: parse_env("AI_REQUEST_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_AI_REQUEST_TIMEOUT_SECONDS),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
            jwt_secret,
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS")
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_env("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            ai,
            generation_cache_ttl_secs: parse_env("GENERATION_CACHE_TTL_SECS")
                .unwrap_or(DEFAULT_GENERATION_CACHE_TTL_SECONDS),
            generation_cache_max_entries: parse_env("GENERATION_CACHE_MAX_ENTRIES")
                .unwrap_or(DEFAULT_GENERATION_CACHE_MAX_ENTRIES),
        }
    }

    /// Configuration for tests and embedded use, independent of the environment.
    pub fn for_database(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            redis_url: None,
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            ai: AiSettings::offline(),
            generation_cache_ttl_secs: DEFAULT_GENERATION_CACHE_TTL_SECONDS,
            generation_cache_max_entries: DEFAULT_GENERATION_CACHE_MAX_ENTRIES,
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_mode_parsing() {
        assert_eq!("fast".parse::<PerformanceMode>(), Ok(PerformanceMode::Fast));
        assert_eq!(" AI ".parse::<PerformanceMode>(), Ok(PerformanceMode::Ai));
        assert_eq!("hybrid".parse::<PerformanceMode>(), Ok(PerformanceMode::Hybrid));
        assert!("turbo".parse::<PerformanceMode>().is_err());
    }

    #[test]
    fn test_missing_key_forces_fast_mode() {
        let mut ai = AiSettings::offline();
        ai.mode = PerformanceMode::Hybrid;
        assert_eq!(ai.effective_mode(), PerformanceMode::Fast);

        let ai = ai.with_api_key("short");
        assert_eq!(ai.effective_mode(), PerformanceMode::Fast);

        let ai = ai.with_api_key("sk-or-v1-0123456789abcdef0123");
        assert_eq!(ai.effective_mode(), PerformanceMode::Hybrid);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::for_database("sqlite::memory:", "x".repeat(40));
        let ai = config.ai.clone().with_api_key("sk-or-v1-secret-value-123456");
        let rendered = format!("{:?} {:?}", config, ai);
        assert!(!rendered.contains("sk-or-v1-secret"));
        assert!(!rendered.contains("sqlite::memory:"));
    }
}
