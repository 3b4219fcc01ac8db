use crate::{env_or_default, ConfigError, FromEnv};

/// Origin the bundled admin frontend is served from during development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Allowed browser origins for credentialed cross-origin requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    /// Parse a comma-separated origin list, dropping blank entries
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}

impl FromEnv for CorsConfig {
    /// Reads CORS_ORIGIN (comma-separated), defaulting to the local frontend
    fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&env_or_default("CORS_ORIGIN", DEFAULT_CORS_ORIGIN))
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        }
    }
}
