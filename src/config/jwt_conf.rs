use crate::config::ConfigError;
use std::env;
use tracing::{debug, error, info, warn};

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing session tokens
    pub jwt_secret: String,
    /// Session token expiration time in minutes
    pub session_token_expiration: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_SESSION_TOKEN_EXPIRY: Session token expiration in minutes (defaults to 1440 = 1 day)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            ConfigError::MissingEnvVar("JWT_SECRET".to_string())
        })?;

        let session_token_expiration = env::var("JWT_SESSION_TOKEN_EXPIRY")
            .unwrap_or_else(|_| {
                warn!("JWT_SESSION_TOKEN_EXPIRY not set, using default: 1440 minutes (1 day)");
                "1440".to_string()
            })
            .parse::<i64>()
            .map_err(|e| {
                error!("Invalid JWT_SESSION_TOKEN_EXPIRY value: {}", e);
                ConfigError::InvalidEnvVar(format!("JWT_SESSION_TOKEN_EXPIRY: {}", e))
            })?;

        let config = JwtConfig {
            jwt_secret,
            session_token_expiration,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating JWT configuration");

        if self.jwt_secret.len() < 32 {
            error!("JWT secret is too short (minimum 32 characters required)");
            return Err(ConfigError::InvalidEnvVar(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        if self.session_token_expiration <= 0 {
            error!("Session token expiration must be greater than 0");
            return Err(ConfigError::InvalidEnvVar(
                "JWT_SESSION_TOKEN_EXPIRY must be greater than 0".to_string(),
            ));
        }

        debug!("JWT configuration validation passed");
        Ok(())
    }
}

/// Create JWT configuration for testing with default values
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes"
                .to_string(),
            session_token_expiration: 1440, // 1 day
        }
    }
}
