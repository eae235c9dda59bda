use crate::config::ConfigError;
use std::env;

/// Optional bootstrap admin account, created at startup when configured
/// and not already present.
#[derive(Debug, Clone)]
pub struct AdminUserConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    /// Load admin user configuration from environment variables
    ///
    /// Expected environment variables:
    /// - ADMIN_NAME
    /// - ADMIN_EMAIL
    /// - ADMIN_PASSWORD
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env::var("ADMIN_NAME")
            .map_err(|_| ConfigError::MissingEnvVar("ADMIN_NAME".to_string()))?;
        let email = env::var("ADMIN_EMAIL")
            .map_err(|_| ConfigError::MissingEnvVar("ADMIN_EMAIL".to_string()))?;
        let password = env::var("ADMIN_PASSWORD")
            .map_err(|_| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))?;
        Ok(AdminUserConfig { name, email, password })
    }
}
