//! Configuration loading, validation, and management.

mod app_config;
mod database;

pub use app_config::{AppConfig, JwtConfig, ServerConfig};
pub use database::DatabaseConfig;

use std::env;
use std::path::Path;

use crate::error::{AppError, Result};

/// Loads `config/config.{RUST_ENV}.toml`, applies environment
/// overrides, and validates the result.
pub fn load_config() -> Result<AppConfig> {
    let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    let config_file = format!("config/config.{env_name}.toml");

    if !Path::new(&config_file).exists() {
        return Err(AppError::config(format!(
            "Configuration file not found: {config_file}"
        )));
    }

    let config_content = std::fs::read_to_string(&config_file).map_err(|e| {
        AppError::config_with_source(format!("Failed to read configuration file: {config_file}"), e)
    })?;

    let mut config: AppConfig = toml::from_str(&config_content)?;
    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Secrets can be supplied through the environment instead of the
/// config file.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(url) = env::var("DATABASE_URL") {
        config.database.url = url;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        config.jwt.secret = secret;
    }
}

fn validate_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(AppError::config(format!(
            "Invalid server port: {}",
            config.server.port
        )));
    }

    if config.database.url.is_empty() {
        return Err(AppError::config("Database URL must not be empty"));
    }

    if config.database.max_connections == 0 {
        return Err(AppError::config(
            "Database max_connections must be greater than zero",
        ));
    }

    if config.jwt.secret.is_empty() {
        return Err(AppError::config("JWT secret must not be empty"));
    }

    if config.jwt.expires_in_minutes <= 0 {
        return Err(AppError::config(
            "JWT expiry must be a positive number of minutes",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_jwt_secret_is_rejected() {
        let config = AppConfig {
            jwt: JwtConfig {
                secret: String::new(),
                ..JwtConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = AppConfig {
            server: ServerConfig {
                port: 0,
                ..ServerConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
