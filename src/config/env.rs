// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate server configuration from .env files

use dotenv::dotenv;
use std::env;

/// Token accepted on admin routes when ADMIN_TOKEN is not set
pub const DEV_ADMIN_TOKEN: &str = "admin-token-dev";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Database credentials are resolved separately by the
/// connection provider (see config::db)
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 3000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Admin authentication token (dashboard and activity log)
    pub admin_token: String,

    /// Default number of activity log entries returned per request
    pub activity_log_page_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| DEV_ADMIN_TOKEN.to_string()),

            activity_log_page_size: env::var("ACTIVITY_LOG_PAGE_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.admin_token.is_empty() {
            return Err("ADMIN_TOKEN must not be empty".to_string());
        }

        if self.activity_log_page_size == 0 {
            return Err("ACTIVITY_LOG_PAGE_SIZE must be at least 1".to_string());
        }

        if self.environment == "production" && self.admin_token == DEV_ADMIN_TOKEN {
            log::warn!("ADMIN_TOKEN is using the development default in production");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            admin_token: DEV_ADMIN_TOKEN.to_string(),
            activity_log_page_size: 50,
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let config = Config {
            admin_token: String::new(),
            ..config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = Config {
            activity_log_page_size: 0,
            ..config()
        };
        assert!(config.validate().is_err());
    }
}
