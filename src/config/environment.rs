// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, draft lifetime and search limits from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Environment-based configuration for the MyFood server

use crate::constants::defaults;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns an error for non-SQLite schemes
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(anyhow::anyhow!("Unsupported database URL scheme: {s}"))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/myfood.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Pending shopping-list draft settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Seconds a draft stays claimable
    pub ttl_secs: u64,
    /// Maximum number of drafts held at once
    pub max_entries: usize,
}

impl DraftConfig {
    /// Draft lifetime as a `Duration`
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DRAFT_TTL_SECS,
            max_entries: defaults::DRAFT_MAX_ENTRIES,
        }
    }
}

/// Application behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppBehaviorConfig {
    /// Result cap for ingredient search
    pub ingredient_search_limit: u32,
    /// Name used when a shopping list is saved without one
    pub default_shopping_list_name: String,
}

impl Default for AppBehaviorConfig {
    fn default() -> Self {
        Self {
            ingredient_search_limit: defaults::INGREDIENT_SEARCH_LIMIT,
            default_shopping_list_name: defaults::SHOPPING_LIST_NAME.to_owned(),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub http_host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Allowed CORS origins (`*` or a comma separated list)
    pub cors_allowed_origins: String,
    /// Pending draft settings
    pub drafts: DraftConfig,
    /// Application behavior settings
    pub app_behavior: AppBehaviorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: defaults::HTTP_HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database_url: DatabaseUrl::default(),
            cors_allowed_origins: "*".to_owned(),
            drafts: DraftConfig::default(),
            app_behavior: AppBehaviorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_host: env_var_or("HTTP_HOST", defaults::HTTP_HOST),
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database_url: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                defaults::DATABASE_URL,
            ))?,
            cors_allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            drafts: DraftConfig {
                ttl_secs: env_var_or("DRAFT_TTL_SECS", &defaults::DRAFT_TTL_SECS.to_string())
                    .parse()
                    .context("Invalid DRAFT_TTL_SECS value")?,
                max_entries: env_var_or(
                    "DRAFT_MAX_ENTRIES",
                    &defaults::DRAFT_MAX_ENTRIES.to_string(),
                )
                .parse()
                .context("Invalid DRAFT_MAX_ENTRIES value")?,
            },
            app_behavior: AppBehaviorConfig {
                ingredient_search_limit: env_var_or(
                    "INGREDIENT_SEARCH_LIMIT",
                    &defaults::INGREDIENT_SEARCH_LIMIT.to_string(),
                )
                .parse()
                .context("Invalid INGREDIENT_SEARCH_LIMIT value")?,
                default_shopping_list_name: env_var_or(
                    "DEFAULT_SHOPPING_LIST_NAME",
                    defaults::SHOPPING_LIST_NAME,
                ),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.drafts.ttl_secs == 0 {
            return Err(anyhow::anyhow!("DRAFT_TTL_SECS must be greater than zero"));
        }
        if self.drafts.max_entries == 0 {
            return Err(anyhow::anyhow!(
                "DRAFT_MAX_ENTRIES must be greater than zero"
            ));
        }
        if self.app_behavior.ingredient_search_limit == 0 {
            return Err(anyhow::anyhow!(
                "INGREDIENT_SEARCH_LIMIT must be greater than zero"
            ));
        }
        if self.app_behavior.default_shopping_list_name.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "DEFAULT_SHOPPING_LIST_NAME must not be blank"
            ));
        }
        if self.environment.is_production() && self.database_url.is_memory() {
            warn!("Production environment is running on an in-memory database");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "MyFood Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - CORS Origins: {}\n\
             - Draft TTL: {}s (max {})\n\
             - Ingredient Search Limit: {}",
            self.http_host,
            self.http_port,
            self.environment,
            self.log_level,
            self.database_url,
            self.cors_allowed_origins,
            self.drafts.ttl_secs,
            self.drafts.max_entries,
            self.app_behavior.ingredient_search_limit,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("whatever"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let file_url = DatabaseUrl::parse_url("sqlite:./test.db").unwrap();
        assert_eq!(file_url.to_connection_string(), "sqlite:./test.db");
        assert!(!file_url.is_memory());

        let memory_url = DatabaseUrl::parse_url("sqlite::memory:").unwrap();
        assert!(memory_url.is_memory());

        let bare_path = DatabaseUrl::parse_url("./some/path.db").unwrap();
        assert_eq!(bare_path.to_connection_string(), "sqlite:./some/path.db");

        assert!(DatabaseUrl::parse_url("postgres://user@localhost/db").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.drafts.ttl_secs = 0;
        assert!(config.validate().is_err());

        config.drafts.ttl_secs = 60;
        config.app_behavior.ingredient_search_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        env::set_var("HTTP_PORT", "9191");
        env::set_var("DRAFT_TTL_SECS", "120");
        env::set_var("INGREDIENT_SEARCH_LIMIT", "5");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.http_port, 9191);
        assert_eq!(config.drafts.ttl(), Duration::from_secs(120));
        assert_eq!(config.app_behavior.ingredient_search_limit, 5);

        env::remove_var("HTTP_PORT");
        env::remove_var("DRAFT_TTL_SECS");
        env::remove_var("INGREDIENT_SEARCH_LIMIT");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_port() {
        env::set_var("HTTP_PORT", "not-a-port");
        assert!(ServerConfig::from_env().is_err());
        env::remove_var("HTTP_PORT");
    }
}
