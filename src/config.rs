use std::env;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};
use crate::session::DEFAULT_SESSION_TIME_LIMIT_SECS;

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ValidationError(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub storage: StorageBackend,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub cors_allowed_origin: Option<String>,
    pub quiz_time_limit_secs: u32,
    pub leaderboard_limit: usize,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            storage: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(StorageBackend::Mongo),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "cloudquiz-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            quiz_time_limit_secs: env::var("QUIZ_TIME_LIMIT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_SESSION_TIME_LIMIT_SECS),
            leaderboard_limit: env::var("LEADERBOARD_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
        }
    }

    /// Rejects configurations that still carry development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using the default value; set it to the identity provider's signing secret"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    /// In-memory storage and a fixed secret, for tests.
    pub fn test_config() -> Self {
        Self {
            storage: StorageBackend::Memory,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "cloudquiz-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            cors_allowed_origin: None,
            quiz_time_limit_secs: DEFAULT_SESSION_TIME_LIMIT_SECS,
            leaderboard_limit: 10,
            api_base_url: "http://127.0.0.1:5000/api".to_string(),
        }
    }
}
