//! Configuration management for SchoolReg Core

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Maximum number of requests served concurrently by this process
    pub max_instances: usize,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Keycloak configuration
    pub keycloak: KeycloakConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Base URL of the Keycloak server (e.g., http://keycloak:8080)
    pub url: String,
    /// Realm that student accounts are created in
    pub realm: String,
    pub admin_client_id: String,
    pub admin_client_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "text" or "json"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            max_instances: parse_max_instances(
                &env::var("MAX_INSTANCES").unwrap_or_else(|_| "10".to_string()),
            )?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            keycloak: KeycloakConfig {
                url: env::var("KEYCLOAK_URL")
                    .unwrap_or_else(|_| "http://localhost:8081".to_string()),
                realm: env::var("KEYCLOAK_REALM").unwrap_or_else(|_| "schools".to_string()),
                admin_client_id: env::var("KEYCLOAK_ADMIN_CLIENT_ID")
                    .unwrap_or_else(|_| "admin-cli".to_string()),
                admin_client_secret: env::var("KEYCLOAK_ADMIN_CLIENT_SECRET")
                    .unwrap_or_default(),
                admin_username: env::var("KEYCLOAK_ADMIN").unwrap_or_else(|_| "admin".to_string()),
                admin_password: env::var("KEYCLOAK_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin".to_string()),
                timeout_secs: env::var("KEYCLOAK_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("Invalid KEYCLOAK_TIMEOUT_SECS")?,
            },
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// A zero limit would refuse every request, so it is rejected at startup.
fn parse_max_instances(raw: &str) -> Result<usize> {
    let value: usize = raw.trim().parse().context("Invalid MAX_INSTANCES")?;
    if value == 0 {
        anyhow::bail!("MAX_INSTANCES must be at least 1");
    }
    Ok(value)
}
