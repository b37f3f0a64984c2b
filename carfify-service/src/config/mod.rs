use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;
use std::env;

pub const SERVICE_NAME: &str = "carfify-service";

/// Origin allowed by CORS when `FRONTEND_ORIGIN` is not set.
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Deserialize)]
pub struct CarfifyConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    /// Only origin echoed in `Access-Control-Allow-Origin`.
    pub frontend_origin: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl CarfifyConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        let frontend_origin = get_env("FRONTEND_ORIGIN", Some(DEFAULT_FRONTEND_ORIGIN), is_prod)?
            .trim()
            .to_string();
        if frontend_origin.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "FRONTEND_ORIGIN must not be empty"
            )));
        }

        Ok(Self {
            common,
            service_name: SERVICE_NAME.to_string(),
            frontend_origin,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty()),
        })
    }

    /// Configuration with defaults for everything except the port and origin.
    pub fn with_origin(port: u16, frontend_origin: impl Into<String>) -> Self {
        Self {
            common: core_config::Config { port },
            service_name: SERVICE_NAME.to_string(),
            frontend_origin: frontend_origin.into(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("FRONTEND_ORIGIN");
        env::remove_var("ENVIRONMENT");
        env::remove_var("OTLP_ENDPOINT");
    }

    #[test]
    #[serial]
    fn unset_origin_falls_back_to_default() {
        clear_env();

        let config = CarfifyConfig::load().unwrap();

        assert_eq!(config.frontend_origin, DEFAULT_FRONTEND_ORIGIN);
        assert_eq!(config.service_name, SERVICE_NAME);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    #[serial]
    fn configured_origin_is_trimmed() {
        clear_env();
        env::set_var("FRONTEND_ORIGIN", "  https://app.carfify.test ");

        let config = CarfifyConfig::load();
        clear_env();

        assert_eq!(config.unwrap().frontend_origin, "https://app.carfify.test");
    }

    #[test]
    #[serial]
    fn blank_origin_is_rejected() {
        clear_env();
        env::set_var("FRONTEND_ORIGIN", "   ");

        let result = CarfifyConfig::load();
        clear_env();

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn production_requires_origin() {
        clear_env();
        env::set_var("ENVIRONMENT", "prod");

        let result = CarfifyConfig::load();
        clear_env();

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
