use rocket::figment::Figment;
use serde::{Deserialize, Serialize};

use crate::env::is_production;

/// The `social` section of Rocket's figment (`Rocket.toml` or `ROCKET_SOCIAL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub password_hash_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, crate::Error> {
        let config: AppConfig = figment.focus("social").extract()?;

        if !(4..=31).contains(&config.password_hash_cost) {
            return Err(crate::Error::Anyhow(anyhow::anyhow!(
                "social.password_hash_cost must be between 4 and 31, got {}",
                config.password_hash_cost
            )));
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub otlp_endpoint: Option<String>,
    pub honeycomb_api_key: Option<String>,
    pub environment: String,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| dotenvy::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            honeycomb_api_key: non_empty("HONEYCOMB_API_KEY"),
            environment: if is_production() {
                "production".to_string()
            } else {
                "develop".to_string()
            },
        }
    }
}
