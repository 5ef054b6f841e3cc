use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main configuration structure loaded from predictor.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub thresholds: ThresholdConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_bind: SocketAddr,
}

/// Prediction log location
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub log_path: PathBuf,
}

/// Cut points for the severity rules (see `classifier`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub pcr_leve: f64,
    pub pcr_cronica: f64,
    pub pcr_aguda: f64,
    pub fc_leve: f64,
    pub fc_cronica: f64,
    pub fc_aguda: f64,
    /// Age from which the chronic and terminal rules apply
    pub edad_mayor: f64,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("logs/predicciones.csv"),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            pcr_leve: 3.0,
            pcr_cronica: 10.0,
            pcr_aguda: 20.0,
            fc_leve: 100.0,
            fc_cronica: 120.0,
            fc_aguda: 140.0,
            edad_mayor: 65.0,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "enfermedad_predictor=info,tower_http=info".to_string(),
        }
    }
}

impl ThresholdConfig {
    /// Validate the thresholds
    pub fn validate(&self) -> anyhow::Result<()> {
        let values = [
            self.pcr_leve,
            self.pcr_cronica,
            self.pcr_aguda,
            self.fc_leve,
            self.fc_cronica,
            self.fc_aguda,
            self.edad_mayor,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            anyhow::bail!("thresholds must be finite numbers");
        }
        if !(self.pcr_leve < self.pcr_cronica && self.pcr_cronica <= self.pcr_aguda) {
            anyhow::bail!("thresholds must satisfy pcr_leve < pcr_cronica <= pcr_aguda");
        }
        if !(self.fc_leve < self.fc_cronica && self.fc_cronica <= self.fc_aguda) {
            anyhow::bail!("thresholds must satisfy fc_leve < fc_cronica <= fc_aguda");
        }
        if self.edad_mayor <= 0.0 {
            anyhow::bail!("thresholds.edad_mayor must be > 0");
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PREDICTOR_CONFIG environment variable or defaults to "predictor.toml"
    pub fn load() -> anyhow::Result<Self> {
        // PREDICTOR_ENV_FILE if set, otherwise ./.env
        if let Ok(env_path) = std::env::var("PREDICTOR_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("PREDICTOR_CONFIG").unwrap_or_else(|_| "predictor.toml".to_string());

        let config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply env-first overrides through `lookup`, then validate.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("PREDICTOR_HTTP_BIND") {
            self.server.http_bind = bind
                .parse()
                .map_err(|e| anyhow::anyhow!("PREDICTOR_HTTP_BIND '{}' is invalid: {}", bind, e))?;
            tracing::debug!("PREDICTOR_HTTP_BIND env override applied");
        }
        if let Some(path) = lookup("PREDICTOR_LOG_PATH")
            && !path.trim().is_empty()
        {
            self.storage.log_path = PathBuf::from(path);
            tracing::debug!("PREDICTOR_LOG_PATH env override applied");
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.runtime.log_level = level;
        }

        self.thresholds.validate()?;
        Ok(self)
    }
}
