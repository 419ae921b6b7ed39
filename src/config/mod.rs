// Configuration module

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let config_path = args
            .config
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: SCRIBEGATE_)
            .add_source(Environment::with_prefix("SCRIBEGATE").separator("__"))
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        // CLI overrides
        if let Some(port) = args.port {
            config.server.port = port;
        }

        // The original deployment configures the credential via GROQ_API_KEY
        if config.upstream.api_key.is_none() {
            if let Ok(key) = std::env::var("GROQ_API_KEY") {
                config.upstream.api_key = Some(key);
            }
        }

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scribegate")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
