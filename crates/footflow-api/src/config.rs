use std::env;

use footflow_core::config::LayeredConfig;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub core: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables, with an optional TOML
    /// file named by `FOOTFLOW_CONFIG` underneath them
    pub fn from_env() -> footflow_core::Result<Self> {
        let port = env::var("FOOTFLOW_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin = env::var("FOOTFLOW_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let mut core = LayeredConfig::with_defaults();
        if let Ok(path) = env::var("FOOTFLOW_CONFIG") {
            core = core.load_from_file(path)?;
        }
        let core = core.load_from_env();

        Ok(Self {
            port,
            cors_origin,
            core,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
