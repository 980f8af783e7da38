use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub callback_path: String,
}

/// Remote-desktop viewer used for manual intervention when the job needs a
/// human at the browser. We only ever build and surface its URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: "http://localhost:5000/api".to_string(),
                callback_path: "/linkedin-callback".to_string(),
            },
            viewer: ViewerConfig {
                host: "localhost".to_string(),
                port: 6080,
            },
        }
    }
}

impl Config {
    pub fn load(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &PathBuf) -> Self {
        Self::load(path).unwrap_or_default()
    }

    pub fn viewer_url(&self) -> String {
        format!("http://{}:{}/vnc.html", self.viewer.host, self.viewer.port)
    }
}
