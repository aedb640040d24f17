use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_CATEGORY_URL: &str = "https://hotline.ua/ua/computer/noutbuki-netbuki/33373/";
const DEFAULT_OUTPUT_PATH: &str = "laptops.csv";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub store: StoreConfig,
    pub fetch: FetchConfig,
    /// Models to keep; an empty list keeps every listing on the page.
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub category_url: String,
    /// Query parameter carrying the page number for pages beyond the first.
    pub page_param: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            category_url: DEFAULT_CATEGORY_URL.to_string(),
            page_param: "p".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the given path, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load(config_path: &str) -> Result<Self> {
        if !Path::new(config_path).exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
