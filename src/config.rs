use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Captioning model endpoint configuration
    #[serde(default = "default_caption_provider")]
    pub caption: ProviderConfig,
    /// Keyword extraction model endpoint configuration
    #[serde(default = "default_keyword_provider")]
    pub keywords: ProviderConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            caption: default_caption_provider(),
            keywords: default_keyword_provider(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for one model inference endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for the inference endpoint
    pub base_url: Option<String>,
}

fn default_caption_provider() -> ProviderConfig {
    ProviderConfig {
        model: "Salesforce/blip-image-captioning-base".to_string(),
        api_key: None,
        base_url: None,
    }
}

fn default_keyword_provider() -> ProviderConfig {
    ProviderConfig {
        model: "all-MiniLM-L6-v2".to_string(),
        api_key: None,
        base_url: None,
    }
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with STOCKMETA__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: STOCKMETA__CAPTION__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: STOCKMETA__KEYWORDS__BASE_URL
            .add_source(
                Environment::with_prefix("STOCKMETA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
