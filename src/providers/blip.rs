use crate::config::ProviderConfig;
use crate::error::MetadataError;
use crate::model::ImageAsset;
use crate::providers::CaptionProvider;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

/// Client for a BLIP-style image captioning endpoint.
pub struct BlipCaptionProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl BlipCaptionProvider {
    /// Create a new captioning provider from configuration
    pub fn new(config: &ProviderConfig) -> Self {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("STOCKMETA_CAPTION_API_KEY").ok());

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:8601".to_string());

        BlipCaptionProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        BlipCaptionProvider {
            client: Client::new(),
            api_key: None,
            base_url,
            model,
        }
    }
}

#[async_trait]
impl CaptionProvider for BlipCaptionProvider {
    fn provider_name(&self) -> &str {
        "blip"
    }

    async fn caption(&self, image: &ImageAsset) -> Result<String, MetadataError> {
        let mut request = self
            .client
            .post(format!("{}/v1/caption", self.base_url))
            .json(&json!({
                "model": self.model,
                "filename": image.filename,
                "image": STANDARD.encode(&image.bytes),
            }));

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MetadataError::Caption(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let caption = response_body["caption"]
            .as_str()
            .ok_or_else(|| {
                MetadataError::Caption("missing 'caption' field in response".to_string())
            })?
            .to_string();

        Ok(caption)
    }
}
