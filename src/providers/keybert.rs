use crate::config::ProviderConfig;
use crate::error::MetadataError;
use crate::providers::KeywordProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

/// Client for a KeyBERT-style keyword extraction endpoint.
///
/// The endpoint returns ranked `[term, score]` pairs; only the terms are
/// consumed, in ranking order.
pub struct KeyBertKeywordProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl KeyBertKeywordProvider {
    /// Create a new keyword provider from configuration
    pub fn new(config: &ProviderConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("STOCKMETA_KEYWORDS_API_KEY").ok());

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:8602".to_string());

        KeyBertKeywordProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        KeyBertKeywordProvider {
            client: Client::new(),
            api_key: None,
            base_url,
            model,
        }
    }
}

#[async_trait]
impl KeywordProvider for KeyBertKeywordProvider {
    fn provider_name(&self) -> &str {
        "keybert"
    }

    async fn keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>, MetadataError> {
        let mut request = self
            .client
            .post(format!("{}/v1/keywords", self.base_url))
            .json(&json!({
                "model": self.model,
                "text": text,
                "top_n": top_n,
                "keyphrase_ngram_range": [1, 2],
                "stop_words": "english",
            }));

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(MetadataError::Keywords(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let pairs = response_body["keywords"].as_array().ok_or_else(|| {
            MetadataError::Keywords("missing 'keywords' field in response".to_string())
        })?;

        let mut keywords = Vec::with_capacity(pairs.len());
        for pair in pairs {
            // Each entry is [term, score]; a bare string is accepted too
            let term = pair
                .get(0)
                .and_then(Value::as_str)
                .or_else(|| pair.as_str())
                .ok_or_else(|| {
                    MetadataError::Keywords(format!("malformed keyword entry: {}", pair))
                })?;
            keywords.push(term.to_string());
        }

        Ok(keywords)
    }
}
