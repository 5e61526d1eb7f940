mod blip;
mod keybert;

pub use blip::BlipCaptionProvider;
pub use keybert::KeyBertKeywordProvider;

use crate::error::MetadataError;
use crate::model::ImageAsset;
use async_trait::async_trait;

/// Image captioning model, consumed as a black box.
/// May be slow (seconds); called at most once per (marketplace, filename).
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Get the provider name (e.g., "blip")
    fn provider_name(&self) -> &str;

    /// Produce a raw natural-language description of the image
    async fn caption(&self, image: &ImageAsset) -> Result<String, MetadataError>;
}

/// Keyword ranking model, consumed as a black box.
#[async_trait]
pub trait KeywordProvider: Send + Sync {
    /// Get the provider name (e.g., "keybert")
    fn provider_name(&self) -> &str;

    /// Return up to `top_n` ranked keyword/key-phrase candidates for `text`,
    /// phrases of 1-2 tokens, English stop words excluded
    async fn keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>, MetadataError>;
}
