use crate::config::AppConfig;
use crate::error::MetadataError;
use crate::model::{GeneratedMetadata, ImageAsset};
use crate::providers::{
    BlipCaptionProvider, CaptionProvider, KeyBertKeywordProvider, KeywordProvider,
};
use crate::refine;
use async_trait::async_trait;
use log::debug;

/// Number of ranked keyword candidates requested per caption.
const TOP_KEYWORDS: usize = 25;

/// The generation step as seen by `BatchStore` and the session layer.
#[async_trait]
pub trait GenerateMetadata: Send + Sync {
    /// Generate caption and keywords for one image, merging `seed_tags`
    /// (marketplace category selections) into the keyword list
    async fn generate(
        &self,
        image: &ImageAsset,
        seed_tags: &[String],
    ) -> Result<GeneratedMetadata, MetadataError>;
}

/// Combines a captioning model and a keyword model into one generation pass.
///
/// Both providers are immutable after construction and safe to share across
/// sessions; wrap the generator in an `Arc` and reuse it for every batch.
pub struct MetadataGenerator {
    captioner: Box<dyn CaptionProvider>,
    keyworder: Box<dyn KeywordProvider>,
}

impl MetadataGenerator {
    pub fn new(captioner: Box<dyn CaptionProvider>, keyworder: Box<dyn KeywordProvider>) -> Self {
        MetadataGenerator {
            captioner,
            keyworder,
        }
    }

    /// Build a generator with the HTTP-backed providers from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        MetadataGenerator {
            captioner: Box::new(BlipCaptionProvider::new(&config.caption)),
            keyworder: Box::new(KeyBertKeywordProvider::new(&config.keywords)),
        }
    }

    /// Normalize and truncate a raw caption, then extract keywords from the
    /// normalized text and merge the seed tags in after them.
    ///
    /// Keywords are always extracted from the normalized caption, never the
    /// raw one. Seed tags keep their given order; empty entries are skipped.
    pub async fn refine(
        &self,
        raw_caption: &str,
        seed_tags: &[String],
    ) -> Result<GeneratedMetadata, MetadataError> {
        let caption = refine::truncate_caption(&refine::normalize_caption(raw_caption));
        let extracted = self.keyworder.keywords(&caption, TOP_KEYWORDS).await?;
        let keywords = refine::merge_keywords(&extracted, seed_tags);

        Ok(GeneratedMetadata { caption, keywords })
    }
}

#[async_trait]
impl GenerateMetadata for MetadataGenerator {
    async fn generate(
        &self,
        image: &ImageAsset,
        seed_tags: &[String],
    ) -> Result<GeneratedMetadata, MetadataError> {
        let raw_caption = self.captioner.caption(image).await?;
        debug!("raw caption for {}: {}", image.filename, raw_caption);
        self.refine(&raw_caption, seed_tags).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FixedCaption(&'static str);

    #[async_trait]
    impl CaptionProvider for FixedCaption {
        fn provider_name(&self) -> &str {
            "fixed"
        }

        async fn caption(&self, _image: &ImageAsset) -> Result<String, MetadataError> {
            Ok(self.0.to_string())
        }
    }

    struct RecordingKeywords {
        keywords: Vec<&'static str>,
        seen_text: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl KeywordProvider for RecordingKeywords {
        fn provider_name(&self) -> &str {
            "recording"
        }

        async fn keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>, MetadataError> {
            assert_eq!(top_n, 25);
            self.seen_text.lock().unwrap().push(text.to_string());
            Ok(self.keywords.iter().map(|k| k.to_string()).collect())
        }
    }

    fn generator(caption: &'static str, keywords: Vec<&'static str>) -> MetadataGenerator {
        MetadataGenerator::new(
            Box::new(FixedCaption(caption)),
            Box::new(RecordingKeywords {
                keywords,
                seen_text: Arc::new(Mutex::new(Vec::new())),
            }),
        )
    }

    #[tokio::test]
    async fn test_generate_normalizes_caption() {
        let gen = generator("  a cat on a sofa ", vec!["cat", "sofa"]);
        let image = ImageAsset::new("cat.jpg", vec![]);

        let result = gen.generate(&image, &[]).await.unwrap();
        assert_eq!(result.caption, "A cat on a sofa");
        assert_eq!(result.keywords, vec!["cat", "sofa"]);
    }

    #[tokio::test]
    async fn test_seed_tags_appended_after_extracted_keywords() {
        let gen = generator("a field", vec!["field", "grass", "Nature"]);
        let image = ImageAsset::new("field.png", vec![]);
        let seeds = vec!["Nature".to_string(), "Sports".to_string(), "  ".to_string()];

        let result = gen.generate(&image, &seeds).await.unwrap();
        // "Nature" already extracted, keeps its first position; empty seed dropped
        assert_eq!(result.keywords, vec!["field", "grass", "Nature", "Sports"]);
    }

    #[tokio::test]
    async fn test_keywords_extracted_from_normalized_caption() {
        let seen_text = Arc::new(Mutex::new(Vec::new()));
        let keyworder = RecordingKeywords {
            keywords: vec![],
            seen_text: seen_text.clone(),
        };
        let long_caption = format!("  {}", "x".repeat(300));
        let gen = MetadataGenerator::new(
            Box::new(FixedCaption(Box::leak(long_caption.into_boxed_str()))),
            Box::new(keyworder),
        );
        let image = ImageAsset::new("big.jpg", vec![]);

        let result = gen.generate(&image, &[]).await.unwrap();
        assert_eq!(result.caption.chars().count(), 150);
        assert!(result.caption.ends_with("..."));

        // The keyword model saw the truncated caption, not the raw one
        let seen = seen_text.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], result.caption);
    }
}
