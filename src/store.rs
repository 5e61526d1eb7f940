use crate::generator::GenerateMetadata;
use crate::model::{ImageAsset, MetadataRecord};
use crate::refine;
use log::{debug, error};
use std::collections::HashMap;

/// Sentinel stored in both fields when generation fails for an image.
/// Exported as ordinary text so the user can correct it before submission.
pub const GENERATION_ERROR_SENTINEL: &str = "Error";

/// Result of one `ensure` call.
#[derive(Debug, Clone, PartialEq)]
pub enum EnsureOutcome {
    /// A fresh record was generated and stored
    Generated,
    /// A record already existed for this (marketplace, filename); not touched
    AlreadyPresent,
    /// Generation failed; the "Error" sentinel was stored instead
    Failed(String),
}

/// Result of an "apply to all" batch edit.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEditOutcome {
    /// The edit was applied to this many records
    Applied(usize),
    /// The input was empty; nothing changed (informational, not an error)
    NothingToApply,
}

/// Keyed storage of per-image metadata, one record per
/// (marketplace key prefix, filename) pair.
///
/// Each marketplace tab owns an independent copy of every record, so edits
/// under one prefix never leak into another. A record is generated at most
/// once per key; later accesses read the stored value.
#[derive(Debug, Default)]
pub struct BatchStore {
    records: HashMap<(String, String), MetadataRecord>,
}

impl BatchStore {
    pub fn new() -> Self {
        BatchStore::default()
    }

    fn key(marketplace_key: &str, filename: &str) -> (String, String) {
        (marketplace_key.to_string(), filename.to_string())
    }

    pub fn record(&self, marketplace_key: &str, filename: &str) -> Option<&MetadataRecord> {
        self.records.get(&Self::key(marketplace_key, filename))
    }

    pub fn contains(&self, marketplace_key: &str, filename: &str) -> bool {
        self.records.contains_key(&Self::key(marketplace_key, filename))
    }

    /// Replace the caption of one record (direct user edit).
    pub fn set_caption(&mut self, marketplace_key: &str, filename: &str, caption: &str) {
        let record = self.entry(marketplace_key, filename);
        record.caption = caption.to_string();
    }

    /// Replace the keyword list of one record (direct user edit).
    /// The input is comma-separated, as typed into the keywords field.
    pub fn set_keywords(&mut self, marketplace_key: &str, filename: &str, keywords: &str) {
        let record = self.entry(marketplace_key, filename);
        record.keywords = refine::split_keywords(keywords);
    }

    /// Generate-if-absent: run the expensive generation at most once per
    /// (marketplace, filename) pair.
    ///
    /// If a record already exists the call is a no-op, preserving prior
    /// generation output and user edits. On generation failure the record is
    /// filled with the `"Error"` sentinel and the failure is reported in the
    /// outcome; it never propagates as `Err`.
    pub async fn ensure(
        &mut self,
        marketplace_key: &str,
        image: &ImageAsset,
        seed_tags: &[String],
        generator: &dyn GenerateMetadata,
    ) -> EnsureOutcome {
        if self.contains(marketplace_key, &image.filename) {
            debug!(
                "record for {}{} already present, skipping generation",
                marketplace_key, image.filename
            );
            return EnsureOutcome::AlreadyPresent;
        }

        match generator.generate(image, seed_tags).await {
            Ok(generated) => {
                self.records.insert(
                    Self::key(marketplace_key, &image.filename),
                    MetadataRecord {
                        caption: generated.caption,
                        keywords: generated.keywords,
                        display_filename: image.filename.clone(),
                    },
                );
                EnsureOutcome::Generated
            }
            Err(e) => {
                error!("error processing {}: {}", image.filename, e);
                self.records.insert(
                    Self::key(marketplace_key, &image.filename),
                    MetadataRecord {
                        caption: GENERATION_ERROR_SENTINEL.to_string(),
                        keywords: vec![GENERATION_ERROR_SENTINEL.to_string()],
                        display_filename: image.filename.clone(),
                    },
                );
                EnsureOutcome::Failed(e.to_string())
            }
        }
    }

    /// Append `text` to every listed record's caption.
    /// Empty input is a no-op reported as `NothingToApply`.
    pub fn append_caption_to_all(
        &mut self,
        marketplace_key: &str,
        filenames: &[String],
        text: &str,
    ) -> BatchEditOutcome {
        let addition = text.trim();
        if addition.is_empty() {
            return BatchEditOutcome::NothingToApply;
        }

        for filename in filenames {
            let record = self.entry(marketplace_key, filename);
            record.caption = format!("{} {}", record.caption, addition).trim().to_string();
        }
        BatchEditOutcome::Applied(filenames.len())
    }

    /// Append comma-separated keywords to every listed record, deduplicating
    /// while preserving first-occurrence order.
    pub fn append_keywords_to_all(
        &mut self,
        marketplace_key: &str,
        filenames: &[String],
        text: &str,
    ) -> BatchEditOutcome {
        let additions = refine::split_keywords(text);
        if additions.is_empty() {
            return BatchEditOutcome::NothingToApply;
        }

        for filename in filenames {
            let record = self.entry(marketplace_key, filename);
            record.keywords = refine::merge_keywords(&record.keywords, &additions);
        }
        BatchEditOutcome::Applied(filenames.len())
    }

    fn entry(&mut self, marketplace_key: &str, filename: &str) -> &mut MetadataRecord {
        self.records
            .entry(Self::key(marketplace_key, filename))
            .or_insert_with(|| MetadataRecord {
                display_filename: filename.to_string(),
                ..MetadataRecord::default()
            })
    }
}
