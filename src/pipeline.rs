use crate::error::MetadataError;
use crate::exporters::{ExportArtifact, ExporterConfig, MarketplaceExporter};
use crate::generator::GenerateMetadata;
use crate::model::{ImageAsset, MetadataRecord};
use crate::store::{BatchEditOutcome, BatchStore, EnsureOutcome};
use log::{info, warn};
use std::sync::Arc;

/// Read every record from the store, map it through the exporter and
/// serialize the row set into the downloadable artifact.
///
/// Generation must already have happened; a missing record exports as an
/// empty row rather than triggering the model. `"Error"` sentinels pass
/// through as ordinary text. Serialization failures leave the store
/// untouched, so the export can simply be retried.
pub fn export_batch(
    exporter: &dyn MarketplaceExporter,
    store: &BatchStore,
    config: &ExporterConfig,
    filenames: &[String],
) -> Result<ExportArtifact, MetadataError> {
    let empty = MetadataRecord::default();
    let mut rows = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let record = store
            .record(exporter.key_prefix(), filename)
            .unwrap_or(&empty);
        rows.push(exporter.export_row(record, config, filename)?);
    }
    exporter.serialize(&rows)
}

/// One editing session: a batch of uploaded images plus the metadata store
/// that lives exactly as long as the session does.
///
/// The generator is shared read-only; hand the same `Arc` to every session
/// so the heavyweight models are set up once per process.
pub struct Session {
    generator: Arc<dyn GenerateMetadata>,
    store: BatchStore,
    images: Vec<ImageAsset>,
}

impl Session {
    pub fn new(generator: Arc<dyn GenerateMetadata>) -> Self {
        Session {
            generator,
            store: BatchStore::new(),
            images: Vec::new(),
        }
    }

    /// Accept uploads, keeping only JPEG/PNG files (checked by extension).
    /// Returns the filenames that were rejected.
    pub fn add_images(&mut self, images: Vec<ImageAsset>) -> Vec<String> {
        let mut rejected = Vec::new();
        for image in images {
            if ImageAsset::is_supported(&image.filename) {
                self.images.push(image);
            } else {
                warn!("rejecting unsupported upload: {}", image.filename);
                rejected.push(image.filename);
            }
        }
        rejected
    }

    pub fn filenames(&self) -> Vec<String> {
        self.images.iter().map(|i| i.filename.clone()).collect()
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BatchStore {
        &mut self.store
    }

    /// Generate metadata for every image under the exporter's key prefix,
    /// image by image in upload order. A failure for one image stores the
    /// sentinel and moves on; it never aborts the rest of the batch.
    pub async fn ensure_all(
        &mut self,
        exporter: &dyn MarketplaceExporter,
        config: &ExporterConfig,
    ) -> Vec<(String, EnsureOutcome)> {
        let seed_tags = exporter.seed_tags(config);
        let mut outcomes = Vec::with_capacity(self.images.len());
        for image in &self.images {
            let outcome = self
                .store
                .ensure(exporter.key_prefix(), image, &seed_tags, self.generator.as_ref())
                .await;
            if let EnsureOutcome::Failed(message) = &outcome {
                warn!("generation failed for {}: {}", image.filename, message);
            }
            outcomes.push((image.filename.clone(), outcome));
        }
        outcomes
    }

    /// Append `text` to every image's caption under the exporter's prefix.
    pub fn append_caption_to_all(
        &mut self,
        exporter: &dyn MarketplaceExporter,
        text: &str,
    ) -> BatchEditOutcome {
        let filenames = self.filenames();
        self.store
            .append_caption_to_all(exporter.key_prefix(), &filenames, text)
    }

    /// Append comma-separated keywords to every image under the prefix.
    pub fn append_keywords_to_all(
        &mut self,
        exporter: &dyn MarketplaceExporter,
        text: &str,
    ) -> BatchEditOutcome {
        let filenames = self.filenames();
        self.store
            .append_keywords_to_all(exporter.key_prefix(), &filenames, text)
    }

    /// Export the current batch for one marketplace tab.
    pub fn export(
        &self,
        exporter: &dyn MarketplaceExporter,
        config: &ExporterConfig,
    ) -> Result<ExportArtifact, MetadataError> {
        let filenames = self.filenames();
        let artifact = export_batch(exporter, &self.store, config, &filenames)?;
        info!(
            "exported {} rows for {} ({} bytes)",
            filenames.len(),
            exporter.marketplace_name(),
            artifact.bytes.len()
        );
        Ok(artifact)
    }
}
