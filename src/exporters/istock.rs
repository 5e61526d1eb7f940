use crate::error::MetadataError;
use crate::exporters::{
    eps_filename, write_csv, ConfigOption, ExportArtifact, ExportRow, ExporterConfig,
    MarketplaceExporter,
};
use crate::model::MetadataRecord;
use crate::refine::join_keywords;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

const MARKETPLACE: &str = "istock";

const HEADERS: [&str; 6] = ["file name", "description", "country", "title", "keywords", "color"];

/// iStock has no category concept and takes no configuration. Its output is
/// one single-row CSV per image, bundled into a ZIP archive; the caption is
/// duplicated into both `description` and `title`.
pub struct IStockExporter;

impl MarketplaceExporter for IStockExporter {
    fn marketplace_name(&self) -> &'static str {
        MARKETPLACE
    }

    fn key_prefix(&self) -> &'static str {
        "is_"
    }

    fn config_schema(&self) -> Vec<ConfigOption> {
        Vec::new()
    }

    fn seed_tags(&self, _config: &ExporterConfig) -> Vec<String> {
        Vec::new()
    }

    fn export_row(
        &self,
        record: &MetadataRecord,
        config: &ExporterConfig,
        filename: &str,
    ) -> Result<ExportRow, MetadataError> {
        if !matches!(config, ExporterConfig::IStock) {
            return Err(MetadataError::ConfigMismatch {
                marketplace: MARKETPLACE,
                got: config.variant_name(),
            });
        }

        let caption = record.caption.trim().to_string();
        Ok(ExportRow {
            entry_stem: super::file_stem(filename).to_string(),
            values: vec![
                eps_filename(filename),
                caption.clone(),
                // country is always left empty
                String::new(),
                caption,
                join_keywords(&record.keywords),
                // color is always "yes"
                "yes".to_string(),
            ],
        })
    }

    fn serialize(&self, rows: &[ExportRow]) -> Result<ExportArtifact, MetadataError> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for row in rows {
            // The archive entry keeps the original base name with .csv
            let entry_name = format!("{}.csv", row.entry_stem);
            let csv_bytes = write_csv(&HEADERS, &[row])?;
            zip.start_file(entry_name, options)?;
            zip.write_all(&csv_bytes)?;
        }

        let cursor = zip.finish()?;
        Ok(ExportArtifact {
            bytes: cursor.into_inner(),
            filename: "istock_metadata.zip",
            mime_type: "application/zip",
        })
    }
}
