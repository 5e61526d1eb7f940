mod adobe_stock;
mod istock;
mod shutterstock;

pub use adobe_stock::{AdobeStockConfig, AdobeStockExporter, ADOBE_STOCK_CATEGORIES};
pub use istock::IStockExporter;
pub use shutterstock::{ShutterstockConfig, ShutterstockExporter, SHUTTERSTOCK_CATEGORIES};

use crate::error::MetadataError;
use crate::model::MetadataRecord;

/// Marketplace-specific configuration, snapshotted per export invocation.
#[derive(Debug, Clone)]
pub enum ExporterConfig {
    Shutterstock(ShutterstockConfig),
    AdobeStock(AdobeStockConfig),
    IStock,
}

impl ExporterConfig {
    pub fn variant_name(&self) -> &'static str {
        match self {
            ExporterConfig::Shutterstock(_) => "shutterstock",
            ExporterConfig::AdobeStock(_) => "adobestock",
            ExporterConfig::IStock => "istock",
        }
    }
}

/// One configurable option a marketplace recognizes.
#[derive(Debug, Clone)]
pub struct ConfigOption {
    pub name: &'static str,
    pub kind: ConfigOptionKind,
}

#[derive(Debug, Clone)]
pub enum ConfigOptionKind {
    /// Pick up to `max` entries from a fixed vocabulary
    MultiChoice {
        options: &'static [&'static str],
        max: usize,
    },
    /// Pick zero or one entry from a fixed vocabulary
    SingleChoice { options: &'static [&'static str] },
    /// yes/no flag
    YesNo,
    /// Free-form text
    FreeText,
}

/// One flattened output row; the column set differs per marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// Original filename without its extension, used by archive-style
    /// serializers to name per-image entries
    pub entry_stem: String,
    pub values: Vec<String>,
}

/// The downloadable payload for one marketplace tab.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub mime_type: &'static str,
}

/// Contract every marketplace variant implements.
///
/// `export_row` is a pure mapping and `serialize` only touches in-memory
/// buffers; neither mutates any shared state, so a failed export can simply
/// be retried.
pub trait MarketplaceExporter: Send + Sync {
    /// Marketplace name as used by the factory (e.g., "shutterstock")
    fn marketplace_name(&self) -> &'static str;

    /// Key prefix namespacing this marketplace's records in the batch store
    fn key_prefix(&self) -> &'static str;

    /// The options this marketplace recognizes
    fn config_schema(&self) -> Vec<ConfigOption>;

    /// The configuration subset merged into generated keywords
    /// (category selections). A mismatched config variant yields no tags.
    fn seed_tags(&self, config: &ExporterConfig) -> Vec<String>;

    /// Map one record plus configuration to one output row
    fn export_row(
        &self,
        record: &MetadataRecord,
        config: &ExporterConfig,
        filename: &str,
    ) -> Result<ExportRow, MetadataError>;

    /// Turn the full row set into the downloadable artifact
    fn serialize(&self, rows: &[ExportRow]) -> Result<ExportArtifact, MetadataError>;
}

/// Resolve a marketplace name to its exporter.
pub fn exporter_for(marketplace: &str) -> Result<Box<dyn MarketplaceExporter>, MetadataError> {
    match marketplace {
        "shutterstock" => Ok(Box::new(ShutterstockExporter)),
        "adobestock" => Ok(Box::new(AdobeStockExporter)),
        "istock" => Ok(Box::new(IStockExporter)),
        other => Err(MetadataError::UnknownMarketplace(other.to_string())),
    }
}

/// List all supported marketplace names.
pub fn available_marketplaces() -> Vec<&'static str> {
    vec!["shutterstock", "adobestock", "istock"]
}

/// Rewrite a filename's extension to `.eps`, the submission convention all
/// three marketplaces expect in their filename columns.
pub(crate) fn eps_filename(filename: &str) -> String {
    format!("{}.eps", file_stem(filename))
}

/// Filename without its final extension.
pub(crate) fn file_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Write a header row plus data rows into an in-memory CSV buffer.
/// Cells containing commas or quotes get standard CSV quoting.
pub(crate) fn write_csv(
    headers: &[&str],
    rows: &[&ExportRow],
) -> Result<Vec<u8>, MetadataError> {
    let mut writer = csv::WriterBuilder::new().from_writer(vec![]);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row.values)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| MetadataError::Serialize(e.to_string()))
}
