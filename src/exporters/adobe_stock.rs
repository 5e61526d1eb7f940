use crate::error::MetadataError;
use crate::exporters::{
    eps_filename, write_csv, ConfigOption, ConfigOptionKind, ExportArtifact, ExportRow,
    ExporterConfig, MarketplaceExporter,
};
use crate::model::MetadataRecord;
use crate::refine::join_keywords;

const MARKETPLACE: &str = "adobestock";

/// Adobe Stock's fixed category vocabulary. Order is significant: the
/// numeric category code submitted in the CSV is the 1-based position.
pub const ADOBE_STOCK_CATEGORIES: [&str; 21] = [
    "Animals",
    "Buildings and Architecture",
    "Business",
    "Drinks",
    "The Environment",
    "States of Mind",
    "Food",
    "Graphic Resources",
    "Hobbies and Leisure",
    "Industry",
    "Landscapes",
    "Lifestyle",
    "People",
    "Plants and Flowers",
    "Culture and Religion",
    "Science",
    "Social Issues",
    "Sports",
    "Technology",
    "Transport",
    "Travel",
];

const HEADERS: [&str; 5] = ["Filename", "Title", "Keywords", "Category", "Releases"];

/// Map a category name to its 1-indexed numeric code.
pub fn category_id(name: &str) -> Option<usize> {
    ADOBE_STOCK_CATEGORIES
        .iter()
        .position(|c| *c == name)
        .map(|i| i + 1)
}

/// Adobe Stock options: at most one category and a free-text releases field.
#[derive(Debug, Clone, Default)]
pub struct AdobeStockConfig {
    category: Option<String>,
    pub releases: String,
}

impl AdobeStockConfig {
    /// Validate the category (if any) against the fixed vocabulary.
    pub fn new(category: Option<String>, releases: String) -> Result<Self, MetadataError> {
        if let Some(name) = &category {
            if category_id(name).is_none() {
                return Err(MetadataError::InvalidCategory {
                    marketplace: MARKETPLACE,
                    category: name.clone(),
                });
            }
        }
        Ok(AdobeStockConfig { category, releases })
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Numeric code for the chosen category; empty selection yields `None`,
    /// which exports as an empty cell rather than an error.
    pub fn category_id(&self) -> Option<usize> {
        self.category.as_deref().and_then(category_id)
    }
}

pub struct AdobeStockExporter;

impl MarketplaceExporter for AdobeStockExporter {
    fn marketplace_name(&self) -> &'static str {
        MARKETPLACE
    }

    fn key_prefix(&self) -> &'static str {
        "as_"
    }

    fn config_schema(&self) -> Vec<ConfigOption> {
        vec![
            ConfigOption {
                name: "category",
                kind: ConfigOptionKind::SingleChoice {
                    options: &ADOBE_STOCK_CATEGORIES,
                },
            },
            ConfigOption {
                name: "releases",
                kind: ConfigOptionKind::FreeText,
            },
        ]
    }

    fn seed_tags(&self, config: &ExporterConfig) -> Vec<String> {
        match config {
            ExporterConfig::AdobeStock(config) => {
                config.category.iter().cloned().collect()
            }
            _ => Vec::new(),
        }
    }

    fn export_row(
        &self,
        record: &MetadataRecord,
        config: &ExporterConfig,
        filename: &str,
    ) -> Result<ExportRow, MetadataError> {
        let config = match config {
            ExporterConfig::AdobeStock(config) => config,
            other => {
                return Err(MetadataError::ConfigMismatch {
                    marketplace: MARKETPLACE,
                    got: other.variant_name(),
                })
            }
        };

        let category_cell = config
            .category_id()
            .map(|id| id.to_string())
            .unwrap_or_default();

        Ok(ExportRow {
            entry_stem: super::file_stem(filename).to_string(),
            values: vec![
                eps_filename(filename),
                record.caption.trim().to_string(),
                join_keywords(&record.keywords),
                category_cell,
                config.releases.trim().to_string(),
            ],
        })
    }

    fn serialize(&self, rows: &[ExportRow]) -> Result<ExportArtifact, MetadataError> {
        let refs: Vec<&ExportRow> = rows.iter().collect();
        let bytes = write_csv(&HEADERS, &refs)?;
        Ok(ExportArtifact {
            bytes,
            filename: "adobestock_upload.csv",
            mime_type: "text/csv",
        })
    }
}
