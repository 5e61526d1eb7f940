use crate::error::MetadataError;
use crate::exporters::{
    eps_filename, write_csv, yes_no, ConfigOption, ConfigOptionKind, ExportArtifact, ExportRow,
    ExporterConfig, MarketplaceExporter,
};
use crate::model::MetadataRecord;
use crate::refine::join_keywords;

const MARKETPLACE: &str = "shutterstock";
const MAX_CATEGORIES: usize = 2;

/// Shutterstock's fixed category vocabulary.
pub const SHUTTERSTOCK_CATEGORIES: [&str; 26] = [
    "Religion",
    "Science",
    "Signs/Symbols",
    "Sports/Recreation",
    "Technology",
    "Transportation",
    "Vintage",
    "Abstract",
    "Animals/Wildlife",
    "Arts",
    "Backgrounds/Textures",
    "Beauty/Fashion",
    "Buildings/Landmarks",
    "Business/Finance",
    "Celebrities",
    "Education",
    "Food and drink",
    "Healthcare/Medical",
    "Holidays",
    "Industrial",
    "Interiors",
    "Miscellaneous",
    "Nature",
    "Objects",
    "Parks/Outdoor",
    "People",
];

const HEADERS: [&str; 7] = [
    "Filename",
    "Description",
    "Keywords",
    "Categories",
    "Editorial",
    "Mature content",
    "Illustration",
];

/// Shutterstock options: up to two categories plus three yes/no flags.
#[derive(Debug, Clone, Default)]
pub struct ShutterstockConfig {
    categories: Vec<String>,
    pub editorial: bool,
    pub mature: bool,
    pub illustration: bool,
}

impl ShutterstockConfig {
    /// Validate the category selection against the fixed vocabulary.
    pub fn new(
        categories: Vec<String>,
        editorial: bool,
        mature: bool,
        illustration: bool,
    ) -> Result<Self, MetadataError> {
        if categories.len() > MAX_CATEGORIES {
            return Err(MetadataError::TooManyCategories {
                marketplace: MARKETPLACE,
                max: MAX_CATEGORIES,
                got: categories.len(),
            });
        }
        for category in &categories {
            if !SHUTTERSTOCK_CATEGORIES.contains(&category.as_str()) {
                return Err(MetadataError::InvalidCategory {
                    marketplace: MARKETPLACE,
                    category: category.clone(),
                });
            }
        }
        Ok(ShutterstockConfig {
            categories,
            editorial,
            mature,
            illustration,
        })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

pub struct ShutterstockExporter;

impl MarketplaceExporter for ShutterstockExporter {
    fn marketplace_name(&self) -> &'static str {
        MARKETPLACE
    }

    fn key_prefix(&self) -> &'static str {
        "ss_"
    }

    fn config_schema(&self) -> Vec<ConfigOption> {
        vec![
            ConfigOption {
                name: "categories",
                kind: ConfigOptionKind::MultiChoice {
                    options: &SHUTTERSTOCK_CATEGORIES,
                    max: MAX_CATEGORIES,
                },
            },
            ConfigOption {
                name: "editorial",
                kind: ConfigOptionKind::YesNo,
            },
            ConfigOption {
                name: "mature",
                kind: ConfigOptionKind::YesNo,
            },
            ConfigOption {
                name: "illustration",
                kind: ConfigOptionKind::YesNo,
            },
        ]
    }

    fn seed_tags(&self, config: &ExporterConfig) -> Vec<String> {
        match config {
            ExporterConfig::Shutterstock(config) => config.categories.clone(),
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
            ExporterConfig::Shutterstock(config) => config,
            other => {
                return Err(MetadataError::ConfigMismatch {
                    marketplace: MARKETPLACE,
                    got: other.variant_name(),
                })
            }
        };

        Ok(ExportRow {
            entry_stem: super::file_stem(filename).to_string(),
            values: vec![
                eps_filename(filename),
                record.caption.trim().to_string(),
                join_keywords(&record.keywords),
                // Comma-joined inside one cell; the CSV writer quotes it
                config.categories.join(","),
                yes_no(config.editorial).to_string(),
                yes_no(config.mature).to_string(),
                yes_no(config.illustration).to_string(),
            ],
        })
    }

    fn serialize(&self, rows: &[ExportRow]) -> Result<ExportArtifact, MetadataError> {
        let refs: Vec<&ExportRow> = rows.iter().collect();
        let bytes = write_csv(&HEADERS, &refs)?;
        Ok(ExportArtifact {
            bytes,
            filename: "shutterstock_upload.csv",
            mime_type: "text/csv",
        })
    }
}
