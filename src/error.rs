use thiserror::Error;

/// Errors that can occur while generating or exporting metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    /// HTTP request to a model endpoint failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Caption endpoint returned an unusable response
    #[error("Caption generation failed: {0}")]
    Caption(String),

    /// Keyword endpoint returned an unusable response
    #[error("Keyword extraction failed: {0}")]
    Keywords(String),

    /// Marketplace name not recognized by the exporter factory
    #[error("Unknown marketplace: {0}")]
    UnknownMarketplace(String),

    /// Category name is not part of the marketplace's fixed vocabulary
    #[error("Invalid {marketplace} category: {category}")]
    InvalidCategory {
        marketplace: &'static str,
        category: String,
    },

    /// More categories selected than the marketplace allows
    #[error("{marketplace} accepts at most {max} categories, got {got}")]
    TooManyCategories {
        marketplace: &'static str,
        max: usize,
        got: usize,
    },

    /// An exporter was handed the configuration of a different marketplace
    #[error("{marketplace} exporter received a {got} configuration")]
    ConfigMismatch {
        marketplace: &'static str,
        got: &'static str,
    },

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// ZIP archive writing failed
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to finalize an in-memory artifact buffer
    #[error("Serialization failed: {0}")]
    Serialize(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
