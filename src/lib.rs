pub mod config;
pub mod error;
pub mod exporters;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod refine;
pub mod store;

pub use config::{AppConfig, ProviderConfig};
pub use error::MetadataError;
pub use exporters::{
    available_marketplaces, exporter_for, AdobeStockConfig, AdobeStockExporter, ConfigOption,
    ConfigOptionKind, ExportArtifact, ExportRow, ExporterConfig, IStockExporter,
    MarketplaceExporter, ShutterstockConfig, ShutterstockExporter, ADOBE_STOCK_CATEGORIES,
    SHUTTERSTOCK_CATEGORIES,
};
pub use generator::{GenerateMetadata, MetadataGenerator};
pub use model::{GeneratedMetadata, ImageAsset, MetadataRecord};
pub use pipeline::{export_batch, Session};
pub use providers::{BlipCaptionProvider, CaptionProvider, KeyBertKeywordProvider, KeywordProvider};
pub use store::{BatchEditOutcome, BatchStore, EnsureOutcome, GENERATION_ERROR_SENTINEL};
