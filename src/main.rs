use log::{error, info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stockmeta::{
    available_marketplaces, exporter_for, AdobeStockConfig, AppConfig, EnsureOutcome,
    ExporterConfig, ImageAsset, MetadataGenerator, Session, ShutterstockConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let marketplace = args.get(1).map(String::as_str).ok_or_else(usage)?;
    let images_dir = args.get(2).map(String::as_str).ok_or_else(usage)?;
    let output_dir = args.get(3).map(String::as_str).unwrap_or(".");

    let exporter = exporter_for(marketplace)?;
    let export_config = config_from_env(marketplace)?;

    let app_config = AppConfig::load()?;
    let generator = Arc::new(MetadataGenerator::from_config(&app_config));

    let mut session = Session::new(generator);
    let rejected = session.add_images(read_images(Path::new(images_dir))?);
    for filename in &rejected {
        warn!("skipped (not JPEG/PNG): {}", filename);
    }
    if session.filenames().is_empty() {
        return Err(format!("no JPEG/PNG images found in {}", images_dir).into());
    }

    info!(
        "generating metadata for {} images ({})",
        session.filenames().len(),
        exporter.marketplace_name()
    );
    for (filename, outcome) in session.ensure_all(exporter.as_ref(), &export_config).await {
        if let EnsureOutcome::Failed(message) = outcome {
            error!("error processing {}: {}", filename, message);
        }
    }

    let artifact = session.export(exporter.as_ref(), &export_config)?;
    let output_path = PathBuf::from(output_dir).join(artifact.filename);
    std::fs::write(&output_path, &artifact.bytes)?;
    println!("wrote {}", output_path.display());

    Ok(())
}

fn usage() -> String {
    format!(
        "Usage: stockmeta <marketplace> <images-dir> [output-dir]\n  marketplaces: {}",
        available_marketplaces().join(", ")
    )
}

/// Marketplace options come from environment variables:
/// STOCKMETA_CATEGORIES (comma-separated), STOCKMETA_EDITORIAL,
/// STOCKMETA_MATURE, STOCKMETA_ILLUSTRATION, STOCKMETA_RELEASES.
fn config_from_env(marketplace: &str) -> Result<ExporterConfig, Box<dyn std::error::Error>> {
    let categories: Vec<String> = env::var("STOCKMETA_CATEGORIES")
        .map(|v| stockmeta::refine::split_keywords(&v))
        .unwrap_or_default();

    match marketplace {
        "shutterstock" => Ok(ExporterConfig::Shutterstock(ShutterstockConfig::new(
            categories,
            env_flag("STOCKMETA_EDITORIAL"),
            env_flag("STOCKMETA_MATURE"),
            env_flag("STOCKMETA_ILLUSTRATION"),
        )?)),
        "adobestock" => Ok(ExporterConfig::AdobeStock(AdobeStockConfig::new(
            categories.into_iter().next(),
            env::var("STOCKMETA_RELEASES").unwrap_or_default(),
        )?)),
        _ => Ok(ExporterConfig::IStock),
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).unwrap_or_default().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

fn read_images(dir: &Path) -> Result<Vec<ImageAsset>, std::io::Error> {
    let mut images = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    for path in entries {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        let bytes = std::fs::read(&path)?;
        images.push(ImageAsset::new(filename, bytes));
    }
    Ok(images)
}
