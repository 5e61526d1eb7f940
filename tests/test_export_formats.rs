use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::sync::Arc;

use stockmeta::{
    exporter_for, AdobeStockConfig, ExporterConfig, GenerateMetadata, GeneratedMetadata,
    ImageAsset, MetadataError, Session, ShutterstockConfig,
};

struct FixedGenerator;

#[async_trait]
impl GenerateMetadata for FixedGenerator {
    async fn generate(
        &self,
        image: &ImageAsset,
        seed_tags: &[String],
    ) -> Result<GeneratedMetadata, MetadataError> {
        let mut keywords = vec!["sunset".to_string(), "sky, at dusk".to_string()];
        keywords.extend(seed_tags.iter().cloned());
        Ok(GeneratedMetadata {
            caption: format!("Sunset over the sea, from {}", image.filename),
            keywords,
        })
    }
}

async fn prepared_session(names: &[&str], exporter_name: &str, config: &ExporterConfig) -> Session {
    let mut session = Session::new(Arc::new(FixedGenerator));
    session.add_images(
        names
            .iter()
            .map(|name| ImageAsset::new(*name, vec![1]))
            .collect(),
    );
    let exporter = exporter_for(exporter_name).unwrap();
    session.ensure_all(exporter.as_ref(), config).await;
    session
}

#[tokio::test]
async fn test_shutterstock_csv_end_to_end() {
    let config = ExporterConfig::Shutterstock(
        ShutterstockConfig::new(vec!["Nature".to_string()], true, false, false).unwrap(),
    );
    let session = prepared_session(&["beach.png", "cliff.jpg"], "shutterstock", &config).await;

    let exporter = exporter_for("shutterstock").unwrap();
    let artifact = session.export(exporter.as_ref(), &config).unwrap();
    assert_eq!(artifact.filename, "shutterstock_upload.csv");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(artifact.bytes.as_slice());
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);

    assert_eq!(&records[0][0], "beach.eps");
    assert_eq!(&records[0][1], "Sunset over the sea, from beach.png");
    // Caption commas and the comma inside a keyword phrase survive CSV quoting
    assert_eq!(&records[0][2], "sunset, sky, at dusk, Nature");
    assert_eq!(&records[0][3], "Nature");
    assert_eq!(&records[0][4], "yes");
    assert_eq!(&records[0][5], "no");
    assert_eq!(&records[1][0], "cliff.eps");
}

#[tokio::test]
async fn test_adobestock_csv_end_to_end() {
    let config = ExporterConfig::AdobeStock(
        AdobeStockConfig::new(Some("Landscapes".to_string()), "release-a".to_string()).unwrap(),
    );
    let session = prepared_session(&["beach.png"], "adobestock", &config).await;

    let exporter = exporter_for("adobestock").unwrap();
    let artifact = session.export(exporter.as_ref(), &config).unwrap();
    assert_eq!(artifact.filename, "adobestock_upload.csv");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(artifact.bytes.as_slice());
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["Filename", "Title", "Keywords", "Category", "Releases"])
    );
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "beach.eps");
    // "Landscapes" is the 11th name in the fixed list
    assert_eq!(&records[0][3], "11");
    assert_eq!(&records[0][4], "release-a");
}

#[tokio::test]
async fn test_istock_zip_end_to_end() {
    let config = ExporterConfig::IStock;
    let session = prepared_session(&["one.jpg", "two.png", "three.jpeg"], "istock", &config).await;

    let exporter = exporter_for("istock").unwrap();
    let artifact = session.export(exporter.as_ref(), &config).unwrap();
    assert_eq!(artifact.filename, "istock_metadata.zip");
    assert_eq!(artifact.mime_type, "application/zip");

    let mut archive = zip::ZipArchive::new(Cursor::new(artifact.bytes)).unwrap();
    assert_eq!(archive.len(), 3);

    let mut one = archive.by_name("one.csv").unwrap();
    let mut content = String::new();
    one.read_to_string(&mut content).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec![
            "file name",
            "description",
            "country",
            "title",
            "keywords",
            "color"
        ])
    );
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "one.eps");
    assert_eq!(&records[0][1], &records[0][3]);
    assert_eq!(&records[0][2], "");
    assert_eq!(&records[0][5], "yes");
}

#[tokio::test]
async fn test_export_retry_after_success_is_stable() {
    let config = ExporterConfig::IStock;
    let session = prepared_session(&["one.jpg"], "istock", &config).await;
    let exporter = exporter_for("istock").unwrap();

    let first = session.export(exporter.as_ref(), &config).unwrap();
    let second = session.export(exporter.as_ref(), &config).unwrap();
    // Export never mutates the store; repeating it yields the same entries
    let names = |bytes: Vec<u8>| -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    };
    assert_eq!(names(first.bytes), names(second.bytes));
}
