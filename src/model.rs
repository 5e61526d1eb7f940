use serde::Serialize;

/// One uploaded image, as handed over by the upload boundary.
/// Identity is the filename, assumed unique within one batch.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageAsset {
            filename: filename.into(),
            bytes,
        }
    }

    /// Accepted upload types, checked by extension only.
    pub fn is_supported(filename: &str) -> bool {
        let ext = filename.rsplit('.').next().unwrap_or_default();
        matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png")
    }
}

/// Per-image metadata state for one marketplace tab.
///
/// The caption is at most 150 characters after truncation. Keywords are
/// insertion-ordered, case-preserved and duplicate-free under trimmed
/// exact equality.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataRecord {
    pub caption: String,
    pub keywords: Vec<String>,
    pub display_filename: String,
}

/// Result of one caption + keyword generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMetadata {
    pub caption: String,
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(ImageAsset::is_supported("cat.jpg"));
        assert!(ImageAsset::is_supported("cat.JPEG"));
        assert!(ImageAsset::is_supported("photo.png"));
        assert!(!ImageAsset::is_supported("photo.gif"));
        assert!(!ImageAsset::is_supported("notes.txt"));
        assert!(!ImageAsset::is_supported("no_extension"));
    }
}
