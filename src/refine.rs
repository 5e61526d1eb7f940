//! Pure text rules shared by generation, batch edits and export.

/// Maximum caption length after truncation.
pub const MAX_CAPTION_LEN: usize = 150;

const TRUNCATED_PREFIX_LEN: usize = 147;
const ELLIPSIS: &str = "...";

/// Trim surrounding whitespace and uppercase the first letter.
pub fn normalize_caption(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut captions longer than 150 characters down to the first 147 plus "...".
/// Lengths are counted in Unicode scalar values, not bytes.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= MAX_CAPTION_LEN {
        return caption.to_string();
    }
    let mut truncated: String = caption.chars().take(TRUNCATED_PREFIX_LEN).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Split a comma-separated keyword string into trimmed, non-empty tokens.
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join keywords with ", " so that `split_keywords` reproduces the token list.
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(", ")
}

/// Concatenate two keyword sequences, trimming entries, dropping empties and
/// deduplicating on first occurrence. Comparison is case-sensitive.
pub fn merge_keywords(existing: &[String], additions: &[String]) -> Vec<String> {
    let mut merged = Vec::with_capacity(existing.len() + additions.len());
    for keyword in existing.iter().chain(additions.iter()) {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !merged.iter().any(|seen| seen == trimmed) {
            merged.push(trimmed.to_string());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_and_capitalizes() {
        assert_eq!(normalize_caption("  a cat on a sofa  "), "A cat on a sofa");
        assert_eq!(normalize_caption("Red Square at NIGHT"), "Red Square at NIGHT");
        assert_eq!(normalize_caption(""), "");
        assert_eq!(normalize_caption("   "), "");
    }

    #[test]
    fn test_truncate_short_caption_unchanged() {
        let caption = "A short caption";
        assert_eq!(truncate_caption(caption), caption);
    }

    #[test]
    fn test_truncate_exactly_150_unchanged() {
        let caption = "x".repeat(150);
        assert_eq!(truncate_caption(&caption), caption);
    }

    #[test]
    fn test_truncate_long_caption() {
        let caption = "a".repeat(200);
        let truncated = truncate_caption(&caption);
        assert_eq!(truncated.chars().count(), 150);
        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..147], &caption[..147]);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let caption = "é".repeat(151);
        let truncated = truncate_caption(&caption);
        assert_eq!(truncated.chars().count(), 150);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_split_keywords_drops_empties() {
        assert_eq!(
            split_keywords(" red , blue ,, , green"),
            owned(&["red", "blue", "green"])
        );
        assert!(split_keywords("").is_empty());
        assert!(split_keywords(" , ,").is_empty());
    }

    #[test]
    fn test_join_split_round_trip() {
        let tokens = owned(&["red", "blue", "green"]);
        assert_eq!(split_keywords(&join_keywords(&tokens)), tokens);
    }

    #[test]
    fn test_merge_dedup_preserves_first_occurrence() {
        let existing = owned(&["red", "blue"]);
        let additions = owned(&["blue", "green"]);
        assert_eq!(
            merge_keywords(&existing, &additions),
            owned(&["red", "blue", "green"])
        );
    }

    #[test]
    fn test_merge_is_case_sensitive() {
        let existing = owned(&["Nature"]);
        let additions = owned(&["nature", "Nature"]);
        assert_eq!(
            merge_keywords(&existing, &additions),
            owned(&["Nature", "nature"])
        );
    }

    #[test]
    fn test_merge_trims_and_drops_empty_entries() {
        let existing = owned(&[" red ", ""]);
        let additions = owned(&["  ", "red", "blue "]);
        assert_eq!(merge_keywords(&existing, &additions), owned(&["red", "blue"]));
    }
}
