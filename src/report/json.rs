//! JSON summaries.

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize a summary as pretty-printed JSON, with a trailing newline.
pub fn render_json<T: Serialize>(summary: &T) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(summary).context("Failed to serialize summary to JSON")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MappingSummary, PassthroughSummary};

    #[test]
    fn test_render_mapping_summary() {
        let summary = MappingSummary {
            folder: "d".to_string(),
            files: 3,
            unique_mappings: 7,
            empty_files: 1,
        };

        let json = render_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["files"], 3);
        assert_eq!(value["unique_mappings"], 7);
        assert_eq!(value["empty_files"], 1);
    }

    #[test]
    fn test_missing_ratios_are_null() {
        let json = render_json(&PassthroughSummary::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["min_ratio"].is_null());
        assert_eq!(value["classes_percentage"], 0.0);
    }
}
