//! Summary rendering.
//!
//! Summaries go to stdout either as labeled text lines or as JSON.

pub mod json;
pub mod text;

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;

pub use text::TextReport;

/// Render a summary in the requested format.
pub fn render<T: TextReport + Serialize>(summary: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render_text()),
        OutputFormat::Json => json::render_json(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassSummary;

    #[test]
    fn test_render_both_formats() {
        let summary = ClassSummary {
            folder: "d".to_string(),
            files: 1,
            classes: 4,
        };

        let text = render(&summary, OutputFormat::Text).unwrap();
        assert!(text.contains("Total classes: 4\n"));

        let json = render(&summary, OutputFormat::Json).unwrap();
        assert!(json.contains("\"classes\": 4"));
    }
}
