//! Passthrough column reports.
//!
//! After the `=== Summary ===` banner every line is a `+` separated row:
//!
//! ```text
//! class+passthrough+output found+input found+output schema+input schema
//! ```
//!
//! A negative count means the analysis could not give a precise answer
//! for that class (`_TOP_`).

use super::aggregator::{percentage, ratio};
use crate::error::{ParseError, ParseResult};
use crate::models::{PassthroughSummary, ProblematicRow};

pub const SUMMARY_BANNER: &str = "=== Summary ===";
pub const ROW_SEPARATOR: char = '+';

/// The rows following the summary banner, or nothing if there is no banner.
pub fn summary_rows(content: &str) -> impl Iterator<Item = &str> {
    let mut lines = content.lines();
    let found = lines.by_ref().any(|line| line.contains(SUMMARY_BANNER));
    lines.filter(move |line| found && !line.is_empty())
}

fn field(fields: &[&str], index: usize, row: &str) -> ParseResult<i64> {
    let value = fields.get(index).ok_or_else(|| ParseError::MissingField {
        index,
        line: row.to_string(),
    })?;
    value.trim().parse().map_err(|_| ParseError::InvalidField {
        index,
        value: value.to_string(),
        line: row.to_string(),
    })
}

#[derive(Debug, Default)]
pub struct PassthroughAggregator {
    generated_prefixes: Vec<String>,
    summary: PassthroughSummary,
}

impl PassthroughAggregator {
    pub fn new(generated_prefixes: Vec<String>) -> Self {
        Self {
            generated_prefixes,
            summary: PassthroughSummary::default(),
        }
    }

    fn is_generated(&self, class: &str) -> bool {
        self.generated_prefixes
            .iter()
            .any(|prefix| class.contains(prefix.as_str()))
    }

    /// Add every row of one report file.
    pub fn add_file(&mut self, file: &str, content: &str) -> ParseResult<()> {
        self.summary.files += 1;
        for row in summary_rows(content) {
            self.add_row(file, row)?;
        }
        Ok(())
    }

    fn add_row(&mut self, file: &str, row: &str) -> ParseResult<()> {
        let fields: Vec<&str> = row.split(ROW_SEPARATOR).collect();
        if fields.len() <= 2 {
            return Ok(());
        }

        self.summary.classes += 1;
        if self.is_generated(fields[0]) {
            return Ok(());
        }

        let s = &mut self.summary;
        s.filtered_classes += 1;

        let passthrough = field(&fields, 1, row)?;
        let output_found = field(&fields, 2, row)?;
        let input_found = field(&fields, 3, row)?;
        let output_schema = field(&fields, 4, row)?;
        let input_schema = field(&fields, 5, row)?;

        if output_found < 0 || input_found < 0 {
            s.top_classes += 1;
            return Ok(());
        }

        s.output_found = s.output_found.saturating_add(output_found);
        s.input_found = s.input_found.saturating_add(input_found);
        s.output_schema = s.output_schema.saturating_add(output_schema);
        s.input_schema = s.input_schema.saturating_add(input_schema);

        if passthrough < 0 {
            s.top_classes += 1;
            return Ok(());
        }

        let total = output_found;
        let class_ratio = ratio(passthrough as f64, total as f64);
        if class_ratio > 1.0 {
            s.problematic.push(ProblematicRow {
                file: file.to_string(),
                row: row.to_string(),
                ratio: class_ratio,
            });
        }
        s.max_ratio = Some(s.max_ratio.map_or(class_ratio, |m| m.max(class_ratio)));
        s.min_ratio = Some(s.min_ratio.map_or(class_ratio, |m| m.min(class_ratio)));
        if passthrough > s.max_passthrough {
            s.max_passthrough = passthrough;
            s.file_with_max = Some(file.to_string());
        }

        s.total_passthrough = s.total_passthrough.saturating_add(passthrough);
        s.total_columns = s.total_columns.saturating_add(total);
        s.total_ratio += class_ratio;
        if passthrough > 0 {
            s.classes_with_passthrough += 1;
        }

        Ok(())
    }

    pub fn finish(self, folder: String) -> PassthroughSummary {
        let mut s = self.summary;
        s.folder = folder;
        s.classes_percentage = percentage(
            s.classes_with_passthrough as f64,
            s.filtered_classes as f64,
        );
        s.columns_percentage = percentage(s.total_passthrough as f64, s.output_found as f64);
        s.input_percentage = percentage(s.input_found as f64, s.input_schema as f64);
        s.output_percentage = percentage(s.output_found as f64, s.output_schema as f64);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_generated_prefixes;

    fn aggregator() -> PassthroughAggregator {
        PassthroughAggregator::new(default_generated_prefixes())
    }

    fn report(rows: &[&str]) -> String {
        format!("Analyzing...\nclass header\n{}\n{}\n", SUMMARY_BANNER, rows.join("\n"))
    }

    #[test]
    fn test_rows_start_after_banner() {
        let content = "a+1+2\n=== Summary ===\nb+1+2\n\nc+3+4\n";
        let rows: Vec<_> = summary_rows(content).collect();
        assert_eq!(rows, vec!["b+1+2", "c+3+4"]);
    }

    #[test]
    fn test_no_banner_no_rows() {
        assert_eq!(summary_rows("a+1+2+3+4+5\n").count(), 0);

        let mut agg = aggregator();
        agg.add_file("x.passthrough", "a+1+2+3+4+5\n").unwrap();
        let s = agg.finish("dir".to_string());
        assert_eq!(s.files, 1);
        assert_eq!(s.classes, 0);
    }

    #[test]
    fn test_accumulates_filtered_rows() {
        let mut agg = aggregator();
        agg.add_file(
            "a.passthrough",
            &report(&[
                "My.Processor+2+4+6+8+10",
                "My.Reducer+0+3+3+5+5",
                "ScopeGrouper_123+9+9+9+9+9",
                "short+1",
            ]),
        )
        .unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.classes, 3);
        assert_eq!(s.filtered_classes, 2);
        assert_eq!(s.classes_with_passthrough, 1);
        assert_eq!(s.total_passthrough, 2);
        assert_eq!(s.total_columns, 7);
        assert_eq!((s.output_found, s.input_found), (7, 9));
        assert_eq!((s.output_schema, s.input_schema), (13, 15));
        assert_eq!(s.min_ratio, Some(0.0));
        assert_eq!(s.max_ratio, Some(0.5));
        assert_eq!(s.max_passthrough, 2);
        assert_eq!(s.file_with_max.as_deref(), Some("a.passthrough"));
        assert_eq!(s.classes_percentage, 50.0);
        assert!(s.problematic.is_empty());
    }

    #[test]
    fn test_negative_counts_are_top() {
        let mut agg = aggregator();
        agg.add_file(
            "a.passthrough",
            &report(&["A+-1+4+4+4+4", "B+1+-1+4+4+4", "C+1+2+2+2+2"]),
        )
        .unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.filtered_classes, 3);
        assert_eq!(s.top_classes, 2);
        assert_eq!(s.classes_without_top(), 1);
        assert_eq!(s.total_columns, 2);
        assert_eq!(s.total_passthrough, 1);
        // A and C are accumulated; B has a negative found count.
        assert_eq!((s.output_found, s.input_found), (6, 6));
        assert_eq!((s.output_schema, s.input_schema), (6, 6));
    }

    #[test]
    fn test_negative_passthrough_keeps_found_totals() {
        let mut agg = aggregator();
        agg.add_file("a.passthrough", "=== Summary ===\nA+-1+4+6+8+10\n")
            .unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.top_classes, 1);
        assert_eq!((s.output_found, s.input_found), (4, 6));
        assert_eq!((s.output_schema, s.input_schema), (8, 10));
        assert_eq!(s.total_columns, 0);
        assert_eq!(s.min_ratio, None);
        assert_eq!(s.output_percentage, 50.0);
    }

    #[test]
    fn test_ratio_above_one_is_problematic() {
        let mut agg = aggregator();
        agg.add_file("p.passthrough", &report(&["A+5+2+2+2+2"])).unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.problematic.len(), 1);
        assert_eq!(s.problematic[0].file, "p.passthrough");
        assert_eq!(s.problematic[0].ratio, 2.5);
    }

    #[test]
    fn test_max_passthrough_keeps_first_file_on_tie() {
        let mut agg = aggregator();
        agg.add_file("a.passthrough", &report(&["A+3+6+6+6+6"])).unwrap();
        agg.add_file("b.passthrough", &report(&["B+3+6+6+6+6"])).unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.file_with_max.as_deref(), Some("a.passthrough"));
    }

    #[test]
    fn test_zero_total_gives_zero_ratio() {
        let mut agg = aggregator();
        agg.add_file("a.passthrough", &report(&["A+0+0+0+0+0"])).unwrap();

        let s = agg.finish("dir".to_string());
        assert_eq!(s.min_ratio, Some(0.0));
        assert_eq!(s.columns_percentage, 0.0);
        assert_eq!(s.input_percentage, 0.0);
    }

    #[test]
    fn test_malformed_rows_are_errors() {
        let mut agg = aggregator();
        let err = agg
            .add_file("a.passthrough", &report(&["A+1+2+3"]))
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingField { index: 4, .. }));

        let mut agg = aggregator();
        let err = agg
            .add_file("a.passthrough", &report(&["A+x+2+3+4+5"]))
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { index: 1, .. }));
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let s = aggregator().finish("dir".to_string());
        assert_eq!(s.files, 0);
        assert_eq!(s.min_ratio, None);
        assert_eq!(s.classes_percentage, 0.0);
        assert_eq!(s.output_percentage, 0.0);
    }
}
