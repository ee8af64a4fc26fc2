//! Plain text summaries.
//!
//! Each summary renders as a fixed sequence of `Label: value` lines.
//! The order of the lines never changes, so two runs over the same
//! folder produce the same bytes.

use crate::models::{
    ClassSummary, ExceptionSummary, MappingSummary, PassthroughSummary, SavingsSummary,
    TraceSummary,
};

/// A summary that can be rendered as labeled lines.
pub trait TextReport {
    fn render_text(&self) -> String;
}

fn push_line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    out.push_str(&format!("{}: {}\n", label, value));
}

fn push_float(out: &mut String, label: &str, value: f64) {
    out.push_str(&format!("{}: {:.2}\n", label, value));
}

impl TextReport for TraceSummary {
    fn render_text(&self) -> String {
        let c = &self.counters;
        let a = &self.averages;
        let mut out = String::new();

        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Assembly traces", self.files);
        push_line(&mut out, "Failed assemblies", self.failed_assemblies);
        push_line(&mut out, "Native assemblies", self.native_assemblies);
        push_line(&mut out, "Analyzed assemblies", self.succeeded_assemblies());
        push_line(&mut out, "Interesting assemblies", self.interesting_assemblies());
        out.push('\n');

        push_line(&mut out, "Methods", c.methods);
        push_line(&mut out, "Interesting methods", c.interesting_methods);
        push_line(&mut out, "Failed methods", c.failed_methods);
        push_line(&mut out, "Unsupported methods", c.unsupported_methods);
        push_line(&mut out, "Concrete methods", c.concrete_methods);
        push_line(&mut out, "String column accesses", c.string_accesses);
        push_line(&mut out, "Index column accesses", c.index_accesses);
        push_line(&mut out, "Concrete methods mapped", c.concrete_methods_mapped);
        out.push('\n');

        push_line(&mut out, "Union unused methods", c.union_unused);
        push_line(&mut out, "Union all used methods", c.union_all_used);
        push_line(&mut out, "Union superset methods", c.union_superset);
        push_float(&mut out, "Average unused union columns", a.union_unused_columns);
        push_float(&mut out, "Average unused union percentage", a.union_unused_percentage);
        push_line(&mut out, "Input unused methods", c.input_unused);
        push_line(&mut out, "Input all used methods", c.input_all_used);
        push_float(&mut out, "Average unused input columns", a.input_unused_columns);
        push_float(&mut out, "Average unused input percentage", a.input_unused_percentage);
        push_line(&mut out, "Output unused methods", c.output_unused);
        push_line(&mut out, "Output all used methods", c.output_all_used);
        push_float(&mut out, "Average unused output columns", a.output_unused_columns);
        push_float(&mut out, "Average unused output percentage", a.output_unused_percentage);
        out.push('\n');

        push_float(&mut out, "Total analysis seconds", c.analysis_seconds);
        push_float(&mut out, "Seconds per interesting assembly", a.seconds_per_assembly);
        push_float(&mut out, "Seconds per interesting method", a.seconds_per_method);

        out
    }
}

impl TextReport for MappingSummary {
    fn render_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Mapping files", self.files);
        push_line(&mut out, "Unique mappings", self.unique_mappings);
        push_line(&mut out, "Empty mapping files", self.empty_files);
        out
    }
}

impl TextReport for SavingsSummary {
    fn render_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Assembly traces", self.files);
        out.push('\n');

        for group in &self.processors {
            out.push_str(&group.processor);
            out.push('\n');
            for assembly in &group.assemblies {
                out.push('\t');
                out.push_str(assembly);
                out.push('\n');
            }
        }
        if !self.processors.is_empty() {
            out.push('\n');
        }

        push_line(&mut out, "Potential redundant processors", self.redundant);
        out
    }
}

impl TextReport for PassthroughSummary {
    fn render_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Total files", self.files);
        push_line(&mut out, "Total classes", self.classes);
        push_line(&mut out, "Total classes (filtered)", self.filtered_classes);
        push_line(&mut out, "Total classes without _TOP_", self.classes_without_top());
        push_line(&mut out, "Total classes with passthrough", self.classes_with_passthrough);
        push_float(&mut out, "Percentage of classes", self.classes_percentage);
        push_line(&mut out, "Total columns", self.total_columns);
        push_line(&mut out, "Total passthrough", self.total_passthrough);
        push_float(&mut out, "Percentage of columns", self.columns_percentage);
        push_float(&mut out, "Min ratio", self.min_ratio.unwrap_or_default());
        push_float(&mut out, "Max ratio", self.max_ratio.unwrap_or_default());
        push_line(&mut out, "Max passthrough", self.max_passthrough);
        push_line(
            &mut out,
            "File with max passthrough",
            self.file_with_max.as_deref().unwrap_or("-"),
        );
        out.push_str(&format!(
            "Total input: {} Total schema: {} Ratio: {:.2}\n",
            self.input_found, self.input_schema, self.input_percentage
        ));
        out.push_str(&format!(
            "Total output: {} Total schema: {} Ratio: {:.2}\n",
            self.output_found, self.output_schema, self.output_percentage
        ));

        for row in &self.problematic {
            out.push_str(&format!(
                "Problematic: {} {} ({:.2})\n",
                row.file, row.row, row.ratio
            ));
        }

        out
    }
}

impl TextReport for ClassSummary {
    fn render_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Total files", self.files);
        push_line(&mut out, "Total classes", self.classes);
        out
    }
}

impl TextReport for ExceptionSummary {
    fn render_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, "Analyzing folder", &self.folder);
        push_line(&mut out, "Log files", self.files);
        out.push('\n');

        for site in &self.sites {
            out.push_str(&site.file);
            out.push('\n');
            for line in &site.context {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("------\n");
        }

        push_line(&mut out, "Files with exceptions", self.sites.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExceptionSite, ProcessorGroup, TraceCounters};

    #[test]
    fn test_empty_trace_summary_is_all_zero() {
        let text = TraceSummary {
            folder: "/tmp/x".to_string(),
            ..TraceSummary::default()
        }
        .render_text();

        assert!(text.starts_with("Analyzing folder: /tmp/x\nAssembly traces: 0\n"));
        assert!(text.contains("Seconds per interesting method: 0.00\n"));
        for line in text.lines().skip(1).filter(|l| !l.is_empty()) {
            let value = line.rsplit(": ").next().unwrap();
            assert!(value == "0" || value == "0.00", "non zero line: {}", line);
        }
    }

    #[test]
    fn test_trace_line_order() {
        let summary = TraceSummary {
            files: 3,
            failed_assemblies: 1,
            not_interesting_assemblies: 1,
            counters: TraceCounters {
                methods: 10,
                ..TraceCounters::default()
            },
            ..TraceSummary::default()
        };
        let text = summary.render_text();

        let analyzed = text.find("Analyzed assemblies: 2").unwrap();
        let interesting = text.find("Interesting assemblies: 1").unwrap();
        let methods = text.find("Methods: 10").unwrap();
        assert!(analyzed < interesting && interesting < methods);
    }

    #[test]
    fn test_savings_lists_assemblies_under_processor() {
        let summary = SavingsSummary {
            folder: "d".to_string(),
            files: 2,
            processors: vec![ProcessorGroup {
                processor: "P1".to_string(),
                assemblies: vec!["A.dll".to_string(), "B.dll".to_string()],
                redundant: 1,
            }],
            redundant: 1,
        };

        let text = summary.render_text();
        assert!(text.contains("P1\n\tA.dll\n\tB.dll\n"));
        assert!(text.ends_with("Potential redundant processors: 1\n"));
    }

    #[test]
    fn test_passthrough_without_ratios() {
        let text = PassthroughSummary::default().render_text();
        assert!(text.contains("Min ratio: 0.00\n"));
        assert!(text.contains("Max ratio: 0.00\n"));
        assert!(text.contains("File with max passthrough: -\n"));
        assert!(text.contains("Total input: 0 Total schema: 0 Ratio: 0.00\n"));
    }

    #[test]
    fn test_exception_sites() {
        let summary = ExceptionSummary {
            folder: "d".to_string(),
            files: 2,
            sites: vec![ExceptionSite {
                file: "a.log".to_string(),
                context: vec!["  at X".to_string()],
            }],
        };

        let text = summary.render_text();
        assert!(text.contains("a.log\n  at X\n------\n"));
        assert!(text.ends_with("Files with exceptions: 1\n"));
    }
}
