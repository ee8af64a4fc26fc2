//! Report aggregators.
//!
//! Each submodule reads one kind of report and folds it into a summary.
//! The functions here drive a folder scan: every matching file is read
//! once, handed to the aggregator and dropped before the next one is
//! opened.

pub mod aggregator;
pub mod classes;
pub mod exceptions;
pub mod mappings;
pub mod markers;
pub mod passthrough;
pub mod savings;
pub mod traces;

use crate::models::{
    ClassSummary, ExceptionSummary, MappingSummary, PassthroughSummary, SavingsSummary,
    TraceSummary,
};
use crate::scanner::{FileScanner, ReportFile};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

/// Read every report in the scanned folder and hand it to `visit`.
///
/// The first error aborts the scan; it is reported with the path of the
/// offending file.
pub fn visit_reports<F>(scanner: &FileScanner, show_progress: bool, mut visit: F) -> Result<()>
where
    F: FnMut(&ReportFile, &str) -> Result<()>,
{
    let files = scanner.scan()?;
    info!(
        "{} report files found in {}",
        files.len(),
        scanner.root().display()
    );

    let progress = progress_bar(files.len(), show_progress);
    for file in &files {
        progress.set_message(file.name.clone());
        let content = scanner.read(file)?;
        debug!("Parsing {} ({} bytes)", file.name, file.size);
        visit(file, &content)
            .with_context(|| format!("Failed to parse {}", file.path.display()))?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(())
}

fn folder_name(scanner: &FileScanner) -> String {
    scanner.root().display().to_string()
}

pub fn summarize_traces(scanner: &FileScanner, show_progress: bool) -> Result<TraceSummary> {
    let mut aggregator = traces::TraceAggregator::new();
    visit_reports(scanner, show_progress, |file, content| {
        let outcome = traces::parse_trace(content)?;
        if let traces::TraceOutcome::Failed(reason) = &outcome {
            debug!("{} not analyzed: {:?}", file.name, reason);
        }
        aggregator.add(&outcome);
        Ok(())
    })?;
    Ok(aggregator.finish(folder_name(scanner)))
}

pub fn summarize_mappings(scanner: &FileScanner, show_progress: bool) -> Result<MappingSummary> {
    let mut aggregator = mappings::MappingAggregator::new();
    visit_reports(scanner, show_progress, |file, content| {
        let mapping = mappings::count_mappings(content);
        if mapping.empty {
            debug!("{} has no mappings", file.name);
        }
        aggregator.add(mapping);
        Ok(())
    })?;
    Ok(aggregator.finish(folder_name(scanner)))
}

pub fn summarize_savings(
    scanner: &FileScanner,
    show_progress: bool,
    generated_suffix: &str,
) -> Result<SavingsSummary> {
    let mut grouper = savings::SavingsGrouper::new();
    visit_reports(scanner, show_progress, |_, content| {
        grouper.add(savings::scan_savings(content)?);
        Ok(())
    })?;
    Ok(grouper.finish(folder_name(scanner), generated_suffix))
}

pub fn summarize_passthrough(
    scanner: &FileScanner,
    show_progress: bool,
    generated_prefixes: &[String],
) -> Result<PassthroughSummary> {
    let mut aggregator = passthrough::PassthroughAggregator::new(generated_prefixes.to_vec());
    visit_reports(scanner, show_progress, |file, content| {
        aggregator.add_file(&file.name, content)?;
        Ok(())
    })?;
    Ok(aggregator.finish(folder_name(scanner)))
}

pub fn summarize_classes(
    scanner: &FileScanner,
    show_progress: bool,
    generated_prefixes: &[String],
) -> Result<ClassSummary> {
    let mut counter = classes::ClassCounter::new();
    visit_reports(scanner, show_progress, |_, content| {
        counter.add(classes::count_classes(content, generated_prefixes));
        Ok(())
    })?;
    Ok(counter.finish(folder_name(scanner)))
}

pub fn summarize_exceptions(
    scanner: &FileScanner,
    show_progress: bool,
    context_lines: usize,
) -> Result<ExceptionSummary> {
    let mut collector = exceptions::ExceptionCollector::new();
    visit_reports(scanner, show_progress, |file, content| {
        collector.add(&file.name, exceptions::find_exception(content, context_lines));
        Ok(())
    })?;
    Ok(collector.finish(folder_name(scanner)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanConfig;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(dir: &TempDir, ext: &str) -> FileScanner {
        FileScanner::new(dir.path().to_path_buf(), ScanConfig::new(ext))
    }

    #[test]
    fn test_traces_over_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.txt"),
            "Done analyzing the assembly\nMethods: 4\nInteresting methods: 2\nSUCCESS",
        )
        .unwrap();
        fs::write(dir.path().join("b.txt"), "ASSEMBLY FAILURE: boom").unwrap();
        fs::write(dir.path().join("ignored.log"), "Methods: 100").unwrap();

        let summary = summarize_traces(&scanner(&dir, ".txt"), false).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.failed_assemblies, 1);
        assert_eq!(summary.counters.methods, 4);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("bad.txt"),
            "Done analyzing the assembly\nMethods: lots\nSUCCESS",
        )
        .unwrap();

        let err = summarize_traces(&scanner(&dir, ".txt"), false).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("bad.txt"));
        assert!(message.contains("lots"));
    }

    #[test]
    fn test_empty_folder() {
        let dir = TempDir::new().unwrap();
        let summary = summarize_mappings(&scanner(&dir, ".txt"), false).unwrap();
        assert_eq!(summary.files, 0);
        assert_eq!(summary.unique_mappings, 0);
    }

    #[test]
    fn test_exceptions_over_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.log"), "Throw exception\nat X\n").unwrap();

        let summary = summarize_exceptions(&scanner(&dir, ".log"), false, 5).unwrap();
        assert_eq!(summary.sites.len(), 1);
        assert_eq!(summary.sites[0].file, "a.log");
    }
}
