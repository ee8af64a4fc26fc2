//! Data models for the report aggregators.
//!
//! Every summary here is built once per run from the files of a single
//! folder and read once by the report renderers. Derived ratios are
//! computed when the summary is finished and are always guarded against
//! a zero denominator.

use serde::Serialize;
use std::ops::AddAssign;

/// Running totals read from the statistics section of assembly traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceCounters {
    pub methods: i64,
    pub failed_methods: i64,
    pub interesting_methods: i64,
    pub unsupported_methods: i64,
    /// Interesting methods whose column indexing was resolved.
    pub concrete_methods: i64,
    /// Concrete methods mapped back to plan (xml) ids.
    pub concrete_methods_mapped: i64,

    /// Methods whose union of used columns is a proper subset of the schema.
    pub union_unused: i64,
    pub union_all_used: i64,
    /// Methods whose used columns exceed the declared schema (imprecision).
    pub union_superset: i64,
    pub input_unused: i64,
    pub input_all_used: i64,
    pub output_unused: i64,
    pub output_all_used: i64,

    pub string_accesses: i64,
    pub index_accesses: i64,

    pub union_savings: i64,
    pub union_percentage: f64,
    pub input_savings: i64,
    pub input_percentage: f64,
    pub output_savings: i64,
    pub output_percentage: f64,

    /// Analysis time of interesting assemblies, in seconds.
    pub analysis_seconds: f64,
}

impl AddAssign<&TraceCounters> for TraceCounters {
    fn add_assign(&mut self, other: &TraceCounters) {
        self.methods = self.methods.saturating_add(other.methods);
        self.failed_methods = self.failed_methods.saturating_add(other.failed_methods);
        self.interesting_methods = self
            .interesting_methods
            .saturating_add(other.interesting_methods);
        self.unsupported_methods = self
            .unsupported_methods
            .saturating_add(other.unsupported_methods);
        self.concrete_methods = self.concrete_methods.saturating_add(other.concrete_methods);
        self.concrete_methods_mapped = self
            .concrete_methods_mapped
            .saturating_add(other.concrete_methods_mapped);
        self.union_unused = self.union_unused.saturating_add(other.union_unused);
        self.union_all_used = self.union_all_used.saturating_add(other.union_all_used);
        self.union_superset = self.union_superset.saturating_add(other.union_superset);
        self.input_unused = self.input_unused.saturating_add(other.input_unused);
        self.input_all_used = self.input_all_used.saturating_add(other.input_all_used);
        self.output_unused = self.output_unused.saturating_add(other.output_unused);
        self.output_all_used = self.output_all_used.saturating_add(other.output_all_used);
        self.string_accesses = self.string_accesses.saturating_add(other.string_accesses);
        self.index_accesses = self.index_accesses.saturating_add(other.index_accesses);
        self.union_savings = self.union_savings.saturating_add(other.union_savings);
        self.union_percentage += other.union_percentage;
        self.input_savings = self.input_savings.saturating_add(other.input_savings);
        self.input_percentage += other.input_percentage;
        self.output_savings = self.output_savings.saturating_add(other.output_savings);
        self.output_percentage += other.output_percentage;
        self.analysis_seconds += other.analysis_seconds;
    }
}

/// Averages derived from [`TraceCounters`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceAverages {
    pub union_unused_columns: f64,
    pub union_unused_percentage: f64,
    pub input_unused_columns: f64,
    pub input_unused_percentage: f64,
    pub output_unused_columns: f64,
    pub output_unused_percentage: f64,
    pub seconds_per_assembly: f64,
    pub seconds_per_method: f64,
}

/// Summary of a folder of assembly traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraceSummary {
    pub folder: String,
    pub files: usize,
    pub failed_assemblies: usize,
    /// Failed assemblies that are not managed (CLR) modules.
    pub native_assemblies: usize,
    pub not_interesting_assemblies: usize,
    pub counters: TraceCounters,
    pub averages: TraceAverages,
}

impl TraceSummary {
    pub fn succeeded_assemblies(&self) -> usize {
        self.files.saturating_sub(self.failed_assemblies)
    }

    pub fn interesting_assemblies(&self) -> usize {
        self.succeeded_assemblies()
            .saturating_sub(self.not_interesting_assemblies)
    }
}

/// Summary of a folder of processor mapping files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub folder: String,
    pub files: usize,
    /// Sum of the per-file unique key counts.
    pub unique_mappings: usize,
    pub empty_files: usize,
}

/// The assemblies that report savings for one processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessorGroup {
    pub processor: String,
    pub assemblies: Vec<String>,
    pub redundant: usize,
}

/// Summary of savings reported per processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SavingsSummary {
    pub folder: String,
    pub files: usize,
    pub processors: Vec<ProcessorGroup>,
    pub redundant: usize,
}

/// A passthrough row whose ratio exceeds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblematicRow {
    pub file: String,
    pub row: String,
    pub ratio: f64,
}

/// Summary of a folder of passthrough reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassthroughSummary {
    pub folder: String,
    pub files: usize,
    pub classes: usize,
    /// Classes left after dropping compiler generated ones.
    pub filtered_classes: usize,
    /// Filtered classes whose analysis gave no precise answer.
    pub top_classes: usize,
    pub classes_with_passthrough: usize,
    pub total_columns: i64,
    pub total_passthrough: i64,
    pub total_ratio: f64,
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub max_passthrough: i64,
    pub file_with_max: Option<String>,
    pub input_found: i64,
    pub input_schema: i64,
    pub output_found: i64,
    pub output_schema: i64,
    pub problematic: Vec<ProblematicRow>,
    pub classes_percentage: f64,
    pub columns_percentage: f64,
    pub input_percentage: f64,
    pub output_percentage: f64,
}

impl PassthroughSummary {
    pub fn classes_without_top(&self) -> usize {
        self.filtered_classes.saturating_sub(self.top_classes)
    }
}

/// Summary of a folder of SARIF result files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub folder: String,
    pub files: usize,
    pub classes: usize,
}

/// The first thrown exception found in a log, with the lines after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionSite {
    pub file: String,
    pub context: Vec<String>,
}

/// Summary of a folder of analysis logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExceptionSummary {
    pub folder: String,
    pub files: usize,
    pub sites: Vec<ExceptionSite>,
}
