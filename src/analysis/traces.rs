//! Assembly trace aggregation.
//!
//! A trace is the log written while analyzing one assembly. It is only
//! read when the analysis finished (`SUCCESS` terminator, no load
//! failure) and the statistics section after the "Done analyzing"
//! banner is present exactly once. The statistics section is a list of
//! `label: value` lines matched against a fixed marker table.

use super::aggregator::ratio;
use super::markers::{extract_elapsed, extract_float, extract_int};
use crate::error::ParseResult;
use crate::models::{TraceAverages, TraceCounters, TraceSummary};

pub const SUCCESS_TOKEN: &str = "SUCCESS";
pub const LOAD_FAILURE: &str = "LOAD FAILURE";
pub const NOT_CLR_MODULE: &str = "not a valid CLR module";
pub const DONE_DELIMITER: &str = "Done analyzing the assembly";

/// What a marker line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Methods,
    FailedMethods,
    InterestingMethods,
    UnsupportedMethods,
    ConcreteMethods,
    ConcreteMethodsMapped,
    UnionUnused,
    UnionAllUsed,
    UnionSuperset,
    InputUnused,
    InputAllUsed,
    OutputUnused,
    OutputAllUsed,
    StringAccesses,
    IndexAccesses,
    UnionSavings,
    UnionPercentage,
    InputSavings,
    InputPercentage,
    OutputSavings,
    OutputPercentage,
    AnalysisTime,
}

/// Checked in order against each trimmed line; the first prefix wins.
const MARKERS: &[(&str, Stat)] = &[
    ("Methods:", Stat::Methods),
    ("Methods failed", Stat::FailedMethods),
    ("Interesting methods", Stat::InterestingMethods),
    ("Unsupported", Stat::UnsupportedMethods),
    ("Concrete-columns", Stat::ConcreteMethods),
    ("Concrete methods", Stat::ConcreteMethodsMapped),
    ("Union unused:", Stat::UnionUnused),
    ("Union all used", Stat::UnionAllUsed),
    ("Union superset", Stat::UnionSuperset),
    ("Input unused:", Stat::InputUnused),
    ("Input all used", Stat::InputAllUsed),
    ("Output unused:", Stat::OutputUnused),
    ("Output all used", Stat::OutputAllUsed),
    ("Used columns string accesses", Stat::StringAccesses),
    ("Used columns index accesses", Stat::IndexAccesses),
    ("!Union columns count cumulative", Stat::UnionSavings),
    ("!Union columns percentage count cumulative", Stat::UnionPercentage),
    ("!Input columns count cumulative", Stat::InputSavings),
    ("!Input columns percentage count cumulative", Stat::InputPercentage),
    ("!Output columns count cumulative", Stat::OutputSavings),
    ("!Output columns percentage count cumulative", Stat::OutputPercentage),
    ("Total analysis time", Stat::AnalysisTime),
];

/// Why a trace was not parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFailure {
    /// No `SUCCESS` terminator, or the assembly failed to load.
    Unfinished {
        /// The assembly is not a managed module.
        native: bool,
    },
    /// The "Done analyzing" banner is missing or repeated.
    MissingStatistics { segments: usize },
}

/// Counters read from a single successful trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTrace {
    pub counters: TraceCounters,
    pub interesting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutcome {
    Parsed(ParsedTrace),
    Failed(TraceFailure),
}

/// Parse one trace.
///
/// Structural mismatches yield [`TraceOutcome::Failed`]; a marker with an
/// unreadable value is an error.
pub fn parse_trace(content: &str) -> ParseResult<TraceOutcome> {
    if !content.trim().ends_with(SUCCESS_TOKEN) || content.contains(LOAD_FAILURE) {
        return Ok(TraceOutcome::Failed(TraceFailure::Unfinished {
            native: is_native(content),
        }));
    }

    let segments: Vec<&str> = content.split(DONE_DELIMITER).collect();
    let [_, statistics] = segments.as_slice() else {
        return Ok(TraceOutcome::Failed(TraceFailure::MissingStatistics {
            segments: segments.len(),
        }));
    };

    let mut trace = ParsedTrace {
        counters: TraceCounters::default(),
        interesting: true,
    };

    for line in statistics.lines() {
        let line = line.trim();
        if let Some((marker, stat)) = MARKERS.iter().find(|(m, _)| line.starts_with(m)) {
            apply(&mut trace, *marker, *stat, line)?;
        }
    }

    Ok(TraceOutcome::Parsed(trace))
}

fn apply(trace: &mut ParsedTrace, marker: &'static str, stat: Stat, line: &str) -> ParseResult<()> {
    let c = &mut trace.counters;
    match stat {
        Stat::Methods => add(&mut c.methods, marker, line)?,
        Stat::FailedMethods => add(&mut c.failed_methods, marker, line)?,
        Stat::InterestingMethods => {
            let count = extract_int(marker, line)?;
            if count == 0 {
                trace.interesting = false;
            }
            c.interesting_methods = c.interesting_methods.saturating_add(count);
        }
        Stat::UnsupportedMethods => add(&mut c.unsupported_methods, marker, line)?,
        Stat::ConcreteMethods => add(&mut c.concrete_methods, marker, line)?,
        Stat::ConcreteMethodsMapped => add(&mut c.concrete_methods_mapped, marker, line)?,
        Stat::UnionUnused => add(&mut c.union_unused, marker, line)?,
        Stat::UnionAllUsed => add(&mut c.union_all_used, marker, line)?,
        Stat::UnionSuperset => add(&mut c.union_superset, marker, line)?,
        Stat::InputUnused => add(&mut c.input_unused, marker, line)?,
        Stat::InputAllUsed => add(&mut c.input_all_used, marker, line)?,
        Stat::OutputUnused => add(&mut c.output_unused, marker, line)?,
        Stat::OutputAllUsed => add(&mut c.output_all_used, marker, line)?,
        Stat::StringAccesses => add(&mut c.string_accesses, marker, line)?,
        Stat::IndexAccesses => add(&mut c.index_accesses, marker, line)?,
        Stat::UnionSavings => add(&mut c.union_savings, marker, line)?,
        Stat::UnionPercentage => c.union_percentage += extract_float(marker, line)?,
        Stat::InputSavings => add(&mut c.input_savings, marker, line)?,
        Stat::InputPercentage => c.input_percentage += extract_float(marker, line)?,
        Stat::OutputSavings => add(&mut c.output_savings, marker, line)?,
        Stat::OutputPercentage => c.output_percentage += extract_float(marker, line)?,
        Stat::AnalysisTime => {
            let seconds = extract_elapsed(marker, line)?;
            if trace.interesting {
                c.analysis_seconds += seconds;
            }
        }
    }
    Ok(())
}

fn add(total: &mut i64, marker: &'static str, line: &str) -> ParseResult<()> {
    *total = total.saturating_add(extract_int(marker, line)?);
    Ok(())
}

/// A load failure reported on the same line as the non-CLR diagnostic.
fn is_native(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.contains(LOAD_FAILURE) && line.contains(NOT_CLR_MODULE))
}

/// Sums trace outcomes into a [`TraceSummary`].
#[derive(Debug, Default)]
pub struct TraceAggregator {
    files: usize,
    failed: usize,
    native: usize,
    not_interesting: usize,
    counters: TraceCounters,
}

impl TraceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outcome: &TraceOutcome) {
        self.files += 1;
        match outcome {
            TraceOutcome::Parsed(trace) => {
                if !trace.interesting {
                    self.not_interesting += 1;
                }
                self.counters += &trace.counters;
            }
            TraceOutcome::Failed(TraceFailure::Unfinished { native }) => {
                self.failed += 1;
                if *native {
                    self.native += 1;
                }
            }
            TraceOutcome::Failed(TraceFailure::MissingStatistics { .. }) => {
                self.failed += 1;
            }
        }
    }

    pub fn finish(self, folder: String) -> TraceSummary {
        let mut summary = TraceSummary {
            folder,
            files: self.files,
            failed_assemblies: self.failed,
            native_assemblies: self.native,
            not_interesting_assemblies: self.not_interesting,
            counters: self.counters,
            averages: TraceAverages::default(),
        };

        let c = &summary.counters;
        summary.averages = TraceAverages {
            union_unused_columns: ratio(c.union_savings as f64, c.union_unused as f64),
            union_unused_percentage: ratio(c.union_percentage, c.union_unused as f64),
            input_unused_columns: ratio(c.input_savings as f64, c.input_unused as f64),
            input_unused_percentage: ratio(c.input_percentage, c.input_unused as f64),
            output_unused_columns: ratio(c.output_savings as f64, c.output_unused as f64),
            output_unused_percentage: ratio(c.output_percentage, c.output_unused as f64),
            seconds_per_assembly: ratio(
                c.analysis_seconds,
                summary.interesting_assemblies() as f64,
            ),
            seconds_per_method: ratio(c.analysis_seconds, c.interesting_methods as f64),
        };

        summary
    }
}
