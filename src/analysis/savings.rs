//! Column savings grouped by processor.
//!
//! A savings trace names the analyzed assembly once and then lists one
//! `SAVINGS <processor>: ...` line per processor whose columns can be
//! trimmed. The same processor is often compiled into several
//! assemblies; every copy beyond the first that is not generated code is
//! a potential redundancy.

use crate::error::{ParseError, ParseResult};
use crate::models::{ProcessorGroup, SavingsSummary};
use std::collections::{BTreeMap, BTreeSet};

pub const ASSEMBLY_MARKER: &str = "Analyzing assembly:";
pub const SAVINGS_MARKER: &str = "SAVINGS";
pub const DEFAULT_GENERATED_SUFFIX: &str = "__ScopeCodeGen__.dll";

/// Assembly and processors read from one savings trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavingsTrace {
    pub assembly: Option<String>,
    /// Distinct processors, in order of first appearance.
    pub processors: Vec<String>,
}

pub fn scan_savings(content: &str) -> ParseResult<SavingsTrace> {
    let mut trace = SavingsTrace::default();

    for line in content.lines() {
        if let Some((_, rest)) = line.split_once(ASSEMBLY_MARKER) {
            let name = rest.trim().split('=').next().unwrap_or_default().trim();
            trace.assembly = Some(name.to_string());
        } else if let Some(rest) = line.trim().strip_prefix(SAVINGS_MARKER) {
            let processor = rest.trim().split(':').next().unwrap_or_default().trim();
            if !trace.processors.iter().any(|p| p == processor) {
                trace.processors.push(processor.to_string());
            }
        }
    }

    if trace.assembly.is_none() {
        if let Some(processor) = trace.processors.first() {
            return Err(ParseError::SavingsWithoutAssembly {
                processor: processor.clone(),
            });
        }
    }

    Ok(trace)
}

/// Builds the processor to assemblies grouping.
#[derive(Debug, Default)]
pub struct SavingsGrouper {
    files: usize,
    groups: BTreeMap<String, Vec<String>>,
}

impl SavingsGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, trace: SavingsTrace) {
        self.files += 1;
        let Some(assembly) = trace.assembly else {
            return;
        };
        for processor in trace.processors {
            self.groups
                .entry(processor)
                .or_default()
                .push(assembly.clone());
        }
    }

    /// Close the grouping. Assemblies ending in `generated_suffix` are
    /// not counted as redundant.
    pub fn finish(self, folder: String, generated_suffix: &str) -> SavingsSummary {
        let processors: Vec<ProcessorGroup> = self
            .groups
            .into_iter()
            .map(|(processor, assemblies)| {
                let handwritten: BTreeSet<&str> = assemblies
                    .iter()
                    .map(|a| a.trim())
                    .filter(|a| !a.ends_with(generated_suffix))
                    .collect();
                let redundant = handwritten.len().saturating_sub(1);
                ProcessorGroup {
                    processor,
                    assemblies,
                    redundant,
                }
            })
            .collect();

        SavingsSummary {
            folder,
            files: self.files,
            redundant: processors.iter().map(|p| p.redundant).sum(),
            processors,
        }
    }
}
