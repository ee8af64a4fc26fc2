//! Processor mapping files.
//!
//! Each line of a mapping file is `processor<TAB>plan id...`. A file is
//! reduced to the set of distinct processors it maps; sets are not merged
//! across files.

use crate::models::MappingSummary;
use std::collections::HashSet;

/// What a single mapping file contributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingFile {
    pub unique_keys: usize,
    pub empty: bool,
}

pub fn count_mappings(content: &str) -> MappingFile {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let keys: HashSet<&str> = lines
        .iter()
        .map(|line| line.split('\t').next().unwrap_or_default().trim())
        .collect();

    MappingFile {
        unique_keys: keys.len(),
        empty: lines.is_empty(),
    }
}

#[derive(Debug, Default)]
pub struct MappingAggregator {
    summary: MappingSummary,
}

impl MappingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: MappingFile) {
        self.summary.files += 1;
        self.summary.unique_mappings += file.unique_keys;
        if file.empty {
            self.summary.empty_files += 1;
        }
    }

    pub fn finish(self, folder: String) -> MappingSummary {
        MappingSummary {
            folder,
            ..self.summary
        }
    }
}
