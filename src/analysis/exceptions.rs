//! First thrown exception in analysis logs.

use crate::models::{ExceptionSite, ExceptionSummary};

pub const THROW_MARKER: &str = "Throw exception";

/// The `context_lines` lines following the first `Throw exception` line.
pub fn find_exception(content: &str, context_lines: usize) -> Option<Vec<String>> {
    let mut lines = content.lines();
    lines.by_ref().find(|line| line.contains(THROW_MARKER))?;
    Some(lines.take(context_lines).map(str::to_string).collect())
}

#[derive(Debug, Default)]
pub struct ExceptionCollector {
    summary: ExceptionSummary,
}

impl ExceptionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: &str, context: Option<Vec<String>>) {
        self.summary.files += 1;
        if let Some(context) = context {
            self.summary.sites.push(ExceptionSite {
                file: file.to_string(),
                context,
            });
        }
    }

    pub fn finish(self, folder: String) -> ExceptionSummary {
        ExceptionSummary {
            folder,
            ..self.summary
        }
    }
}
