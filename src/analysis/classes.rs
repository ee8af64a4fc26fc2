//! Analyzed processor classes in SARIF result files.

use crate::models::ClassSummary;

const ID_KEY: &str = "\"id\"";
const SUMMARY_ID: &str = "\"id\": \"Summary\"";
const SINGLE_COLUMN: &str = "\"SingleColumn\"";
const PROCESS_METHOD: &str = "|Process";

/// Count the result ids that name a user `Process` method.
///
/// Summary results and lines carrying the quoted `"SingleColumn"` token
/// are skipped, as are results for classes whose name contains one of
/// `generated_prefixes`.
pub fn count_classes(content: &str, generated_prefixes: &[String]) -> usize {
    content
        .lines()
        .filter(|line| line.contains(ID_KEY))
        .filter(|line| !line.contains(SUMMARY_ID) && !line.contains(SINGLE_COLUMN))
        .filter(|line| !generated_prefixes.iter().any(|p| line.contains(p.as_str())))
        .filter(|line| line.contains(PROCESS_METHOD))
        .count()
}

#[derive(Debug, Default)]
pub struct ClassCounter {
    summary: ClassSummary,
}

impl ClassCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, classes: usize) {
        self.summary.files += 1;
        self.summary.classes += classes;
    }

    pub fn finish(self, folder: String) -> ClassSummary {
        ClassSummary {
            folder,
            ..self.summary
        }
    }
}
