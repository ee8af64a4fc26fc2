//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.scopestats.toml` files. Marker tables are fixed in code; only the
//! file filters and the generated-code name patterns are configurable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".scopestats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extension filters per report kind.
    #[serde(default)]
    pub scan: ScanSettings,

    /// Savings grouping settings.
    #[serde(default)]
    pub savings: SavingsConfig,

    /// Class name filters shared by the passthrough and SARIF reports.
    #[serde(default)]
    pub filters: FilterConfig,

    /// Exception finder settings.
    #[serde(default)]
    pub exceptions: ExceptionsConfig,
}

/// File name suffixes selecting the reports of each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_txt")]
    pub traces_extension: String,

    #[serde(default = "default_txt")]
    pub mappings_extension: String,

    #[serde(default = "default_txt")]
    pub savings_extension: String,

    #[serde(default = "default_passthrough")]
    pub passthrough_extension: String,

    #[serde(default = "default_sarif")]
    pub classes_extension: String,

    #[serde(default = "default_log")]
    pub exceptions_extension: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            traces_extension: default_txt(),
            mappings_extension: default_txt(),
            savings_extension: default_txt(),
            passthrough_extension: default_passthrough(),
            classes_extension: default_sarif(),
            exceptions_extension: default_log(),
        }
    }
}

fn default_txt() -> String {
    ".txt".to_string()
}

fn default_passthrough() -> String {
    ".passthrough".to_string()
}

fn default_sarif() -> String {
    ".sarif".to_string()
}

fn default_log() -> String {
    ".log".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsConfig {
    /// Assemblies with this suffix hold generated code and are never
    /// counted as redundant.
    #[serde(default = "default_generated_suffix")]
    pub generated_suffix: String,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            generated_suffix: default_generated_suffix(),
        }
    }
}

fn default_generated_suffix() -> String {
    crate::analysis::savings::DEFAULT_GENERATED_SUFFIX.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Class names containing any of these belong to compiler generated
    /// operators and are left out of per-class statistics.
    #[serde(default = "default_generated_prefixes")]
    pub generated_prefixes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            generated_prefixes: default_generated_prefixes(),
        }
    }
}

pub fn default_generated_prefixes() -> Vec<String> {
    vec![
        "ScopeFilterTransformer_",
        "ScopeTransformer_",
        "ScopeGrouper_",
        "ScopeProcessorCrossApplyExpressionWrapper",
        "ScopeReducer_",
        "ScopeRuntime.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionsConfig {
    /// Lines captured after a thrown exception.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for ExceptionsConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
        }
    }
}

fn default_context_lines() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Apply CLI overrides. `--ext` replaces the extension of the report
    /// kind being run; `--context-lines` replaces the exception context.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        use crate::cli::Command;

        if let Some(ref ext) = args.ext {
            let target = match &args.command {
                Some(Command::Traces(_)) => &mut self.scan.traces_extension,
                Some(Command::Mappings(_)) => &mut self.scan.mappings_extension,
                Some(Command::Savings(_)) => &mut self.scan.savings_extension,
                Some(Command::Passthrough(_)) => &mut self.scan.passthrough_extension,
                Some(Command::Classes(_)) => &mut self.scan.classes_extension,
                Some(Command::Exceptions(_)) => &mut self.scan.exceptions_extension,
                None => return,
            };
            *target = ext.clone();
        }

        if let Some(Command::Exceptions(ref folder)) = args.command {
            if let Some(lines) = folder.context_lines {
                self.exceptions.context_lines = lines;
            }
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.traces_extension, ".txt");
        assert_eq!(config.scan.passthrough_extension, ".passthrough");
        assert_eq!(config.savings.generated_suffix, "__ScopeCodeGen__.dll");
        assert!(config
            .filters
            .generated_prefixes
            .contains(&"ScopeReducer_".to_string()));
        assert_eq!(config.exceptions.context_lines, 5);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[scan]
traces_extension = ".trace"

[savings]
generated_suffix = ".gen.dll"

[filters]
generated_prefixes = ["Auto_"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.scan.traces_extension, ".trace");
        assert_eq!(config.scan.mappings_extension, ".txt");
        assert_eq!(config.savings.generated_suffix, ".gen.dll");
        assert_eq!(config.filters.generated_prefixes, vec!["Auto_"]);
        assert_eq!(config.exceptions.context_lines, 5);
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[scan]"));
        assert!(toml_str.contains("[savings]"));
        assert!(toml_str.contains("[filters]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scan\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
