//! Report file discovery.
//!
//! Lists the files directly under a folder whose name ends with a given
//! extension. The listing is not recursive and is sorted by file name so
//! repeated runs see the same order on every platform.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for file scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Case-sensitive file name suffix, e.g. ".txt".
    pub extension: String,
}

impl ScanConfig {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

/// A report file found in the scanned folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    /// File name, relative to the scanned folder.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
}

/// Scanner for report files in a single folder.
pub struct FileScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl FileScanner {
    /// Create a new file scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the matching files, sorted by name.
    pub fn scan(&self) -> Result<Vec<ReportFile>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to list {}", self.root.display()))?;
            let name = entry.file_name().to_string_lossy().to_string();

            if !self.matches(&name) {
                continue;
            }

            // Follows symlinks, unlike `entry.file_type()`.
            let path = entry.path();
            if !path.is_file() {
                debug!("Skipping non-file entry {}", path.display());
                continue;
            }

            let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            files.push(ReportFile {
                name,
                path: path.to_path_buf(),
                size,
            });
        }

        Ok(files)
    }

    /// Read a whole report into memory.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the
    /// markers we look for are plain ASCII.
    pub fn read(&self, file: &ReportFile) -> Result<String> {
        let bytes = fs::read(&file.path)
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Check if a file name matches the extension filter.
    pub fn matches(&self, name: &str) -> bool {
        name.ends_with(&self.config.extension)
    }
}
