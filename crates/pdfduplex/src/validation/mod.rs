//! Input validation for pdfduplex.
//!
//! Two kinds of checks run before anything is merged:
//! - per-file checks on the resolved inputs (exists, regular file, non-empty)
//! - the page count gate: front and back must have the same number of pages
//!
//! The page count gate is the only precondition of the merge. When it fails
//! the run stops with no output written and nothing archived.
//!
//! # Examples
//!
//! ```
//! use pdfduplex::validation::check_page_counts;
//!
//! let check = check_page_counts(3, 3);
//! assert!(check.proceed());
//! assert!(!check_page_counts(4, 5).proceed());
//! ```

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{DuplexError, Result};
use crate::utils::format_file_size;

/// Outcome of comparing the page counts of both scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCountCheck {
    /// Pages in the front scan.
    pub front: usize,
    /// Pages in the back scan.
    pub back: usize,
}

impl PageCountCheck {
    /// Whether the merge may proceed.
    pub fn proceed(&self) -> bool {
        self.front == self.back
    }

    /// Pages the merged document will have.
    pub fn total_pages(&self) -> usize {
        self.front + self.back
    }

    /// Convert a failed check into an error.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::PageCountMismatch`] if the counts differ.
    pub fn into_result(self) -> Result<Self> {
        if self.proceed() {
            Ok(self)
        } else {
            Err(DuplexError::PageCountMismatch {
                front: self.front,
                back: self.back,
            })
        }
    }
}

impl fmt::Display for PageCountCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.proceed() {
            write!(
                f,
                "Front and back page counts are equal ({}): executing merge",
                self.front
            )
        } else {
            write!(
                f,
                "Front and back page counts are not equal ({} vs {}): aborting",
                self.front, self.back
            )
        }
    }
}

/// Compare the page counts of the front and back scans.
pub fn check_page_counts(front: usize, back: usize) -> PageCountCheck {
    PageCountCheck { front, back }
}

/// Result of validating a single input file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCheck {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Size of the file in bytes.
    pub file_size: u64,
}

impl FileCheck {
    /// Format the file size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Validator for input files and configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a single input file before it is parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist
    /// - Path is not a regular file
    /// - File metadata cannot be read
    /// - File is empty
    pub async fn validate_file(&self, path: &Path) -> Result<FileCheck> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DuplexError::file_not_found(path.to_path_buf()));
            }
            Err(e) => {
                return Err(DuplexError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        if !metadata.is_file() {
            return Err(DuplexError::not_a_file(path.to_path_buf()));
        }

        if metadata.len() == 0 {
            return Err(DuplexError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        Ok(FileCheck {
            path: path.to_path_buf(),
            file_size: metadata.len(),
        })
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::validate`] fails or the working
    /// directory is not a directory.
    pub async fn validate_config(&self, config: &Config) -> Result<()> {
        config.validate()?;

        match tokio::fs::metadata(&config.working_dir).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(DuplexError::invalid_config(format!(
                "Working directory is not a directory: {}",
                config.working_dir.display()
            ))),
            Err(e) => Err(DuplexError::FileNotAccessible {
                path: config.working_dir.clone(),
                source: e,
            }),
        }
    }
}
