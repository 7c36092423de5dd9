//! Error types for pdfduplex.
//!
//! Every fallible operation in the crate returns [`DuplexError`]. Errors are
//! grouped by how the pipeline treats them:
//!
//! - **Load errors**: missing, ambiguous or unreadable inputs. Fatal.
//! - **Precondition errors**: front and back page counts differ. Fatal,
//!   raised before anything is written.
//! - **Rotation errors**: invalid target or angle. Recoverable, the
//!   rotation is skipped and the merge continues.
//! - **Write errors**: the output cannot be created. Fatal.
//! - **Archive errors**: an input cannot be moved after a successful merge.
//!   Recoverable, reported per file.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfduplex operations.
pub type Result<T> = std::result::Result<T, DuplexError>;

/// Main error type for pdfduplex operations.
#[derive(Debug, thiserror::Error)]
pub enum DuplexError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file exists but its metadata cannot be read.
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An input pattern matched no file in the working directory.
    #[error("No input matches '{pattern}' in {}", .dir.display())]
    InputNotFound {
        /// The pattern that was resolved.
        pattern: String,
        /// Directory the pattern was resolved against.
        dir: PathBuf,
    },

    /// An input pattern matched more than one file.
    #[error(
        "Input pattern '{pattern}' is ambiguous, it matches {} files: {}\n  \
         Hint: pass the exact file name with --front/--back",
        .matches.len(),
        display_paths(.matches)
    )]
    AmbiguousInput {
        /// The pattern that was resolved.
        pattern: String,
        /// Every file the pattern matched.
        matches: Vec<PathBuf>,
    },

    /// Front and back resolve to the same file.
    #[error("Front and back inputs are the same file: {}", .path.display())]
    SameInput {
        /// The shared path.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", .path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Front and back scans have different page counts.
    #[error(
        "Front scan has {front} page(s) but back scan has {back} page(s)\n  \
         Hint: rescan the batch, the sides must have the same number of pages"
    )]
    PageCountMismatch {
        /// Pages in the front scan.
        front: usize,
        /// Pages in the back scan.
        back: usize,
    },

    /// Rotation target is neither front nor back.
    #[error("Invalid rotation target '{value}'. Use 'front'/'odd' or 'back'/'even'")]
    InvalidTarget {
        /// The rejected selector.
        value: String,
    },

    /// Rotation angle is not a multiple of 90 degrees.
    #[error("Invalid rotation angle {degrees}. Must be a multiple of 90")]
    InvalidAngle {
        /// The rejected angle.
        degrees: i64,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or --output to choose a different path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Archive destination already exists.
    #[error("Archive destination already exists: {}", .destination.display())]
    ArchiveCollision {
        /// Input that was not moved.
        source_path: PathBuf,
        /// The occupied destination.
        destination: PathBuf,
    },

    /// Moving an input into the archive failed.
    #[error(
        "Failed to archive {} to {}\n  Reason: {source}",
        .source_path.display(),
        .destination.display()
    )]
    FailedToArchive {
        /// Input that was not moved.
        source_path: PathBuf,
        /// Intended destination.
        destination: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<lopdf::Error> for DuplexError {
    fn from(err: lopdf::Error) -> Self {
        Self::merge_failed(err.to_string())
    }
}

impl DuplexError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if the pipeline can continue after this error.
    ///
    /// Rotation and archive errors are reported and skipped; everything else
    /// stops the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidTarget { .. }
                | Self::InvalidAngle { .. }
                | Self::ArchiveCollision { .. }
                | Self::FailedToArchive { .. }
        )
    }

    /// Check if this error must stop all processing before any output exists.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PageCountMismatch { .. }
                | Self::InputNotFound { .. }
                | Self::AmbiguousInput { .. }
                | Self::SameInput { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::NotAFile { .. }
            | Self::FileNotAccessible { .. }
            | Self::InputNotFound { .. }
            | Self::AmbiguousInput { .. } => 2,
            Self::FailedToLoadPdf { .. } | Self::CorruptedPdf { .. } | Self::EncryptedPdf { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. }
            | Self::FailedToWrite { .. }
            | Self::ArchiveCollision { .. }
            | Self::FailedToArchive { .. }
            | Self::Io { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::PageCountMismatch { .. } => 7,
            Self::SameInput { .. }
            | Self::InvalidTarget { .. }
            | Self::InvalidAngle { .. }
            | Self::InvalidConfig { .. }
            | Self::Other { .. } => 1,
        }
    }
}
