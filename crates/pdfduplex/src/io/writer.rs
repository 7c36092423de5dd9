//! Writing of the merged document.
//!
//! Writes go to a temporary sibling file that is renamed over the target
//! once fully flushed, so an interrupted run never leaves a truncated
//! `merged_*.pdf` behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfduplex::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("merged_20250103_0915.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::OverwriteMode;
use crate::error::{DuplexError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress the PDF before writing.
    pub compress: bool,

    /// What to do when the target already exists.
    pub overwrite: OverwriteMode,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            overwrite: OverwriteMode::NoClobber,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        crate::utils::format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// See [`PdfWriter::save_with_stats`].
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document is consumed; it is not needed once serialised.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target exists and overwriting is not allowed
    /// - The file cannot be created (missing directory, permissions)
    /// - Serialisation or flushing fails
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        if self.options.overwrite == OverwriteMode::NoClobber && self.exists(path).await {
            return Err(DuplexError::output_exists(path.to_path_buf()));
        }

        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc;

        task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc.compress();
            }

            let write_path = if options.atomic {
                path_buf.with_extension("tmp")
            } else {
                path_buf.clone()
            };

            write_new_file(&write_path, options.buffer_size, |writer| {
                doc.save_to(writer)
                    .map(|_| ())
                    .map_err(|e| DuplexError::FailedToWrite {
                        path: write_path.clone(),
                        source: std::io::Error::other(e),
                    })
            })?;

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    let _ = std::fs::remove_file(&write_path);
                    DuplexError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);
            log::debug!("wrote {} ({file_size} bytes)", path_buf.display());

            Ok::<_, DuplexError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
                compressed: options.compress,
            })
        })
        .await
        .map_err(|e| DuplexError::other(format!("Write task failed: {e}")))?
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

/// Create `path`, fill it through `fill` and flush it.
///
/// A file that was created but could not be completely written is removed.
fn write_new_file<F>(path: &Path, buffer_size: usize, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path).map_err(|e| DuplexError::FailedToCreateOutput {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::with_capacity(buffer_size, file);

    let result = fill(&mut writer).and_then(|()| {
        writer.flush().map_err(|e| DuplexError::FailedToWrite {
            path: path.to_path_buf(),
            source: e,
        })
    });
    drop(writer);

    if result.is_err() {
        log::debug!("removing incomplete {}", path.display());
        let _ = std::fs::remove_file(path);
    }
    result
}
