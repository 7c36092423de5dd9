//! Archiving of consumed inputs.
//!
//! After a successful write, each input is moved to
//! `<archive dir>/<YYYY-MM-DD>_<original name>`. Archiving is best effort:
//! every file is handled on its own, failures are collected rather than
//! raised, and nothing is retried or rolled back. An existing archive entry
//! is never overwritten.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::io;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

use crate::error::{DuplexError, Result};
use crate::naming::archive_file_name;

/// An input that was moved into the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedFile {
    /// Where the file was.
    pub source: PathBuf,
    /// Where it is now.
    pub destination: PathBuf,
}

/// An input that could not be archived and was left in place.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveFailure {
    /// The input that was not moved.
    pub source: PathBuf,
    /// Why it was not moved.
    #[serde(serialize_with = "serialize_error")]
    pub error: DuplexError,
}

fn serialize_error<S: Serializer>(
    error: &DuplexError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of archiving a set of inputs.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveReport {
    /// Files moved into the archive.
    pub archived: Vec<ArchivedFile>,
    /// Files left in place.
    pub failures: Vec<ArchiveFailure>,
}

impl ArchiveReport {
    /// Whether every input was archived.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Moves inputs into a dated archive.
#[derive(Debug, Clone)]
pub struct Archiver {
    archive_dir: PathBuf,
    date: NaiveDate,
}

impl Archiver {
    /// Create an archiver writing to `archive_dir`, stamping names with `date`.
    pub fn new(archive_dir: impl Into<PathBuf>, date: NaiveDate) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            date,
        }
    }

    /// Where `source` would be archived.
    pub fn destination_for(&self, source: &Path) -> PathBuf {
        self.archive_dir.join(archive_file_name(self.date, source))
    }

    /// Archive every file in `sources`.
    ///
    /// The archive directory is created if needed. If that fails, every file
    /// is reported as failed.
    pub async fn archive_all(&self, sources: &[PathBuf]) -> ArchiveReport {
        let mut report = ArchiveReport::default();

        if let Err(e) = fs::create_dir_all(&self.archive_dir).await {
            log::debug!(
                "cannot create archive directory {}: {e}",
                self.archive_dir.display()
            );
            for source in sources {
                report.failures.push(ArchiveFailure {
                    source: source.clone(),
                    error: DuplexError::FailedToArchive {
                        source_path: source.clone(),
                        destination: self.destination_for(source),
                        source: io::Error::new(e.kind(), e.to_string()),
                    },
                });
            }
            return report;
        }

        for source in sources {
            match self.archive_file(source).await {
                Ok(archived) => report.archived.push(archived),
                Err(error) => {
                    log::debug!("not archiving {}: {error}", source.display());
                    report.failures.push(ArchiveFailure {
                        source: source.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Move one file into the archive directory, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination already exists ([`DuplexError::ArchiveCollision`])
    /// - The file cannot be moved ([`DuplexError::FailedToArchive`])
    pub async fn archive_file(&self, source: &Path) -> Result<ArchivedFile> {
        let destination = self.destination_for(source);

        if let Err(e) = move_no_clobber(source, &destination).await {
            return Err(if e.kind() == io::ErrorKind::AlreadyExists {
                DuplexError::ArchiveCollision {
                    source_path: source.to_path_buf(),
                    destination,
                }
            } else {
                DuplexError::FailedToArchive {
                    source_path: source.to_path_buf(),
                    destination,
                    source: e,
                }
            });
        }

        log::debug!("archived {} to {}", source.display(), destination.display());

        Ok(ArchivedFile {
            source: source.to_path_buf(),
            destination,
        })
    }
}

/// Move `source` to `destination`, failing with `AlreadyExists` instead of
/// replacing an existing entry.
///
/// Links then unlinks the source on one filesystem, copies across devices.
async fn move_no_clobber(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::hard_link(source, destination).await {
        Ok(()) => {
            if let Err(e) = fs::remove_file(source).await {
                let _ = fs::remove_file(destination).await;
                return Err(e);
            }
            Ok(())
        }
        Err(e) if matches!(
            e.kind(),
            io::ErrorKind::CrossesDevices | io::ErrorKind::Unsupported
        ) =>
        {
            log::debug!(
                "cannot link {} into the archive ({e}), copying",
                source.display()
            );
            move_across_devices(source, destination).await
        }
        Err(e) => Err(e),
    }
}

/// Copy then remove, never replacing an existing destination.
async fn move_across_devices(source: &Path, destination: &Path) -> io::Result<()> {
    let source = source.to_path_buf();
    let destination = destination.to_path_buf();

    task::spawn_blocking(move || {
        let mut reader = std::fs::File::open(&source)?;
        let mut writer = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&destination)?;

        if let Err(e) = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all()) {
            drop(writer);
            let _ = std::fs::remove_file(&destination);
            return Err(e);
        }

        std::fs::remove_file(&source)
    })
    .await
    .map_err(io::Error::other)?
}
