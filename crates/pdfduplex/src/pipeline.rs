//! The duplex merge pipeline.
//!
//! Every stage is a method of [`Pipeline`] and can be called on its own.
//! [`Pipeline::run`] composes them in a fixed order:
//!
//! ```text
//! resolve → load → validate → (rotate) → merge → write → archive
//! ```
//!
//! A page count mismatch stops the run before anything is written. Archive
//! failures are reported but do not fail the run.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::archive::{ArchiveReport, ArchivedFile, Archiver};
use crate::config::{Config, OverwriteMode, Side};
use crate::error::{DuplexError, Result};
use crate::io::{self, PdfWriter, ScanPair, ScanReader, WriteOptions, WriteStatistics};
use crate::merge::{DuplexMerger, MergeResult, PageRotator};
use crate::naming::output_file_name;
use crate::output::{self as display, OutputFormatter};
use crate::validation::{PageCountCheck, Validator, check_page_counts};

/// What happened to the requested rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RotationOutcome {
    /// Every page of `side` was rotated.
    Applied {
        /// The rotated scan.
        side: Side,
        /// Normalised angle that was added.
        degrees: u16,
        /// Number of pages changed.
        pages: usize,
    },
    /// The request was invalid and nothing was rotated.
    Skipped {
        /// Why the rotation was skipped.
        reason: String,
    },
}

/// One input as seen by the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    /// Resolved path.
    pub path: PathBuf,
    /// Page count.
    pub pages: usize,
}

/// How the run ended.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RunOutcome {
    /// The merged document was written.
    Merged {
        /// Path of the merged document.
        output: PathBuf,
        /// Pages in the merged document.
        pages: usize,
        /// Size of the merged document in bytes.
        bytes: u64,
        /// Archive results, `None` when archiving is disabled.
        archive: Option<ArchiveReport>,
    },
    /// Nothing was written.
    DryRun {
        /// Where the merged document would be written.
        output: PathBuf,
        /// Pages it would have.
        pages: usize,
        /// Where each input would be archived, empty when archiving is disabled.
        plan: Vec<ArchivedFile>,
    },
}

/// Summary of a completed run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// The front scan.
    pub front: InputReport,
    /// The back scan.
    pub back: InputReport,
    /// Result of the page count gate.
    pub page_check: PageCountCheck,
    /// Rotation result, `None` when no rotation was requested.
    pub rotation: Option<RotationOutcome>,
    /// How the run ended.
    pub outcome: RunOutcome,
}

impl RunReport {
    /// Whether the run left some input outside the archive.
    pub fn has_archive_failures(&self) -> bool {
        matches!(
            &self.outcome,
            RunOutcome::Merged { archive: Some(report), .. } if !report.is_complete()
        )
    }
}

/// Drives one duplex merge run.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    formatter: OutputFormatter,
    timestamp: DateTime<Local>,
    reader: ScanReader,
    validator: Validator,
    rotator: PageRotator,
    merger: DuplexMerger,
}

impl Pipeline {
    /// Create a pipeline for `config`, stamped with the current local time.
    pub fn new(config: Config) -> Self {
        let formatter = OutputFormatter::from_config(&config);
        Self {
            config,
            formatter,
            timestamp: Local::now(),
            reader: ScanReader::new(),
            validator: Validator::new(),
            rotator: PageRotator::new(),
            merger: DuplexMerger::new(),
        }
    }

    /// Replace the output formatter.
    pub fn with_formatter(mut self, formatter: OutputFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Fix the run timestamp used for output and archive names.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Where the merged document is written.
    pub fn output_path(&self) -> PathBuf {
        match &self.config.output {
            Some(path) => self.config.resolve(path),
            None => self
                .config
                .working_dir
                .join(output_file_name(&self.timestamp)),
        }
    }

    /// The archiver for this run.
    pub fn archiver(&self) -> Archiver {
        Archiver::new(self.config.archive_path(), self.timestamp.date_naive())
    }

    /// Resolve the front and back inputs and check they are readable files.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is missing, ambiguous, not a file or
    /// empty, if both resolve to the same file, or if the output path names
    /// one of them.
    pub async fn resolve_inputs(&self) -> Result<(PathBuf, PathBuf)> {
        self.validator.validate_config(&self.config).await?;

        let (front, back) =
            io::resolve_inputs(&self.config.working_dir, &self.config.front, &self.config.back)?;
        io::check_output_distinct(&self.output_path(), &[&front, &back])?;

        self.validator.validate_file(&front).await?;
        self.validator.validate_file(&back).await?;

        Ok((front, back))
    }

    /// Load both scans.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is not a readable PDF.
    pub async fn load(&self, front: &Path, back: &Path) -> Result<ScanPair> {
        self.reader.load_pair(front, back).await
    }

    /// Compare the page counts of both scans.
    pub fn validate(&self, pair: &ScanPair) -> PageCountCheck {
        check_page_counts(pair.front.page_count, pair.back.page_count)
    }

    /// Apply the configured rotation, if any.
    ///
    /// An invalid request is not an error: it yields
    /// [`RotationOutcome::Skipped`] and leaves both scans untouched.
    pub fn rotate(&self, pair: &mut ScanPair) -> Option<RotationOutcome> {
        let request = self.config.rotation.as_ref()?;

        let outcome = match request.resolve() {
            Ok((side, angle)) => {
                let scan = pair.get_mut(side);
                match self.rotator.rotate_all_pages(&mut scan.document, angle) {
                    Ok(pages) => RotationOutcome::Applied {
                        side,
                        degrees: angle.as_degrees(),
                        pages,
                    },
                    Err(e) => RotationOutcome::Skipped {
                        reason: e.to_string(),
                    },
                }
            }
            Err(e) => RotationOutcome::Skipped {
                reason: e.to_string(),
            },
        };

        Some(outcome)
    }

    /// Merge the scans.
    ///
    /// # Errors
    ///
    /// See [`DuplexMerger::merge`].
    pub async fn merge(&self, pair: ScanPair) -> Result<MergeResult> {
        self.merger.merge(pair).await
    }

    /// Fail early if the output exists and may not be replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::OutputExists`].
    pub async fn check_output(&self, path: &Path) -> Result<()> {
        if self.config.overwrite_mode == OverwriteMode::NoClobber
            && tokio::fs::symlink_metadata(path).await.is_ok()
        {
            return Err(DuplexError::output_exists(path.to_path_buf()));
        }
        Ok(())
    }

    /// Write the merged document to [`Pipeline::output_path`].
    ///
    /// # Errors
    ///
    /// See [`PdfWriter::save_with_stats`].
    pub async fn write(&self, result: MergeResult) -> Result<WriteStatistics> {
        let writer = PdfWriter::with_options(WriteOptions {
            compress: self.config.compress,
            overwrite: self.config.overwrite_mode,
            ..WriteOptions::default()
        });
        writer
            .save_with_stats(result.document, &self.output_path())
            .await
    }

    /// Move the inputs into the archive.
    pub async fn archive(&self, sources: &[PathBuf]) -> ArchiveReport {
        self.archiver().archive_all(sources).await
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. A page count mismatch is returned as
    /// [`DuplexError::PageCountMismatch`] with no output written and nothing
    /// archived. Archive failures are not errors; see
    /// [`RunReport::has_archive_failures`].
    pub async fn run(&self) -> Result<RunReport> {
        let f = &self.formatter;

        let (front_path, back_path) = self.resolve_inputs().await?;
        f.info(&format!(
            "Loading {} and {}",
            front_path.display(),
            back_path.display()
        ));

        let mut pair = self.load(&front_path, &back_path).await?;
        display::display_scans(f, &pair);

        let page_check = self.validate(&pair);
        display::display_page_check(f, &page_check);
        page_check.into_result()?;

        let rotation = self.rotate(&mut pair);
        if let Some(outcome) = &rotation {
            display::display_rotation(f, outcome);
        }

        let front = InputReport {
            path: front_path.clone(),
            pages: pair.front.page_count,
        };
        let back = InputReport {
            path: back_path.clone(),
            pages: pair.back.page_count,
        };

        let output = self.output_path();
        self.check_output(&output).await?;

        if self.config.dry_run {
            let archiver = self.archiver();
            let plan: Vec<ArchivedFile> = if self.config.archive {
                [&front_path, &back_path]
                    .into_iter()
                    .map(|source| ArchivedFile {
                        source: source.clone(),
                        destination: archiver.destination_for(source),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let outcome = RunOutcome::DryRun {
                output,
                pages: page_check.total_pages(),
                plan,
            };
            display::display_outcome(f, &outcome);

            return Ok(RunReport {
                front,
                back,
                page_check,
                rotation,
                outcome,
            });
        }

        let result = self.merge(pair).await?;
        display::display_merge(f, &result.statistics);

        let pages = result.statistics.total_pages;
        let write_stats = self.write(result).await?;
        display::display_write(f, &write_stats);

        let archive = if self.config.archive {
            let report = self.archive(&[front_path, back_path]).await;
            display::display_archive_report(f, &report);
            Some(report)
        } else {
            f.debug("Archiving disabled");
            None
        };

        let outcome = RunOutcome::Merged {
            output: write_stats.output_path,
            pages,
            bytes: write_stats.file_size,
            archive,
        };
        display::display_outcome(f, &outcome);

        Ok(RunReport {
            front,
            back,
            page_check,
            rotation,
            outcome,
        })
    }
}
