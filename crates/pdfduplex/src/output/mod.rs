//! Output formatting and display for pdfduplex.
//!
//! This module handles all user-facing output:
//! - Formatted status messages ([`OutputFormatter`])
//! - One status line per pipeline stage
//! - Per-file archive errors
//! - The final summary, with statistics in verbose mode

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter, Verbosity};

use crate::archive::ArchiveReport;
use crate::io::{ScanPair, WriteStatistics};
use crate::merge::MergeStatistics;
use crate::pipeline::{RotationOutcome, RunOutcome};
use crate::utils::format_file_size;
use crate::validation::PageCountCheck;

/// Display the loaded scans.
pub fn display_scans(formatter: &OutputFormatter, pair: &ScanPair) {
    for (label, scan) in [("Front", &pair.front), ("Back", &pair.back)] {
        formatter.detail(
            label,
            &format!(
                "{} ({} pages, {}, loaded in {:.2}s)",
                scan.path.display(),
                scan.page_count,
                format_file_size(scan.file_size),
                scan.load_time.as_secs_f64()
            ),
        );
    }
}

/// Display the page count gate.
pub fn display_page_check(formatter: &OutputFormatter, check: &PageCountCheck) {
    if check.proceed() {
        formatter.success(&check.to_string());
    } else {
        formatter.error(&check.to_string());
    }
}

/// Display the rotation result.
pub fn display_rotation(formatter: &OutputFormatter, outcome: &RotationOutcome) {
    match outcome {
        RotationOutcome::Applied {
            side,
            degrees,
            pages,
        } => formatter.info(&format!(
            "Rotated {pages} {side} page(s) by {degrees} degrees"
        )),
        RotationOutcome::Skipped { reason } => {
            formatter.warning(&format!("Rotation skipped: {reason}"));
        }
    }
}

/// Display merge statistics.
pub fn display_merge(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.info(&format!(
        "Merged {} + {} pages into {} in {:.2}s",
        stats.front_pages,
        stats.back_pages,
        stats.total_pages,
        stats.merge_time.as_secs_f64()
    ));
    formatter.detail("Input size", &stats.format_input_size());
}

/// Display write statistics.
pub fn display_write(formatter: &OutputFormatter, stats: &WriteStatistics) {
    formatter.success(&format!(
        "Wrote {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));
    formatter.detail(
        "Write time",
        &format!("{:.2}s", stats.write_time.as_secs_f64()),
    );
    formatter.detail("Compression", if stats.compressed { "Yes" } else { "No" });
}

/// Display archive results, one warning per failed file.
pub fn display_archive_report(formatter: &OutputFormatter, report: &ArchiveReport) {
    for archived in &report.archived {
        formatter.debug(&format!(
            "{} -> {}",
            archived.source.display(),
            archived.destination.display()
        ));
    }

    for failure in &report.failures {
        formatter.warning(&format!(
            "Could not archive {}: {}",
            failure.source.display(),
            failure.error
        ));
    }

    if report.is_complete() {
        formatter.success(&format!("Archived {} input(s)", report.archived.len()));
    } else {
        formatter.warning(&format!(
            "Archived {} of {} input(s); the merged document is unaffected",
            report.archived.len(),
            report.archived.len() + report.failures.len()
        ));
    }
}

/// Display the final outcome of a run.
pub fn display_outcome(formatter: &OutputFormatter, outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Merged { output, pages, .. } => {
            formatter.blank_line();
            formatter.success(&format!("Created {} with {pages} page(s)", output.display()));
        }
        RunOutcome::DryRun {
            output,
            pages,
            plan,
        } => {
            formatter.blank_line();
            formatter.success("Dry run completed successfully");
            formatter.info(&format!(
                "  Output would be: {} ({pages} page(s))",
                output.display()
            ));
            for (index, entry) in plan.iter().enumerate() {
                formatter.list_item(
                    index + 1,
                    &format!(
                        "{} would be archived as {}",
                        entry.source.display(),
                        entry.destination.display()
                    ),
                );
            }
            formatter.info("  Run without --dry-run to create the merged PDF");
        }
    }
}
