//! CLI argument parsing for pdfduplex.
//!
//! This module defines the command-line interface using `clap`. It is also
//! compiled by the build script to render the man page, so it only refers
//! to the library by its crate name.

use clap::Parser;
use std::path::{Path, PathBuf};

use pdfduplex::config::{
    Config, DEFAULT_ARCHIVE_DIR, DEFAULT_BACK_PATTERN, DEFAULT_FRONT_PATTERN, OverwriteMode,
    RotationRequest,
};
use pdfduplex::error::Result;

/// Merge front-side and back-side scan batches into one duplex document.
///
/// A scanner without a duplexer produces two files for a double-sided stack:
/// the front sides in reading order and the back sides in reverse order.
/// pdfduplex interleaves them back into reading order, writes
/// merged_YYYYMMDD_HHMM.pdf and moves both inputs into a dated archive.
#[derive(Parser, Debug)]
#[command(name = "pdfduplex")]
#[command(version)]
#[command(about = "Merge front-side and back-side scan batches into one duplex document")]
#[command(author)]
pub struct Cli {
    /// Front-side scan (odd pages), file name or glob pattern
    ///
    /// Resolved in the working directory. A pattern must match exactly
    /// one file.
    #[arg(long, value_name = "PATTERN", env = "PDFDUPLEX_FRONT")]
    #[arg(default_value = DEFAULT_FRONT_PATTERN)]
    pub front: String,

    /// Back-side scan (even pages, reverse order), file name or glob pattern
    #[arg(long, value_name = "PATTERN", env = "PDFDUPLEX_BACK")]
    #[arg(default_value = DEFAULT_BACK_PATTERN)]
    pub back: String,

    /// Working directory holding the scans [default: current directory]
    #[arg(short = 'C', long, value_name = "DIR", env = "PDFDUPLEX_DIR")]
    pub dir: Option<PathBuf>,

    /// Output file [default: merged_YYYYMMDD_HHMM.pdf]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Archive directory, relative to the working directory
    #[arg(long, value_name = "DIR", env = "PDFDUPLEX_ARCHIVE_DIR")]
    #[arg(default_value = DEFAULT_ARCHIVE_DIR)]
    pub archive_dir: PathBuf,

    /// Leave the inputs in place after merging
    #[arg(long)]
    pub no_archive: bool,

    /// Rotate one side by DEGREES (a multiple of 90) before merging
    ///
    /// An invalid angle or side is reported and the merge continues
    /// without rotation.
    #[arg(long, value_name = "DEGREES", allow_hyphen_values = true)]
    pub rotate: Option<i64>,

    /// Side to rotate: front/odd or back/even
    #[arg(long, value_name = "SIDE", default_value = "back")]
    pub rotate_target: String,

    /// Write the output without compressing object streams
    #[arg(long)]
    pub no_compress: bool,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,

    /// Dry run - validate the scans and show the plan without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show per-stage details and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// A relative `--dir` is resolved against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config(&self, cwd: &Path) -> Result<Config> {
        let working_dir = match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };

        let mut config = Config::new(working_dir);
        config.front = self.front.clone();
        config.back = self.back.clone();
        config.output = self.output.clone();
        config.archive_dir = self.archive_dir.clone();
        config.archive = !self.no_archive;
        config.rotation = self
            .rotate
            .map(|degrees| RotationRequest::new(self.rotate_target.clone(), degrees));
        config.compress = !self.no_compress;
        config.overwrite_mode = if self.force {
            OverwriteMode::Force
        } else {
            OverwriteMode::NoClobber
        };
        config.dry_run = self.dry_run;
        config.verbose = self.verbose && !self.json;
        config.quiet = self.quiet || self.json;

        config.validate()?;
        Ok(config)
    }
}
