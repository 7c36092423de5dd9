//! I/O operations for pdfduplex.
//!
//! This module handles all file I/O:
//! - Resolving the front and back inputs in the working directory
//! - Loading the scans from disk
//! - Writing the merged document
//!
//! # Examples
//!
//! ```no_run
//! use pdfduplex::io::{resolve_inputs, ScanReader};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (front, back) = resolve_inputs(Path::new("."), "PRT_FRONT_*.pdf", "PRT_BACK_*.pdf")?;
//! let pair = ScanReader::new().load_pair(&front, &back).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedScan, ScanPair, ScanReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use std::path::{Path, PathBuf};

use crate::error::{DuplexError, Result};
use crate::utils::is_glob_pattern;

/// Resolve one input name against `dir`.
///
/// A plain file name must exist. A glob pattern must match exactly one
/// regular file; scanners number their batches, so the default patterns
/// stand in for the counter.
///
/// # Errors
///
/// Returns an error if:
/// - A plain name does not exist ([`DuplexError::FileNotFound`])
/// - A pattern matches nothing ([`DuplexError::InputNotFound`])
/// - A pattern matches several files ([`DuplexError::AmbiguousInput`])
/// - The pattern is malformed ([`DuplexError::InvalidConfig`])
pub fn resolve_input(dir: &Path, name: &str) -> Result<PathBuf> {
    if !is_glob_pattern(name) {
        let path = dir.join(name);
        if !path.exists() {
            return Err(DuplexError::file_not_found(path));
        }
        return Ok(path);
    }

    let pattern = if Path::new(name).is_absolute() {
        name.to_string()
    } else {
        let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
        Path::new(&escaped_dir).join(name).to_string_lossy().into_owned()
    };

    let entries = glob::glob(&pattern).map_err(|e| {
        DuplexError::invalid_config(format!("Invalid input pattern '{name}': {e}"))
    })?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("skipping unreadable entry while resolving '{name}': {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    matches.sort();

    log::debug!("'{name}' matched {} file(s) in {}", matches.len(), dir.display());

    match matches.len() {
        0 => Err(DuplexError::InputNotFound {
            pattern: name.to_string(),
            dir: dir.to_path_buf(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(DuplexError::AmbiguousInput {
            pattern: name.to_string(),
            matches,
        }),
    }
}

/// Resolve the front and back inputs, rejecting a pair that names one file
/// twice.
///
/// # Errors
///
/// Any error of [`resolve_input`], or [`DuplexError::SameInput`].
pub fn resolve_inputs(dir: &Path, front: &str, back: &str) -> Result<(PathBuf, PathBuf)> {
    let front = resolve_input(dir, front)?;
    let back = resolve_input(dir, back)?;

    if same_file(&front, &back) {
        return Err(DuplexError::SameInput { path: front });
    }

    Ok((front, back))
}

/// Reject an output path that names one of the inputs.
///
/// # Errors
///
/// Returns [`DuplexError::InvalidConfig`] if `output` is the same file as
/// any of `inputs`.
pub fn check_output_distinct(output: &Path, inputs: &[&Path]) -> Result<()> {
    match inputs.iter().find(|input| same_file(output, input)) {
        Some(input) => Err(DuplexError::invalid_config(format!(
            "Output {} would overwrite the input {}",
            output.display(),
            input.display()
        ))),
        None => Ok(()),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
