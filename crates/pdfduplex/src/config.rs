//! Configuration for a duplex merge run.
//!
//! The CLI turns its arguments into a [`Config`]; the library never reads
//! ambient state on its own. Defaults match the file names a typical
//! scan-to-folder workflow produces:
//!
//! - front scans: `PRT_FRONT_*.pdf`
//! - back scans: `PRT_BACK_*.pdf`
//! - archive directory: `archive`

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DuplexError, Result};

/// Default pattern for the front-side (odd page) scan.
pub const DEFAULT_FRONT_PATTERN: &str = "PRT_FRONT_*.pdf";

/// Default pattern for the back-side (even page) scan.
pub const DEFAULT_BACK_PATTERN: &str = "PRT_BACK_*.pdf";

/// Default archive directory, relative to the working directory.
pub const DEFAULT_ARCHIVE_DIR: &str = "archive";

/// Which of the two scans an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Front-side scan, holding the odd pages in forward order.
    Front,
    /// Back-side scan, holding the even pages in reverse order.
    Back,
}

impl FromStr for Side {
    type Err = DuplexError;

    /// Parse a side selector.
    ///
    /// Accepts `front`/`odd` and `back`/`even`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "front" | "odd" => Ok(Self::Front),
            "back" | "even" => Ok(Self::Back),
            _ => Err(DuplexError::InvalidTarget {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Page rotation in degrees, normalised to `0`, `90`, `180` or `270`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Angle(u16);

impl Angle {
    /// No rotation.
    pub const ZERO: Angle = Angle(0);

    /// Parse an angle from degrees.
    ///
    /// Any multiple of 90 is accepted; the value is reduced modulo 360 so
    /// `-90` and `450` become `270` and `90`.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::InvalidAngle`] if `degrees` is not a multiple
    /// of 90.
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(DuplexError::InvalidAngle { degrees });
        }
        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        self.0
    }

    /// Rotation equivalent to applying `self` and then `other`.
    pub fn then(self, other: Angle) -> Angle {
        Angle((self.0 + other.0) % 360)
    }

    /// Whether this angle leaves pages unchanged.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// A requested rotation, kept unparsed until the rotate stage.
///
/// An invalid target or angle does not abort the run: the rotate stage
/// reports it and the merge continues without rotating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationRequest {
    /// Side selector as given by the user.
    pub target: String,
    /// Angle in degrees as given by the user.
    pub degrees: i64,
}

impl RotationRequest {
    /// Create a rotation request.
    pub fn new(target: impl Into<String>, degrees: i64) -> Self {
        Self {
            target: target.into(),
            degrees,
        }
    }

    /// Resolve the request into a side and a normalised angle.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::InvalidTarget`] or [`DuplexError::InvalidAngle`].
    pub fn resolve(&self) -> Result<(Side, Angle)> {
        let side = Side::from_str(&self.target)?;
        let angle = Angle::from_degrees(self.degrees)?;
        Ok((side, angle))
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Never overwrite, error if file exists (default).
    #[default]
    NoClobber,
    /// Always overwrite.
    Force,
}

/// Complete configuration for a duplex merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory inputs are resolved in and output is written to.
    pub working_dir: PathBuf,

    /// File name or glob pattern of the front-side scan.
    pub front: String,

    /// File name or glob pattern of the back-side scan.
    pub back: String,

    /// Explicit output path. `None` generates `merged_<timestamp>.pdf`.
    pub output: Option<PathBuf>,

    /// Archive directory, relative to `working_dir` unless absolute.
    pub archive_dir: PathBuf,

    /// Move the inputs into the archive after a successful merge.
    pub archive: bool,

    /// Optional rotation applied to one side before merging.
    pub rotation: Option<RotationRequest>,

    /// Compress object streams in the output.
    pub compress: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,
}

impl Config {
    /// Create a configuration with default names rooted at `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            front: DEFAULT_FRONT_PATTERN.to_string(),
            back: DEFAULT_BACK_PATTERN.to_string(),
            output: None,
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            archive: true,
            rotation: None,
            compress: true,
            overwrite_mode: OverwriteMode::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::InvalidConfig`] if:
    /// - Verbose and quiet modes are both enabled
    /// - A front or back pattern is empty
    /// - Front and back patterns are identical
    /// - The archive directory is empty
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(DuplexError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.front.trim().is_empty() || self.back.trim().is_empty() {
            return Err(DuplexError::invalid_config(
                "Front and back input names must not be empty",
            ));
        }

        if self.front == self.back {
            return Err(DuplexError::invalid_config(format!(
                "Front and back inputs must differ, both are '{}'",
                self.front
            )));
        }

        if self.archive_dir.as_os_str().is_empty() {
            return Err(DuplexError::invalid_config(
                "Archive directory must not be empty",
            ));
        }

        Ok(())
    }

    /// Archive directory resolved against the working directory.
    pub fn archive_path(&self) -> PathBuf {
        self.resolve(&self.archive_dir)
    }

    /// Resolve `path` against the working directory unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}
