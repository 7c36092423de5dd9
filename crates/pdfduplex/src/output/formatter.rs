//! Message formatting and display.
//!
//! Status lines go to stdout, warnings and errors to stderr, so a run with
//! `--json` keeps stdout machine-readable.
//!
//! # Examples
//!
//! ```
//! use pdfduplex::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Validating scans...");
//! formatter.success("Merge completed");
//! formatter.warning("Rotation skipped");
//! ```

use std::io::{self, IsTerminal};

use crate::config::Config;

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }

    /// Whether this level is written to stderr.
    pub fn is_diagnostic(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// How much the formatter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    Quiet,
    /// Status lines, warnings and errors.
    #[default]
    Normal,
    /// Everything, including details and debug lines.
    Verbose,
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    color_stdout: bool,
    color_stderr: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// `quiet` wins over `verbose`.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Self::with_verbosity(verbosity)
    }

    /// Create a formatter with an explicit verbosity.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        let has_term = std::env::var_os("TERM").is_some();
        Self {
            verbosity,
            color_stdout: has_term && io::stdout().is_terminal(),
            color_stderr: has_term && io::stderr().is_terminal(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::with_verbosity(Verbosity::Quiet)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::with_verbosity(Verbosity::Verbose)
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if self.should_print() {
            self.emit(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if self.should_print() {
            self.emit(MessageLevel::Success, message);
        }
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.is_verbose() {
            self.emit(MessageLevel::Debug, message);
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if self.should_print() {
            println!("\n{title}");
        }
    }

    /// Print a labelled value. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    /// Print a list item. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if self.should_print() {
            println!("  {index}. {message}");
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if self.should_print() {
            println!();
        }
    }

    /// Render a message the way it is printed, without colour.
    pub fn format_plain(level: MessageLevel, message: &str) -> String {
        format!("{}{message}", level.prefix())
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        let colored = if level.is_diagnostic() {
            self.color_stderr
        } else {
            self.color_stdout
        };

        let line = if colored && !level.color().is_empty() {
            format!("{}{}\x1b[0m", level.color(), Self::format_plain(level, message))
        } else {
            Self::format_plain(level, message)
        };

        if level.is_diagnostic() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Whether status output is shown.
    pub fn should_print(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::with_verbosity(Verbosity::Normal)
    }
}
