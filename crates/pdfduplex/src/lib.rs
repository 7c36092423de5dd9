//! pdfduplex - Merge duplex scan batches into one document.
//!
//! A sheet-fed scanner without a duplexer scans a stack twice: once for the
//! front sides, in reading order, and once for the back sides after the
//! stack is flipped, which yields them in reverse. This library interleaves
//! the two scans back into reading order:
//!
//! ```text
//! front = [F1, F2, F3]    back = [B1, B2, B3]
//! merged = [F1, B3, F2, B2, F3, B1]
//! ```
//!
//! The merge only runs when both scans have the same number of pages. After
//! a successful write the inputs are moved into a dated archive.
//!
//! # Examples
//!
//! ## Full run
//!
//! ```no_run
//! use pdfduplex::{Config, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("/home/me/scans");
//! let report = Pipeline::new(config).run().await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Individual stages
//!
//! ```no_run
//! use pdfduplex::{Config, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(Config::new("."));
//! let (front, back) = pipeline.resolve_inputs().await?;
//! let pair = pipeline.load(&front, &back).await?;
//!
//! let check = pipeline.validate(&pair);
//! if check.proceed() {
//!     let merged = pipeline.merge(pair).await?;
//!     pipeline.write(merged).await?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod archive;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{DuplexError, Result};
pub use pipeline::{Pipeline, RunOutcome, RunReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
