//! Duplex merge operations.
//!
//! This module provides:
//! - The pure interleave-with-reversal law ([`interleave_reversed`])
//! - Page attribute inheritance and rotation ([`pages`])
//! - The document-level merge ([`DuplexMerger`])
//!
//! # Examples
//!
//! ```no_run
//! use pdfduplex::io::ScanReader;
//! use pdfduplex::merge::DuplexMerger;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = ScanReader::new()
//!     .load_pair(Path::new("PRT_FRONT_000975.pdf"), Path::new("PRT_BACK_000995.pdf"))
//!     .await?;
//! let result = DuplexMerger::new().merge(pair).await?;
//! println!("Merged {} pages", result.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod interleave;
pub mod merger;
pub mod pages;

pub use interleave::interleave_reversed;
pub use merger::{DuplexMerger, MergeResult, MergeStatistics, merge_documents};
pub use pages::{PageRotator, materialize_inherited};
