//! Loading of the two scan batches.
//!
//! Parsing is CPU-bound, so each load runs on tokio's blocking pool and is
//! awaited before the next one starts. The two scans are always loaded
//! front first, then back.
//!
//! # Examples
//!
//! ```no_run
//! use pdfduplex::io::reader::ScanReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = ScanReader::new();
//! let pair = reader
//!     .load_pair(Path::new("PRT_FRONT_000975.pdf"), Path::new("PRT_BACK_000995.pdf"))
//!     .await?;
//! println!("{} + {} pages", pair.front.page_count, pair.back.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::Side;
use crate::error::{DuplexError, Result};

/// A loaded scan with metadata.
#[derive(Debug)]
pub struct LoadedScan {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedScan {
    /// Wrap an already parsed document.
    pub fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// The front and back scans of one duplex batch.
#[derive(Debug)]
pub struct ScanPair {
    /// Front-side scan (odd pages, forward order).
    pub front: LoadedScan,
    /// Back-side scan (even pages, reverse order).
    pub back: LoadedScan,
}

impl ScanPair {
    /// Borrow the scan for `side`.
    pub fn get(&self, side: Side) -> &LoadedScan {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    /// Mutably borrow the scan for `side`.
    pub fn get_mut(&mut self, side: Side) -> &mut LoadedScan {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }

    /// Source paths, front first.
    pub fn paths(&self) -> [PathBuf; 2] {
        [self.front.path.clone(), self.back.path.clone()]
    }

    /// Combined size of both input files.
    pub fn input_size(&self) -> u64 {
        self.front.file_size + self.back.file_size
    }
}

/// Reader for scan batches.
#[derive(Debug, Clone, Default)]
pub struct ScanReader;

impl ScanReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single scan.
    ///
    /// A document without pages is accepted; whether an empty batch can be
    /// merged is decided by the page count check.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    pub async fn load(&self, path: &Path) -> Result<LoadedScan> {
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || {
            let start = Instant::now();

            let doc = Document::load(&path_buf).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    DuplexError::encrypted_pdf(path_buf.clone())
                } else {
                    DuplexError::failed_to_load_pdf(path_buf.clone(), err_msg)
                }
            })?;

            let scan = LoadedScan::new(doc, path_buf, start.elapsed());
            log::debug!(
                "loaded {} ({} pages, {} bytes) in {:?}",
                scan.path.display(),
                scan.page_count,
                scan.file_size,
                scan.load_time
            );
            Ok(scan)
        })
        .await
        .map_err(|e| DuplexError::other(format!("Load task failed: {e}")))?
    }

    /// Load both scans, front first.
    ///
    /// # Errors
    ///
    /// Returns the first load error; the back scan is not read if the front
    /// one fails.
    pub async fn load_pair(&self, front: &Path, back: &Path) -> Result<ScanPair> {
        let front = self.load(front).await?;
        let back = self.load(back).await?;
        Ok(ScanPair { front, back })
    }
}
