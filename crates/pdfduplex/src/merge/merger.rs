//! Document-level duplex merge.
//!
//! The back document's objects are renumbered past the front document's and
//! moved into it. The root page tree is then rebuilt with the pages in
//! interleaved order. Page dictionaries are re-parented, never copied.

use lopdf::{Document, Object, ObjectId};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{DuplexError, Result};
use crate::io::ScanPair;
use crate::merge::interleave::interleave_reversed;
use crate::merge::pages::{INHERITABLE_ATTRIBUTES, materialize_inherited};
use crate::utils::format_file_size;
use crate::validation::check_page_counts;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Pages taken from the front scan.
    pub front_pages: usize,

    /// Pages taken from the back scan.
    pub back_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of the merged scans, front first.
    pub sources: [PathBuf; 2],
}

/// Merges a front and a back scan into one document.
#[derive(Debug, Clone, Default)]
pub struct DuplexMerger;

impl DuplexMerger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge a loaded scan pair.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The page counts differ ([`DuplexError::PageCountMismatch`])
    /// - The page tree of either scan is malformed
    /// - The result does not have exactly twice as many pages as each scan
    pub async fn merge(&self, pair: ScanPair) -> Result<MergeResult> {
        let input_size = pair.input_size();
        let sources = pair.paths();
        let ScanPair { front, back } = pair;
        let front_pages = front.page_count;
        let back_pages = back.page_count;

        let (document, merge_time) = task::spawn_blocking(move || {
            let start = Instant::now();
            let merged = merge_documents(front.document, back.document)?;
            Ok::<_, DuplexError>((merged, start.elapsed()))
        })
        .await
        .map_err(|e| DuplexError::other(format!("Merge task failed: {e}")))??;

        let statistics = MergeStatistics {
            total_pages: document.get_pages().len(),
            front_pages,
            back_pages,
            merge_time,
            input_size,
        };

        log::debug!(
            "merged {front_pages} + {back_pages} pages in {:?}",
            statistics.merge_time
        );

        Ok(MergeResult {
            document,
            statistics,
            sources,
        })
    }
}

/// Merge `back` into `front` in interleave-with-reversal order.
///
/// # Errors
///
/// See [`DuplexMerger::merge`].
pub fn merge_documents(mut front: Document, mut back: Document) -> Result<Document> {
    let front_count = front.get_pages().len();
    let back_count = back.get_pages().len();
    check_page_counts(front_count, back_count).into_result()?;

    materialize_inherited(&mut front)?;
    materialize_inherited(&mut back)?;

    back.renumber_objects_with(front.max_id + 1);
    front.max_id = front.max_id.max(back.max_id);

    let front_ids: Vec<ObjectId> = front.get_pages().into_values().collect();
    let back_ids: Vec<ObjectId> = back.get_pages().into_values().collect();
    let order = interleave_reversed(&front_ids, &back_ids)?;

    front.objects.extend(back.objects);

    let pages_id = front
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| DuplexError::merge_failed(format!("Failed to get pages reference: {e}")))?;

    for &page_id in &order {
        front
            .get_dictionary_mut(page_id)
            .map_err(|e| DuplexError::merge_failed(format!("Failed to get page: {e}")))?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = front
        .get_dictionary_mut(pages_id)
        .map_err(|e| DuplexError::merge_failed(format!("Failed to get pages object: {e}")))?;
    pages_dict.set(
        "Kids",
        order
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<Object>>(),
    );
    pages_dict.set("Count", Object::Integer(order.len() as i64));
    // Pages now carry their own copies; leaving these would leak front
    // attributes onto back pages.
    for key in INHERITABLE_ATTRIBUTES {
        pages_dict.remove(key);
    }

    let pruned = front.prune_objects();
    log::debug!("pruned {} orphaned object(s)", pruned.len());
    front.renumber_objects();

    let total = front.get_pages().len();
    if total != front_count * 2 {
        return Err(DuplexError::merge_failed(format!(
            "Merged document has {total} pages, expected {}",
            front_count * 2
        )));
    }

    Ok(front)
}
