//! Page-level operations.
//!
//! This module handles:
//! - Resolving inheritable page attributes through the page tree
//! - Copying inherited attributes onto the pages themselves
//! - Page rotation

use lopdf::{Document, Object, ObjectId};

use crate::config::Angle;
use crate::error::{DuplexError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
pub const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `/Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Look up `key` on the page or the nearest ancestor that defines it.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// Follow a single level of indirection.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Copy every inherited attribute onto the pages that rely on it.
///
/// After this, a page keeps its appearance when moved under a different
/// parent node.
///
/// # Errors
///
/// Returns an error if a page is not a dictionary.
pub fn materialize_inherited(doc: &mut Document) -> Result<()> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for page_id in page_ids {
        let missing: Vec<(&[u8], Object)> = INHERITABLE_ATTRIBUTES
            .iter()
            .filter(|key| {
                doc.get_dictionary(page_id)
                    .map(|dict| !dict.has(key))
                    .unwrap_or(false)
            })
            .filter_map(|key| inherited_attribute(doc, page_id, key).map(|value| (*key, value)))
            .collect();

        if missing.is_empty() {
            continue;
        }

        let dict = doc.get_dictionary_mut(page_id).map_err(|e| {
            DuplexError::merge_failed(format!("Page {page_id:?} is not a dictionary: {e}"))
        })?;
        for (key, value) in missing {
            dict.set(key, value);
        }
    }

    Ok(())
}

/// Applies rotations to the pages of a document.
#[derive(Debug, Clone, Default)]
pub struct PageRotator;

impl PageRotator {
    /// Create a new page rotator.
    pub fn new() -> Self {
        Self
    }

    /// The rotation a viewer applies to a page, own or inherited.
    pub fn effective_rotation(&self, doc: &Document, page_id: ObjectId) -> i64 {
        inherited_attribute(doc, page_id, b"Rotate")
            .as_ref()
            .and_then(|value| resolve(doc, value))
            .and_then(|value| value.as_i64().ok())
            .unwrap_or(0)
    }

    /// Rotate all pages in a document by `angle`.
    ///
    /// Returns the number of pages rotated.
    ///
    /// # Errors
    ///
    /// Returns an error if page rotation fails.
    pub fn rotate_all_pages(&self, doc: &mut Document, angle: Angle) -> Result<usize> {
        if angle.is_zero() {
            return Ok(0);
        }

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &page_ids {
            self.rotate_page(doc, page_id, angle)?;
        }

        log::debug!("rotated {} page(s) by {angle}", page_ids.len());
        Ok(page_ids.len())
    }

    /// Rotate a single page.
    ///
    /// The new value is written on the page itself, so it no longer depends
    /// on the page tree.
    pub fn rotate_page(&self, doc: &mut Document, page_id: ObjectId, angle: Angle) -> Result<()> {
        let current = self.effective_rotation(doc, page_id);
        let rotated = (current + i64::from(angle.as_degrees())).rem_euclid(360);

        let dict = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| DuplexError::merge_failed(format!("Failed to get page: {e}")))?;
        dict.set("Rotate", Object::Integer(rotated));

        Ok(())
    }
}
