//! Scan fixtures shared by the unit tests.
//!
//! Every generated page carries a `/Label` string so tests can follow a page
//! through the merge. The `MediaBox` lives on the `Pages` node, so each page
//! only has it by inheritance.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::{Path, PathBuf};

pub(crate) fn build_scan(labels: &[&str]) -> Document {
    build_scan_with_rotation(labels, None)
}

/// Like [`build_scan`], with `/Rotate` set on the root `Pages` node.
pub(crate) fn build_scan_with_rotation(labels: &[&str], inherited: Option<i64>) -> Document {
    let mut doc = Document::with_version("1.5");

    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for label in labels {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Label" => Object::string_literal(*label),
        };
        page_ids.push(doc.add_object(page));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<Object>>(),
        "Count" => labels.len() as i64,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    if let Some(degrees) = inherited {
        pages_dict.set("Rotate", degrees);
    }

    let catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    doc.objects.insert(pages_id, pages_dict.into());
    doc.objects.insert(catalog_id, catalog.into());
    doc.trailer.set("Root", catalog_id);

    doc
}

pub(crate) fn write_scan(dir: &Path, name: &str, labels: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut doc = build_scan(labels);
    doc.save(&path).unwrap();
    path
}

/// Page labels in document order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|id| match doc.get_dictionary(*id).unwrap().get(b"Label") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        })
        .collect()
}

/// The `/Rotate` value stored directly on a page, if any.
pub(crate) fn own_rotation(doc: &Document, page_id: ObjectId) -> Option<i64> {
    doc.get_dictionary(page_id)
        .ok()?
        .get(b"Rotate")
        .ok()?
        .as_i64()
        .ok()
}
