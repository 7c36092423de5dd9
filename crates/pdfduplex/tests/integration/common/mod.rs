//! Shared helpers for the integration tests.
//!
//! Scans are generated with lopdf; every page carries a `/Label` string so a
//! test can read back the order of the merged document.

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};
use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pdfduplex::output::OutputFormatter;
use pdfduplex::{Config, Pipeline};

pub const FRONT_NAME: &str = "PRT_FRONT_000975.pdf";
pub const BACK_NAME: &str = "PRT_BACK_000995.pdf";

/// Output name for [`run_timestamp`].
pub const OUTPUT_NAME: &str = "merged_20250103_0915.pdf";

/// Archive prefix for [`run_timestamp`].
pub const ARCHIVE_PREFIX: &str = "2025-01-03_";

pub fn run_timestamp() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 3, 9, 15, 0).unwrap()
}

/// A temporary scan folder.
pub struct ScanDir {
    dir: TempDir,
}

impl ScanDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// A folder holding a front and a back scan under the default names.
    pub fn with_scans(front: &[&str], back: &[&str]) -> Self {
        let scans = Self::new();
        scans.write(FRONT_NAME, front);
        scans.write(BACK_NAME, back);
        scans
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, labels: &[&str]) -> PathBuf {
        let path = self.join(name);
        build_scan(labels).save(&path).expect("Failed to write scan");
        path
    }

    pub fn config(&self) -> Config {
        Config::new(self.path())
    }

    pub fn pipeline(&self, config: Config) -> Pipeline {
        Pipeline::new(config)
            .with_formatter(OutputFormatter::quiet())
            .with_timestamp(run_timestamp())
    }

    pub fn output(&self) -> PathBuf {
        self.join(OUTPUT_NAME)
    }

    pub fn archived(&self, name: &str) -> PathBuf {
        self.join("archive").join(format!("{ARCHIVE_PREFIX}{name}"))
    }
}

pub fn build_scan(labels: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Label" => Object::string_literal(*label),
            })
            .into()
        })
        .collect();

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => labels.len() as i64,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    let catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    doc.objects.insert(pages_id, pages.into());
    doc.objects.insert(catalog_id, catalog.into());
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Page labels of the PDF at `path`, in document order.
pub fn labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|id| match doc.get_dictionary(*id).unwrap().get(b"Label") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        })
        .collect()
}

/// `/Rotate` of every page of the PDF at `path`, 0 when absent.
pub fn rotations(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|id| {
            doc.get_dictionary(*id)
                .unwrap()
                .get(b"Rotate")
                .and_then(Object::as_i64)
                .unwrap_or(0)
        })
        .collect()
}

/// Names of the PDF files directly in `dir`, sorted.
pub fn pdf_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .filter(|name| name.ends_with(".pdf"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
