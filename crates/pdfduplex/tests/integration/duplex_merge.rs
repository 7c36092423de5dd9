//! Integration tests for the full duplex merge.

use pdfduplex::RunOutcome;

use crate::common::{BACK_NAME, FRONT_NAME, OUTPUT_NAME, ScanDir, labels, pdf_files};

#[tokio::test]
async fn test_three_sheet_batch() {
    let scans = ScanDir::with_scans(&["F1", "F2", "F3"], &["B1", "B2", "B3"]);

    let report = scans.pipeline(scans.config()).run().await.unwrap();

    assert_eq!(
        labels(&scans.output()),
        vec!["F1", "B3", "F2", "B2", "F3", "B1"]
    );
    assert_eq!(report.front.pages, 3);
    assert_eq!(report.back.pages, 3);
    assert!(report.page_check.proceed());
    assert!(report.rotation.is_none());

    match report.outcome {
        RunOutcome::Merged {
            output,
            pages,
            bytes,
            archive,
        } => {
            assert_eq!(output, scans.output());
            assert_eq!(pages, 6);
            assert!(bytes > 0);
            assert!(archive.unwrap().is_complete());
        }
        other => panic!("expected a merged outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_inputs_are_archived_after_merge() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1", "B2"]);

    scans.pipeline(scans.config()).run().await.unwrap();

    assert_eq!(pdf_files(scans.path()), vec![OUTPUT_NAME]);
    assert_eq!(labels(&scans.archived(FRONT_NAME)), vec!["F1", "F2"]);
    assert_eq!(labels(&scans.archived(BACK_NAME)), vec!["B1", "B2"]);
}

#[tokio::test]
async fn test_empty_batch_writes_empty_document() {
    let scans = ScanDir::with_scans(&[], &[]);

    let report = scans.pipeline(scans.config()).run().await.unwrap();

    assert!(scans.output().exists());
    assert!(labels(&scans.output()).is_empty());
    assert!(matches!(report.outcome, RunOutcome::Merged { pages: 0, .. }));
}

#[tokio::test]
async fn test_explicit_output_and_no_archive() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);

    let mut config = scans.config();
    config.output = Some("book.pdf".into());
    config.archive = false;
    config.compress = false;
    let report = scans.pipeline(config).run().await.unwrap();

    assert_eq!(labels(&scans.join("book.pdf")), vec!["F1", "B1"]);
    assert!(scans.join(FRONT_NAME).exists());
    assert!(scans.join(BACK_NAME).exists());
    assert!(!scans.join("archive").exists());
    assert!(matches!(
        report.outcome,
        RunOutcome::Merged { archive: None, .. }
    ));
}

#[tokio::test]
async fn test_literal_input_names() {
    let scans = ScanDir::new();
    scans.write("odd.pdf", &["F1", "F2"]);
    scans.write("even.pdf", &["B1", "B2"]);

    let mut config = scans.config();
    config.front = "odd.pdf".to_string();
    config.back = "even.pdf".to_string();
    scans.pipeline(config).run().await.unwrap();

    assert_eq!(labels(&scans.output()), vec!["F1", "B2", "F2", "B1"]);
    assert!(scans.archived("odd.pdf").exists());
}

#[tokio::test]
async fn test_force_replaces_existing_output() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);
    std::fs::write(scans.output(), b"earlier").unwrap();

    let mut config = scans.config();
    config.overwrite_mode = pdfduplex::config::OverwriteMode::Force;
    scans.pipeline(config).run().await.unwrap();

    assert_eq!(labels(&scans.output()), vec!["F1", "B1"]);
}
