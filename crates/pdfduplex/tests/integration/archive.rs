//! Integration tests for archiving after a merge.

use pdfduplex::{DuplexError, RunOutcome};

use crate::common::{BACK_NAME, FRONT_NAME, ScanDir, labels};

#[tokio::test]
async fn test_collision_keeps_output_and_inputs() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1", "B2"]);
    std::fs::create_dir(scans.join("archive")).unwrap();
    std::fs::write(scans.archived(FRONT_NAME), b"earlier batch").unwrap();

    let report = scans.pipeline(scans.config()).run().await.unwrap();

    assert!(report.has_archive_failures());
    assert_eq!(labels(&scans.output()), vec!["F1", "B2", "F2", "B1"]);

    assert_eq!(
        std::fs::read(scans.archived(FRONT_NAME)).unwrap(),
        b"earlier batch"
    );
    assert!(scans.join(FRONT_NAME).exists());
    assert!(!scans.join(BACK_NAME).exists());
    assert!(scans.archived(BACK_NAME).exists());

    match report.outcome {
        RunOutcome::Merged {
            archive: Some(archive),
            ..
        } => {
            assert_eq!(archive.failures.len(), 1);
            assert!(matches!(
                archive.failures[0].error,
                DuplexError::ArchiveCollision { .. }
            ));
            assert!(archive.failures[0].error.is_recoverable());
        }
        other => panic!("expected a merged outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unusable_archive_dir_does_not_touch_output() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);
    std::fs::write(scans.join("archive"), b"a file, not a directory").unwrap();

    let report = scans.pipeline(scans.config()).run().await.unwrap();

    assert!(report.has_archive_failures());
    assert_eq!(labels(&scans.output()), vec!["F1", "B1"]);
    assert!(scans.join(FRONT_NAME).exists());
    assert!(scans.join(BACK_NAME).exists());
}

#[tokio::test]
async fn test_custom_archive_dir() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);

    let mut config = scans.config();
    config.archive_dir = "done/2025".into();
    scans.pipeline(config).run().await.unwrap();

    assert!(
        scans
            .join("done/2025")
            .join(format!("2025-01-03_{FRONT_NAME}"))
            .exists()
    );
}

#[tokio::test]
async fn test_archive_stage_alone() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);
    let pipeline = scans.pipeline(scans.config());

    let report = pipeline
        .archive(&[scans.join(FRONT_NAME), scans.join(BACK_NAME)])
        .await;

    assert!(report.is_complete());
    assert_eq!(report.archived[0].destination, scans.archived(FRONT_NAME));
}
