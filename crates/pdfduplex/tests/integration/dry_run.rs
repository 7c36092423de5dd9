//! Integration tests for dry-run mode.

use pdfduplex::RunOutcome;

use crate::common::{BACK_NAME, FRONT_NAME, ScanDir, pdf_files};

#[tokio::test]
async fn test_dry_run_writes_and_moves_nothing() {
    let scans = ScanDir::with_scans(&["F1", "F2", "F3"], &["B1", "B2", "B3"]);

    let mut config = scans.config();
    config.dry_run = true;
    let report = scans.pipeline(config).run().await.unwrap();

    assert_eq!(pdf_files(scans.path()), vec![BACK_NAME, FRONT_NAME]);
    assert!(!scans.join("archive").exists());

    match report.outcome {
        RunOutcome::DryRun {
            output,
            pages,
            plan,
        } => {
            assert_eq!(output, scans.output());
            assert_eq!(pages, 6);
            assert_eq!(plan.len(), 2);
            assert_eq!(plan[0].source, scans.join(FRONT_NAME));
            assert_eq!(plan[0].destination, scans.archived(FRONT_NAME));
            assert_eq!(plan[1].destination, scans.archived(BACK_NAME));
        }
        other => panic!("expected a dry-run outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dry_run_without_archive_has_empty_plan() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);

    let mut config = scans.config();
    config.dry_run = true;
    config.archive = false;
    let report = scans.pipeline(config).run().await.unwrap();

    assert!(matches!(
        report.outcome,
        RunOutcome::DryRun { ref plan, .. } if plan.is_empty()
    ));
}

#[tokio::test]
async fn test_dry_run_reports_existing_output() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);
    std::fs::write(scans.output(), b"earlier").unwrap();

    let mut config = scans.config();
    config.dry_run = true;
    let result = scans.pipeline(config).run().await;

    assert!(matches!(
        result,
        Err(pdfduplex::DuplexError::OutputExists { .. })
    ));
}
