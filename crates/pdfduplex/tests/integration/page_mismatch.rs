//! Integration tests for the page count gate.

use pdfduplex::DuplexError;

use crate::common::{BACK_NAME, FRONT_NAME, ScanDir, pdf_files};

#[tokio::test]
async fn test_mismatch_writes_nothing() {
    let scans = ScanDir::with_scans(&["F1", "F2", "F3", "F4"], &["B1", "B2", "B3", "B4", "B5"]);

    let err = scans.pipeline(scans.config()).run().await.unwrap_err();

    assert!(matches!(
        err,
        DuplexError::PageCountMismatch { front: 4, back: 5 }
    ));
    assert_eq!(err.exit_code(), 7);
    assert!(err.is_fatal());

    assert!(!scans.output().exists());
    assert!(!scans.join("archive").exists());
    assert_eq!(pdf_files(scans.path()), vec![BACK_NAME, FRONT_NAME]);
}

#[tokio::test]
async fn test_validate_stage_reports_mismatch() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1"]);
    let pipeline = scans.pipeline(scans.config());

    let (front, back) = pipeline.resolve_inputs().await.unwrap();
    let pair = pipeline.load(&front, &back).await.unwrap();
    let check = pipeline.validate(&pair);

    assert!(!check.proceed());
    assert_eq!((check.front, check.back), (2, 1));
}

#[tokio::test]
async fn test_mismatch_in_dry_run_fails_too() {
    let scans = ScanDir::with_scans(&["F1"], &[]);

    let mut config = scans.config();
    config.dry_run = true;
    let result = scans.pipeline(config).run().await;

    assert!(matches!(
        result,
        Err(DuplexError::PageCountMismatch { front: 1, back: 0 })
    ));
}
