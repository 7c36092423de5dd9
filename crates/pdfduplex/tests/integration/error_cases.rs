//! Integration tests for input errors.

use pdfduplex::DuplexError;

use crate::common::{BACK_NAME, FRONT_NAME, ScanDir, labels};

#[tokio::test]
async fn test_missing_front_scan() {
    let scans = ScanDir::new();
    scans.write(BACK_NAME, &["B1"]);

    let err = scans.pipeline(scans.config()).run().await.unwrap_err();

    assert!(matches!(err, DuplexError::InputNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_two_front_scans_are_ambiguous() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);
    scans.write("PRT_FRONT_000976.pdf", &["F1"]);

    let err = scans.pipeline(scans.config()).run().await.unwrap_err();

    match err {
        DuplexError::AmbiguousInput { ref matches, .. } => assert_eq!(matches.len(), 2),
        other => panic!("expected AmbiguousInput, got {other:?}"),
    }
    assert!(!scans.output().exists());
}

#[tokio::test]
async fn test_not_a_pdf() {
    let scans = ScanDir::new();
    scans.write(BACK_NAME, &["B1"]);
    std::fs::write(scans.join(FRONT_NAME), b"this is not a pdf").unwrap();

    let err = scans.pipeline(scans.config()).run().await.unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!scans.output().exists());
}

#[tokio::test]
async fn test_empty_file() {
    let scans = ScanDir::new();
    scans.write(BACK_NAME, &["B1"]);
    std::fs::write(scans.join(FRONT_NAME), b"").unwrap();

    let err = scans.pipeline(scans.config()).run().await.unwrap_err();

    assert!(matches!(err, DuplexError::CorruptedPdf { .. }));
}

#[tokio::test]
async fn test_missing_working_dir() {
    let scans = ScanDir::new();
    let config = pdfduplex::Config::new(scans.join("missing"));

    let err = scans.pipeline(config).run().await.unwrap_err();

    assert!(matches!(err, DuplexError::FileNotAccessible { .. }));
}

#[tokio::test]
async fn test_output_naming_an_input_is_refused() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1", "B2"]);

    let mut config = scans.config();
    config.output = Some(FRONT_NAME.into());
    config.overwrite_mode = pdfduplex::config::OverwriteMode::Force;
    let err = scans.pipeline(config).run().await.unwrap_err();

    assert!(matches!(err, DuplexError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), 1);

    assert_eq!(labels(&scans.join(FRONT_NAME)), vec!["F1", "F2"]);
    assert_eq!(labels(&scans.join(BACK_NAME)), vec!["B1", "B2"]);
    assert!(!scans.join("archive").exists());
}
