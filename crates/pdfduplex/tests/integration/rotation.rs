//! Integration tests for the optional rotation step.

use pdfduplex::config::{RotationRequest, Side};
use pdfduplex::pipeline::RotationOutcome;

use crate::common::{ScanDir, labels, rotations};

#[tokio::test]
async fn test_rotate_back_side() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1", "B2"]);

    let mut config = scans.config();
    config.rotation = Some(RotationRequest::new("back", 180));
    let report = scans.pipeline(config).run().await.unwrap();

    assert_eq!(
        report.rotation,
        Some(RotationOutcome::Applied {
            side: Side::Back,
            degrees: 180,
            pages: 2,
        })
    );
    assert_eq!(labels(&scans.output()), vec!["F1", "B2", "F2", "B1"]);
    assert_eq!(rotations(&scans.output()), vec![0, 180, 0, 180]);
}

#[tokio::test]
async fn test_rotate_front_side_with_alias() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);

    let mut config = scans.config();
    config.rotation = Some(RotationRequest::new("ODD", 450));
    scans.pipeline(config).run().await.unwrap();

    assert_eq!(rotations(&scans.output()), vec![90, 0]);
}

#[tokio::test]
async fn test_invalid_target_skips_rotation_and_merges() {
    let scans = ScanDir::with_scans(&["F1", "F2"], &["B1", "B2"]);

    let mut config = scans.config();
    config.rotation = Some(RotationRequest::new("both", 180));
    let report = scans.pipeline(config).run().await.unwrap();

    assert!(matches!(
        report.rotation,
        Some(RotationOutcome::Skipped { .. })
    ));
    assert_eq!(labels(&scans.output()), vec!["F1", "B2", "F2", "B1"]);
    assert_eq!(rotations(&scans.output()), vec![0, 0, 0, 0]);
}

#[tokio::test]
async fn test_invalid_angle_skips_rotation_and_merges() {
    let scans = ScanDir::with_scans(&["F1"], &["B1"]);

    let mut config = scans.config();
    config.rotation = Some(RotationRequest::new("back", 45));
    let report = scans.pipeline(config).run().await.unwrap();

    match report.rotation {
        Some(RotationOutcome::Skipped { reason }) => assert!(reason.contains("45")),
        other => panic!("expected skipped rotation, got {other:?}"),
    }
    assert!(scans.output().exists());
}
