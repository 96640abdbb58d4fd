//! Integration tests for disease detection storage.
//!
//! Tests cover:
//! - Saving detections and reading them back newest first
//! - Filtering by disease name (case-insensitive) and limiting
//! - Constraint enforcement on confidence

mod common;

use common::*;

#[tokio::test]
async fn test_empty_database_has_no_detections() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let detections = db.get_disease_detections(None, 10).await?;
    assert_eq!(detections.len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_save_detection() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let record = db
        .save_disease_detection(&make_new_detection("Potato", "Late Blight", 91))
        .await?;

    assert!(record.id > 0);
    assert_eq!(record.crop_type, "Potato");
    assert_eq!(record.disease_name, "Late Blight");
    assert_eq!(record.confidence, 91);
    assert_eq!(record.severity, "High");
    assert_eq!(record.image_filename.as_deref(), Some("leaf.png"));
    assert!(!record.created_at.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_detections_newest_first() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let first = db.save_disease_detection(&make_new_detection("Potato", "Early Blight", 80)).await?;
    let second = db.save_disease_detection(&make_new_detection("Tomato", "Fusarium Wilt", 75)).await?;
    let third = db.save_disease_detection(&make_new_detection("Potato", "Healthy Leaf", 88)).await?;

    let detections = db.get_disease_detections(None, 10).await?;
    let ids: Vec<i64> = detections.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    Ok(())
}

#[tokio::test]
async fn test_detections_filter_and_limit() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    for _ in 0..3 {
        db.save_disease_detection(&make_new_detection("Potato", "Early Blight", 80)).await?;
    }
    db.save_disease_detection(&make_new_detection("Potato", "Late Blight", 90)).await?;

    let early = db.get_disease_detections(Some("early blight"), 10).await?;
    assert_eq!(early.len(), 3);
    assert!(early.iter().all(|d| d.disease_name == "Early Blight"));

    let limited = db.get_disease_detections(None, 2).await?;
    assert_eq!(limited.len(), 2);

    let none = db.get_disease_detections(Some("Septoria Leaf Spot"), 10).await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_detection_without_filename() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;
    let mut detection = make_new_detection("Tomato", "Healthy Leaf", 90);
    detection.image_filename = None;

    let record = db.save_disease_detection(&detection).await?;
    assert_eq!(record.image_filename, None);
    Ok(())
}

#[tokio::test]
async fn test_confidence_above_100_is_rejected() -> anyhow::Result<()> {
    let (db, _temp_dir) = create_test_db().await;

    let result = db
        .save_disease_detection(&make_new_detection("Potato", "Early Blight", 101))
        .await;

    assert!(result.is_err(), "Should reject confidence above 100");
    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("CHECK constraint failed"), "Unexpected error: {error_msg}");
    Ok(())
}

#[tokio::test]
async fn test_reopen_keeps_detections() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("reopen.db");

    let db = AgriDb::new(&path).await?;
    db.save_disease_detection(&make_new_detection("Potato", "Bacterial Wilt", 82)).await?;
    db.close().await?;

    let db = AgriDb::new(&path).await?;
    let detections = db.get_disease_detections(None, 10).await?;
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].disease_name, "Bacterial Wilt");
    Ok(())
}
