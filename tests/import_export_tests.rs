mod common;

use std::fs;

use chrono::NaiveDate;

use points_core::PointsError;

#[test]
fn export_then_import_replaces_the_roster() {
    let base = common::setup_base();
    let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();

    let mut source = common::open_manager(&base);
    source.ensure_today(today, today).unwrap();
    source.set_target("220").unwrap();
    source.create_account("Side").unwrap();
    let export_path = base.join("export.json");
    source.export(&export_path).expect("export snapshot");

    let other_base = common::setup_base();
    let mut other = common::open_manager(&other_base);
    other.create_account("Scratch").unwrap();

    let count = other.import(&export_path).expect("import snapshot");
    assert_eq!(count, 2);
    assert_eq!(other.roster().len(), 2);
    assert_eq!(other.current().name, "Default");
    let default = other.current();
    assert_eq!(default.target_points.raw(), "220");
    assert_eq!(default.points_history.len(), 15);
}

#[test]
fn legacy_snapshots_with_numeric_ids_import_cleanly() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);

    let path = base.join("legacy.json");
    fs::write(
        &path,
        r#"[
            {
                "id": 1712345678901,
                "name": "Main",
                "pointsHistory": [
                    {"date": "2025/08/08", "points": 16, "cumulativePoints": 16}
                ],
                "targetPoints": "220"
            }
        ]"#,
    )
    .unwrap();

    manager.import(&path).expect("legacy import");
    assert_eq!(manager.current().id, "1712345678901");
    assert_eq!(manager.status().total_points, 16);
}

#[test]
fn malformed_payloads_are_rejected_without_touching_the_roster() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);
    let before = manager.roster().clone();

    let not_array = base.join("object.json");
    fs::write(&not_array, r#"{"id": "1"}"#).unwrap();
    assert!(matches!(
        manager.import(&not_array),
        Err(PointsError::InvalidInput(_))
    ));

    let missing_name = base.join("missing.json");
    fs::write(&missing_name, r#"[{"id": "1", "pointsHistory": []}]"#).unwrap();
    assert!(matches!(
        manager.import(&missing_name),
        Err(PointsError::InvalidInput(_))
    ));

    let empty = base.join("empty.json");
    fs::write(&empty, "[]").unwrap();
    assert!(matches!(
        manager.import(&empty),
        Err(PointsError::InvalidInput(_))
    ));

    assert_eq!(manager.roster(), &before);
}
