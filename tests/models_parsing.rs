//! Dataset parsing: standing exports stringify numbers inconsistently, so
//! the models accept either encoding.

use f1_standings_viz::models::{Dataset, Mode, StandingRecord};

#[test]
fn record_parses_stringified_numbers() {
    let json = r#"{
        "season": 2021,
        "round": "5",
        "position": "3",
        "points": "25.5",
        "driver": "Hamilton",
        "driver_id": "hamilton"
    }"#;
    let r: StandingRecord = serde_json::from_str(json).unwrap();
    assert_eq!(r.round, 5);
    assert_eq!(r.position, 3);
    assert_eq!(r.points, 25.5);
    assert_eq!(r.driver.as_deref(), Some("Hamilton"));
}

#[test]
fn record_parses_plain_numbers() {
    let json = r#"{"season": 2021, "round": 5, "position": 3, "points": 25.5}"#;
    let r: StandingRecord = serde_json::from_str(json).unwrap();
    assert_eq!(r.round, 5);
    assert_eq!(r.points, 25.5);
    assert!(r.driver.is_none());
}

#[test]
fn negative_rank_is_rejected() {
    let json = r#"{"season": 2021, "round": -1, "position": 1, "points": 0}"#;
    assert!(serde_json::from_str::<StandingRecord>(json).is_err());
}

#[test]
fn dataset_reference_collections_default_to_empty() {
    let json = r#"{
        "driver_standings": [
            {"season": 2021, "round": "1", "position": "1", "points": "25", "driver": "A"}
        ],
        "constructor_standings": []
    }"#;
    let d: Dataset = serde_json::from_str(json).unwrap();
    assert_eq!(d.driver_standings.len(), 1);
    assert!(d.drivers.is_empty());
    assert!(d.constructors.is_empty());
}

#[test]
fn mode_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Mode::Driver).unwrap(), "\"driver\"");
    assert_eq!(
        serde_json::from_str::<Mode>("\"constructor\"").unwrap(),
        Mode::Constructor
    );
    assert!(serde_json::from_str::<Mode>("\"team\"").is_err());
}
