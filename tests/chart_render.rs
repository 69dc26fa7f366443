//! Rendered-output tests: SVG content, file containers, highlight opacity.

use f1_standings_viz::{
    ChartOptions, Container, Dataset, StandingRecord, UpdateOptions, create_chart,
};

fn rec(round: u32, position: u32, driver: &str) -> StandingRecord {
    StandingRecord {
        season: 2021,
        round,
        position,
        points: (26 - position as i32) as f64,
        driver: Some(driver.into()),
        ..Default::default()
    }
}

fn sample_dataset() -> Dataset {
    Dataset {
        driver_standings: vec![
            rec(1, 1, "Verstappen"),
            rec(1, 2, "Hamilton"),
            rec(2, 2, "Verstappen"),
            rec(2, 1, "Hamilton"),
            rec(3, 1, "Verstappen"),
            rec(3, 2, "Hamilton"),
        ],
        ..Default::default()
    }
}

fn opts() -> ChartOptions {
    ChartOptions {
        transition_ms: 0,
        season: Some(2021),
        ..Default::default()
    }
}

#[test]
fn memory_container_produces_svg_primitives() {
    let _ = env_logger::builder().is_test(true).try_init();
    let chart = create_chart(Container::memory(), sample_dataset(), opts()).unwrap();
    let svg = chart.svg().unwrap();
    assert!(svg.contains("<svg"));
    // Two series lines plus axis strokes.
    assert!(svg.contains("<polyline"));
    // Point markers.
    assert!(svg.contains("<circle"));
    // Tick labels, end-of-line labels, and legend text.
    assert!(svg.contains("Verstappen"));
    assert!(svg.contains("Hamilton"));
}

#[test]
fn file_container_writes_and_destroy_removes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("standings.svg");

    let mut chart =
        create_chart(Container::file(&path), sample_dataset(), opts()).unwrap();
    let first_len = std::fs::metadata(&path).expect("frame written").len();
    assert!(first_len > 0);

    chart
        .update(UpdateOptions {
            round: Some(1),
            ..Default::default()
        })
        .unwrap();
    assert!(path.exists(), "update repaints in place");

    chart.destroy().unwrap();
    assert!(!path.exists(), "destroy leaves the mount empty");
    chart.destroy().unwrap();
}

#[test]
fn highlight_changes_rendered_opacity() {
    let mut chart = create_chart(Container::memory(), sample_dataset(), opts()).unwrap();
    let plain = chart.svg().unwrap().to_string();
    // Uniform state: every line at 0.8, nothing at the dimmed level.
    assert!(plain.contains("opacity=\"0.8\""));
    assert!(!plain.contains("opacity=\"0.1\""));

    chart.highlight(Some("Verstappen")).unwrap();
    let focused = chart.svg().unwrap().to_string();
    assert_ne!(plain, focused);
    assert!(focused.contains("opacity=\"0.1\""), "others recede");
    assert!(focused.contains("opacity=\"0.3\""), "legend dims");

    // Un-hover restores uniform opacity.
    chart.highlight(None).unwrap();
    assert_eq!(chart.svg().unwrap(), plain);
}

#[test]
fn empty_dataset_still_mounts() {
    let chart = create_chart(Container::memory(), Dataset::default(), opts()).unwrap();
    assert!(chart.scene().series.is_empty());
    let svg = chart.svg().unwrap();
    assert!(svg.contains("<svg"));
    // No series, so no legend band and no markers.
    assert!(!svg.contains("<circle"));
}
