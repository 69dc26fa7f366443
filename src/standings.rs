//! Reshaping helpers that adapt raw standings into chart-ready sequences.
//!
//! All functions are pure and synchronous: they filter, map, group and sort
//! small in-memory slices and hold no state of their own.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Dataset, EntityProfile, Mode, NormalizedPoint, StandingRecord};

/// Reshape one season of raw standings into plottable points, sorted by
/// round ascending.
///
/// Records from other seasons are dropped; records lacking the mode's entity
/// key are skipped (degenerate data, not an error).
pub fn standings_by_season(
    raw: &[StandingRecord],
    season: i32,
    mode: Mode,
) -> Vec<NormalizedPoint> {
    let mut out: Vec<NormalizedPoint> = raw
        .iter()
        .filter(|r| r.season == season)
        .filter_map(|r| {
            let key = r.entity_key(mode)?;
            Some(NormalizedPoint {
                round: r.round,
                position: r.position,
                key: key.to_string(),
                points: r.points,
            })
        })
        .collect();
    out.sort_by_key(|p| p.round);
    out
}

/// Distinct seasons present in the collection, ascending.
pub fn list_seasons(raw: &[StandingRecord]) -> Vec<i32> {
    let seasons: BTreeSet<i32> = raw.iter().map(|r| r.season).collect();
    seasons.into_iter().collect()
}

/// Distinct rounds present for one season, ascending.
pub fn rounds_for_season(raw: &[StandingRecord], season: i32) -> Vec<u32> {
    let rounds: BTreeSet<u32> = raw
        .iter()
        .filter(|r| r.season == season)
        .map(|r| r.round)
        .collect();
    rounds.into_iter().collect()
}

/// For every entity with a standing at `round`, merge that standing with its
/// reference row (looked up by id in `dataset.drivers` / `.constructors`).
///
/// A read-only join: entities without a standing at the target round are
/// omitted; a missing reference row only leaves the biographical fields
/// empty. Keys follow [`StandingRecord::entity_key`].
pub fn entities_at_round(
    dataset: &Dataset,
    season: i32,
    mode: Mode,
    round: u32,
) -> BTreeMap<String, EntityProfile> {
    let mut out = BTreeMap::new();
    for r in dataset.standings(mode) {
        if r.season != season || r.round != round {
            continue;
        }
        let Some(key) = r.entity_key(mode) else {
            continue;
        };

        let mut profile = EntityProfile {
            key: key.to_string(),
            position: r.position,
            points: r.points,
            name: None,
            nationality: None,
            url: None,
        };

        if let Some(id) = r.entity_id(mode) {
            match mode {
                Mode::Driver => {
                    if let Some(d) = dataset.drivers.iter().find(|d| d.driver_id == id) {
                        profile.name = Some(d.full_name());
                        profile.nationality = d.nationality.clone();
                        profile.url = d.url.clone();
                    }
                }
                Mode::Constructor => {
                    if let Some(c) = dataset.constructors.iter().find(|c| c.constructor_id == id) {
                        profile.name = Some(c.name.clone());
                        profile.nationality = c.nationality.clone();
                        profile.url = c.url.clone();
                    }
                }
            }
        }

        out.insert(profile.key.clone(), profile);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstructorRef, DriverRef};

    fn rec(season: i32, round: u32, position: u32, driver: &str) -> StandingRecord {
        StandingRecord {
            season,
            round,
            position,
            points: (26 - position as i32) as f64,
            driver: Some(driver.into()),
            driver_id: Some(driver.to_lowercase()),
            ..Default::default()
        }
    }

    #[test]
    fn by_season_filters_and_sorts() {
        // Deliberately out of round order, with a foreign season mixed in.
        let raw = vec![
            rec(2021, 3, 1, "Verstappen"),
            rec(2020, 1, 1, "Hamilton"),
            rec(2021, 1, 2, "Verstappen"),
            rec(2021, 2, 1, "Verstappen"),
        ];
        let pts = standings_by_season(&raw, 2021, Mode::Driver);
        assert_eq!(pts.len(), 3);
        assert_eq!(
            pts.iter().map(|p| p.round).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(pts.iter().all(|p| p.key == "Verstappen"));
    }

    #[test]
    fn by_season_skips_records_without_the_modes_key() {
        let mut only_constructor = rec(2021, 1, 1, "x");
        only_constructor.driver = None;
        only_constructor.driver_id = None;
        only_constructor.constructor = Some("Red Bull".into());
        let raw = vec![only_constructor, rec(2021, 1, 2, "Hamilton")];
        let pts = standings_by_season(&raw, 2021, Mode::Driver);
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].key, "Hamilton");
    }

    #[test]
    fn key_falls_back_to_id_when_name_missing() {
        let mut r = rec(2021, 1, 1, "Hamilton");
        r.driver = None;
        assert_eq!(r.entity_key(Mode::Driver), Some("hamilton"));
    }

    #[test]
    fn seasons_and_rounds_are_distinct_ascending() {
        let raw = vec![
            rec(2021, 2, 1, "A"),
            rec(2019, 1, 1, "A"),
            rec(2021, 1, 1, "A"),
            rec(2021, 2, 2, "B"),
        ];
        assert_eq!(list_seasons(&raw), vec![2019, 2021]);
        assert_eq!(rounds_for_season(&raw, 2021), vec![1, 2]);
        assert_eq!(rounds_for_season(&raw, 2019), vec![1]);
        assert!(rounds_for_season(&raw, 1999).is_empty());
    }

    #[test]
    fn entities_join_merges_reference_fields() {
        let dataset = Dataset {
            driver_standings: vec![rec(2021, 2, 1, "Verstappen"), rec(2021, 2, 2, "Hamilton")],
            drivers: vec![DriverRef {
                driver_id: "verstappen".into(),
                code: Some("VER".into()),
                forename: "Max".into(),
                surname: "Verstappen".into(),
                nationality: Some("Dutch".into()),
                url: None,
            }],
            ..Default::default()
        };
        let entities = entities_at_round(&dataset, 2021, Mode::Driver, 2);
        assert_eq!(entities.len(), 2);

        let ver = &entities["Verstappen"];
        assert_eq!(ver.position, 1);
        assert_eq!(ver.name.as_deref(), Some("Max Verstappen"));
        assert_eq!(ver.nationality.as_deref(), Some("Dutch"));

        // No reference row for Hamilton: standing fields only, still present.
        let ham = &entities["Hamilton"];
        assert_eq!(ham.position, 2);
        assert!(ham.name.is_none());
    }

    #[test]
    fn entities_join_omits_absent_at_round() {
        let dataset = Dataset {
            driver_standings: vec![rec(2021, 1, 1, "A"), rec(2021, 2, 1, "A"), rec(2021, 1, 2, "B")],
            ..Default::default()
        };
        // B skipped round 2, so it is omitted there rather than erroring.
        let entities = entities_at_round(&dataset, 2021, Mode::Driver, 2);
        assert_eq!(entities.keys().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn constructor_mode_reads_the_other_collection() {
        let dataset = Dataset {
            constructor_standings: vec![StandingRecord {
                season: 2021,
                round: 1,
                position: 1,
                points: 44.0,
                constructor: Some("Mercedes".into()),
                constructor_id: Some("mercedes".into()),
                ..Default::default()
            }],
            constructors: vec![ConstructorRef {
                constructor_id: "mercedes".into(),
                name: "Mercedes-AMG Petronas".into(),
                nationality: Some("German".into()),
                url: None,
            }],
            ..Default::default()
        };
        let entities = entities_at_round(&dataset, 2021, Mode::Constructor, 1);
        assert_eq!(
            entities["Mercedes"].name.as_deref(),
            Some("Mercedes-AMG Petronas")
        );
    }
}
