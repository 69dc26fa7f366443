use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ChartError;

/// Which championship the chart follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Driver,
    Constructor,
}

impl Mode {
    /// Label used in log lines and tooltips.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Driver => "driver",
            Mode::Constructor => "constructor",
        }
    }
}

impl FromStr for Mode {
    type Err = ChartError;

    /// Recognizes exactly `"driver"` and `"constructor"`. Anything else is
    /// rejected rather than silently yielding an empty chart.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(Mode::Driver),
            "constructor" => Ok(Mode::Constructor),
            other => Err(ChartError::InvalidArgument(format!(
                "unknown mode {other:?}, expected \"driver\" or \"constructor\""
            ))),
        }
    }
}

/// One standings row: an entity's rank and cumulative points after a round.
///
/// Rows come from driver or constructor standings exports; only the matching
/// entity fields are populated. Unique per (season, round, entity key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StandingRecord {
    pub season: i32,
    /// 1-based, increasing within a season. Ergast-style exports encode
    /// numbers as strings; accept both and normalize.
    #[serde(default, deserialize_with = "de_u32_from_string_or_number")]
    pub round: u32,
    #[serde(default, deserialize_with = "de_u32_from_string_or_number")]
    pub position: u32,
    #[serde(default, deserialize_with = "de_f64_from_string_or_number")]
    pub points: f64,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub constructor: Option<String>,
    #[serde(default)]
    pub constructor_id: Option<String>,
}

impl StandingRecord {
    /// The entity label for the given mode: display name when present,
    /// otherwise the stable id. `None` when the record belongs to the other
    /// collection.
    pub fn entity_key(&self, mode: Mode) -> Option<&str> {
        let (name, id) = match mode {
            Mode::Driver => (&self.driver, &self.driver_id),
            Mode::Constructor => (&self.constructor, &self.constructor_id),
        };
        name.as_deref().or(id.as_deref())
    }

    /// The reference-collection id for the enrichment join.
    pub fn entity_id(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Driver => self.driver_id.as_deref(),
            Mode::Constructor => self.constructor_id.as_deref(),
        }
    }
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as u32)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("negative value for u32"));
            }
            Ok(v as u32)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// Serde helper: parse `f64` from either a JSON number or a string.
fn de_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or number")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<f64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// Driver reference row (biographical data, joined by `driver_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DriverRef {
    pub driver_id: String,
    #[serde(default)]
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl DriverRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }
}

/// Constructor reference row, joined by `constructor_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConstructorRef {
    pub constructor_id: String,
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The in-memory dataset a chart is constructed over. Sourcing it (files,
/// API, scraper output) is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub driver_standings: Vec<StandingRecord>,
    pub constructor_standings: Vec<StandingRecord>,
    #[serde(default)]
    pub drivers: Vec<DriverRef>,
    #[serde(default)]
    pub constructors: Vec<ConstructorRef>,
}

impl Dataset {
    /// The standings collection the given mode plots.
    pub fn standings(&self, mode: Mode) -> &[StandingRecord] {
        match mode {
            Mode::Driver => &self.driver_standings,
            Mode::Constructor => &self.constructor_standings,
        }
    }
}

/// One plottable observation: a standing reshaped for the chart.
/// Produced fresh on every render and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedPoint {
    pub round: u32,
    pub position: u32,
    pub key: String,
    pub points: f64,
}

/// An entity's standing at one round merged with its reference row.
/// Result of the read-only join in [`crate::standings::entities_at_round`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityProfile {
    pub key: String,
    pub position: u32,
    pub points: f64,
    /// Display name from the reference collection when the join found one.
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub url: Option<String>,
}
