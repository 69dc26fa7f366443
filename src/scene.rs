//! The retained frame state a chart keeps between renders.
//!
//! A [`Scene`] is everything needed to repaint one frame: keyed series
//! geometry in data space, axis domains, and color assignments. Incremental
//! redraw is an explicit diff of keyed sets ([`Scene::diff`]); animated
//! transitions interpolate retained series from the previous scene toward the
//! target ([`Scene::interpolate`]).

use std::collections::BTreeSet;

use crate::models::Mode;

/// Linear mapping from data space to pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a data value into the pixel range. An inverted axis is just a
    /// domain with `d0 > d1`; a degenerate domain maps to the range midpoint.
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }
}

/// One entity's drawable line: points in data space, round-ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesNode {
    pub key: String,
    /// Index into the categorical palette, stable while the key stays in the
    /// active set (assigned by the controller's color domain).
    pub color_idx: usize,
    /// `(round, position)` pairs. Positions are `f64` so in-flight transition
    /// frames can hold fractional ranks.
    pub points: Vec<(f64, f64)>,
}

impl SeriesNode {
    /// Where the end-of-line label sits: the value at the cutoff round, or
    /// the last available point when the entity has no entry there.
    pub fn label_point(&self, cutoff: u32) -> Option<(f64, f64)> {
        let cutoff = cutoff as f64;
        self.points
            .iter()
            .rev()
            .find(|(r, _)| (*r - cutoff).abs() < 0.5)
            .or_else(|| self.points.last())
            .copied()
    }
}

/// One frame of chart state, keyed by entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub season: i32,
    pub mode: Mode,
    /// Maximum visible round.
    pub cutoff: u32,
    /// Horizontal domain, from the visible rounds.
    pub x_domain: (f64, f64),
    /// Vertical domain as `(max position, 1)`: rank 1 maps to the top and the
    /// span covers the whole season so the axis holds still while the cutoff
    /// moves.
    pub y_domain: (f64, f64),
    /// Series in first-seen order.
    pub series: Vec<SeriesNode>,
}

impl Scene {
    /// A scene with axes but no series (missing-season fallback).
    pub fn empty(season: i32, mode: Mode) -> Self {
        Self {
            season,
            mode,
            cutoff: 0,
            x_domain: (1.0, 1.0),
            y_domain: (1.0, 1.0),
            series: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SeriesNode> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.key.as_str())
    }

    /// Classify keys against a previous frame: set difference for exits,
    /// intersection for retained series, remainder for entries.
    pub fn diff<'a>(prev: &'a Scene, next: &'a Scene) -> SceneDiff {
        let before: BTreeSet<&str> = prev.keys().collect();
        let after: BTreeSet<&str> = next.keys().collect();
        SceneDiff {
            entered: after.difference(&before).map(|k| k.to_string()).collect(),
            retained: after.intersection(&before).map(|k| k.to_string()).collect(),
            exited: before.difference(&after).map(|k| k.to_string()).collect(),
        }
    }

    /// The frame at progress `t` of a transition from `from` toward `to`.
    ///
    /// Retained series lerp position per matching round; rounds only present
    /// in the target (an extended line) appear at final geometry. Rounds that
    /// were retracted drop out at `t = 0`: a shrinking cutoff snaps to the
    /// shorter geometry rather than animating the line back. Entering and
    /// exiting keys follow the target immediately. `t` is clamped to
    /// `[0, 1]`.
    pub fn interpolate(from: &Scene, to: &Scene, t: f64) -> Scene {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return to.clone();
        }
        let lerp = |a: f64, b: f64| a + (b - a) * t;

        let series = to
            .series
            .iter()
            .map(|target| {
                let Some(prev) = from.get(&target.key) else {
                    return target.clone();
                };
                let points = target
                    .points
                    .iter()
                    .map(|&(round, pos)| {
                        match prev.points.iter().find(|(r, _)| (*r - round).abs() < 0.5) {
                            Some(&(_, old_pos)) => (round, lerp(old_pos, pos)),
                            None => (round, pos),
                        }
                    })
                    .collect();
                SeriesNode {
                    key: target.key.clone(),
                    color_idx: target.color_idx,
                    points,
                }
            })
            .collect();

        Scene {
            season: to.season,
            mode: to.mode,
            cutoff: to.cutoff,
            x_domain: (
                lerp(from.x_domain.0, to.x_domain.0),
                lerp(from.x_domain.1, to.x_domain.1),
            ),
            y_domain: (
                lerp(from.y_domain.0, to.y_domain.0),
                lerp(from.y_domain.1, to.y_domain.1),
            ),
            series,
        }
    }
}

/// Keyed reconciliation result between two frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDiff {
    pub entered: Vec<String>,
    pub retained: Vec<String>,
    pub exited: Vec<String>,
}
