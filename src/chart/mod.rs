//! Chart controller: owns one mounted standings chart and re-renders it
//! incrementally.
//!
//! - Construction performs a full render into the container
//! - [`Chart::update`] merges partial state and reconciles the new frame
//!   against the previous one (keyed enter/retain/exit, see [`crate::scene`])
//! - Transitions animate retained series; a new update retargets an in-flight
//!   transition from the currently displayed geometry (last-update-wins)
//! - [`Chart::destroy`] clears the mount and is idempotent

pub mod draw;
pub mod legend;
pub mod text;
pub mod tooltip;
pub mod types;
pub mod util;

use std::fs;
use std::time::{Duration, Instant};

use log::debug;
use plotters::prelude::*;
use plotters_svg::SVGBackend;

use crate::error::ChartError;
use crate::models::{Dataset, Mode};
use crate::scene::{Scene, SeriesNode};
use crate::standings::{rounds_for_season, standings_by_season};

use draw::{FrameSpec, draw_frame};
use types::{ChartOptions, Container, UpdateOptions};

/// An in-flight animation from a previous frame toward the committed one.
struct Transition {
    from: Scene,
    started: Instant,
    duration: Duration,
}

/// A mounted chart instance. Single-threaded by design: all rendering happens
/// synchronously inside the calling method.
pub struct Chart {
    dataset: Dataset,
    opts: ChartOptions,
    mode: Mode,
    season: i32,
    round: Option<u32>,
    container: Container,
    destroyed: bool,
    /// First-seen entity keys for the current season/mode; index is the
    /// palette slot. Reset on season or mode change, so a key keeps its color
    /// across round-only updates even while it is filtered out.
    color_domain: Vec<String>,
    /// Full-season round layout for the horizontal axis, recomputed only when
    /// season or mode changes.
    x_ticks: Vec<u32>,
    /// Target of the latest render.
    committed: Scene,
    /// The frame currently painted (an interpolated one mid-transition).
    displayed: Scene,
    transition: Option<Transition>,
    highlight: Option<String>,
    last_frame: Option<String>,
}

/// Build and mount a chart: validates options, clears the container, renders
/// the initial frame, and returns the updatable handle.
pub fn create_chart(
    container: Container,
    dataset: Dataset,
    options: ChartOptions,
) -> Result<Chart, ChartError> {
    Chart::new(container, dataset, options)
}

impl Chart {
    pub fn new(
        container: Container,
        dataset: Dataset,
        options: ChartOptions,
    ) -> Result<Self, ChartError> {
        validate(&options)?;

        let mode = options.mode;
        let season = match options.season {
            Some(s) => s,
            // Latest season with data in the active collection.
            None => crate::standings::list_seasons(dataset.standings(mode))
                .last()
                .copied()
                .unwrap_or(0),
        };

        let mut chart = Self {
            dataset,
            opts: options,
            mode,
            season,
            round: options.round,
            container,
            destroyed: false,
            color_domain: Vec::new(),
            x_ticks: Vec::new(),
            committed: Scene::empty(season, mode),
            displayed: Scene::empty(season, mode),
            transition: None,
            highlight: None,
            last_frame: None,
        };
        chart.x_ticks = rounds_for_season(chart.dataset.standings(mode), season);
        chart.committed = chart.compute_scene();
        chart.displayed = chart.committed.clone();
        chart.paint()?;
        debug!(
            "mounted {} chart for season {} with {} series",
            mode.as_str(),
            season,
            chart.committed.series.len()
        );
        Ok(chart)
    }

    /// Merge any of `{mode, season, round}` into the chart state and
    /// re-render. Mode and season changes trigger a full recomputation of the
    /// axis layout and color domain; a pure round change only moves the
    /// cutoff.
    pub fn update(&mut self, partial: UpdateOptions) -> Result<(), ChartError> {
        self.ensure_mounted()?;

        let full_update = partial.mode.is_some_and(|m| m != self.mode)
            || partial.season.is_some_and(|s| s != self.season);

        if let Some(m) = partial.mode {
            self.mode = m;
        }
        if let Some(s) = partial.season {
            self.season = s;
        }
        if let Some(r) = partial.round {
            self.round = Some(r);
        }

        if full_update {
            self.color_domain.clear();
            self.x_ticks = rounds_for_season(self.dataset.standings(self.mode), self.season);
        }

        // Retarget from whatever is on screen right now; a transition already
        // in flight is superseded rather than cancelled.
        let from = self.displayed.clone();
        self.committed = self.compute_scene();
        let diff = Scene::diff(&from, &self.committed);
        debug!(
            "update season={} mode={} cutoff={} (full={}): {} enter, {} retain, {} exit",
            self.season,
            self.mode.as_str(),
            self.committed.cutoff,
            full_update,
            diff.entered.len(),
            diff.retained.len(),
            diff.exited.len()
        );

        if self.opts.transition_ms == 0 || from == self.committed {
            self.transition = None;
            self.displayed = self.committed.clone();
        } else {
            self.displayed = Scene::interpolate(&from, &self.committed, 0.0);
            self.transition = Some(Transition {
                from,
                started: Instant::now(),
                duration: Duration::from_millis(self.opts.transition_ms),
            });
        }
        self.paint()
    }

    /// Advance an in-flight transition to `now` and repaint. Returns `true`
    /// while the animation is still running. Callers drive this from their
    /// own timing loop; with no transition pending it is a cheap no-op.
    pub fn tick(&mut self, now: Instant) -> Result<bool, ChartError> {
        self.ensure_mounted()?;
        let Some(tr) = self.transition.as_ref() else {
            return Ok(false);
        };
        let elapsed = now.saturating_duration_since(tr.started);
        if elapsed >= tr.duration {
            self.transition = None;
            self.displayed = self.committed.clone();
            self.paint()?;
            return Ok(false);
        }
        let t = elapsed.as_secs_f64() / tr.duration.as_secs_f64();
        self.displayed = Scene::interpolate(&tr.from, &self.committed, t);
        self.paint()?;
        Ok(true)
    }

    /// Jump any pending transition to its final geometry.
    pub fn settle(&mut self) -> Result<(), ChartError> {
        self.ensure_mounted()?;
        self.transition = None;
        self.displayed = self.committed.clone();
        self.paint()
    }

    /// Highlight one series (and dim the rest), or clear with `None`.
    /// Pure presentation: the frame is repainted, no data is recomputed.
    pub fn highlight(&mut self, key: Option<&str>) -> Result<(), ChartError> {
        self.ensure_mounted()?;
        self.highlight = key.map(str::to_string);
        self.paint()
    }

    /// Show the shared tooltip near a pointer position and repaint.
    pub fn show_tooltip(
        &mut self,
        html: impl Into<String>,
        x: i32,
        y: i32,
    ) -> Result<(), ChartError> {
        self.ensure_mounted()?;
        tooltip::show(html, x, y);
        self.paint()
    }

    /// Hide the shared tooltip and repaint.
    pub fn hide_tooltip(&mut self) -> Result<(), ChartError> {
        self.ensure_mounted()?;
        tooltip::hide();
        self.paint()
    }

    /// Remove all chart content from the container. Idempotent; further
    /// `update` calls fail with [`ChartError::Destroyed`].
    pub fn destroy(&mut self) -> Result<(), ChartError> {
        if self.destroyed {
            return Ok(());
        }
        match &self.container {
            Container::File(path) => {
                let _ = fs::remove_file(path);
            }
            Container::Memory => {}
        }
        self.last_frame = None;
        self.transition = None;
        self.destroyed = true;
        debug!("destroyed chart for season {}", self.season);
        Ok(())
    }

    /// The committed frame state (the target of the latest render).
    pub fn scene(&self) -> &Scene {
        &self.committed
    }

    /// The frame currently painted; differs from [`Chart::scene`] only while
    /// a transition is in flight.
    pub fn displayed(&self) -> &Scene {
        &self.displayed
    }

    pub fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    /// The most recent rendered SVG document, if any.
    pub fn svg(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Palette slot assigned to a key in the current color domain.
    pub fn color_of(&self, key: &str) -> Option<usize> {
        self.color_domain.iter().position(|k| k == key)
    }

    fn ensure_mounted(&self) -> Result<(), ChartError> {
        if self.destroyed {
            Err(ChartError::Destroyed)
        } else {
            Ok(())
        }
    }

    /// Build the target scene for the current state: adapter output filtered
    /// to the cutoff, grouped into keyed series, domains per the standing
    /// rules (x from visible rounds, y from the whole season, inverted).
    fn compute_scene(&mut self) -> Scene {
        let raw = self.dataset.standings(self.mode);
        let full = standings_by_season(raw, self.season, self.mode);
        if full.is_empty() {
            // Missing season: scaffold only, never a failure.
            return Scene::empty(self.season, self.mode);
        }

        let rounds = rounds_for_season(raw, self.season);
        let max_round = rounds.last().copied().unwrap_or(1);
        // Never render past available data.
        let cutoff = self.round.map_or(max_round, |r| r.min(max_round));
        let max_pos = full.iter().map(|p| p.position).max().unwrap_or(1);

        let mut series: Vec<SeriesNode> = Vec::new();
        for p in full.iter().filter(|p| p.round <= cutoff) {
            let idx = match series.iter().position(|s| s.key == p.key) {
                Some(i) => i,
                None => {
                    let color_idx = self.color_for(&p.key);
                    series.push(SeriesNode {
                        key: p.key.clone(),
                        color_idx,
                        points: Vec::new(),
                    });
                    series.len() - 1
                }
            };
            series[idx].points.push((p.round as f64, p.position as f64));
        }
        // Grouping inherits the adapter's order, but point order is an
        // invariant of the scene, so sort explicitly.
        for s in &mut series {
            s.points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        }

        let first_visible = rounds.iter().copied().find(|r| *r <= cutoff);
        let x_domain = match first_visible {
            Some(first) => (first as f64, cutoff as f64),
            None => (1.0, 1.0),
        };

        Scene {
            season: self.season,
            mode: self.mode,
            cutoff,
            x_domain,
            y_domain: (max_pos as f64, 1.0),
            series,
        }
    }

    fn color_for(&mut self, key: &str) -> usize {
        if let Some(i) = self.color_domain.iter().position(|k| k == key) {
            i
        } else {
            self.color_domain.push(key.to_string());
            self.color_domain.len() - 1
        }
    }

    /// Render the displayed frame to SVG and replace the container content.
    fn paint(&mut self) -> Result<(), ChartError> {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (self.opts.width, self.opts.height))
                .into_drawing_area();
            let spec = FrameSpec {
                scene: &self.displayed,
                opts: &self.opts,
                x_ticks: &self.x_ticks,
                highlight: self.highlight.as_deref(),
                tooltip: tooltip::current(),
            };
            draw_frame(&root, &spec).map_err(|e| ChartError::Render(e.to_string()))?;
            root.present()
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }

        if let Container::File(path) = &self.container {
            fs::write(path, &buf).map_err(|e| ChartError::Render(e.to_string()))?;
        }
        self.last_frame = Some(buf);
        Ok(())
    }
}

fn validate(opts: &ChartOptions) -> Result<(), ChartError> {
    if opts.width == 0 || opts.height == 0 {
        return Err(ChartError::InvalidArgument(format!(
            "canvas must be non-empty, got {}x{}",
            opts.width, opts.height
        )));
    }
    // Widened so absurd margins reach the error path instead of overflowing.
    let m = opts.margin;
    if u64::from(m.left) + u64::from(m.right) >= u64::from(opts.width)
        || u64::from(m.top) + u64::from(m.bottom) >= u64::from(opts.height)
    {
        return Err(ChartError::InvalidArgument(
            "margins leave no plot area".into(),
        ));
    }
    Ok(())
}
