//! f1-standings-viz
//!
//! A small line-chart visualization for Formula 1 championship standings:
//! driver or constructor positions over a season's rounds, rendered with
//! Plotters and updated incrementally.
//!
//! ### Features
//! - Pure reshaping helpers from raw standings to chart-ready series
//! - A mounted chart handle with `update` / `destroy`, keyed
//!   enter/retain/exit reconciliation against the previous frame
//! - Retargetable animated transitions, series highlight, legend, tooltip
//!
//! ### Example
//! ```no_run
//! use f1_standings_viz::{ChartOptions, Container, Mode, UpdateOptions, create_chart};
//!
//! # let dataset = f1_standings_viz::Dataset::default();
//! let mut chart = create_chart(
//!     Container::file("standings.svg"),
//!     dataset,
//!     ChartOptions {
//!         mode: Mode::Driver,
//!         season: Some(2021),
//!         ..Default::default()
//!     },
//! )?;
//! chart.update(UpdateOptions {
//!     round: Some(10),
//!     ..Default::default()
//! })?;
//! chart.destroy()?;
//! # Ok::<(), f1_standings_viz::ChartError>(())
//! ```

pub mod chart;
pub mod error;
pub mod models;
pub mod scene;
pub mod standings;

pub use chart::types::{ChartOptions, Container, Margin, UpdateOptions};
pub use chart::{Chart, create_chart};
pub use error::ChartError;
pub use models::{Dataset, Mode, NormalizedPoint, StandingRecord};
