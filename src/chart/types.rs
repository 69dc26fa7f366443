//! Public types and defaults for the chart controller.

use std::path::PathBuf;

use crate::models::Mode;

/// Pixel margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 40,
        }
    }
}

/// Fixed layout configuration plus the initial chart state.
///
/// `season: None` picks the latest season present in the active collection;
/// `round: None` means "latest available" and any explicit cutoff is clamped
/// to the last round with data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Duration of animated transitions. `0` commits every render
    /// immediately.
    pub transition_ms: u64,
    pub mode: Mode,
    pub season: Option<i32>,
    pub round: Option<u32>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 850,
            height: 480,
            margin: Margin::default(),
            transition_ms: 800,
            mode: Mode::default(),
            season: None,
            round: None,
        }
    }
}

/// Partial state for [`crate::chart::Chart::update`]: only the given fields
/// are merged into the chart state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateOptions {
    pub mode: Option<Mode>,
    pub season: Option<i32>,
    pub round: Option<u32>,
}

/// The mount point a chart renders into. The caller owns the target; the
/// controller only replaces its content and clears it on `destroy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// An SVG file, rewritten on every repaint and removed on `destroy`.
    File(PathBuf),
    /// An in-memory SVG document, readable via [`crate::chart::Chart::svg`].
    Memory,
}

impl Container {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Container::File(path.into())
    }

    pub fn memory() -> Self {
        Container::Memory
    }
}
