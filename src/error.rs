use thiserror::Error;

/// Typed failures surfaced by the adapter and the chart controller.
///
/// Absent-data conditions (empty season, entity missing at a round) are not
/// errors; they degrade to an empty chart or a per-entity omission.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Malformed caller input: unknown mode literal, zero-sized canvas,
    /// margins that leave no plot area.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The controller's mount was torn down; construct a new chart instead.
    #[error("chart was destroyed, no mount to render into")]
    Destroyed,

    /// The drawing backend refused a primitive or the frame could not be
    /// written to its container.
    #[error("render failed: {0}")]
    Render(String),
}
