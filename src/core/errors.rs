use super::types::Arity;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectiveError {
    /// The point has a dimension the benchmark is not defined for
    #[error("{function} expects {expected} coordinates, got {found}")]
    DimensionMismatch {
        function: &'static str,
        expected: Arity,
        found: usize,
    },

    /// A coordinate lies outside the function's domain
    #[error("coordinate {index} is out of domain ({value})")]
    OutOfDomain { index: usize, value: f64 },

    #[error("unknown benchmark '{0}'")]
    UnknownBenchmark(String),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    /// Missing field, wrong type or invalid JSON
    #[error("malformed optimization record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed optimization record: swarm_size must be positive")]
    EmptySwarm,

    #[error(
        "malformed optimization record: iteration {iteration} has {found} {field}, not {expected}"
    )]
    SwarmSizeMismatch {
        iteration: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("malformed optimization record: {bound} needs at least 2 coordinates, got {found}")]
    BoundsDimension { bound: &'static str, found: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandscapeError {
    #[error("grid resolution must be at least 2, got {0}")]
    InvalidResolution(usize),

    #[error("at least 2 contour levels are required, got {0}")]
    InvalidLevelCount(usize),

    #[error("invalid contour padding: fraction {padding_fraction}, minimum {min_padding}")]
    InvalidPadding {
        padding_fraction: f64,
        min_padding: f64,
    },

    #[error("plotting domain x={x:?} y={y:?} is empty or not finite")]
    InvalidDomain { x: (f64, f64), y: (f64, f64) },

    #[error("objective failed at ({x}, {y}): {source}")]
    Objective {
        x: f64,
        y: f64,
        #[source]
        source: ObjectiveError,
    },

    #[error("objective returned {value} at ({x}, {y})")]
    NonFinite { x: f64, y: f64, value: f64 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Landscape(#[from] LandscapeError),

    #[error("iteration {iteration}: {what} has {found} coordinates, at least 2 are needed to plot")]
    Dimension {
        iteration: usize,
        what: &'static str,
        found: usize,
    },

    #[error("frame {index} out of range ({len} frames)")]
    FrameOutOfRange { index: usize, len: usize },

    #[error("invalid render config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read render config: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Objective(#[from] ObjectiveError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Landscape(#[from] LandscapeError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
