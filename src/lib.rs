//! Diagnostics for particle swarm optimization runs.
//!
//! - [`objective`]: closed-form benchmarks returning value, gradient and
//!   Hessian on demand.
//! - [`history`]: normalizes the optimizer's serialized iteration history.
//! - [`visualization`]: samples an objective into a contour landscape and
//!   draws the swarm over it, as a best-value path or a per-iteration
//!   animation.

pub mod core;
pub mod history;
pub mod objective;
pub mod visualization;

pub use crate::core::{
    Domain, Error, HistoryError, LandscapeError, ObjectiveError, Point2, RenderError, Result, Rgb,
};
pub use history::{parse, parse_json, OptimizationRecord, ParsedHistory, Snapshot};
pub use objective::{evaluate, Benchmark, DerivativeOrders, EvaluationResult, Objective, Parameters};
pub use visualization::{
    Animation, Canvas, Figure, LeaderPolicy, PlottersCanvas, RecordingCanvas, RenderConfig,
    TrajectoryRenderer,
};
