//! Landscape sampling and swarm trajectory rendering.

pub mod canvas;
pub mod config;
pub mod landscape;
pub mod plotters_canvas;
pub mod trajectory;

pub use canvas::{Canvas, Marker, RecordedBackground, RecordedFrame, RecordingCanvas};
pub use config::RenderConfig;
pub use landscape::{contour_levels, linspace, sample, sample_with, Landscape, SamplingOptions};
pub use plotters_canvas::PlottersCanvas;
pub use trajectory::{
    update_markers, Animation, Figure, Frame, Frames, LeaderPolicy, MarkerColors, MarkerSet,
    TrajectoryRenderer,
};
