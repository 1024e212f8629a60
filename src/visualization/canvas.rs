use super::landscape::Landscape;
use crate::core::{Domain, Point2, RenderError, Rgb};

/// One particle drawn in a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub particle: usize,
    pub position: Point2,
    pub color: Rgb,
    pub leader: bool,
}

/// Drawing surface the trajectory renderer targets.
///
/// The filled contour is a persistent background. Paths and markers belong
/// to the frame being built and are committed by [`Canvas::present`]; the
/// delay between committed frames is fixed by the canvas itself.
pub trait Canvas {
    fn draw_contour(&mut self, landscape: &Landscape) -> Result<(), RenderError>;

    fn draw_path(&mut self, points: &[Point2], color: Rgb) -> Result<(), RenderError>;

    fn draw_markers(&mut self, markers: &[Marker]) -> Result<(), RenderError>;

    fn present(&mut self) -> Result<(), RenderError>;
}

/// Summary of the background a [`RecordingCanvas`] received
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedBackground {
    pub domain: Domain,
    pub shape: (usize, usize),
    pub levels: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedFrame {
    pub paths: Vec<(Vec<Point2>, Rgb)>,
    pub markers: Vec<Marker>,
}

/// In-memory canvas that keeps every committed frame
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    background: Option<RecordedBackground>,
    pending: RecordedFrame,
    frames: Vec<RecordedFrame>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<&RecordedBackground> {
        self.background.as_ref()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }
}

impl Canvas for RecordingCanvas {
    fn draw_contour(&mut self, landscape: &Landscape) -> Result<(), RenderError> {
        self.background = Some(RecordedBackground {
            domain: landscape.domain(),
            shape: landscape.shape(),
            levels: landscape.levels().to_vec(),
        });
        Ok(())
    }

    fn draw_path(&mut self, points: &[Point2], color: Rgb) -> Result<(), RenderError> {
        self.pending.paths.push((points.to_vec(), color));
        Ok(())
    }

    fn draw_markers(&mut self, markers: &[Marker]) -> Result<(), RenderError> {
        self.pending.markers.extend_from_slice(markers);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}
