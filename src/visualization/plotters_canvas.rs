use super::canvas::{Canvas, Marker};
use super::config::RenderConfig;
use super::landscape::Landscape;
use crate::core::{Domain, Point2, RenderError, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// One filled grid cell of the contour background
#[derive(Clone, Copy, Debug)]
struct Cell {
    lower: (f64, f64),
    upper: (f64, f64),
    color: RGBColor,
}

/// Bitmap canvas backed by `plotters`: a PNG for static plots or an
/// animated GIF whose frame delay is fixed at construction.
pub struct PlottersCanvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    domain: Option<Domain>,
    title: Option<String>,
    draw_axes: bool,
    marker_size: u32,
    background: Vec<Cell>,
    paths: Vec<(Vec<(f64, f64)>, RGBColor)>,
    markers: Vec<Marker>,
    presented: usize,
}

impl<'a> PlottersCanvas<'a> {
    /// Single image written when the frame is presented
    pub fn png<P: AsRef<Path> + ?Sized>(path: &'a P, config: &RenderConfig) -> Self {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        Self::with_backend(backend, config)
    }

    /// Animated GIF, one image per presented frame
    pub fn gif<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Result<Self, RenderError> {
        let delay = u32::try_from(config.frame_interval_ms).unwrap_or(u32::MAX);
        let backend = BitMapBackend::gif(path, (config.width, config.height), delay)
            .map_err(backend_error)?;
        Ok(Self::with_backend(backend, config))
    }

    fn with_backend(backend: BitMapBackend<'a>, config: &RenderConfig) -> Self {
        Self {
            area: backend.into_drawing_area(),
            domain: None,
            title: config.title.clone(),
            draw_axes: config.draw_axes,
            marker_size: config.marker_size,
            background: Vec::new(),
            paths: Vec::new(),
            markers: Vec::new(),
            presented: 0,
        }
    }

    /// Frames committed so far
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Canvas for PlottersCanvas<'_> {
    fn draw_contour(&mut self, landscape: &Landscape) -> Result<(), RenderError> {
        let (xs, ys) = (landscape.xs(), landscape.ys());
        let bands = landscape.band_count();

        self.background.clear();
        self.background.reserve(xs.len() * ys.len());
        for j in 0..ys.len() {
            let (y0, y1) = cell_edges(ys, j);
            for i in 0..xs.len() {
                let (x0, x1) = cell_edges(xs, i);
                let band = landscape.band(landscape.value(i, j));
                self.background.push(Cell {
                    lower: (x0, y0),
                    upper: (x1, y1),
                    color: band_color(band, bands),
                });
            }
        }
        self.domain = Some(landscape.domain());
        Ok(())
    }

    fn draw_path(&mut self, points: &[Point2], color: Rgb) -> Result<(), RenderError> {
        let points = points.iter().map(|&p| p.into()).collect();
        self.paths.push((points, rgb(color)));
        Ok(())
    }

    fn draw_markers(&mut self, markers: &[Marker]) -> Result<(), RenderError> {
        self.markers.extend_from_slice(markers);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let domain = self
            .domain
            .ok_or_else(|| RenderError::Backend("no landscape drawn before present".into()))?;

        self.area.fill(&WHITE).map_err(backend_error)?;
        {
            let mut builder = ChartBuilder::on(&self.area);
            builder.margin(10);
            if let Some(title) = &self.title {
                builder.caption(title, ("sans-serif", 20));
            }
            if self.draw_axes {
                builder.x_label_area_size(30).y_label_area_size(40);
            }
            let mut chart = builder
                .build_cartesian_2d(domain.x.0..domain.x.1, domain.y.0..domain.y.1)
                .map_err(backend_error)?;

            if self.draw_axes {
                chart
                    .configure_mesh()
                    .disable_mesh()
                    .draw()
                    .map_err(backend_error)?;
            }

            chart
                .draw_series(
                    self.background
                        .iter()
                        .map(|c| Rectangle::new([c.lower, c.upper], c.color.filled())),
                )
                .map_err(backend_error)?;

            for (points, color) in &self.paths {
                chart
                    .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
                    .map_err(backend_error)?;
            }

            let size = self.marker_size;
            chart
                .draw_series(self.markers.iter().map(|m| {
                    Circle::new((m.position.x, m.position.y), size, rgb(m.color).filled())
                }))
                .map_err(backend_error)?;
        }
        self.area.present().map_err(backend_error)?;

        self.paths.clear();
        self.markers.clear();
        self.presented += 1;
        Ok(())
    }
}

/// Cell boundaries halfway between neighbouring grid nodes, clamped to the grid
fn cell_edges(nodes: &[f64], k: usize) -> (f64, f64) {
    let last = nodes.len() - 1;
    let lower = if k == 0 {
        nodes[0]
    } else {
        0.5 * (nodes[k - 1] + nodes[k])
    };
    let upper = if k == last {
        nodes[last]
    } else {
        0.5 * (nodes[k] + nodes[k + 1])
    };
    (lower, upper)
}

/// Reversed gray map: low bands white, high bands black
fn band_color(band: usize, bands: usize) -> RGBColor {
    let t = if bands > 1 {
        band as f64 / (bands - 1) as f64
    } else {
        0.0
    };
    let level = (255.0 * (1.0 - t)).round() as u8;
    RGBColor(level, level, level)
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn backend_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}
