use super::config::RenderConfig;
use crate::core::{Domain, LandscapeError};
use crate::objective::Objective;
use rayon::prelude::*;
use tracing::debug;

/// How a landscape is sampled and where its contour levels go
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingOptions {
    pub resolution: usize,
    pub levels: usize,
    pub padding_fraction: f64,
    pub min_padding: f64,
    pub parallel: bool,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for SamplingOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            resolution: config.resolution,
            levels: config.levels,
            padding_fraction: config.padding_fraction,
            min_padding: config.min_padding,
            parallel: config.parallel,
        }
    }
}

/// Objective values on a regular grid over the plotting domain
#[derive(Clone, Debug, PartialEq)]
pub struct Landscape {
    domain: Domain,
    xs: Vec<f64>,
    ys: Vec<f64>,
    // Row-major over y: values[j * resolution + i] = f(xs[i], ys[j])
    values: Vec<f64>,
    min: f64,
    max: f64,
    levels: Vec<f64>,
}

impl Landscape {
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn resolution(&self) -> usize {
        self.xs.len()
    }

    /// (columns along x, rows along y)
    pub fn shape(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Objective value at grid node `(xs[i], ys[j])`
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.xs.len() + i]
    }

    pub fn row(&self, j: usize) -> &[f64] {
        let n = self.xs.len();
        &self.values[j * n..(j + 1) * n]
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Contour thresholds, strictly increasing
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn band_count(&self) -> usize {
        self.levels.len() - 1
    }

    /// Index of the band `[levels[k], levels[k+1])` holding `value`
    pub fn band(&self, value: f64) -> usize {
        let upper = self.levels.partition_point(|&l| l <= value);
        upper.saturating_sub(1).min(self.band_count() - 1)
    }
}

/// `n` evenly spaced values from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|k| if k == n - 1 { hi } else { lo + step * k as f64 })
                .collect()
        }
    }
}

/// Evenly spaced thresholds from just below `min` to just above `max`.
///
/// The padding is `padding_fraction` of the extreme's magnitude, never less
/// than `min_padding`, so the outermost levels always enclose the samples.
pub fn contour_levels(
    min: f64,
    max: f64,
    count: usize,
    padding_fraction: f64,
    min_padding: f64,
) -> Vec<f64> {
    let pad = |v: f64| (padding_fraction * v.abs()).max(min_padding);
    linspace(min - pad(min), max + pad(max), count)
}

/// Sample `objective` over `domain` on a `resolution x resolution` grid with default levels
pub fn sample(
    objective: &dyn Objective,
    domain: &Domain,
    resolution: usize,
) -> Result<Landscape, LandscapeError> {
    let options = SamplingOptions {
        resolution,
        ..SamplingOptions::default()
    };
    sample_with(objective, domain, &options)
}

pub fn sample_with(
    objective: &dyn Objective,
    domain: &Domain,
    options: &SamplingOptions,
) -> Result<Landscape, LandscapeError> {
    let resolution = options.resolution;
    if resolution < 2 {
        return Err(LandscapeError::InvalidResolution(resolution));
    }
    if options.levels < 2 {
        return Err(LandscapeError::InvalidLevelCount(options.levels));
    }
    let (padding_fraction, min_padding) = (options.padding_fraction, options.min_padding);
    if !(padding_fraction >= 0.0 && padding_fraction.is_finite())
        || !(min_padding > 0.0 && min_padding.is_finite())
    {
        return Err(LandscapeError::InvalidPadding {
            padding_fraction,
            min_padding,
        });
    }
    if !domain.is_valid() {
        return Err(LandscapeError::InvalidDomain {
            x: domain.x,
            y: domain.y,
        });
    }

    let xs = linspace(domain.x.0, domain.x.1, resolution);
    let ys = linspace(domain.y.0, domain.y.1, resolution);

    let sample_row = |y: f64| -> Result<Vec<f64>, LandscapeError> {
        xs.iter()
            .map(|&x| {
                let value = objective
                    .value(&[x, y])
                    .map_err(|source| LandscapeError::Objective { x, y, source })?;
                if !value.is_finite() {
                    return Err(LandscapeError::NonFinite { x, y, value });
                }
                Ok(value)
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if options.parallel {
        ys.par_iter().map(|&y| sample_row(y)).collect::<Result<_, _>>()?
    } else {
        ys.iter().map(|&y| sample_row(y)).collect::<Result<_, _>>()?
    };
    let values: Vec<f64> = rows.into_iter().flatten().collect();

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let levels = contour_levels(min, max, options.levels, padding_fraction, min_padding);

    debug!(
        objective = objective.name(),
        resolution,
        min,
        max,
        "sampled landscape"
    );

    Ok(Landscape {
        domain: *domain,
        xs,
        ys,
        values,
        min,
        max,
        levels,
    })
}
