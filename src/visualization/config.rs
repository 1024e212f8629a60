use super::trajectory::LeaderPolicy;
use crate::core::{RenderError, Rgb};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Rendering settings. Every field has a default, so a partial JSON
/// document only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Grid points per axis for the landscape
    pub resolution: usize,
    /// Number of contour thresholds
    pub levels: usize,
    /// Fraction of |min| / |max| added below / above the sampled extremes
    pub padding_fraction: f64,
    /// Smallest padding applied, keeps levels apart on flat or zero extremes.
    /// Must be finite and positive; sampling rejects anything else.
    pub min_padding: f64,
    /// Sample landscape rows on the rayon pool
    pub parallel: bool,

    pub frame_interval_ms: u64,
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub draw_axes: bool,

    pub marker_size: u32,
    pub leader_color: Rgb,
    pub follower_color: Rgb,
    pub path_color: Rgb,
    pub leader_policy: LeaderPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: 351,
            levels: 20,
            padding_fraction: 0.2,
            min_padding: 1e-6,
            parallel: false,
            frame_interval_ms: 300,
            width: 800,
            height: 800,
            title: Some("PSO: Global Best Values".to_string()),
            draw_axes: true,
            marker_size: 4,
            leader_color: Rgb::BLUE,
            follower_color: Rgb::RED,
            path_color: Rgb::BLUE,
            leader_policy: LeaderPolicy::ExactPosition,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Configure landscape grid size (default: 351)
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Configure contour level count (default: 20)
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Configure frame delay (default: 300 ms)
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_axes(mut self, draw_axes: bool) -> Self {
        self.draw_axes = draw_axes;
        self
    }

    /// Configure marker colours (defaults: leader blue, followers red)
    pub fn with_colors(mut self, leader: Rgb, follower: Rgb) -> Self {
        self.leader_color = leader;
        self.follower_color = follower;
        self
    }

    pub fn with_leader_policy(mut self, policy: LeaderPolicy) -> Self {
        self.leader_policy = policy;
        self
    }

    /// Plain output with no text, usable without system fonts
    pub fn without_text(self) -> Self {
        self.with_title(None).with_axes(false)
    }
}
