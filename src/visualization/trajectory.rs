use super::canvas::{Canvas, Marker};
use super::config::RenderConfig;
use super::landscape::{sample_with, Landscape, SamplingOptions};
use crate::core::{Domain, Point2, RenderError, Rgb};
use crate::history::{ParsedHistory, Snapshot};
use crate::objective::Objective;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Rule deciding which particles are drawn as the swarm leader in a frame.
///
/// Every particle the rule accepts is highlighted, so ties light up together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderPolicy {
    /// Current position equals `global_best_x` exactly
    #[default]
    ExactPosition,
    /// Current position within `tolerance` of `global_best_x` in every coordinate
    WithinTolerance { tolerance: f64 },
    /// The particle's own best position equals `global_best_x`
    PersonalBestHolder,
}

impl LeaderPolicy {
    pub fn is_leader(&self, snapshot: &Snapshot, particle: usize) -> bool {
        let best = &snapshot.global_best_x;
        match *self {
            Self::ExactPosition => snapshot.particles.get(particle).is_some_and(|p| p == best),
            Self::WithinTolerance { tolerance } => snapshot
                .particles
                .get(particle)
                .is_some_and(|p| within(p, best, tolerance)),
            Self::PersonalBestHolder => snapshot
                .particle_bests
                .get(particle)
                .is_some_and(|pb| &pb.position == best),
        }
    }
}

fn within(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerColors {
    pub leader: Rgb,
    pub follower: Rgb,
}

impl From<&RenderConfig> for MarkerColors {
    fn from(config: &RenderConfig) -> Self {
        Self {
            leader: config.leader_color,
            follower: config.follower_color,
        }
    }
}

/// One marker per particle, carried from frame to frame
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(swarm_size: usize, color: Rgb) -> Self {
        Self {
            markers: (0..swarm_size).map(|i| idle_marker(i, color)).collect(),
        }
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Indices of the highlighted particles
    pub fn leaders(&self) -> Vec<usize> {
        self.markers
            .iter()
            .filter(|m| m.leader)
            .map(|m| m.particle)
            .collect()
    }
}

fn idle_marker(particle: usize, color: Rgb) -> Marker {
    Marker {
        particle,
        position: Point2::new(0.0, 0.0),
        color,
        leader: false,
    }
}

/// Move every marker to its particle's position in `snapshot` and recolour it.
///
/// This is the whole per-frame update: the result depends only on the
/// snapshot, the policy and the colours.
pub fn update_markers(
    snapshot: &Snapshot,
    iteration: usize,
    policy: &LeaderPolicy,
    colors: MarkerColors,
    markers: &mut MarkerSet,
) -> Result<(), RenderError> {
    markers
        .markers
        .resize_with(snapshot.particles.len(), || idle_marker(0, colors.follower));

    for (index, (marker, position)) in markers
        .markers
        .iter_mut()
        .zip(&snapshot.particles)
        .enumerate()
    {
        let point = Point2::from_position(position).ok_or(RenderError::Dimension {
            iteration,
            what: "particle position",
            found: position.len(),
        })?;
        let leader = policy.is_leader(snapshot, index);

        marker.particle = index;
        marker.position = point;
        marker.leader = leader;
        marker.color = if leader { colors.leader } else { colors.follower };
    }

    Ok(())
}

/// Rendered state of one animation frame
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub markers: Vec<Marker>,
}

impl Frame {
    pub fn leaders(&self) -> Vec<usize> {
        self.markers
            .iter()
            .filter(|m| m.leader)
            .map(|m| m.particle)
            .collect()
    }
}

/// Pull iterator producing one frame per snapshot, in order
pub struct Frames<'h> {
    history: &'h ParsedHistory,
    policy: LeaderPolicy,
    colors: MarkerColors,
    markers: MarkerSet,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = self.history.snapshots.get(self.next)?;
        let index = self.next;
        self.next += 1;

        let updated = update_markers(snapshot, index, &self.policy, self.colors, &mut self.markers);
        Some(updated.map(|()| Frame {
            index,
            markers: self.markers.as_slice().to_vec(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.history.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Handle to a rendered figure
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub domain: Domain,
    pub levels: Vec<f64>,
    pub path: Vec<Point2>,
    pub title: Option<String>,
}

/// Animated swarm: the background figure plus one frame per iteration
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub figure: Figure,
    pub frames: Vec<Frame>,
    pub interval: Duration,
}

impl Animation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, RenderError> {
        self.frames.get(index).ok_or(RenderError::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    pub fn duration(&self) -> Duration {
        u32::try_from(self.frames.len())
            .ok()
            .and_then(|n| self.interval.checked_mul(n))
            .unwrap_or(Duration::MAX)
    }
}

/// Draws swarm histories over the level sets of an objective
pub struct TrajectoryRenderer<'o> {
    objective: &'o dyn Objective,
    config: RenderConfig,
}

impl<'o> TrajectoryRenderer<'o> {
    pub fn new(objective: &'o dyn Objective, config: RenderConfig) -> Self {
        Self { objective, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Sample a fresh landscape over the history's domain
    pub fn landscape(&self, domain: &Domain) -> Result<Landscape, RenderError> {
        Ok(sample_with(
            self.objective,
            domain,
            &SamplingOptions::from(&self.config),
        )?)
    }

    /// Global-best positions in chronological order
    pub fn best_path(&self, history: &ParsedHistory) -> Result<Vec<Point2>, RenderError> {
        history
            .iter()
            .enumerate()
            .map(|(iteration, s)| {
                Point2::from_position(&s.global_best_x).ok_or(RenderError::Dimension {
                    iteration,
                    what: "global_best_x",
                    found: s.global_best_x.len(),
                })
            })
            .collect()
    }

    /// Static mode: the landscape with the incumbent's path drawn over it
    pub fn plot_best_path<C: Canvas + ?Sized>(
        &self,
        history: &ParsedHistory,
        canvas: &mut C,
    ) -> Result<Figure, RenderError> {
        let path = self.best_path(history)?;
        let landscape = self.landscape(&history.domain)?;

        canvas.draw_contour(&landscape)?;
        if !path.is_empty() {
            canvas.draw_path(&path, self.config.path_color)?;
        }
        canvas.present()?;

        info!(
            objective = self.objective.name(),
            points = path.len(),
            "rendered best path"
        );

        Ok(self.figure(&landscape, path))
    }

    /// Frames for `history`, computed lazily as the iterator is pulled
    pub fn frames<'h>(&self, history: &'h ParsedHistory) -> Frames<'h> {
        let colors = MarkerColors::from(&self.config);
        Frames {
            history,
            policy: self.config.leader_policy,
            colors,
            markers: MarkerSet::new(history.swarm_size, colors.follower),
            next: 0,
        }
    }

    /// Random access to a single frame
    pub fn frame(&self, history: &ParsedHistory, index: usize) -> Result<Frame, RenderError> {
        let snapshot = history
            .snapshots
            .get(index)
            .ok_or(RenderError::FrameOutOfRange {
                index,
                len: history.len(),
            })?;
        let colors = MarkerColors::from(&self.config);
        let mut markers = MarkerSet::new(history.swarm_size, colors.follower);
        update_markers(snapshot, index, &self.config.leader_policy, colors, &mut markers)?;
        Ok(Frame {
            index,
            markers: markers.as_slice().to_vec(),
        })
    }

    /// Animated mode: the landscape once, then one committed frame per iteration
    pub fn animate<C: Canvas + ?Sized>(
        &self,
        history: &ParsedHistory,
        canvas: &mut C,
    ) -> Result<Animation, RenderError> {
        let landscape = self.landscape(&history.domain)?;
        canvas.draw_contour(&landscape)?;

        let mut frames = Vec::with_capacity(history.len());
        for frame in self.frames(history) {
            let frame = frame?;
            canvas.draw_markers(&frame.markers)?;
            canvas.present()?;
            frames.push(frame);
        }

        info!(
            objective = self.objective.name(),
            frames = frames.len(),
            swarm_size = history.swarm_size,
            interval_ms = self.config.frame_interval_ms,
            "rendered swarm animation"
        );

        Ok(Animation {
            figure: self.figure(&landscape, Vec::new()),
            frames,
            interval: self.config.frame_interval(),
        })
    }

    fn figure(&self, landscape: &Landscape, path: Vec<Point2>) -> Figure {
        Figure {
            domain: landscape.domain(),
            levels: landscape.levels().to_vec(),
            path,
            title: self.config.title.clone(),
        }
    }
}
