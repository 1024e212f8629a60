use super::record::{OptimizationRecord, PersonalBest, PositionEntry};
use crate::core::{Domain, HistoryError, Point2};
use tracing::{debug, warn};

/// Position-only view of one iteration, as consumed by the renderer
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub particles: Vec<Vec<f64>>,
    pub velocities: Vec<Vec<f64>>,
    pub particle_bests: Vec<PersonalBest>,
    pub global_best_x: Vec<f64>,
    pub global_best_value: f64,
}

/// Normalized history plus the plotting domain derived from the search bounds
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedHistory {
    pub snapshots: Vec<Snapshot>,
    pub swarm_size: usize,
    pub domain: Domain,
}

impl ParsedHistory {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Incumbent best value per iteration
    pub fn best_values(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.global_best_value).collect()
    }

    /// Best position and value at the last iteration
    pub fn final_best(&self) -> Option<(&[f64], f64)> {
        self.snapshots
            .last()
            .map(|s| (s.global_best_x.as_slice(), s.global_best_value))
    }
}

/// Normalize an optimization record into per-iteration snapshots.
///
/// Order is preserved and nothing is filtered. Any iteration whose particle,
/// velocity or particle-best count differs from `swarm_size` is rejected.
pub fn parse(record: &OptimizationRecord) -> Result<ParsedHistory, HistoryError> {
    let swarm_size = record.swarm_size;
    if swarm_size == 0 {
        return Err(HistoryError::EmptySwarm);
    }

    let lower = corner(&record.lower_bound, "lower_bound")?;
    let upper = corner(&record.upper_bound, "upper_bound")?;
    let domain = Domain::from_corners(lower, upper);

    let mut snapshots = Vec::with_capacity(record.history.len());
    for (iteration, step) in record.history.iter().enumerate() {
        check_count(iteration, "particles", swarm_size, step.particles.len())?;
        check_count(iteration, "velocities", swarm_size, step.velocities.len())?;
        check_count(iteration, "particle_bests", swarm_size, step.particle_bests.len())?;

        snapshots.push(Snapshot {
            particles: positions(&step.particles),
            velocities: positions(&step.velocities),
            particle_bests: step.particle_bests.clone(),
            global_best_x: step.global_best_x.position.clone(),
            global_best_value: step.global_best_value,
        });
    }

    // Minimization runs never lose their incumbent; report but keep going
    for (iteration, pair) in snapshots.windows(2).enumerate() {
        let (prev, next) = (pair[0].global_best_value, pair[1].global_best_value);
        if next > prev {
            warn!(
                iteration = iteration + 1,
                previous = prev,
                current = next,
                "global best value increased"
            );
        }
    }

    debug!(
        iterations = snapshots.len(),
        swarm_size,
        x_range = ?domain.x,
        y_range = ?domain.y,
        "parsed optimization history"
    );

    Ok(ParsedHistory {
        snapshots,
        swarm_size,
        domain,
    })
}

/// Decode a JSON document and parse it in one step
pub fn parse_json(json: &str) -> Result<ParsedHistory, HistoryError> {
    parse(&OptimizationRecord::from_json_str(json)?)
}

fn corner(entry: &PositionEntry, bound: &'static str) -> Result<Point2, HistoryError> {
    Point2::from_position(&entry.position).ok_or(HistoryError::BoundsDimension {
        bound,
        found: entry.position.len(),
    })
}

fn check_count(
    iteration: usize,
    field: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), HistoryError> {
    if expected != found {
        return Err(HistoryError::SwarmSizeMismatch {
            iteration,
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn positions(entries: &[PositionEntry]) -> Vec<Vec<f64>> {
    entries.iter().map(|e| e.position.clone()).collect()
}
