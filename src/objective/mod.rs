//! Closed-form benchmark objectives with value, gradient and Hessian oracles.

pub mod argmin_adapter;
pub mod finite_diff;
mod himmelblau;
mod rastrigin;
mod rosenbrock;
pub mod traits;

pub use argmin_adapter::ArgminObjective;
pub use finite_diff::{central_difference_gradient, central_difference_hessian};
pub use himmelblau::Himmelblau;
pub use rastrigin::{Rastrigin, RastriginParams};
pub use rosenbrock::{Rosenbrock, RosenbrockParams};
pub use traits::{DerivativeOrders, EvaluationResult, Objective, Parameters};

use crate::core::ObjectiveError;
use std::fmt;
use std::str::FromStr;

/// Registry of the built-in benchmarks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Benchmark {
    Rosenbrock,
    Rastrigin,
    Himmelblau,
}

impl Benchmark {
    pub const ALL: [Benchmark; 3] = [Self::Rosenbrock, Self::Rastrigin, Self::Himmelblau];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rosenbrock => "rosenbrock",
            Self::Rastrigin => "rastrigin",
            Self::Himmelblau => "himmelblau",
        }
    }

    /// Resolve optional coefficients against the benchmark's defaults, once
    pub fn resolve(&self, parameters: &Parameters) -> Box<dyn Objective> {
        match self {
            Self::Rosenbrock => Box::new(Rosenbrock::new(RosenbrockParams::resolve(parameters))),
            Self::Rastrigin => Box::new(Rastrigin::new(RastriginParams::resolve(parameters))),
            Self::Himmelblau => Box::new(Himmelblau),
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ObjectiveError::UnknownBenchmark(s.to_string()))
    }
}

/// Evaluate the requested derivative orders of a benchmark at `x`.
///
/// The result holds exactly the keys whose order was requested.
pub fn evaluate(
    benchmark: Benchmark,
    x: &[f64],
    orders: impl Into<DerivativeOrders>,
    parameters: &Parameters,
) -> Result<EvaluationResult, ObjectiveError> {
    benchmark.resolve(parameters).evaluate(x, orders.into())
}

/// Look up a benchmark by name and resolve its coefficients
pub fn select_objective(
    name: &str,
    parameters: &Parameters,
) -> Result<Box<dyn Objective>, ObjectiveError> {
    Ok(name.parse::<Benchmark>()?.resolve(parameters))
}
