use super::traits::{coefficient, Objective, Parameters};
use crate::core::Arity;
use serde::{Deserialize, Serialize};

/// Rosenbrock coefficients (defaults: a=1, b=100)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosenbrockParams {
    pub a: f64,
    pub b: f64,
}

impl Default for RosenbrockParams {
    fn default() -> Self {
        Self { a: 1.0, b: 100.0 }
    }
}

impl RosenbrockParams {
    pub fn resolve(parameters: &Parameters) -> Self {
        let defaults = Self::default();
        Self {
            a: coefficient(parameters, "a", defaults.a),
            b: coefficient(parameters, "b", defaults.b),
        }
    }
}

/// Chained Rosenbrock valley
///
///   f(x) = sum_i (a - x_i)^2 + b (x_{i+1} - x_i^2)^2
///
/// In two dimensions this is `(a - x)^2 + b (y - x^2)^2` with its global
/// minimum 0 at `(a, a^2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rosenbrock {
    params: RosenbrockParams,
}

impl Rosenbrock {
    pub fn new(params: RosenbrockParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> RosenbrockParams {
        self.params
    }

    /// Location of the 2D minimum
    pub fn minimizer_2d(&self) -> [f64; 2] {
        let a = self.params.a;
        [a, a * a]
    }
}

impl Objective for Rosenbrock {
    fn name(&self) -> &'static str {
        "rosenbrock"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn compute_value(&self, x: &[f64]) -> f64 {
        let RosenbrockParams { a, b } = self.params;
        x.windows(2)
            .map(|w| (a - w[0]).powi(2) + b * (w[1] - w[0] * w[0]).powi(2))
            .sum()
    }

    fn compute_gradient(&self, x: &[f64]) -> Vec<f64> {
        let RosenbrockParams { a, b } = self.params;
        let n = x.len();
        let mut grad = vec![0.0; n];

        for i in 0..n.saturating_sub(1) {
            let valley = x[i + 1] - x[i] * x[i];
            grad[i] += -2.0 * (a - x[i]) - 4.0 * b * x[i] * valley;
            grad[i + 1] += 2.0 * b * valley;
        }

        grad
    }

    fn compute_hessian(&self, x: &[f64]) -> Vec<Vec<f64>> {
        let b = self.params.b;
        let n = x.len();
        let mut hess = vec![vec![0.0; n]; n];

        // Each term couples x_i and x_{i+1} only, so the matrix is tridiagonal
        for i in 0..n.saturating_sub(1) {
            hess[i][i] += 2.0 - 4.0 * b * (x[i + 1] - 3.0 * x[i] * x[i]);
            hess[i + 1][i + 1] += 2.0 * b;
            let cross = -4.0 * b * x[i];
            hess[i][i + 1] += cross;
            hess[i + 1][i] += cross;
        }

        hess
    }
}
