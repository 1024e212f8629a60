use super::traits::{coefficient, Objective, Parameters};
use crate::core::Arity;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Rastrigin coefficient (default: a=10)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RastriginParams {
    pub a: f64,
}

impl Default for RastriginParams {
    fn default() -> Self {
        Self { a: 10.0 }
    }
}

impl RastriginParams {
    pub fn resolve(parameters: &Parameters) -> Self {
        Self {
            a: coefficient(parameters, "a", Self::default().a),
        }
    }
}

/// Highly multimodal Rastrigin function, global minimum 0 at the origin
///
///   f(x) = a n + sum_i (x_i^2 - a cos(2 pi x_i))
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rastrigin {
    params: RastriginParams,
}

impl Rastrigin {
    pub fn new(params: RastriginParams) -> Self {
        Self { params }
    }
}

impl Objective for Rastrigin {
    fn name(&self) -> &'static str {
        "rastrigin"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(1)
    }

    fn compute_value(&self, x: &[f64]) -> f64 {
        let a = self.params.a;
        a * x.len() as f64
            + x.iter()
                .map(|xi| xi * xi - a * (TAU * xi).cos())
                .sum::<f64>()
    }

    fn compute_gradient(&self, x: &[f64]) -> Vec<f64> {
        let a = self.params.a;
        x.iter()
            .map(|xi| 2.0 * xi + TAU * a * (TAU * xi).sin())
            .collect()
    }

    fn compute_hessian(&self, x: &[f64]) -> Vec<Vec<f64>> {
        let a = self.params.a;
        let n = x.len();
        let mut hess = vec![vec![0.0; n]; n];
        for (i, xi) in x.iter().enumerate() {
            hess[i][i] = 2.0 + TAU * TAU * a * (TAU * xi).cos();
        }
        hess
    }
}
