use super::traits::Objective;
use crate::core::Arity;

/// Himmelblau's function, defined over R^2 only. Four global minima of value 0.
///
///   f(x, y) = (x^2 + y - 11)^2 + (x + y^2 - 7)^2
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Himmelblau;

impl Himmelblau {
    pub const MINIMA: [[f64; 2]; 4] = [
        [3.0, 2.0],
        [-2.805118, 3.131312],
        [-3.779310, -3.283186],
        [3.584428, -1.848126],
    ];
}

impl Objective for Himmelblau {
    fn name(&self) -> &'static str {
        "himmelblau"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(2)
    }

    fn compute_value(&self, x: &[f64]) -> f64 {
        let (u, v) = residuals(x);
        u * u + v * v
    }

    fn compute_gradient(&self, x: &[f64]) -> Vec<f64> {
        let (u, v) = residuals(x);
        vec![4.0 * x[0] * u + 2.0 * v, 2.0 * u + 4.0 * x[1] * v]
    }

    fn compute_hessian(&self, x: &[f64]) -> Vec<Vec<f64>> {
        let (px, py) = (x[0], x[1]);
        let cross = 4.0 * (px + py);
        vec![
            vec![12.0 * px * px + 4.0 * py - 42.0, cross],
            vec![cross, 4.0 * px + 12.0 * py * py - 26.0],
        ]
    }
}

#[inline]
fn residuals(x: &[f64]) -> (f64, f64) {
    (x[0] * x[0] + x[1] - 11.0, x[0] + x[1] * x[1] - 7.0)
}
