use super::traits::Objective;
use crate::core::ObjectiveError;

/// Gradient by central finite differences of the objective value
pub fn central_difference_gradient<O: Objective + ?Sized>(
    objective: &O,
    x: &[f64],
    h: f64,
) -> Result<Vec<f64>, ObjectiveError> {
    let n = x.len();
    let mut grad = vec![0.0; n];
    let mut probe = x.to_vec();

    for i in 0..n {
        probe[i] = x[i] + h;
        let c_plus = objective.value(&probe)?;

        probe[i] = x[i] - h;
        let c_minus = objective.value(&probe)?;

        probe[i] = x[i];
        grad[i] = (c_plus - c_minus) / (2.0 * h);
    }

    Ok(grad)
}

/// Hessian by second-order central differences of the objective value
pub fn central_difference_hessian<O: Objective + ?Sized>(
    objective: &O,
    x: &[f64],
    h: f64,
) -> Result<Vec<Vec<f64>>, ObjectiveError> {
    let n = x.len();
    let mut hess = vec![vec![0.0; n]; n];
    let mut probe = x.to_vec();
    let center = objective.value(x)?;

    let shifted = |probe: &mut Vec<f64>, steps: &[(usize, f64)]| {
        for &(i, s) in steps {
            probe[i] += s;
        }
        let value = objective.value(probe);
        for &(i, _) in steps {
            probe[i] = x[i];
        }
        value
    };

    for i in 0..n {
        let plus = shifted(&mut probe, &[(i, h)])?;
        let minus = shifted(&mut probe, &[(i, -h)])?;
        hess[i][i] = (plus - 2.0 * center + minus) / (h * h);

        for j in i + 1..n {
            let pp = shifted(&mut probe, &[(i, h), (j, h)])?;
            let pm = shifted(&mut probe, &[(i, h), (j, -h)])?;
            let mp = shifted(&mut probe, &[(i, -h), (j, h)])?;
            let mm = shifted(&mut probe, &[(i, -h), (j, -h)])?;
            let mixed = (pp - pm - mp + mm) / (4.0 * h * h);
            hess[i][j] = mixed;
            hess[j][i] = mixed;
        }
    }

    Ok(hess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Arity;
    use std::sync::Mutex;

    /// Quadratic 0.5 x^T A x that remembers every point it was evaluated at
    struct Recording {
        probes: Mutex<Vec<Vec<f64>>>,
    }

    const A: [[f64; 3]; 3] = [[4.0, 1.0, 0.0], [1.0, 3.0, -2.0], [0.0, -2.0, 5.0]];

    impl Objective for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }
        fn arity(&self) -> Arity {
            Arity::Exactly(3)
        }
        fn compute_value(&self, x: &[f64]) -> f64 {
            if let Ok(mut probes) = self.probes.lock() {
                probes.push(x.to_vec());
            }
            let mut v = 0.0;
            for i in 0..3 {
                for j in 0..3 {
                    v += 0.5 * x[i] * A[i][j] * x[j];
                }
            }
            v
        }
        fn compute_gradient(&self, x: &[f64]) -> Vec<f64> {
            (0..3).map(|i| (0..3).map(|j| A[i][j] * x[j]).sum()).collect()
        }
        fn compute_hessian(&self, _x: &[f64]) -> Vec<Vec<f64>> {
            A.iter().map(|row| row.to_vec()).collect()
        }
    }

    #[test]
    fn hessian_probes_only_touch_the_shifted_coordinates() {
        let f = Recording {
            probes: Mutex::new(Vec::new()),
        };
        let x = [0.1, 0.7, 1e5 + 0.3];
        let h = 1e-3;
        central_difference_hessian(&f, &x, h).unwrap();

        let probes = f.probes.lock().unwrap();
        // centre, 2 per diagonal entry, 4 per upper off-diagonal entry
        assert_eq!(probes.len(), 1 + 2 * 3 + 4 * 3);
        for probe in probes.iter() {
            let moved = (0..3).filter(|&k| probe[k] != x[k]).count();
            assert!(moved <= 2, "probe {probe:?} drifted from {x:?}");
            for k in 0..3 {
                if probe[k] != x[k] {
                    assert!((probe[k] - x[k]).abs() <= 2.0 * h);
                }
            }
        }
    }

    #[test]
    fn quadratic_is_recovered() {
        let f = Recording {
            probes: Mutex::new(Vec::new()),
        };
        let x = [0.5, -1.0, 2.0];
        let grad = central_difference_gradient(&f, &x, 1e-4).unwrap();
        for (g, e) in grad.iter().zip(f.compute_gradient(&x)) {
            assert!((g - e).abs() < 1e-6);
        }
        let hess = central_difference_hessian(&f, &x, 1e-3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!((hess[i][j] - A[i][j]).abs() < 1e-4);
            }
        }
    }
}
