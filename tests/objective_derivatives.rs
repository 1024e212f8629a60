//! Consistency of the closed-form gradients and Hessians with finite
//! differences of the value, across every built-in benchmark.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swarmin_viz::objective::{
    central_difference_gradient, central_difference_hessian, ArgminObjective, Benchmark,
    DerivativeOrders, Objective, Parameters, Rosenbrock,
};

const STEP: f64 = 1e-4;

fn probe_points(seed: u64, count: usize, dim: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..dim).map(|_| rng.gen_range(-2.0..2.0)).collect())
        .collect()
}

fn assert_close(analytic: f64, numeric: f64) {
    assert_relative_eq!(analytic, numeric, epsilon = 1e-4, max_relative = 1e-4);
}

#[test]
fn gradients_match_central_differences() {
    for benchmark in Benchmark::ALL {
        let objective = benchmark.resolve(&Parameters::new());
        for x in probe_points(7, 12, 2) {
            let analytic = objective.gradient(&x).unwrap();
            let numeric = central_difference_gradient(&objective, &x, STEP).unwrap();
            for (a, n) in analytic.iter().zip(&numeric) {
                assert_close(*a, *n);
            }
        }
    }
}

#[test]
fn hessians_match_central_differences() {
    for benchmark in Benchmark::ALL {
        let objective = benchmark.resolve(&Parameters::new());
        for x in probe_points(11, 12, 2) {
            let analytic = objective.hessian(&x).unwrap();
            let numeric = central_difference_hessian(&objective, &x, STEP).unwrap();
            for (row_a, row_n) in analytic.iter().zip(&numeric) {
                for (a, n) in row_a.iter().zip(row_n) {
                    assert_relative_eq!(*a, *n, epsilon = 1e-2, max_relative = 1e-3);
                }
            }
        }
    }
}

#[test]
fn higher_dimensional_rosenbrock_is_consistent() {
    let mut parameters = Parameters::new();
    parameters.insert("a".into(), 0.5);
    parameters.insert("b".into(), 20.0);
    let objective = Benchmark::Rosenbrock.resolve(&parameters);

    for x in probe_points(3, 5, 4) {
        let analytic = objective.gradient(&x).unwrap();
        let numeric = central_difference_gradient(&objective, &x, STEP).unwrap();
        for (a, n) in analytic.iter().zip(&numeric) {
            assert_close(*a, *n);
        }
        let hessian = objective.hessian(&x).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(hessian[i][j], hessian[j][i]);
            }
        }
    }
}

#[test]
fn evaluate_bundle_agrees_with_single_oracles() {
    let objective = Rosenbrock::default();
    let x = [-0.7, 1.3];
    let bundle = objective.evaluate(&x, DerivativeOrders::ALL).unwrap();
    assert_eq!(bundle.function, Some(objective.value(&x).unwrap()));
    assert_eq!(bundle.derivative, Some(objective.gradient(&x).unwrap()));
    assert_eq!(bundle.hessian, Some(objective.hessian(&x).unwrap()));
}

#[test]
fn argmin_oracles_share_the_closed_forms() {
    use argmin::core::{CostFunction, Gradient, Hessian};

    let oracle = ArgminObjective::new(Benchmark::Himmelblau.resolve(&Parameters::new()));
    let x = vec![1.5, -0.5];
    assert_eq!(oracle.cost(&x).unwrap(), oracle.inner().value(&x).unwrap());
    assert_eq!(oracle.gradient(&x).unwrap(), oracle.inner().gradient(&x).unwrap());
    assert_eq!(oracle.hessian(&x).unwrap(), oracle.inner().hessian(&x).unwrap());
}

#[test]
fn lbfgs_drives_rosenbrock_to_its_minimizer() {
    use argmin::core::{Executor, State};
    use argmin::solver::linesearch::MoreThuenteLineSearch;
    use argmin::solver::quasinewton::LBFGS;

    let problem = ArgminObjective::new(Rosenbrock::default());
    let solver = LBFGS::new(MoreThuenteLineSearch::new(), 7);
    let result = Executor::new(problem, solver)
        .configure(|state| state.param(vec![-1.2, 1.0]).max_iters(500))
        .run()
        .unwrap();

    let state = result.state();
    let best = state.get_best_param().unwrap();
    assert_relative_eq!(best[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(best[1], 1.0, epsilon = 1e-4);
    assert!(state.get_best_cost() < 1e-8);
}
