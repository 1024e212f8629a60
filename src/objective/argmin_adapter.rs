use super::traits::Objective;
use argmin::core::{CostFunction, Error, Gradient, Hessian};

/// Exposes a benchmark as an `argmin` oracle so external solvers can drive it
/// with the same closed forms the renderer samples.
#[derive(Clone, Debug)]
pub struct ArgminObjective<O> {
    objective: O,
}

impl<O: Objective> ArgminObjective<O> {
    pub fn new(objective: O) -> Self {
        Self { objective }
    }

    pub fn inner(&self) -> &O {
        &self.objective
    }
}

impl<O: Objective> CostFunction for ArgminObjective<O> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.objective.value(param)?)
    }
}

impl<O: Objective> Gradient for ArgminObjective<O> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.objective.gradient(param)?)
    }
}

impl<O: Objective> Hessian for ArgminObjective<O> {
    type Param = Vec<f64>;
    type Hessian = Vec<Vec<f64>>;

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        Ok(self.objective.hessian(param)?)
    }
}
