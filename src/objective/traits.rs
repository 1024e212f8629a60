use crate::core::{Arity, ObjectiveError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named real-valued coefficients. Names a benchmark does not know are ignored.
pub type Parameters = IndexMap<String, f64>;

/// Which derivative orders (0, 1, 2) an evaluation should produce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeOrders {
    pub value: bool,
    pub gradient: bool,
    pub hessian: bool,
}

impl DerivativeOrders {
    pub const NONE: Self = Self::new(false, false, false);
    pub const VALUE: Self = Self::new(true, false, false);
    pub const ALL: Self = Self::new(true, true, true);

    pub const fn new(value: bool, gradient: bool, hessian: bool) -> Self {
        Self {
            value,
            gradient,
            hessian,
        }
    }
}

impl From<[bool; 3]> for DerivativeOrders {
    fn from([value, gradient, hessian]: [bool; 3]) -> Self {
        Self::new(value, gradient, hessian)
    }
}

/// Partial derivative bundle. Only the requested orders are present.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    #[serde(rename = "function", skip_serializing_if = "Option::is_none")]
    pub function: Option<f64>,
    #[serde(rename = "derivative", skip_serializing_if = "Option::is_none")]
    pub derivative: Option<Vec<f64>>,
    #[serde(rename = "Hessian", skip_serializing_if = "Option::is_none")]
    pub hessian: Option<Vec<Vec<f64>>>,
}

impl EvaluationResult {
    pub const FUNCTION_KEY: &'static str = "function";
    pub const DERIVATIVE_KEY: &'static str = "derivative";
    pub const HESSIAN_KEY: &'static str = "Hessian";

    /// Keys present in this result, in order of derivative order
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(3);
        if self.function.is_some() {
            keys.push(Self::FUNCTION_KEY);
        }
        if self.derivative.is_some() {
            keys.push(Self::DERIVATIVE_KEY);
        }
        if self.hessian.is_some() {
            keys.push(Self::HESSIAN_KEY);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

/// Closed-form benchmark: value, gradient and Hessian at a point.
///
/// Implementors provide the raw math in the `compute_*` methods; callers use
/// [`Objective::value`], [`Objective::gradient`], [`Objective::hessian`] or
/// [`Objective::evaluate`], which check the point first.
pub trait Objective: Send + Sync {
    fn name(&self) -> &'static str;

    /// Point dimensions this function is defined for
    fn arity(&self) -> Arity;

    /// Unchecked: may panic when `x` has a dimension [`Objective::arity`]
    /// rejects. Call [`Objective::value`] or [`Objective::evaluate`] instead.
    fn compute_value(&self, x: &[f64]) -> f64;

    /// Unchecked, see [`Objective::compute_value`]; use [`Objective::gradient`]
    fn compute_gradient(&self, x: &[f64]) -> Vec<f64>;

    /// Unchecked, see [`Objective::compute_value`]; use [`Objective::hessian`]
    fn compute_hessian(&self, x: &[f64]) -> Vec<Vec<f64>>;

    /// Reject points of the wrong dimension or with non-finite coordinates
    fn check_point(&self, x: &[f64]) -> Result<(), ObjectiveError> {
        if !self.arity().accepts(x.len()) {
            return Err(ObjectiveError::DimensionMismatch {
                function: self.name(),
                expected: self.arity(),
                found: x.len(),
            });
        }
        if let Some((index, &value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ObjectiveError::OutOfDomain { index, value });
        }
        Ok(())
    }

    fn value(&self, x: &[f64]) -> Result<f64, ObjectiveError> {
        self.check_point(x)?;
        Ok(self.compute_value(x))
    }

    fn gradient(&self, x: &[f64]) -> Result<Vec<f64>, ObjectiveError> {
        self.check_point(x)?;
        Ok(self.compute_gradient(x))
    }

    fn hessian(&self, x: &[f64]) -> Result<Vec<Vec<f64>>, ObjectiveError> {
        self.check_point(x)?;
        Ok(self.compute_hessian(x))
    }

    fn evaluate(
        &self,
        x: &[f64],
        orders: DerivativeOrders,
    ) -> Result<EvaluationResult, ObjectiveError> {
        self.check_point(x)?;
        Ok(EvaluationResult {
            function: orders.value.then(|| self.compute_value(x)),
            derivative: orders.gradient.then(|| self.compute_gradient(x)),
            hessian: orders.hessian.then(|| self.compute_hessian(x)),
        })
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn arity(&self) -> Arity {
        (**self).arity()
    }

    fn compute_value(&self, x: &[f64]) -> f64 {
        (**self).compute_value(x)
    }

    fn compute_gradient(&self, x: &[f64]) -> Vec<f64> {
        (**self).compute_gradient(x)
    }

    fn compute_hessian(&self, x: &[f64]) -> Vec<Vec<f64>> {
        (**self).compute_hessian(x)
    }
}

/// Look up a coefficient, falling back to its default
#[inline]
pub(crate) fn coefficient(parameters: &Parameters, name: &str, default: f64) -> f64 {
    parameters.get(name).copied().unwrap_or(default)
}
