//! Optimizer step rules.

use vqlab_circuit::CostFunction;

use crate::error::{OptimError, OptimResult};

/// A single-step optimizer over a [`CostFunction`].
pub trait Optimizer {
    /// Take one step from `params`, returning the new parameters and the cost
    /// evaluated at the *old* parameters.
    fn step_and_cost(&self, cost: &CostFunction, params: &[f64]) -> OptimResult<(Vec<f64>, f64)>;
}

/// Plain gradient descent: `θ ← θ − η ∇f(θ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    stepsize: f64,
}

impl GradientDescent {
    /// Create a gradient-descent rule with step size `stepsize`.
    pub fn new(stepsize: f64) -> OptimResult<Self> {
        if !stepsize.is_finite() || stepsize <= 0.0 {
            return Err(OptimError::InvalidStepSize(stepsize));
        }
        Ok(Self { stepsize })
    }

    /// Step size η.
    pub fn stepsize(&self) -> f64 {
        self.stepsize
    }
}

impl Optimizer for GradientDescent {
    fn step_and_cost(&self, cost: &CostFunction, params: &[f64]) -> OptimResult<(Vec<f64>, f64)> {
        let (value, gradient) = cost.value_and_gradient(params)?;
        let next = params
            .iter()
            .zip(&gradient)
            .map(|(p, g)| p - self.stepsize * g)
            .collect();
        Ok((next, value))
    }
}
