//! Cost evaluator: the circuit expectation as a function of the parameters.

use crate::circuit::Circuit;
use crate::error::CircuitResult;
use crate::factory::{CircuitKind, create_circuit};
use crate::gradient::parameter_shift;

/// Scalar cost `params ↦ ⟨Z⟩` for one circuit template.
///
/// Carries its circuit explicitly so an optimizer step receives a plain value
/// rather than a closure.
#[derive(Debug, Clone, PartialEq)]
pub struct CostFunction {
    circuit: Circuit,
}

impl CostFunction {
    /// Cost of one of the built-in circuit variants.
    pub fn new(kind: CircuitKind) -> Self {
        Self {
            circuit: kind.template(),
        }
    }

    /// Cost of an arbitrary circuit template.
    pub fn from_circuit(circuit: Circuit) -> Self {
        Self { circuit }
    }

    /// The circuit template.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of parameters the cost expects.
    pub fn num_params(&self) -> usize {
        self.circuit.num_params()
    }

    /// Cost at `params`.
    pub fn evaluate(&self, params: &[f64]) -> CircuitResult<f64> {
        self.circuit.expectation(params)
    }

    /// Gradient of the cost at `params`.
    pub fn gradient(&self, params: &[f64]) -> CircuitResult<Vec<f64>> {
        parameter_shift(&self.circuit, params)
    }

    /// Cost and gradient at `params`.
    pub fn value_and_gradient(&self, params: &[f64]) -> CircuitResult<(f64, Vec<f64>)> {
        let gradient = self.gradient(params)?;
        let value = self.circuit.run(params, None);
        Ok((value, gradient))
    }
}

/// Cost of the circuit named by `circuit_type` at `params`.
pub fn cost(params: &[f64], circuit_type: &str) -> CircuitResult<f64> {
    create_circuit(params, circuit_type).map(|c| c.expectation())
}
