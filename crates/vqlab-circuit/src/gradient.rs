//! Parameter-shift gradients.
//!
//! Every gate occurrence that reads a parameter slot contributes
//! `Σ c · f(θ + s)` (see [`ShiftRule`](crate::gate::ShiftRule)) to that
//! slot's partial derivative, so slots shared between gates are handled by
//! the product rule.

use crate::circuit::Circuit;
use crate::error::CircuitResult;

/// Exact gradient of the circuit's expectation value at `params`.
pub fn parameter_shift(circuit: &Circuit, params: &[f64]) -> CircuitResult<Vec<f64>> {
    circuit.validate(params)?;

    let mut gradient = vec![0.0; params.len()];
    for (pos, instr) in circuit.instructions().iter().enumerate() {
        let Some(slot) = instr.gate.angle().and_then(|a| a.param_index()) else {
            continue;
        };
        let Some(rule) = instr.gate.shift_rule() else {
            continue;
        };
        gradient[slot] += rule
            .terms()
            .iter()
            .map(|&(coeff, shift)| coeff * circuit.run(params, Some((pos, shift))))
            .sum::<f64>();
    }

    Ok(gradient)
}
