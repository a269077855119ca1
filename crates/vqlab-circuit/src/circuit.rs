//! Parametrized circuit templates.
//!
//! A [`Circuit`] is a gate list whose rotation angles may reference slots in
//! a parameter vector, plus the qubit whose Pauli-Z expectation is measured.
//! Binding a parameter vector yields a [`BoundCircuit`], which evaluates to a
//! single real expectation value.

use serde::{Deserialize, Serialize};

use crate::error::{CircuitError, CircuitResult};
use crate::gate::{Angle, Gate};
use crate::statevector::Statevector;

/// A gate applied to specific qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Operand qubits; for controlled gates the control comes first.
    pub qubits: Vec<usize>,
}

/// A parametrized quantum circuit with a Pauli-Z observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: usize,
    num_params: usize,
    instructions: Vec<Instruction>,
    measured: Option<usize>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_params: 0,
            instructions: Vec::new(),
            measured: None,
        }
    }

    /// Circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of parameter slots (highest referenced slot + 1).
    pub fn num_params(&self) -> usize {
        self.num_params
    }

    /// Gate list in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Qubit whose Pauli-Z expectation is returned.
    pub fn measured_qubit(&self) -> Option<usize> {
        self.measured
    }

    /// Add a Hadamard gate.
    pub fn h(&mut self, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::H, vec![qubit])
    }

    /// Add a Pauli-X gate.
    pub fn x(&mut self, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::X, vec![qubit])
    }

    /// Add a Pauli-Z gate.
    pub fn z(&mut self, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::Z, vec![qubit])
    }

    /// Add an RX rotation.
    pub fn rx(&mut self, angle: impl Into<Angle>, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::Rx(angle.into()), vec![qubit])
    }

    /// Add an RY rotation.
    pub fn ry(&mut self, angle: impl Into<Angle>, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::Ry(angle.into()), vec![qubit])
    }

    /// Add an RZ rotation.
    pub fn rz(&mut self, angle: impl Into<Angle>, qubit: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::Rz(angle.into()), vec![qubit])
    }

    /// Add a CNOT gate.
    pub fn cx(&mut self, control: usize, target: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::CX, vec![control, target])
    }

    /// Add a CZ gate.
    pub fn cz(&mut self, q0: usize, q1: usize) -> CircuitResult<&mut Self> {
        self.push(Gate::CZ, vec![q0, q1])
    }

    /// Add a controlled RX rotation.
    pub fn crx(
        &mut self,
        angle: impl Into<Angle>,
        control: usize,
        target: usize,
    ) -> CircuitResult<&mut Self> {
        self.push(Gate::CRx(angle.into()), vec![control, target])
    }

    /// Measure the Pauli-Z expectation of `qubit`.
    pub fn measure_z(&mut self, qubit: usize) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit, "measure_z")?;
        self.measured = Some(qubit);
        Ok(self)
    }

    /// Bind a parameter vector.
    pub fn bind(&self, params: &[f64]) -> CircuitResult<BoundCircuit> {
        self.validate(params)?;
        Ok(BoundCircuit {
            circuit: self.clone(),
            params: params.to_vec(),
        })
    }

    /// Evaluate the observable for a parameter vector.
    pub fn expectation(&self, params: &[f64]) -> CircuitResult<f64> {
        self.validate(params)?;
        Ok(self.run(params, None))
    }

    /// Check that `params` fits this circuit and that an observable is set.
    pub fn validate(&self, params: &[f64]) -> CircuitResult<()> {
        if self.measured.is_none() {
            return Err(CircuitError::MissingObservable(self.name.clone()));
        }
        if params.len() != self.num_params {
            return Err(CircuitError::ParameterCountMismatch {
                circuit: self.name.clone(),
                expected: self.num_params,
                got: params.len(),
            });
        }
        Ok(())
    }

    /// Simulate with validated parameters, optionally offsetting the angle
    /// of the instruction at `shift.0` by `shift.1`.
    pub(crate) fn run(&self, params: &[f64], shift: Option<(usize, f64)>) -> f64 {
        let mut state = Statevector::new(self.num_qubits);
        for (pos, instr) in self.instructions.iter().enumerate() {
            let mut theta = instr.gate.angle().map_or(0.0, |a| a.resolve(params));
            if let Some((at, delta)) = shift {
                if at == pos {
                    theta += delta;
                }
            }
            state.apply(&instr.gate, &instr.qubits, theta);
        }
        self.measured.map_or(0.0, |q| state.expectation_z(q))
    }

    fn push(&mut self, gate: Gate, qubits: Vec<usize>) -> CircuitResult<&mut Self> {
        let name = gate.name();
        for (i, &q) in qubits.iter().enumerate() {
            self.check_qubit(q, name)?;
            if qubits[..i].contains(&q) {
                return Err(CircuitError::DuplicateQubit {
                    qubit: q,
                    gate: name,
                });
            }
        }
        if let Some(slot) = gate.angle().and_then(|a| a.param_index()) {
            self.num_params = self.num_params.max(slot + 1);
        }
        self.instructions.push(Instruction { gate, qubits });
        Ok(self)
    }

    fn check_qubit(&self, qubit: usize, gate: &'static str) -> CircuitResult<()> {
        if qubit >= self.num_qubits {
            return Err(CircuitError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate,
            });
        }
        Ok(())
    }
}

/// A circuit with its parameters attached; evaluating it takes no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundCircuit {
    circuit: Circuit,
    params: Vec<f64>,
}

impl BoundCircuit {
    /// Expectation value of the measured observable.
    pub fn expectation(&self) -> f64 {
        self.circuit.run(&self.params, None)
    }

    /// The underlying template.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// The bound parameter vector.
    pub fn params(&self) -> &[f64] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_slots_counted() {
        let mut c = Circuit::new("t", 2);
        c.rx(Angle::Param(0), 0).unwrap();
        c.ry(Angle::Param(2), 1).unwrap();
        c.rz(0.5, 1).unwrap();
        assert_eq!(c.num_params(), 3);
        assert_eq!(c.instructions().len(), 3);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut c = Circuit::new("t", 2);
        let err = c.cx(0, 2).unwrap_err();
        assert!(matches!(err, CircuitError::QubitOutOfRange { qubit: 2, .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut c = Circuit::new("t", 2);
        let err = c.cx(1, 1).unwrap_err();
        assert!(matches!(err, CircuitError::DuplicateQubit { qubit: 1, .. }));
    }

    #[test]
    fn test_missing_observable() {
        let mut c = Circuit::new("t", 1);
        c.h(0).unwrap();
        assert!(matches!(
            c.expectation(&[]),
            Err(CircuitError::MissingObservable(_))
        ));
    }

    #[test]
    fn test_bind_checks_length() {
        let mut c = Circuit::new("t", 1);
        c.rx(Angle::Param(0), 0).unwrap().measure_z(0).unwrap();
        assert!(c.bind(&[0.1, 0.2]).is_err());

        let bound = c.bind(&[0.0]).unwrap();
        assert_eq!(bound.params(), &[0.0]);
        assert!((bound.expectation() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shifted_run_only_moves_one_gate() {
        let mut c = Circuit::new("t", 1);
        c.rx(Angle::Param(0), 0).unwrap();
        c.rx(Angle::Param(0), 0).unwrap();
        c.measure_z(0).unwrap();

        let theta = 0.3;
        let shifted = c.run(&[theta], Some((1, 0.2)));
        assert!((shifted - (2.0 * theta + 0.2).cos()).abs() < 1e-12);
    }
}
