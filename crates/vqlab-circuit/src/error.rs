//! Error types for the circuit crate.

use thiserror::Error;

/// Errors that can occur while building or evaluating circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// Circuit-type tag is not one of the known variants.
    #[error("Unknown circuit type: '{0}'. Available: default, alternate")]
    UnknownCircuitType(String),

    /// Parameter vector length does not match the circuit.
    #[error("Circuit '{circuit}' expects {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the circuit.
        circuit: String,
        /// Number of parameter slots in the circuit.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// Qubit index outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit (gate: {gate})")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Register width.
        num_qubits: usize,
        /// Gate being added.
        gate: &'static str,
    },

    /// The same qubit was used twice in one gate.
    #[error("Duplicate qubit {qubit} in gate {gate}")]
    DuplicateQubit {
        /// The duplicated qubit index.
        qubit: usize,
        /// Gate being added.
        gate: &'static str,
    },

    /// Circuit has nothing to measure.
    #[error("Circuit '{0}' has no measured observable")]
    MissingObservable(String),
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
