//! Gate set used by the VQE circuits.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

/// Rotation angle of a gate: either a constant or a slot in the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// Constant angle in radians.
    Fixed(f64),
    /// Index into the parameter vector supplied at evaluation time.
    Param(usize),
}

impl Angle {
    /// Parameter slot read by this angle, if any.
    pub fn param_index(&self) -> Option<usize> {
        match self {
            Angle::Fixed(_) => None,
            Angle::Param(idx) => Some(*idx),
        }
    }

    /// Resolve the angle against a parameter vector whose length has been validated.
    pub(crate) fn resolve(&self, params: &[f64]) -> f64 {
        match self {
            Angle::Fixed(value) => *value,
            Angle::Param(idx) => params[*idx],
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Fixed(value)
    }
}

/// Gates understood by the statevector engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Rotation around X axis.
    Rx(Angle),
    /// Rotation around Y axis.
    Ry(Angle),
    /// Rotation around Z axis.
    Rz(Angle),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled rotation around X axis.
    CRx(Angle),
}

impl Gate {
    /// Lowercase gate name.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Z => "z",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::CX => "cx",
            Gate::CZ => "cz",
            Gate::CRx(_) => "crx",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::H | Gate::X | Gate::Z | Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) => 1,
            Gate::CX | Gate::CZ | Gate::CRx(_) => 2,
        }
    }

    /// Rotation angle of a parametrized gate.
    pub fn angle(&self) -> Option<Angle> {
        match self {
            Gate::Rx(a) | Gate::Ry(a) | Gate::Rz(a) | Gate::CRx(a) => Some(*a),
            Gate::H | Gate::X | Gate::Z | Gate::CX | Gate::CZ => None,
        }
    }

    /// Parameter-shift rule that differentiates this gate exactly.
    pub fn shift_rule(&self) -> Option<ShiftRule> {
        match self {
            Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) => Some(ShiftRule::TwoTerm),
            Gate::CRx(_) => Some(ShiftRule::FourTerm),
            Gate::H | Gate::X | Gate::Z | Gate::CX | Gate::CZ => None,
        }
    }
}

const FOUR_TERM_NEAR: f64 = 0.25 + FRAC_1_SQRT_2 / 4.0;
const FOUR_TERM_FAR: f64 = 0.25 - FRAC_1_SQRT_2 / 4.0;
const THREE_PI_2: f64 = 3.0 * FRAC_PI_2;

const TWO_TERM: [(f64, f64); 2] = [(0.5, FRAC_PI_2), (-0.5, -FRAC_PI_2)];
const FOUR_TERM: [(f64, f64); 4] = [
    (FOUR_TERM_NEAR, FRAC_PI_2),
    (-FOUR_TERM_NEAR, -FRAC_PI_2),
    (-FOUR_TERM_FAR, THREE_PI_2),
    (FOUR_TERM_FAR, -THREE_PI_2),
];

/// Parameter-shift recipe for a gate generator.
///
/// The derivative with respect to the gate angle is `Σ c · f(θ + s)` over the
/// `(c, s)` pairs returned by [`ShiftRule::terms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftRule {
    /// Generator eigenvalues ±1/2 (single-qubit Pauli rotations).
    TwoTerm,
    /// Generator eigenvalues {0, ±1/2} (controlled Pauli rotations).
    FourTerm,
}

impl ShiftRule {
    /// `(coefficient, shift)` pairs of the rule.
    pub fn terms(&self) -> &'static [(f64, f64)] {
        match self {
            ShiftRule::TwoTerm => &TWO_TERM,
            ShiftRule::FourTerm => &FOUR_TERM,
        }
    }
}
