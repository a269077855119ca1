//! Circuit factory for the two supported VQE wirings.
//!
//! Both variants act on two qubits, take two parameters and measure ⟨Z⟩ on
//! qubit 0:
//!
//! ```text
//! default:    q0 ─RX(p0)──●──        alternate:  q0 ─H──●───────────●──
//!             q1 ─RY(p1)──X──                    q1 ────CRX(p0)─RY(p1)─X──
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{BoundCircuit, Circuit};
use crate::error::{CircuitError, CircuitResult};
use crate::gate::Angle;

/// Circuit-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitKind {
    /// RX/RY rotations followed by a CNOT.
    #[default]
    Default,
    /// Hadamard, controlled RX, RY and a CNOT.
    Alternate,
}

impl CircuitKind {
    /// All supported variants.
    pub const ALL: [CircuitKind; 2] = [CircuitKind::Default, CircuitKind::Alternate];

    /// Tag string used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitKind::Default => "default",
            CircuitKind::Alternate => "alternate",
        }
    }

    /// Number of parameters the variant consumes.
    pub fn num_params(&self) -> usize {
        2
    }

    /// Number of qubits the variant acts on.
    pub fn num_qubits(&self) -> usize {
        2
    }

    /// Build the unbound template for this variant.
    pub fn template(&self) -> Circuit {
        let mut circuit = Circuit::new(self.as_str(), self.num_qubits());
        let built = match self {
            CircuitKind::Default => build_default(&mut circuit),
            CircuitKind::Alternate => build_alternate(&mut circuit),
        };
        // Operands are constants within the register, so the builder cannot fail.
        debug_assert!(built.is_ok());
        circuit
    }
}

fn build_default(c: &mut Circuit) -> CircuitResult<()> {
    c.rx(Angle::Param(0), 0)?
        .ry(Angle::Param(1), 1)?
        .cx(0, 1)?
        .measure_z(0)?;
    Ok(())
}

fn build_alternate(c: &mut Circuit) -> CircuitResult<()> {
    c.h(0)?
        .crx(Angle::Param(0), 0, 1)?
        .ry(Angle::Param(1), 1)?
        .cx(0, 1)?
        .measure_z(0)?;
    Ok(())
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CircuitKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(CircuitKind::Default),
            "alternate" => Ok(CircuitKind::Alternate),
            other => Err(CircuitError::UnknownCircuitType(other.to_string())),
        }
    }
}

/// Build the circuit named by `circuit_type` and bind `params` to it.
///
/// The returned [`BoundCircuit`] evaluates to the ⟨Z₀⟩ expectation value.
pub fn create_circuit(params: &[f64], circuit_type: &str) -> CircuitResult<BoundCircuit> {
    let kind: CircuitKind = circuit_type.parse()?;
    tracing::trace!(circuit = %kind, ?params, "binding circuit");
    kind.template().bind(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_known_tags() {
        for kind in CircuitKind::ALL {
            assert_eq!(kind.as_str().parse::<CircuitKind>().unwrap(), kind);
            assert!(create_circuit(&[0.1, 0.2], kind.as_str()).is_ok());
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = create_circuit(&[0.1, 0.2], "bogus").unwrap_err();
        assert!(matches!(err, CircuitError::UnknownCircuitType(ref t) if t == "bogus"));
    }

    #[test]
    fn test_wrong_param_count() {
        let err = create_circuit(&[0.1], "default").unwrap_err();
        assert!(matches!(
            err,
            CircuitError::ParameterCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_templates_have_two_params() {
        for kind in CircuitKind::ALL {
            let t = kind.template();
            assert_eq!(t.num_params(), kind.num_params());
            assert_eq!(t.num_qubits(), 2);
            assert_eq!(t.measured_qubit(), Some(0));
        }
    }

    #[test]
    fn test_default_expectation_is_cos_p0() {
        for &(a, b) in &[(0.0, 0.0), (0.7, 1.3), (PI, 0.4), (2.2, -1.0)] {
            let value = create_circuit(&[a, b], "default").unwrap().expectation();
            assert!((value - f64::cos(a)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_alternate_expectation_vanishes() {
        // H on the measured qubit, and every later gate uses it only as a control.
        for &(a, b) in &[(0.0, 0.0), (0.7, 1.3), (PI, 0.4)] {
            let value = create_circuit(&[a, b], "alternate").unwrap().expectation();
            assert!(value.abs() < 1e-12);
        }
    }

    #[test]
    fn test_serde_tag() {
        assert_eq!(CircuitKind::Alternate.to_string(), "alternate");
        assert_eq!(CircuitKind::default(), CircuitKind::Default);
    }
}
