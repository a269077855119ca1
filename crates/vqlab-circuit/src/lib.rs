//! vqlab circuits
//!
//! Parametrized two-qubit circuits for the VQE experiment, evaluated on a
//! small exact statevector engine, with parameter-shift gradients for the
//! optimizer.
//!
//! # Example
//!
//! ```rust
//! use vqlab_circuit::{CircuitKind, CostFunction, create_circuit};
//!
//! let circuit = create_circuit(&[0.3, 1.2], "default").unwrap();
//! let energy = circuit.expectation();
//! assert!((-1.0..=1.0).contains(&energy));
//!
//! let cost = CostFunction::new(CircuitKind::Default);
//! let gradient = cost.gradient(&[0.3, 1.2]).unwrap();
//! assert_eq!(gradient.len(), 2);
//!
//! assert!(create_circuit(&[0.3, 1.2], "bogus").is_err());
//! ```

pub mod circuit;
pub mod cost;
pub mod error;
pub mod factory;
pub mod gate;
pub mod gradient;
pub mod statevector;

pub use circuit::{BoundCircuit, Circuit, Instruction};
pub use cost::{CostFunction, cost};
pub use error::{CircuitError, CircuitResult};
pub use factory::{CircuitKind, create_circuit};
pub use gate::{Angle, Gate, ShiftRule};
pub use gradient::parameter_shift;
pub use statevector::Statevector;
