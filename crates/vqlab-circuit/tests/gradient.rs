//! Parameter-shift gradients against central finite differences.

use approx::assert_relative_eq;
use vqlab_circuit::{Angle, Circuit, CircuitKind, CostFunction, parameter_shift};

fn finite_difference(f: &CostFunction, params: &[f64]) -> Vec<f64> {
    let h = 1e-6;
    (0..params.len())
        .map(|i| {
            let mut plus = params.to_vec();
            let mut minus = params.to_vec();
            plus[i] += h;
            minus[i] -= h;
            (f.evaluate(&plus).unwrap() - f.evaluate(&minus).unwrap()) / (2.0 * h)
        })
        .collect()
}

#[test]
fn default_circuit_matches_finite_difference() {
    let f = CostFunction::new(CircuitKind::Default);
    for params in [[0.3, 1.1], [2.5, -0.4], [-1.2, 0.9]] {
        let exact = f.gradient(&params).unwrap();
        let approx = finite_difference(&f, &params);
        for (e, a) in exact.iter().zip(&approx) {
            assert_relative_eq!(*e, *a, epsilon = 1e-6);
        }
        assert_relative_eq!(exact[0], -params[0].sin(), epsilon = 1e-12);
    }
}

#[test]
fn alternate_circuit_gradient_is_zero() {
    let f = CostFunction::new(CircuitKind::Alternate);
    let grad = f.gradient(&[0.7, 1.3]).unwrap();
    assert_eq!(grad.len(), 2);
    for g in grad {
        assert_relative_eq!(g, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn controlled_rotation_uses_four_term_rule() {
    // H on the control, CRX on the target: ⟨Z1⟩ = 1/2 + cos(θ)/2.
    let mut circuit = Circuit::new("crx", 2);
    circuit
        .h(0)
        .unwrap()
        .crx(Angle::Param(0), 0, 1)
        .unwrap()
        .measure_z(1)
        .unwrap();

    for theta in [0.0, 0.4, 1.7, 3.0] {
        let value = circuit.expectation(&[theta]).unwrap();
        assert_relative_eq!(value, 0.5 + theta.cos() / 2.0, epsilon = 1e-12);

        let grad = parameter_shift(&circuit, &[theta]).unwrap();
        assert_relative_eq!(grad[0], -theta.sin() / 2.0, epsilon = 1e-10);
    }
}

#[test]
fn shared_slot_sums_contributions() {
    let mut circuit = Circuit::new("shared", 1);
    circuit
        .ry(Angle::Param(0), 0)
        .unwrap()
        .ry(Angle::Param(0), 0)
        .unwrap()
        .measure_z(0)
        .unwrap();

    let theta = 0.35;
    let grad = parameter_shift(&circuit, &[theta]).unwrap();
    assert_relative_eq!(grad[0], -2.0 * (2.0 * theta).sin(), epsilon = 1e-10);
}
