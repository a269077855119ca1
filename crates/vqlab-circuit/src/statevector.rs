//! Statevector simulation engine.
//!
//! Dense amplitudes with little-endian qubit ordering: bit `q` of a basis
//! index is the state of qubit `q`.

use num_complex::Complex64;

use crate::gate::Gate;

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probabilities in the computational basis.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a gate. `theta` is the resolved angle and is ignored by fixed gates.
    ///
    /// Qubit indices are validated by the circuit builder.
    pub fn apply(&mut self, gate: &Gate, qubits: &[usize], theta: f64) {
        match gate {
            Gate::H => self.apply_h(qubits[0]),
            Gate::X => self.apply_x(qubits[0]),
            Gate::Z => self.apply_z(qubits[0]),
            Gate::Rx(_) => self.apply_rx(qubits[0], theta),
            Gate::Ry(_) => self.apply_ry(qubits[0], theta),
            Gate::Rz(_) => self.apply_rz(qubits[0], theta),
            Gate::CX => self.apply_cx(qubits[0], qubits[1]),
            Gate::CZ => self.apply_cz(qubits[0], qubits[1]),
            Gate::CRx(_) => self.apply_crx(qubits[0], qubits[1], theta),
        }
    }

    /// Expectation value of Pauli-Z on one qubit, in [-1, 1].
    pub fn expectation_z(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, amp)| {
                let p = amp.norm_sqr();
                if i & mask == 0 { p } else { -p }
            })
            .sum()
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.rotate_x_pair(i, i | mask, theta);
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let c_mask = 1 << control;
        let t_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if i & c_mask != 0 && i & t_mask == 0 {
                let j = i | t_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, q0: usize, q1: usize) {
        let mask = (1 << q0) | (1 << q1);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == mask {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_crx(&mut self, control: usize, target: usize, theta: f64) {
        let c_mask = 1 << control;
        let t_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if i & c_mask != 0 && i & t_mask == 0 {
                self.rotate_x_pair(i, i | t_mask, theta);
            }
        }
    }

    /// RX(θ) on the amplitude pair (|..0..⟩, |..1..⟩).
    fn rotate_x_pair(&mut self, i: usize, j: usize, theta: f64) {
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        let a = self.amplitudes[i];
        let b = self.amplitudes[j];
        self.amplitudes[i] = c * a + neg_i_s * b;
        self.amplitudes[j] = neg_i_s * a + c * b;
    }
}
