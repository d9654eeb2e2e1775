use nalgebra::Matrix2;
use num_complex::Complex64;
use std::fmt;

use super::clifford::CliffordGate;
use super::operations::{Operation, Qubit};
use super::pauli::Pauli;
use crate::error::CircuitError;
use crate::linalg::{is_unitary, Unitary2, UNITARY_TOLERANCE};

/// Quantum gate.
///
/// A closed set of variants: the canonical Pauli rotation, single-qubit
/// Cliffords, other single-qubit gates with a known matrix, and opaque gates
/// with no known unitary.
///
/// # Examples
///
/// ```
/// use pauli_phasor::ir::{CliffordGate, Gate, Pauli, PauliRotation, Qubit};
/// let h = Gate::from(CliffordGate::H);
/// let phasor = Gate::from(PauliRotation::new(Pauli::Z, 0.25));
/// assert_eq!(h.num_qubits(), 1);
/// assert_eq!(phasor.on(&[Qubit(0)]).qubits, vec![Qubit(0)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Rotation about a single Pauli axis (a one-qubit Pauli string phasor).
    PauliRotation(PauliRotation),
    /// Single-qubit Clifford gate
    Clifford(CliffordGate),
    /// Single-qubit gate with a known unitary
    Unitary(UnitaryGate),
    /// Gate with no known unitary
    Opaque(OpaqueGate),
}

impl Gate {
    /// Number of qubits the gate is defined on.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::PauliRotation(_) | Gate::Clifford(_) | Gate::Unitary(_) => 1,
            Gate::Opaque(gate) => gate.num_qubits,
        }
    }

    /// The unitary of a single-qubit gate, if one is known.
    pub fn unitary(&self) -> Option<Unitary2> {
        match self {
            Gate::PauliRotation(rotation) => Some(rotation.unitary()),
            Gate::Clifford(clifford) => Some(clifford.unitary()),
            Gate::Unitary(gate) => Some(*gate.matrix()),
            Gate::Opaque(_) => None,
        }
    }

    /// Applies the gate to `qubits`.
    pub fn on(self, qubits: &[Qubit]) -> Operation {
        Operation::new(self, qubits.to_vec())
    }
}

impl From<PauliRotation> for Gate {
    fn from(rotation: PauliRotation) -> Self {
        Gate::PauliRotation(rotation)
    }
}

impl From<CliffordGate> for Gate {
    fn from(clifford: CliffordGate) -> Self {
        Gate::Clifford(clifford)
    }
}

impl From<UnitaryGate> for Gate {
    fn from(gate: UnitaryGate) -> Self {
        Gate::Unitary(gate)
    }
}

impl From<OpaqueGate> for Gate {
    fn from(gate: OpaqueGate) -> Self {
        Gate::Opaque(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::PauliRotation(rotation) => fmt::Display::fmt(rotation, f),
            Gate::Clifford(clifford) => fmt::Display::fmt(clifford, f),
            Gate::Unitary(gate) => f.write_str(gate.label()),
            Gate::Opaque(gate) => f.write_str(&gate.name),
        }
    }
}

/// Rotation by `exponent` half turns about a Pauli axis.
///
/// The exponent is kept in `(-1, 1]`; `P^t` and `P^(t+2)` are the same gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauliRotation {
    axis: Pauli,
    exponent: f64,
}

impl PauliRotation {
    pub fn new(axis: Pauli, exponent: f64) -> Self {
        Self {
            axis,
            exponent: canonicalize_half_turns(exponent),
        }
    }

    pub fn axis(&self) -> Pauli {
        self.axis
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn unitary(&self) -> Unitary2 {
        self.axis.power(self.exponent)
    }
}

impl fmt::Display for PauliRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.axis)?;
        if self.exponent != 1.0 {
            write!(f, "^{}", format_exponent(self.exponent))?;
        }
        Ok(())
    }
}

/// Maps half turns into `(-1, 1]`.
pub fn canonicalize_half_turns(half_turns: f64) -> f64 {
    1.0 - (1.0 - half_turns).rem_euclid(2.0)
}

/// Formats an exponent with three significant digits, dropping trailing
/// zeros (`0.125`, `-0.5`, `0.333`).
pub fn format_exponent(value: f64) -> String {
    const SIGNIFICANT_DIGITS: i32 = 3;
    if value == value.trunc() {
        return format!("{}", value as i64);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// A labelled single-qubit gate with a known matrix.
///
/// The matrix is always unitary: [`UnitaryGate::new`] checks it, the other
/// constructors build one.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryGate {
    label: String,
    matrix: Unitary2,
}

impl UnitaryGate {
    /// Wraps `matrix`, rejecting it unless `U†U ≈ I`.
    pub fn new(label: impl Into<String>, matrix: Unitary2) -> Result<Self, CircuitError> {
        let label = label.into();
        if !is_unitary(&matrix, UNITARY_TOLERANCE) {
            return Err(CircuitError::NotUnitary { label });
        }
        Ok(Self { label, matrix })
    }

    fn from_unitary(label: impl Into<String>, matrix: Unitary2) -> Self {
        Self {
            label: label.into(),
            matrix,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matrix(&self) -> &Unitary2 {
        &self.matrix
    }

    /// `P^t`, a power of a Pauli gate (`Y^0.25`, `Z^0.125`, ...).
    pub fn pauli_power(axis: Pauli, exponent: f64) -> Self {
        let label = if exponent == 1.0 {
            axis.to_string()
        } else {
            format!("{axis}^{}", format_exponent(exponent))
        };
        Self::from_unitary(label, axis.power(exponent))
    }

    /// T gate (`Z^0.25`)
    pub fn t() -> Self {
        Self::from_unitary("T", Pauli::Z.power(0.25))
    }

    /// Rotation around the X axis by `theta` radians.
    pub fn rx(theta: f64) -> Self {
        Self::from_unitary(format!("Rx({theta})"), axis_rotation(Pauli::X, theta))
    }

    /// Rotation around the Y axis by `theta` radians.
    pub fn ry(theta: f64) -> Self {
        Self::from_unitary(format!("Ry({theta})"), axis_rotation(Pauli::Y, theta))
    }

    /// Rotation around the Z axis by `theta` radians.
    pub fn rz(theta: f64) -> Self {
        Self::from_unitary(format!("Rz({theta})"), axis_rotation(Pauli::Z, theta))
    }

    /// General unitary gate U(theta, phi, lambda)
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let (s, c) = (theta / 2.0).sin_cos();
        let matrix = Matrix2::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        );
        Self::from_unitary(format!("U({theta}, {phi}, {lambda})"), matrix)
    }
}

/// `exp(-i theta P / 2)`
fn axis_rotation(axis: Pauli, theta: f64) -> Unitary2 {
    let (s, c) = (theta / 2.0).sin_cos();
    Unitary2::identity() * Complex64::new(c, 0.0) + axis.matrix() * Complex64::new(0.0, -s)
}

/// A gate without a known unitary, e.g. a custom multi-qubit gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueGate {
    pub name: String,
    pub num_qubits: usize,
}

impl OpaqueGate {
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
        }
    }
}
