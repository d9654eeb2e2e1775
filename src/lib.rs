//! Conversion of quantum circuits into single-qubit Pauli rotations.
//!
//! The [`transpiler::ConvertToPauliRotations`] pass rewrites every
//! single-qubit gate with a known unitary into a short chain of
//! [`ir::PauliRotation`] gates (Pauli string phasors restricted to one
//! qubit), optionally leaving Clifford gates untouched.
//!
//! ```
//! use pauli_phasor::ir::{Circuit, CliffordGate, Gate, Pauli, Qubit, UnitaryGate};
//! use pauli_phasor::transpiler::convert_to_pauli_rotations;
//!
//! let q = Qubit(0);
//! let mut circuit = Circuit::from_ops(vec![
//!     Gate::from(UnitaryGate::pauli_power(Pauli::Y, 0.25)).on(&[q]),
//!     Gate::from(CliffordGate::H).on(&[q]),
//! ]);
//! convert_to_pauli_rotations(&mut circuit, false, false).unwrap();
//! assert_eq!(circuit.all_operations().count(), 3);
//! ```

pub mod error;
pub mod ir;
pub mod linalg;
pub mod transpiler;

pub use error::{CircuitError, PassError};
