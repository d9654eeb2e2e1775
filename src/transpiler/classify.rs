use log::trace;

use crate::ir::{CliffordGate, Gate, Operation, UnitaryGate};
use crate::linalg::Unitary2;

/// A single-qubit gate that has a known matrix and can be decomposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SingleQubitGate<'a> {
    Clifford(&'a CliffordGate),
    Unitary(&'a UnitaryGate),
}

impl SingleQubitGate<'_> {
    pub fn unitary(&self) -> Unitary2 {
        match self {
            SingleQubitGate::Clifford(clifford) => clifford.unitary(),
            SingleQubitGate::Unitary(gate) => *gate.matrix(),
        }
    }
}

/// How the conversion treats one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'a> {
    /// Already a single-qubit Pauli rotation.
    AlreadyCanonical,
    /// A Clifford gate kept as is.
    PreserveAsClifford,
    /// A single-qubit gate to be rewritten into Pauli rotations.
    Decomposable(SingleQubitGate<'a>),
    /// No decomposition rule applies.
    Unsupported,
}

/// Decides the conversion path of `op` from its gate variant and arity.
pub fn classify(op: &Operation, keep_clifford: bool) -> Classification<'_> {
    let single_qubit = op.qubits.len() == 1;
    let classification = match &op.gate {
        Gate::PauliRotation(_) if single_qubit => Classification::AlreadyCanonical,
        Gate::Clifford(_) if single_qubit && keep_clifford => Classification::PreserveAsClifford,
        Gate::Clifford(clifford) if single_qubit => {
            Classification::Decomposable(SingleQubitGate::Clifford(clifford))
        }
        Gate::Unitary(gate) if single_qubit => {
            Classification::Decomposable(SingleQubitGate::Unitary(gate))
        }
        Gate::PauliRotation(_) | Gate::Clifford(_) | Gate::Unitary(_) | Gate::Opaque(_) => {
            Classification::Unsupported
        }
    };
    trace!("classified {op} as {classification:?}");
    classification
}
