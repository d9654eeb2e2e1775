use thiserror::Error;

use crate::ir::{Operation, Qubit};

/// Errors raised by transpiler passes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PassError {
    /// The operation is not a single-qubit gate with a known unitary, so it
    /// has no decomposition into Pauli rotations.
    #[error(
        "don't know how to convert {operation}: it is not a 1-qubit operation with a known unitary"
    )]
    UnsupportedGate { operation: Operation },
}

/// Errors raised while building, editing or evaluating a [`crate::ir::Circuit`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("qubit {qubit} is acted on more than once in the same moment")]
    OverlappingQubits { qubit: Qubit },
    #[error("matrix of gate {label} is not unitary")]
    NotUnitary { label: String },
    #[error("operation {operation} has no known unitary")]
    NoUnitary { operation: Operation },
    #[error("cannot materialize the unitary of {num_qubits} qubits (at most {max})")]
    TooManyQubits { num_qubits: usize, max: usize },
    #[error("moment index {index} out of range for a circuit with {len} moments")]
    MomentOutOfRange { index: usize, len: usize },
    #[error("operation index {index} out of range for a moment with {len} operations")]
    OperationOutOfRange { index: usize, len: usize },
    #[error("replacement operation {operation} does not act on the replaced qubits")]
    QubitMismatch { operation: Operation },
}
