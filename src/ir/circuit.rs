use nalgebra::DMatrix;
use num_complex::Complex64;

use super::operations::{Operation, Qubit};
use crate::error::CircuitError;
use crate::linalg::embed_single_qubit;

/// Widest register [`Circuit::unitary`] will build a dense matrix for.
pub const MAX_UNITARY_QUBITS: usize = 14;

/// A set of operations that act on pairwise-disjoint qubits and happen at
/// the same time step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moment {
    operations: Vec<Operation>,
}

impl Moment {
    /// Creates a moment, rejecting operations that share a qubit.
    pub fn new(operations: Vec<Operation>) -> Result<Self, CircuitError> {
        let mut moment = Self::default();
        for op in operations {
            moment.add_operation(op)?;
        }
        Ok(moment)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether any operation in the moment touches one of `qubits`.
    pub fn operates_on(&self, qubits: &[Qubit]) -> bool {
        self.operations.iter().any(|op| op.acts_on_any(qubits))
    }

    /// Adds an operation on qubits that are still free in this moment.
    pub fn add_operation(&mut self, op: Operation) -> Result<(), CircuitError> {
        for (i, qubit) in op.qubits.iter().enumerate() {
            if op.qubits[..i].contains(qubit) || self.operates_on(std::slice::from_ref(qubit)) {
                return Err(CircuitError::OverlappingQubits { qubit: *qubit });
            }
        }
        self.operations.push(op);
        Ok(())
    }
}

/// Intermediate Representation of a Quantum Circuit.
///
/// A `Circuit` is an ordered sequence of moments. Two circuits are equal
/// when their moments hold the same operations in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    /// Creates a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a circuit from moments, kept as given.
    pub fn from_moments(moments: Vec<Moment>) -> Self {
        Self { moments }
    }

    /// Builds a circuit by appending each operation at the earliest moment
    /// that keeps it after everything already on its qubits.
    pub fn from_ops(ops: impl IntoIterator<Item = Operation>) -> Self {
        let mut circuit = Self::new();
        for op in ops {
            circuit.append(op);
        }
        circuit
    }

    /// Adds an operation to the circuit, right after the last moment that
    /// touches any of its qubits.
    pub fn append(&mut self, op: Operation) {
        let index = self
            .moments
            .iter()
            .rposition(|moment| moment.operates_on(&op.qubits))
            .map_or(0, |last| last + 1);
        if index == self.moments.len() {
            self.moments.push(Moment::default());
        }
        // The target moment is free on these qubits by construction.
        self.moments[index].operations.push(op);
    }

    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// All operations in moment order.
    pub fn all_operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments
            .iter()
            .flat_map(|moment| moment.operations.iter())
    }

    /// Sorted list of every qubit an operation acts on.
    pub fn all_qubits(&self) -> Vec<Qubit> {
        let mut qubits: Vec<Qubit> = self
            .all_operations()
            .flat_map(|op| op.qubits.iter().copied())
            .collect();
        qubits.sort();
        qubits.dedup();
        qubits
    }

    /// One more than the largest qubit index in use.
    pub fn num_qubits(&self) -> usize {
        self.all_qubits().last().map_or(0, |q| q.0 + 1)
    }

    /// Replaces the operation at `(moment, position)` with `replacement`.
    ///
    /// The first replacement operation takes the original slot; the others
    /// follow in the next moments. When those moments are not free on the
    /// original qubits, empty moments are inserted in front of the next
    /// moment that uses them, so nothing else changes relative order. An
    /// empty replacement deletes the operation.
    pub fn replace_operation(
        &mut self,
        moment: usize,
        position: usize,
        replacement: Vec<Operation>,
    ) -> Result<(), CircuitError> {
        let original = self.operation_at(moment, position)?;
        let qubits = original.qubits.clone();
        if let Some(op) = replacement
            .iter()
            .find(|op| op.qubits.iter().any(|q| !qubits.contains(q)))
        {
            return Err(CircuitError::QubitMismatch {
                operation: op.clone(),
            });
        }
        self.splice_chain(moment, position, &qubits, replacement);
        Ok(())
    }

    /// [`Circuit::replace_operation`] without the checks. The slot must exist
    /// and every replacement must act within `qubits`, the qubits of the
    /// operation being replaced.
    pub(crate) fn splice_chain(
        &mut self,
        moment: usize,
        position: usize,
        qubits: &[Qubit],
        replacement: Vec<Operation>,
    ) {
        let mut replacement = replacement.into_iter();
        let Some(first) = replacement.next() else {
            self.moments[moment].operations.remove(position);
            return;
        };
        self.moments[moment].operations[position] = first;

        let rest: Vec<Operation> = replacement.collect();
        if rest.is_empty() {
            return;
        }
        let next_busy = (moment + 1..self.moments.len())
            .find(|&i| self.moments[i].operates_on(qubits))
            .unwrap_or(self.moments.len());
        let last_needed = moment + rest.len();
        if last_needed >= next_busy {
            for _ in 0..=last_needed - next_busy {
                self.moments.insert(next_busy, Moment::default());
            }
        }
        for (offset, op) in rest.into_iter().enumerate() {
            self.moments[moment + 1 + offset].operations.push(op);
        }
    }

    fn operation_at(&self, moment: usize, position: usize) -> Result<&Operation, CircuitError> {
        let len = self.moments.len();
        let ops = &self
            .moments
            .get(moment)
            .ok_or(CircuitError::MomentOutOfRange { index: moment, len })?
            .operations;
        ops.get(position).ok_or(CircuitError::OperationOutOfRange {
            index: position,
            len: ops.len(),
        })
    }

    /// The unitary of the whole circuit over qubits `0..num_qubits()`, with
    /// qubit 0 as the most significant tensor factor.
    ///
    /// Fails on any operation that is not a single-qubit gate with a known
    /// matrix, and on registers wider than [`MAX_UNITARY_QUBITS`].
    pub fn unitary(&self) -> Result<DMatrix<Complex64>, CircuitError> {
        let num_qubits = self.num_qubits();
        if num_qubits > MAX_UNITARY_QUBITS {
            return Err(CircuitError::TooManyQubits {
                num_qubits,
                max: MAX_UNITARY_QUBITS,
            });
        }
        let dim = 1usize << num_qubits;
        let mut total = DMatrix::<Complex64>::identity(dim, dim);
        for op in self.all_operations() {
            let matrix = match (op.gate.unitary(), op.qubits.as_slice()) {
                (Some(matrix), [_]) => matrix,
                _ => {
                    return Err(CircuitError::NoUnitary {
                        operation: op.clone(),
                    })
                }
            };
            total = embed_single_qubit(&matrix, op.qubits[0].0, num_qubits) * total;
        }
        Ok(total)
    }
}
