use log::{debug, warn};

use super::classify::{classify, Classification, SingleQubitGate};
use super::config::ConvertConfig;
use super::pass::Pass;
use super::pauli_rotations::{
    is_clifford_rotation, single_qubit_matrix_to_pauli_rotations, to_quarter_turns,
};
use crate::error::PassError;
use crate::ir::{Circuit, CliffordGate, Gate, Operation, PauliRotation, Qubit};

/// Rewrites every single-qubit gate with a known unitary into Pauli
/// rotations.
///
/// Pauli rotations are left alone. With `keep_clifford`, Clifford gates are
/// left alone too and Clifford terms of other decompositions come out as
/// Clifford gates. Operations with no decomposition either abort the pass
/// or, with `ignore_failures`, stay where they are.
#[derive(Debug, Clone, Default)]
pub struct ConvertToPauliRotations {
    config: ConvertConfig,
}

impl ConvertToPauliRotations {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Converts `circuit` in place.
    ///
    /// Unsupported operations are found before anything is rewritten, so
    /// on error the circuit is unchanged.
    pub fn optimize_circuit(&self, circuit: &mut Circuit) -> Result<(), PassError> {
        for op in circuit.all_operations() {
            let classification = classify(op, self.config.keep_clifford);
            if !matches!(classification, Classification::Unsupported) {
                continue;
            }
            if !self.config.ignore_failures {
                return Err(PassError::UnsupportedGate {
                    operation: op.clone(),
                });
            }
            warn!("leaving unsupported operation {op} unconverted");
        }

        let mut moment = 0;
        while moment < circuit.len() {
            let mut position = 0;
            while position < circuit.moments()[moment].operations().len() {
                let op = &circuit.moments()[moment].operations()[position];
                let Some(replacement) = self.convert_one(op) else {
                    position += 1;
                    continue;
                };
                let removed = replacement.is_empty();
                debug!(
                    "moment {moment}: {op} -> [{}]",
                    replacement
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                let qubits = op.qubits.clone();
                circuit.splice_chain(moment, position, &qubits, replacement);
                if !removed {
                    position += 1;
                }
            }
            moment += 1;
        }
        Ok(())
    }

    /// The replacement for one operation, or `None` to keep it.
    fn convert_one(&self, op: &Operation) -> Option<Vec<Operation>> {
        match classify(op, self.config.keep_clifford) {
            Classification::AlreadyCanonical
            | Classification::PreserveAsClifford
            | Classification::Unsupported => None,
            Classification::Decomposable(gate) => Some(self.decompose(gate, op.qubits[0])),
        }
    }

    /// The Pauli rotation chain of a single-qubit gate on `qubit`.
    pub fn decompose(&self, gate: SingleQubitGate<'_>, qubit: Qubit) -> Vec<Operation> {
        let tolerance = self.config.tolerance;
        let rotations = single_qubit_matrix_to_pauli_rotations(&gate.unitary(), tolerance);
        let mut out: Vec<Operation> = Vec::with_capacity(rotations.len());
        for (axis, half_turns) in rotations {
            if self.config.keep_clifford && is_clifford_rotation(half_turns, tolerance) {
                let clifford = CliffordGate::from_quarter_turns(axis, to_quarter_turns(half_turns));
                if let Some(Operation {
                    gate: Gate::Clifford(previous),
                    ..
                }) = out.last_mut()
                {
                    *previous = previous.merged_with(&clifford);
                } else {
                    out.push(Gate::from(clifford).on(&[qubit]));
                }
            } else {
                out.push(Gate::from(PauliRotation::new(axis, half_turns)).on(&[qubit]));
            }
        }
        out
    }
}

impl Pass for ConvertToPauliRotations {
    fn name(&self) -> &str {
        "ConvertToPauliRotations"
    }

    fn run(&self, circuit: &mut Circuit) -> Result<(), PassError> {
        self.optimize_circuit(circuit)
    }
}

/// Converts `circuit` in place with the given policies and the default
/// tolerance.
pub fn convert_to_pauli_rotations(
    circuit: &mut Circuit,
    keep_clifford: bool,
    ignore_failures: bool,
) -> Result<(), PassError> {
    let config = ConvertConfig::default()
        .with_keep_clifford(keep_clifford)
        .with_ignore_failures(ignore_failures);
    ConvertToPauliRotations::new(config).optimize_circuit(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Pauli, UnitaryGate};
    use crate::linalg::{allclose_up_to_global_phase, Unitary2};

    fn pass(keep_clifford: bool) -> ConvertToPauliRotations {
        ConvertToPauliRotations::new(ConvertConfig::default().with_keep_clifford(keep_clifford))
    }

    #[test]
    fn test_decompose_hadamard() {
        let ops = pass(false).decompose(SingleQubitGate::Clifford(&CliffordGate::H), Qubit(0));
        assert_eq!(
            ops,
            vec![
                Gate::from(PauliRotation::new(Pauli::Y, -0.5)).on(&[Qubit(0)]),
                Gate::from(PauliRotation::new(Pauli::Z, 1.0)).on(&[Qubit(0)]),
            ]
        );
    }

    #[test]
    fn test_keep_clifford_emits_cliffords() {
        let x = UnitaryGate::pauli_power(Pauli::X, 1.0);
        let ops = pass(true).decompose(SingleQubitGate::Unitary(&x), Qubit(2));
        assert_eq!(ops, vec![Gate::from(CliffordGate::X).on(&[Qubit(2)])]);
    }

    #[test]
    fn test_keep_clifford_merges_adjacent_terms() {
        let h = UnitaryGate::new("h", CliffordGate::H.unitary()).unwrap();
        let ops = pass(true).decompose(SingleQubitGate::Unitary(&h), Qubit(0));
        assert_eq!(ops, vec![Gate::from(CliffordGate::H).on(&[Qubit(0)])]);
    }

    #[test]
    fn test_keep_clifford_mixes_rotations() {
        // T·H has a non-Clifford term between Clifford ones.
        let matrix = UnitaryGate::t().matrix() * CliffordGate::H.unitary();
        let gate = UnitaryGate::new("TH", matrix).unwrap();
        let ops = pass(true).decompose(SingleQubitGate::Unitary(&gate), Qubit(0));
        assert!(ops
            .iter()
            .any(|op| matches!(op.gate, Gate::PauliRotation(_))));
        let circuit = Circuit::from_ops(ops);
        let original = Circuit::from_ops(vec![Gate::from(gate).on(&[Qubit(0)])]);
        assert!(allclose_up_to_global_phase(
            &circuit.unitary().unwrap(),
            &original.unitary().unwrap(),
            1e-7
        ));
    }

    #[test]
    fn test_identity_is_removed() {
        let identity = UnitaryGate::new("I", Unitary2::identity()).unwrap();
        let mut circuit = Circuit::from_ops(vec![
            Gate::from(identity).on(&[Qubit(0)]),
            Gate::from(CliffordGate::X).on(&[Qubit(0)]),
        ]);
        pass(false).optimize_circuit(&mut circuit).unwrap();
        let ops: Vec<_> = circuit.all_operations().cloned().collect();
        let expected = Gate::from(PauliRotation::new(Pauli::X, 1.0)).on(&[Qubit(0)]);
        assert_eq!(ops, vec![expected]);
    }

    #[test]
    fn test_pass_name() {
        assert_eq!(pass(false).name(), "ConvertToPauliRotations");
    }
}
