use std::fmt;

use super::gates::Gate;

/// A qubit on a line, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qubit(pub usize);

impl Qubit {
    /// Qubits `0..n`.
    pub fn range(n: usize) -> Vec<Qubit> {
        (0..n).map(Qubit).collect()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single operation in the quantum circuit: a gate applied to
/// an ordered list of qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// The gate being applied.
    pub gate: Gate,
    /// Qubits the gate acts on, in gate argument order.
    pub qubits: Vec<Qubit>,
}

impl Operation {
    pub fn new(gate: Gate, qubits: Vec<Qubit>) -> Self {
        Self { gate, qubits }
    }

    /// Whether this operation touches any of `qubits`.
    pub fn acts_on_any(&self, qubits: &[Qubit]) -> bool {
        self.qubits.iter().any(|q| qubits.contains(q))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate)?;
        for (i, qubit) in self.qubits.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{qubit}")?;
        }
        f.write_str(")")
    }
}
