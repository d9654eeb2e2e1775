pub mod circuit;
pub mod clifford;
pub mod diagram;
pub mod gates;
pub mod operations;
pub mod pauli;

// Re-export for easier access
pub use circuit::{Circuit, Moment};
pub use clifford::{CliffordGate, PauliTransform};
pub use gates::{Gate, OpaqueGate, PauliRotation, UnitaryGate};
pub use operations::{Operation, Qubit};
pub use pauli::Pauli;
