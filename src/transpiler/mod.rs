pub mod classify;
pub mod config;
pub mod convert;
pub mod pass;
pub mod pauli_rotations;

pub use classify::{classify, Classification, SingleQubitGate};
pub use config::ConvertConfig;
pub use convert::{convert_to_pauli_rotations, ConvertToPauliRotations};
pub use pass::{Pass, PassManager};
pub use pauli_rotations::single_qubit_matrix_to_pauli_rotations;
