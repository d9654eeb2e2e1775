use crate::error::PassError;
use crate::ir::Circuit;

/// A trait for transpiler passes.
///
/// A pass rewrites a circuit in place, or fails without a usable result.
pub trait Pass {
    /// Returns the name of the pass.
    fn name(&self) -> &str;

    /// Runs the pass on the given circuit.
    fn run(&self, circuit: &mut Circuit) -> Result<(), PassError>;
}

/// Manages a sequence of transpiler passes.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Creates a new empty PassManager.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Adds a pass to the manager.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Runs all passes in sequence on a copy of the given circuit.
    ///
    /// The input is never modified; the first failing pass aborts the run.
    pub fn run(&self, circuit: &Circuit) -> Result<Circuit, PassError> {
        let mut current_circuit = circuit.clone();
        for pass in &self.passes {
            log::debug!("running pass {}", pass.name());
            pass.run(&mut current_circuit)?;
        }
        Ok(current_circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{CliffordGate, Gate, OpaqueGate, Pauli, PauliRotation, Qubit};
    use crate::transpiler::{ConvertConfig, ConvertToPauliRotations};

    struct MockPass;

    impl Pass for MockPass {
        fn name(&self) -> &str {
            "MockPass"
        }

        fn run(&self, circuit: &mut Circuit) -> Result<(), PassError> {
            // Add a dummy gate to verify the pass ran
            circuit.append(Gate::from(CliffordGate::H).on(&[Qubit(0)]));
            Ok(())
        }
    }

    #[test]
    fn test_pass_manager() {
        let circuit = Circuit::new();
        let mut pm = PassManager::new();
        pm.add_pass(Box::new(MockPass));
        pm.add_pass(Box::new(ConvertToPauliRotations::default()));

        let new_circuit = pm.run(&circuit).unwrap();
        assert!(circuit.is_empty());
        let ops: Vec<_> = new_circuit.all_operations().collect();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].gate, Gate::from(PauliRotation::new(Pauli::Z, 1.0)));
    }

    #[test]
    fn test_pass_manager_stops_on_error() {
        let dummy = Gate::from(OpaqueGate::new("Dummy", 2)).on(&Qubit::range(2));
        let circuit = Circuit::from_ops(vec![dummy]);
        let mut pm = PassManager::new();
        pm.add_pass(Box::new(ConvertToPauliRotations::new(ConvertConfig::default())));
        pm.add_pass(Box::new(MockPass));
        let result = pm.run(&circuit);
        assert!(matches!(result, Err(PassError::UnsupportedGate { .. })));
    }
}
