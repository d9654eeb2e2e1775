use serde::{Deserialize, Serialize};

/// Default tolerance when deciding that a rotation is a Clifford angle.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Settings of the Pauli rotation conversion.
///
/// Missing fields take their defaults when deserializing:
///
/// ```
/// use pauli_phasor::transpiler::ConvertConfig;
/// let config = ConvertConfig::from_json(r#"{ "keep_clifford": true }"#).unwrap();
/// assert!(config.keep_clifford);
/// assert!(!config.ignore_failures);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Leave Clifford gates as they are, and emit Clifford terms of
    /// decompositions as Clifford gates.
    pub keep_clifford: bool,
    /// Leave operations without a decomposition in place instead of failing.
    pub ignore_failures: bool,
    /// Absolute tolerance, in half turns, for recognizing Clifford angles.
    pub tolerance: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            keep_clifford: false,
            ignore_failures: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ConvertConfig {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn with_keep_clifford(mut self, keep_clifford: bool) -> Self {
        self.keep_clifford = keep_clifford;
        self
    }

    pub fn with_ignore_failures(mut self, ignore_failures: bool) -> Self {
        self.ignore_failures = ignore_failures;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
