//! Decomposition of single-qubit unitaries into rotations about Pauli axes.

use std::f64::consts::PI;

use crate::ir::gates::canonicalize_half_turns;
use crate::ir::Pauli;
use crate::linalg::{deconstruct_single_qubit_matrix_into_angles, near_zero_mod, Unitary2};

/// Rotation angles measured in half turns, compared up to a tolerance.
#[derive(Debug, Clone, Copy)]
struct Turns {
    atol: f64,
}

impl Turns {
    /// A multiple of a quarter turn.
    fn is_clifford(&self, half_turns: f64) -> bool {
        near_zero_mod(half_turns, 0.5, self.atol)
    }

    fn quarter_turns(&self, half_turns: f64) -> i64 {
        ((2.0 * half_turns).round() as i64).rem_euclid(4)
    }

    fn is_quarter_turn(&self, half_turns: f64) -> bool {
        self.is_clifford(half_turns) && self.quarter_turns(half_turns) % 2 == 1
    }

    fn is_half_turn(&self, half_turns: f64) -> bool {
        self.is_clifford(half_turns) && self.quarter_turns(half_turns) == 2
    }

    fn is_no_turn(&self, half_turns: f64) -> bool {
        self.is_clifford(half_turns) && self.quarter_turns(half_turns) == 0
    }

    /// Clifford angles become exact multiples of one half; everything is
    /// brought into `(-1, 1]`.
    fn snap(&self, half_turns: f64) -> f64 {
        if self.is_clifford(half_turns) {
            canonicalize_half_turns((2.0 * half_turns).round() / 2.0)
        } else {
            canonicalize_half_turns(half_turns)
        }
    }
}

/// Whether `half_turns` is within `atol` of a multiple of a quarter turn.
pub fn is_clifford_rotation(half_turns: f64, atol: f64) -> bool {
    Turns { atol }.is_clifford(half_turns)
}

/// Number of quarter turns, in `0..4`, nearest to `half_turns`.
pub fn to_quarter_turns(half_turns: f64) -> i64 {
    Turns { atol: 0.0 }.quarter_turns(half_turns)
}

/// Splits a single-qubit unitary into at most three Pauli rotations.
///
/// Returns `(axis, half_turns)` pairs in time order whose product equals
/// `mat` up to global phase. The chain has the shape `Z, X|Y, Z`; turns
/// that are no-ops within `atol` are dropped, so the identity yields an
/// empty chain, and Clifford angles are snapped to exact multiples of one
/// half. Every exponent lies in `(-1, 1]`.
///
/// `mat` must be unitary; [`crate::ir::UnitaryGate::new`] enforces this for
/// gates in a circuit.
///
/// ```
/// use pauli_phasor::ir::{CliffordGate, Pauli};
/// use pauli_phasor::transpiler::single_qubit_matrix_to_pauli_rotations;
///
/// let rotations = single_qubit_matrix_to_pauli_rotations(&CliffordGate::H.unitary(), 1e-8);
/// assert_eq!(rotations, vec![(Pauli::Y, -0.5), (Pauli::Z, 1.0)]);
/// ```
pub fn single_qubit_matrix_to_pauli_rotations(mat: &Unitary2, atol: f64) -> Vec<(Pauli, f64)> {
    let turns = Turns { atol };
    let (z_rad_before, y_rad, z_rad_after) = deconstruct_single_qubit_matrix_into_angles(mat);

    // Z^a Y^b Z^c written as Z^(a - 1/2) X^b Z^(c + 1/2).
    let mut z_before = z_rad_before / PI - 0.5;
    let mut middle = y_rad / PI;
    let mut middle_axis = Pauli::X;
    let mut z_after = z_rad_after / PI + 0.5;

    if turns.is_clifford(z_before) {
        let shift_to_y = (turns.is_quarter_turn(z_before) || turns.is_quarter_turn(z_after))
            ^ (turns.is_half_turn(middle) && turns.is_no_turn(z_before - z_after));
        if shift_to_y {
            z_before += 0.5;
            z_after -= 0.5;
            middle_axis = Pauli::Y;
        }
        if turns.is_half_turn(z_before) || turns.is_half_turn(z_after) {
            z_before -= 1.0;
            z_after += 1.0;
            middle = -middle;
        }
    }
    if turns.is_no_turn(middle) {
        z_before += z_after;
        z_after = 0.0;
    } else if turns.is_half_turn(middle) {
        z_after -= z_before;
        z_before = 0.0;
    }

    [
        (Pauli::Z, z_before),
        (middle_axis, middle),
        (Pauli::Z, z_after),
    ]
    .into_iter()
    .filter(|&(_, half_turns)| !turns.is_no_turn(half_turns))
    .map(|(axis, half_turns)| (axis, turns.snap(half_turns)))
    .collect()
}
