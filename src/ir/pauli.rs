use nalgebra::Matrix2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::linalg::Unitary2;

/// A single-qubit Pauli axis.
///
/// The axes are cyclically ordered `X -> Y -> Z -> X`, which fixes the
/// sign conventions of quarter-turn rotations and Pauli products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    pub const ALL: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    /// The next axis in cyclic order.
    pub fn next(self) -> Pauli {
        match self {
            Pauli::X => Pauli::Y,
            Pauli::Y => Pauli::Z,
            Pauli::Z => Pauli::X,
        }
    }

    /// The axis that is neither `self` nor `other`. Both must differ.
    pub fn third(self, other: Pauli) -> Pauli {
        debug_assert_ne!(self, other);
        self.next().next_if_eq(other)
    }

    fn next_if_eq(self, other: Pauli) -> Pauli {
        if self == other {
            self.next()
        } else {
            self
        }
    }

    /// The exact matrix of the Pauli operator.
    pub fn matrix(self) -> Unitary2 {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            Pauli::X => Matrix2::new(zero, one, one, zero),
            Pauli::Y => Matrix2::new(zero, -i, i, zero),
            Pauli::Z => Matrix2::new(one, zero, zero, -one),
        }
    }

    /// `self^t = (I + P)/2 + e^{iπt}(I - P)/2`, the matrix of a rotation by
    /// `t` half turns about this axis.
    pub fn power(self, half_turns: f64) -> Unitary2 {
        let phase = Complex64::from_polar(1.0, std::f64::consts::PI * half_turns);
        self.power_with_phase(phase)
    }

    /// Same as [`Pauli::power`] for a whole number of quarter turns, using
    /// exact phases so the entries stay exact.
    pub fn quarter_turns(self, quarter_turns: i64) -> Unitary2 {
        let phase = match quarter_turns.rem_euclid(4) {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
        self.power_with_phase(phase)
    }

    fn power_with_phase(self, phase: Complex64) -> Unitary2 {
        let identity = Unitary2::identity();
        let p = self.matrix();
        let half = Complex64::new(0.5, 0.0);
        (identity + p) * half + (identity - p) * (half * phase)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(name)
    }
}
