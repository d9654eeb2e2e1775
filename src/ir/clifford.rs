use std::fmt;

use super::pauli::Pauli;
use crate::linalg::Unitary2;

/// The image of a Pauli axis under conjugation by a Clifford gate: the
/// target axis and whether the sign flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PauliTransform {
    pub to: Pauli,
    pub flip: bool,
}

impl PauliTransform {
    pub const fn new(to: Pauli, flip: bool) -> Self {
        Self { to, flip }
    }
}

impl fmt::Display for PauliTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.flip { '-' } else { '+' };
        write!(f, "{sign}{}", self.to)
    }
}

/// A single-qubit Clifford gate.
///
/// The gate is identified by where it sends `X` and `Z` under conjugation
/// (`U X U†` and `U Z U†`); the image of `Y` follows from `Y = iXZ`. Global
/// phase is not tracked, so there are exactly 24 distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CliffordGate {
    x_to: PauliTransform,
    z_to: PauliTransform,
}

const fn map(x_to: Pauli, x_flip: bool, z_to: Pauli, z_flip: bool) -> CliffordGate {
    CliffordGate {
        x_to: PauliTransform::new(x_to, x_flip),
        z_to: PauliTransform::new(z_to, z_flip),
    }
}

impl CliffordGate {
    pub const I: CliffordGate = map(Pauli::X, false, Pauli::Z, false);
    pub const X: CliffordGate = map(Pauli::X, false, Pauli::Z, true);
    pub const Y: CliffordGate = map(Pauli::X, true, Pauli::Z, true);
    pub const Z: CliffordGate = map(Pauli::X, true, Pauli::Z, false);
    pub const H: CliffordGate = map(Pauli::Z, false, Pauli::X, false);
    pub const S: CliffordGate = map(Pauli::Y, false, Pauli::Z, false);
    pub const S_DAG: CliffordGate = map(Pauli::Y, true, Pauli::Z, false);
    pub const SQRT_X: CliffordGate = map(Pauli::X, false, Pauli::Y, true);
    pub const SQRT_X_DAG: CliffordGate = map(Pauli::X, false, Pauli::Y, false);
    pub const SQRT_Y: CliffordGate = map(Pauli::Z, true, Pauli::X, false);
    pub const SQRT_Y_DAG: CliffordGate = map(Pauli::Z, false, Pauli::X, true);

    /// Builds a Clifford from the images of `X` and `Z`.
    ///
    /// Returns `None` when both land on the same axis, which no unitary can
    /// do since `X` and `Z` anticommute.
    pub fn from_xz_map(x_to: PauliTransform, z_to: PauliTransform) -> Option<Self> {
        (x_to.to != z_to.to).then_some(Self { x_to, z_to })
    }

    /// A rotation by `quarter_turns` quarter turns about `axis`.
    pub fn from_quarter_turns(axis: Pauli, quarter_turns: i64) -> Self {
        let turns = quarter_turns.rem_euclid(4);
        let a = axis.next();
        let b = a.next();
        let image = |pauli: Pauli| {
            if pauli == axis {
                return PauliTransform::new(pauli, false);
            }
            // One quarter turn sends a -> b and b -> -a.
            let (to, flip) = match (pauli == a, turns) {
                (_, 0) => (pauli, false),
                (true, 1) => (b, false),
                (true, 2) => (a, true),
                (true, _) => (b, true),
                (false, 1) => (a, true),
                (false, 2) => (b, true),
                (false, _) => (a, false),
            };
            PauliTransform::new(to, flip)
        };
        Self {
            x_to: image(Pauli::X),
            z_to: image(Pauli::Z),
        }
    }

    /// Where conjugation by this gate sends `pauli`.
    pub fn transform(&self, pauli: Pauli) -> PauliTransform {
        match pauli {
            Pauli::X => self.x_to,
            Pauli::Z => self.z_to,
            Pauli::Y => {
                // U Y U† = i (U X U†)(U Z U†), and P_a P_b = i P_c for cyclic (a, b, c).
                let cyclic = self.x_to.to.next() == self.z_to.to;
                PauliTransform::new(
                    self.x_to.to.third(self.z_to.to),
                    self.x_to.flip ^ self.z_to.flip ^ cyclic,
                )
            }
        }
    }

    fn transform_signed(&self, input: PauliTransform) -> PauliTransform {
        let image = self.transform(input.to);
        PauliTransform::new(image.to, image.flip ^ input.flip)
    }

    /// The gate equivalent to applying `self` and then `second`.
    pub fn merged_with(&self, second: &CliffordGate) -> CliffordGate {
        CliffordGate {
            x_to: second.transform_signed(self.x_to),
            z_to: second.transform_signed(self.z_to),
        }
    }

    /// Splits the gate into at most two quarter-turn rotations, in time
    /// order. The identity yields an empty list.
    ///
    /// The first rotation carries `Z` to its image; the second spins about
    /// that image until `X` lands on its image too.
    pub fn decompose_rotation(&self) -> Vec<(Pauli, i64)> {
        let mut rotations = Vec::with_capacity(2);

        let first = if self.z_to.to == Pauli::Z {
            let turns = if self.z_to.flip { 2 } else { 0 };
            (Pauli::X, turns)
        } else {
            let axis = Pauli::Z.third(self.z_to.to);
            let turns = if Self::from_quarter_turns(axis, 1).z_to == self.z_to {
                1
            } else {
                3
            };
            (axis, turns)
        };
        let after_first = Self::from_quarter_turns(first.0, first.1);

        let axis = self.z_to.to;
        let current = after_first.x_to;
        let turns = if current == self.x_to {
            0
        } else if current.to == self.x_to.to {
            2
        } else if Self::from_quarter_turns(axis, 1).transform_signed(current) == self.x_to {
            1
        } else {
            3
        };

        if first.1 != 0 {
            rotations.push(first);
        }
        if turns != 0 {
            rotations.push((axis, turns));
        }
        rotations
    }

    /// The unitary of the gate, up to global phase. Entries are exact.
    pub fn unitary(&self) -> Unitary2 {
        self.decompose_rotation()
            .into_iter()
            .fold(Unitary2::identity(), |acc, (axis, turns)| {
                axis.quarter_turns(turns) * acc
            })
    }
}

impl fmt::Display for CliffordGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::H {
            return f.write_str("H");
        }
        match self.decompose_rotation().as_slice() {
            [] => f.write_str("I"),
            [(Pauli::Z, 1)] => f.write_str("S"),
            [(Pauli::Z, 3)] => f.write_str("S^-1"),
            [(axis, 1)] => write!(f, "{axis}^0.5"),
            [(axis, 2)] => write!(f, "{axis}"),
            [(axis, _)] => write!(f, "{axis}^-0.5"),
            _ => write!(f, "(X:{}, Z:{})", self.x_to, self.z_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{allclose_up_to_global_phase, to_dynamic};
    use std::collections::HashSet;

    fn all_cliffords() -> Vec<CliffordGate> {
        let generators = [CliffordGate::H, CliffordGate::S];
        let mut seen = HashSet::from([CliffordGate::I]);
        let mut frontier = vec![CliffordGate::I];
        while let Some(gate) = frontier.pop() {
            for generator in &generators {
                let next = gate.merged_with(generator);
                if seen.insert(next) {
                    frontier.push(next);
                }
            }
        }
        seen.into_iter().collect()
    }

    fn signed_matrix(image: PauliTransform) -> Unitary2 {
        let sign = if image.flip { -1.0 } else { 1.0 };
        image.to.matrix() * num_complex::Complex64::new(sign, 0.0)
    }

    #[test]
    fn test_group_has_24_elements() {
        assert_eq!(all_cliffords().len(), 24);
    }

    #[test]
    fn test_named_gates_match_quarter_turns() {
        let turns = CliffordGate::from_quarter_turns;
        assert_eq!(turns(Pauli::X, 2), CliffordGate::X);
        assert_eq!(turns(Pauli::Y, 2), CliffordGate::Y);
        assert_eq!(turns(Pauli::Z, 2), CliffordGate::Z);
        assert_eq!(turns(Pauli::Z, 1), CliffordGate::S);
        assert_eq!(turns(Pauli::Z, -1), CliffordGate::S_DAG);
        assert_eq!(turns(Pauli::X, 1), CliffordGate::SQRT_X);
        assert_eq!(turns(Pauli::X, 3), CliffordGate::SQRT_X_DAG);
        assert_eq!(turns(Pauli::Y, 1), CliffordGate::SQRT_Y);
        assert_eq!(turns(Pauli::Y, 3), CliffordGate::SQRT_Y_DAG);
        assert_eq!(turns(Pauli::Y, 4), CliffordGate::I);
    }

    #[test]
    fn test_transform_y() {
        // S Y S† = -X
        assert_eq!(
            CliffordGate::S.transform(Pauli::Y),
            PauliTransform::new(Pauli::X, true)
        );
        // H Y H† = -Y
        assert_eq!(
            CliffordGate::H.transform(Pauli::Y),
            PauliTransform::new(Pauli::Y, true)
        );
        assert_eq!(
            CliffordGate::I.transform(Pauli::Y),
            PauliTransform::new(Pauli::Y, false)
        );
    }

    #[test]
    fn test_from_xz_map_rejects_commuting_images() {
        let x = PauliTransform::new(Pauli::X, false);
        assert!(CliffordGate::from_xz_map(x, x).is_none());
        assert_eq!(
            CliffordGate::from_xz_map(x, PauliTransform::new(Pauli::Z, true)),
            Some(CliffordGate::X)
        );
    }

    #[test]
    fn test_decomposition_reproduces_gate() {
        for gate in all_cliffords() {
            let rotations = gate.decompose_rotation();
            assert!(rotations.len() <= 2);
            let rebuilt = rotations
                .iter()
                .fold(CliffordGate::I, |acc, &(axis, turns)| {
                    acc.merged_with(&CliffordGate::from_quarter_turns(axis, turns))
                });
            assert_eq!(rebuilt, gate, "decomposition {rotations:?}");
        }
    }

    #[test]
    fn test_unitary_conjugates_paulis() {
        for gate in all_cliffords() {
            let u = gate.unitary();
            for pauli in Pauli::ALL {
                let conjugated = u * pauli.matrix() * u.adjoint();
                let expected = signed_matrix(gate.transform(pauli));
                let diff = conjugated - expected;
                assert!(
                    diff.iter().all(|v| v.norm() < 1e-12),
                    "{gate} maps {pauli} wrongly"
                );
            }
        }
    }

    #[test]
    fn test_merge_matches_matrix_product() {
        let gates = all_cliffords();
        for a in gates.iter().take(8) {
            for b in &gates {
                let merged = a.merged_with(b).unitary();
                let product = b.unitary() * a.unitary();
                assert!(allclose_up_to_global_phase(
                    &to_dynamic(&merged),
                    &to_dynamic(&product),
                    1e-12
                ));
            }
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CliffordGate::H.to_string(), "H");
        assert_eq!(CliffordGate::X.to_string(), "X");
        assert_eq!(CliffordGate::I.to_string(), "I");
        assert_eq!(CliffordGate::S.to_string(), "S");
        assert_eq!(CliffordGate::S_DAG.to_string(), "S^-1");
        assert_eq!(CliffordGate::SQRT_Y.to_string(), "Y^0.5");
        assert_eq!(CliffordGate::SQRT_X_DAG.to_string(), "X^-0.5");
        let cycle = CliffordGate::S.merged_with(&CliffordGate::H);
        assert!(cycle.to_string().starts_with("(X:"));
    }
}
