//! Small dense linear algebra helpers for single-qubit unitaries.

use nalgebra::{DMatrix, Matrix2};
use num_complex::Complex64;
use std::f64::consts::PI;

/// A 2x2 complex matrix, the unitary of a single-qubit gate.
pub type Unitary2 = Matrix2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// `diag(1, e^{i angle})`.
fn phase_matrix(angle: f64) -> Unitary2 {
    Matrix2::new(ONE, ZERO, ZERO, Complex64::from_polar(1.0, angle))
}

/// Real rotation `[[cos a, -sin a], [sin a, cos a]]`.
fn rotation_matrix(angle: f64) -> Unitary2 {
    let (s, c) = angle.sin_cos();
    Matrix2::new(
        Complex64::new(c, 0.0),
        Complex64::new(-s, 0.0),
        Complex64::new(s, 0.0),
        Complex64::new(c, 0.0),
    )
}

/// Splits a single-qubit unitary into `(z_before, y, z_after)` radians.
///
/// Up to global phase, the input equals a Z-axis phasing by `z_before`,
/// followed by a Y-axis rotation by `y`, followed by a Z-axis phasing by
/// `z_after` (time order, first applied first).
pub fn deconstruct_single_qubit_matrix_into_angles(mat: &Unitary2) -> (f64, f64, f64) {
    // Anti-cancel left-vs-right phase along the top row.
    let right_phase = (mat[(0, 1)] * mat[(0, 0)].conj()).arg() + PI;
    let mat = mat * phase_matrix(-right_phase);

    // Cancel top-vs-bottom phase along the left column.
    let bottom_phase = (mat[(1, 0)] * mat[(0, 0)].conj()).arg();
    let mat = phase_matrix(-bottom_phase) * mat;

    // Lined up for a rotation; clear the off-diagonal cells with one.
    let rotation = mat[(1, 0)].norm().atan2(mat[(0, 0)].norm());
    let mat = rotation_matrix(-rotation) * mat;

    let diagonal_phase = (mat[(1, 1)] * mat[(0, 0)].conj()).arg();

    (right_phase + diagonal_phase, rotation * 2.0, bottom_phase)
}

/// Whether `a` is within `atol` of a multiple of `period`.
pub fn near_zero_mod(a: f64, period: f64, atol: f64) -> bool {
    let half_period = period / 2.0;
    ((a + half_period).rem_euclid(period) - half_period).abs() <= atol
}

/// Tolerance for accepting a matrix as unitary.
pub const UNITARY_TOLERANCE: f64 = 1e-8;

/// Whether `mat† · mat` is the identity within `atol`, entrywise.
///
/// Non-finite entries never pass.
pub fn is_unitary(mat: &Unitary2, atol: f64) -> bool {
    let product = mat.adjoint() * mat;
    product
        .iter()
        .zip(Unitary2::identity().iter())
        .all(|(p, i)| (p - i).norm() <= atol)
}

/// Lifts a 2x2 unitary into a dynamically sized matrix.
pub fn to_dynamic(mat: &Unitary2) -> DMatrix<Complex64> {
    DMatrix::from_fn(2, 2, |r, c| mat[(r, c)])
}

/// Embeds a single-qubit unitary acting on `target` into an `n`-qubit
/// operator. Qubit 0 is the most significant tensor factor.
pub fn embed_single_qubit(mat: &Unitary2, target: usize, num_qubits: usize) -> DMatrix<Complex64> {
    let identity = DMatrix::<Complex64>::identity(2, 2);
    let local = to_dynamic(mat);
    let mut full = DMatrix::<Complex64>::identity(1, 1);
    for qubit in 0..num_qubits {
        let factor = if qubit == target { &local } else { &identity };
        full = full.kronecker(factor);
    }
    full
}

/// Checks `actual ≈ e^{iθ}·desired` for some global phase `θ`.
///
/// The phase is fixed by the largest entry of `desired`; every entry must
/// then agree within `atol`.
pub fn allclose_up_to_global_phase(
    actual: &DMatrix<Complex64>,
    desired: &DMatrix<Complex64>,
    atol: f64,
) -> bool {
    if actual.shape() != desired.shape() {
        return false;
    }
    let Some((index, pivot)) = desired
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
    else {
        return true;
    };
    if pivot.norm() <= atol {
        return actual.iter().all(|v| v.norm() <= atol);
    }
    let other = actual[index];
    if other.norm() <= atol {
        return false;
    }
    let phase = other / other.norm() * (pivot.conj() / pivot.norm());
    actual
        .iter()
        .zip(desired.iter())
        .all(|(a, d)| (a - phase * d).norm() <= atol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u3(theta: f64, phi: f64, lambda: f64) -> Unitary2 {
        let (s, c) = (theta / 2.0).sin_cos();
        Matrix2::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    fn rebuild(z_before: f64, y: f64, z_after: f64) -> Unitary2 {
        let rz = |a: f64| phase_matrix(a);
        let ry = |a: f64| rotation_matrix(a / 2.0);
        rz(z_after) * ry(y) * rz(z_before)
    }

    #[test]
    fn test_near_zero_mod() {
        assert!(near_zero_mod(1.0, 0.5, 1e-9));
        assert!(near_zero_mod(-0.5, 0.5, 1e-9));
        assert!(near_zero_mod(0.4999999999, 0.5, 1e-8));
        assert!(!near_zero_mod(0.25, 0.5, 1e-8));
        assert!(!near_zero_mod(0.125, 1.0, 0.1));
    }

    #[test]
    fn test_deconstruct_rebuilds_input() {
        let cases = [
            (0.3, 1.1, -2.0),
            (0.0, 0.0, 0.0),
            (PI, 0.0, 0.0),
            (PI / 2.0, PI / 3.0, PI),
            (2.5, -0.7, 0.01),
        ];
        for (theta, phi, lambda) in cases {
            let u = u3(theta, phi, lambda);
            let (before, y, after) = deconstruct_single_qubit_matrix_into_angles(&u);
            let rebuilt = rebuild(before, y, after);
            assert!(
                allclose_up_to_global_phase(&to_dynamic(&rebuilt), &to_dynamic(&u), 1e-9),
                "failed for u3({theta}, {phi}, {lambda})"
            );
        }
    }

    #[test]
    fn test_allclose_up_to_global_phase() {
        let u = u3(0.4, 1.2, -0.3);
        let phased = u * Complex64::from_polar(1.0, 0.77);
        assert!(allclose_up_to_global_phase(
            &to_dynamic(&phased),
            &to_dynamic(&u),
            1e-12
        ));
        let other = u3(0.5, 1.2, -0.3);
        assert!(!allclose_up_to_global_phase(
            &to_dynamic(&other),
            &to_dynamic(&u),
            1e-6
        ));
    }

    #[test]
    fn test_is_unitary() {
        assert!(is_unitary(&u3(0.4, 1.2, -0.3), UNITARY_TOLERANCE));
        let phased = Unitary2::identity() * Complex64::from_polar(1.0, 2.0);
        assert!(is_unitary(&phased, 1e-12));
        assert!(!is_unitary(&Unitary2::zeros(), UNITARY_TOLERANCE));
        let scaled = Unitary2::identity() * Complex64::new(2.0, 0.0);
        assert!(!is_unitary(&scaled, UNITARY_TOLERANCE));
        let nan = Unitary2::from_element(Complex64::new(f64::NAN, 0.0));
        assert!(!is_unitary(&nan, UNITARY_TOLERANCE));
    }

    #[test]
    fn test_embed_single_qubit_order() {
        let x = Matrix2::new(ZERO, ONE, ONE, ZERO);
        let full = embed_single_qubit(&x, 0, 2);
        // X on the most significant qubit maps |00> to |10>.
        assert_eq!(full[(2, 0)], ONE);
        assert_eq!(full[(0, 0)], ZERO);
        let full = embed_single_qubit(&x, 1, 2);
        assert_eq!(full[(1, 0)], ONE);
    }
}
