//! # Kepler's equation for elliptic orbits
//!
//! Solvers for `M = E − e·sin(E)` and the eccentric → true anomaly conversion.
//!
//! Two solvers are available:
//!
//! - [`solve_kepler_equation`] – the reference solver: first-order seed
//!   `E₀ = M + e·sin(M)` followed by exactly
//!   [`KEPLER_FIXED_ITERATIONS`] fixed-point refinements `E ← M + e·sin(E)`,
//!   without any convergence test. The residual shrinks roughly like `e¹²`,
//!   so accuracy degrades quickly as `e` grows.
//! - [`solve_kepler_equation_newton`] – Newton–Raphson on
//!   `f(E) = E − e·sin(E) − M`, stopping on a step tolerance or an iteration cap.
//!
//! Both solvers are total on `e ∈ [0, 1)` and always terminate. Eccentricity is
//! **not** checked here; validate the element set before calling.
use crate::constants::{Radian, KEPLER_FIXED_ITERATIONS};

/// Solve Kepler's equation with the reference fixed-iteration scheme.
///
/// Arguments
/// ---------
/// * `mean_anomaly` – Mean anomaly `M` (radians).
/// * `eccentricity` – Eccentricity `e`, expected in `[0, 1)`.
///
/// Return
/// ------
/// * Eccentric anomaly `E` (radians).
///
/// See also
/// --------
/// * [`solve_kepler_equation_iterations`] – Same scheme with a custom iteration count.
/// * [`solve_kepler_equation_newton`] – Tolerance-driven variant.
pub fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    solve_kepler_equation_iterations(mean_anomaly, eccentricity, KEPLER_FIXED_ITERATIONS)
}

/// Fixed-point Kepler solver with an explicit iteration budget.
///
/// The seed `E₀ = M + e·sin(M)` is followed by `iterations` refinements
/// `E ← M + e·sin(E)`. With `iterations = 0` the seed itself is returned.
pub fn solve_kepler_equation_iterations(
    mean_anomaly: Radian,
    eccentricity: f64,
    iterations: usize,
) -> Radian {
    let mut ecc_anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..iterations {
        ecc_anomaly = mean_anomaly + eccentricity * ecc_anomaly.sin();
    }
    ecc_anomaly
}

/// Solve Kepler's equation with Newton–Raphson iterations.
///
/// Starts from the same seed as [`solve_kepler_equation`] and applies
/// `E ← E − (E − e·sin E − M) / (1 − e·cos E)` until the step falls below
/// `tolerance` or `max_iter` steps have been taken. The derivative is bounded
/// below by `1 − e > 0`, so every step is finite.
///
/// Arguments
/// ---------
/// * `mean_anomaly` – Mean anomaly `M` (radians).
/// * `eccentricity` – Eccentricity `e`, expected in `[0, 1)`.
/// * `tolerance` – Absolute step tolerance (radians).
/// * `max_iter` – Hard cap on the number of Newton steps.
///
/// Return
/// ------
/// * Eccentric anomaly `E` (radians). If the cap is reached the last iterate is returned.
pub fn solve_kepler_equation_newton(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iter: usize,
) -> Radian {
    let mut ecc_anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..max_iter {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly;
        let df = 1.0 - eccentricity * ecc_anomaly.cos();
        let step = f / df;
        ecc_anomaly -= step;
        if step.abs() < tolerance {
            break;
        }
    }
    ecc_anomaly
}

/// True anomaly from eccentric anomaly, half-angle form.
///
/// `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`.
///
/// The half-angle arctangent keeps `ν` on the same revolution as `E`: for
/// `E ∈ [0, 2π)` the result lies in `[0, 2π)`, and for `E ∈ (−2π, 0)` in `(−2π, 0)`.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
        .atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Residual `E − e·sin(E) − M` of Kepler's equation.
pub fn kepler_residual(eccentric_anomaly: Radian, eccentricity: f64, mean_anomaly: Radian) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

#[cfg(test)]
mod kepler_test {
    use super::*;
    use crate::constants::DPI;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn mean_anomaly_grid() -> impl Iterator<Item = f64> {
        (0..72).map(|k| k as f64 * DPI / 72.0)
    }

    #[test]
    fn test_fixed_solver_closes_equation_moderate_ecc() {
        for e in [0.0, 0.01, 0.0167, 0.05, 0.1, 0.2, 0.24] {
            for m in mean_anomaly_grid() {
                let ecc = solve_kepler_equation(m, e);
                assert!(
                    kepler_residual(ecc, e, m).abs() < 1e-6,
                    "e = {e}, M = {m}, residual = {}",
                    kepler_residual(ecc, e, m)
                );
            }
        }
    }

    #[test]
    fn test_newton_solver_closes_equation() {
        for k in 0..90 {
            let e = k as f64 * 0.01;
            for m in mean_anomaly_grid() {
                let ecc = solve_kepler_equation_newton(m, e, 1e-14, 50);
                assert!(kepler_residual(ecc, e, m).abs() < 1e-6, "e = {e}, M = {m}");
            }
        }
    }

    #[test]
    fn test_fixed_solver_does_not_close_high_ecc() {
        let e = 0.8;
        let worst_fixed = mean_anomaly_grid()
            .map(|m| kepler_residual(solve_kepler_equation(m, e), e, m).abs())
            .fold(0.0, f64::max);
        assert!(worst_fixed > 1e-3, "worst residual {worst_fixed}");

        for m in mean_anomaly_grid() {
            let ecc = solve_kepler_equation_newton(m, e, 1e-14, 50);
            assert!(kepler_residual(ecc, e, m).abs() < 1e-12, "M = {m}");
        }
    }

    #[test]
    fn test_newton_matches_fixed_low_ecc() {
        for e in [0.0, 0.001, 0.0167, 0.05] {
            for m in mean_anomaly_grid() {
                let fixed = solve_kepler_equation(m, e);
                let newton = solve_kepler_equation_newton(m, e, 1e-15, 50);
                assert_abs_diff_eq!(fixed, newton, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_circular_orbit_identity() {
        for m in mean_anomaly_grid() {
            assert_eq!(solve_kepler_equation(m, 0.0), m);
        }
    }

    #[test]
    fn test_fixed_point_of_half_turn() {
        // sin(π) ≈ 1.2e-16, so every iterate stays pinned to π
        let ecc = solve_kepler_equation(PI, 0.9);
        assert_abs_diff_eq!(ecc, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_iteration_budget() {
        let m = 1.0;
        let e = 0.5;
        assert_eq!(solve_kepler_equation_iterations(m, e, 0), m + e * m.sin());
        assert_eq!(
            solve_kepler_equation(m, e),
            solve_kepler_equation_iterations(m, e, KEPLER_FIXED_ITERATIONS)
        );
    }

    #[test]
    fn test_near_parabolic_terminates() {
        for m in mean_anomaly_grid() {
            let ecc = solve_kepler_equation(m, 0.99);
            assert!(ecc.is_finite());
            let ecc = solve_kepler_equation_newton(m, 0.99, 1e-14, 50);
            assert!(ecc.is_finite());
        }
    }

    #[test]
    fn test_true_anomaly() {
        // e = 0 → ν = E on the same revolution
        assert_abs_diff_eq!(true_anomaly_from_eccentric(1.0, 0.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(true_anomaly_from_eccentric(4.0, 0.0), 4.0, epsilon = 1e-14);
        assert_abs_diff_eq!(true_anomaly_from_eccentric(-1.0, 0.0), -1.0, epsilon = 1e-15);

        // periapsis and apoapsis are fixed points of the mapping
        assert_eq!(true_anomaly_from_eccentric(0.0, 0.7), 0.0);
        assert_abs_diff_eq!(true_anomaly_from_eccentric(PI, 0.7), PI, epsilon = 1e-12);

        // cos ν = (cos E − e) / (1 − e cos E)
        let e = 0.3;
        let ecc = 1.2;
        let nu = true_anomaly_from_eccentric(ecc, e);
        assert_abs_diff_eq!(
            nu.cos(),
            (ecc.cos() - e) / (1.0 - e * ecc.cos()),
            epsilon = 1e-14
        );
        assert!(nu > ecc, "true anomaly leads eccentric anomaly before apoapsis");
    }
}
