//! # Single-instant orbit propagation
//!
//! This module turns an [`OrbitalElements`] set into a heliocentric Cartesian
//! position. It exposes two **distinct** paths:
//!
//! - [`heliocentric_position`] – the full two-body transform: Kepler's equation,
//!   true anomaly, radius, then the perifocal → reference-frame rotation
//!   `R_z(Ω)·R_x(i)·R_z(ω)`. Every angular element must be set.
//! - [`circular_approximation`] – a deliberately simplified placement of the
//!   body on a flat ring of radius `a` at its mean longitude `L`, ignoring
//!   eccentricity and inclination. It is never used as a fallback by the full
//!   path.
//!
//! [`heliocentric_position_at`] advances the mean anomaly to another instant
//! before running the full path, and [`propagate_all`] evaluates a batch of
//! catalog records independently.
//!
//! ## Configuration
//!
//! [`PropagationParams`] selects the Kepler solver and the output length unit.
//! The default reproduces the reference behaviour: a fixed budget of ten
//! fixed-point iterations and positions in AU.
//!
//! ## Units
//!
//! - Input angles are **degrees**, output anomalies are **radians**.
//! - Output lengths follow [`LengthUnit`]; input lengths are **AU**.
use std::cmp::Ordering::Greater;
use std::fmt;

use hifitime::Epoch;
use nalgebra::Vector3;
use tracing::{trace, warn};

use crate::{
    catalog::CatalogRecord,
    constants::{Radian, AU, KEPLER_FIXED_ITERATIONS, RADEG},
    heliorbit_errors::HeliorbitError,
    kepler::{
        solve_kepler_equation_iterations, solve_kepler_equation_newton,
        true_anomaly_from_eccentric,
    },
    orbit_type::{Element, OrbitalElements},
};

/// Strategy used to solve Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeplerSolver {
    /// Seed plus a fixed number of fixed-point refinements, no convergence test.
    FixedIteration { iterations: usize },
    /// Newton–Raphson with an absolute step tolerance and an iteration cap.
    Newton { tolerance: f64, max_iter: usize },
}

impl KeplerSolver {
    /// Eccentric anomaly (radians) for mean anomaly `m` (radians) and eccentricity `e`.
    pub fn solve(&self, mean_anomaly: Radian, eccentricity: f64) -> Radian {
        match *self {
            KeplerSolver::FixedIteration { iterations } => {
                solve_kepler_equation_iterations(mean_anomaly, eccentricity, iterations)
            }
            KeplerSolver::Newton {
                tolerance,
                max_iter,
            } => solve_kepler_equation_newton(mean_anomaly, eccentricity, tolerance, max_iter),
        }
    }
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver::FixedIteration {
            iterations: KEPLER_FIXED_ITERATIONS,
        }
    }
}

/// Length unit of the propagation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    #[default]
    AstronomicalUnit,
    Kilometer,
}

impl LengthUnit {
    /// Multiplicative factor converting AU into this unit.
    pub fn scale_from_au(&self) -> f64 {
        match self {
            LengthUnit::AstronomicalUnit => 1.0,
            LengthUnit::Kilometer => AU,
        }
    }

    /// Short unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::AstronomicalUnit => "AU",
            LengthUnit::Kilometer => "km",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Tunable parameters of the propagator.
///
/// Fields
/// ------
/// * `solver` – Kepler solver, [`KeplerSolver::FixedIteration`] with 10 iterations by default.
/// * `length_unit` – Output length unit, AU by default.
///
/// See also
/// --------
/// * [`PropagationParamsBuilder`] – Validating builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropagationParams {
    pub solver: KeplerSolver,
    pub length_unit: LengthUnit,
}

impl PropagationParams {
    /// Equivalent to [`PropagationParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`PropagationParamsBuilder`] initialized with the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heliorbit::propagator::{LengthUnit, PropagationParams};
    ///
    /// let params = PropagationParams::builder()
    ///     .newton(1e-12, 30)
    ///     .length_unit(LengthUnit::Kilometer)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.length_unit, LengthUnit::Kilometer);
    /// ```
    pub fn builder() -> PropagationParamsBuilder {
        PropagationParamsBuilder::new()
    }
}

/// Builder for [`PropagationParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct PropagationParamsBuilder {
    params: PropagationParams,
}

impl PropagationParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: PropagationParams::default(),
        }
    }

    pub fn solver(mut self, v: KeplerSolver) -> Self {
        self.params.solver = v;
        self
    }
    pub fn fixed_iterations(mut self, iterations: usize) -> Self {
        self.params.solver = KeplerSolver::FixedIteration { iterations };
        self
    }
    pub fn newton(mut self, tolerance: f64, max_iter: usize) -> Self {
        self.params.solver = KeplerSolver::Newton {
            tolerance,
            max_iter,
        };
        self
    }
    pub fn length_unit(mut self, v: LengthUnit) -> Self {
        self.params.length_unit = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `FixedIteration`: `iterations ≥ 1`.
    /// * `Newton`: `tolerance > 0` (NaN rejected), `max_iter ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Err(HeliorbitError::InvalidPropagationParameter)` on the first failed rule.
    pub fn build(self) -> Result<PropagationParams, HeliorbitError> {
        match self.params.solver {
            KeplerSolver::FixedIteration { iterations } if iterations == 0 => {
                return Err(HeliorbitError::InvalidPropagationParameter(
                    "fixed iteration count must be >= 1".into(),
                ));
            }
            KeplerSolver::Newton {
                tolerance,
                max_iter,
            } => {
                if tolerance.partial_cmp(&0.0) != Some(Greater) {
                    return Err(HeliorbitError::InvalidPropagationParameter(
                        "newton tolerance must be > 0".into(),
                    ));
                }
                if max_iter == 0 {
                    return Err(HeliorbitError::InvalidPropagationParameter(
                        "newton max_iter must be >= 1".into(),
                    ));
                }
            }
            _ => {}
        }
        Ok(self.params)
    }
}

/// Output of the full propagation path.
///
/// Fields
/// ------
/// * `position` – Heliocentric `(x, y, z)` in `length_unit`.
/// * `eccentric_anomaly` – `E` (radians).
/// * `true_anomaly` – `ν` (radians).
/// * `radius` – Heliocentric distance `r` in `length_unit`.
/// * `length_unit` – Unit of `position` and `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationResult {
    pub position: Vector3<f64>,
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
    pub radius: f64,
    pub length_unit: LengthUnit,
}

impl PropagationResult {
    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Same result expressed in another length unit. Anomalies are unchanged.
    pub fn to_unit(&self, unit: LengthUnit) -> PropagationResult {
        let factor = unit.scale_from_au() / self.length_unit.scale_from_au();
        PropagationResult {
            position: self.position * factor,
            radius: self.radius * factor,
            length_unit: unit,
            ..self.clone()
        }
    }
}

impl fmt::Display for PropagationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.length_unit;
        writeln!(
            f,
            "  position = ({:.9}, {:.9}, {:.9}) {unit}",
            self.position.x, self.position.y, self.position.z
        )?;
        writeln!(f, "  r        = {:.9} {unit}", self.radius)?;
        writeln!(f, "  E        = {:.9} rad", self.eccentric_anomaly)?;
        writeln!(f, "  ν        = {:.9} rad", self.true_anomaly)
    }
}

/// Output of the simplified flat-ring path.
///
/// Fields
/// ------
/// * `position` – `(a·cos L, a·sin L, 0)` in `length_unit`.
/// * `mean_longitude` – `L` (radians).
/// * `radius` – Ring radius `a` in `length_unit`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularApproximation {
    pub position: Vector3<f64>,
    pub mean_longitude: Radian,
    pub radius: f64,
    pub length_unit: LengthUnit,
}

/// Rotate a position in the orbital plane into the reference frame.
///
/// `u = ω + ν` is the argument of latitude; the result is
/// `r·(cosΩ cos u − sinΩ sin u cos i, sinΩ cos u + cosΩ sin u cos i, sin u sin i)`.
fn perifocal_to_reference(
    radius: f64,
    argument_of_latitude: Radian,
    inclination: Radian,
    ascending_node: Radian,
) -> Vector3<f64> {
    let (sin_u, cos_u) = argument_of_latitude.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_node, cos_node) = ascending_node.sin_cos();

    Vector3::new(
        radius * (cos_node * cos_u - sin_node * sin_u * cos_i),
        radius * (sin_node * cos_u + cos_node * sin_u * cos_i),
        radius * sin_u * sin_i,
    )
}

/// Heliocentric position of a body from its classical orbital elements.
///
/// Steps
/// -----
/// 1. Validate `e ∈ [0, 1)` and `a > 0`, and require `i, Ω, ω, M` to be set.
/// 2. Convert `i, Ω, ω, M` from degrees to radians.
/// 3. Solve Kepler's equation for `E` with the configured solver.
/// 4. `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`.
/// 5. `r = a·(1 − e·cos E)`.
/// 6. Rotate by `ω`, then `i`, then `Ω` into the reference frame.
/// 7. Scale lengths to `params.length_unit`.
///
/// Arguments
/// ---------
/// * `elements` – Orbital elements (AU, degrees).
/// * `params` – Solver and output unit.
///
/// Return
/// ------
/// * A [`PropagationResult`] with `(x, y, z)`, `E`, `ν` and `r`.
///
/// Errors
/// ------
/// * [`HeliorbitError::InvalidEccentricity`] / [`HeliorbitError::InvalidSemiMajorAxis`] – domain violations.
/// * [`HeliorbitError::InsufficientElements`] – lists every unset angular element.
///
/// See also
/// --------
/// * [`circular_approximation`] – Separate simplified path based on mean longitude.
pub fn heliocentric_position(
    elements: &OrbitalElements,
    params: &PropagationParams,
) -> Result<PropagationResult, HeliorbitError> {
    elements.validate()?;

    let (Some(i), Some(node), Some(peri), Some(m)) = (
        elements.inclination,
        elements.ascending_node_longitude,
        elements.periapsis_argument,
        elements.mean_anomaly,
    ) else {
        return Err(HeliorbitError::InsufficientElements(
            elements.missing_angles(),
        ));
    };

    let e = elements.eccentricity;
    let inclination = i * RADEG;
    let ascending_node = node * RADEG;
    let periapsis_argument = peri * RADEG;
    let mean_anomaly = m * RADEG;

    let eccentric_anomaly = params.solver.solve(mean_anomaly, e);
    let true_anomaly = true_anomaly_from_eccentric(eccentric_anomaly, e);
    let radius_au = elements.semi_major_axis * (1.0 - e * eccentric_anomaly.cos());

    let scale = params.length_unit.scale_from_au();
    let radius = radius_au * scale;
    let position = perifocal_to_reference(
        radius,
        periapsis_argument + true_anomaly,
        inclination,
        ascending_node,
    );

    trace!(
        e,
        eccentric_anomaly,
        true_anomaly,
        radius,
        "propagated orbital elements"
    );

    Ok(PropagationResult {
        position,
        eccentric_anomaly,
        true_anomaly,
        radius,
        length_unit: params.length_unit,
    })
}

/// Heliocentric position at another instant.
///
/// The mean anomaly is first advanced from `elements.epoch` to `epoch` with the
/// mean motion (catalog `n`, or Kepler's third law), then
/// [`heliocentric_position`] runs on the shifted elements.
///
/// Errors
/// ------
/// * [`HeliorbitError::InsufficientElements`] – `epoch` or `M` unset, or any other angle unset.
/// * Domain errors from [`OrbitalElements::validate`].
pub fn heliocentric_position_at(
    elements: &OrbitalElements,
    epoch: Epoch,
    params: &PropagationParams,
) -> Result<PropagationResult, HeliorbitError> {
    elements.validate()?;
    let shifted = elements.at_epoch(epoch.to_jde_tdb_days())?;
    heliocentric_position(&shifted, params)
}

/// Place a body on a flat ring of radius `a` at its mean longitude `L`.
///
/// This is a visualization shortcut for catalogs that only provide `L`: it
/// ignores `e`, `i`, `Ω` and `ω`, and always returns `z = 0`. It is a separate
/// operation and is never used to fill in for [`heliocentric_position`].
///
/// Errors
/// ------
/// * [`HeliorbitError::InvalidSemiMajorAxis`] – `a ≤ 0` or not finite.
/// * [`HeliorbitError::InsufficientElements`] – `L` unset.
pub fn circular_approximation(
    elements: &OrbitalElements,
    params: &PropagationParams,
) -> Result<CircularApproximation, HeliorbitError> {
    let a = elements.semi_major_axis;
    if !(a.is_finite() && a > 0.0) {
        return Err(HeliorbitError::InvalidSemiMajorAxis(a));
    }
    let Some(mean_longitude) = elements.mean_longitude else {
        return Err(HeliorbitError::InsufficientElements(vec![
            Element::MeanLongitude,
        ]));
    };

    let mean_longitude = mean_longitude * RADEG;
    let radius = a * params.length_unit.scale_from_au();
    let (sin_l, cos_l) = mean_longitude.sin_cos();

    Ok(CircularApproximation {
        position: Vector3::new(radius * cos_l, radius * sin_l, 0.0),
        mean_longitude,
        radius,
        length_unit: params.length_unit,
    })
}

/// Propagate every catalog record independently.
///
/// Each record is converted to [`OrbitalElements`] and run through
/// [`heliocentric_position`] (or [`heliocentric_position_at`] when `epoch` is
/// given). A failure is logged and kept in place; it never aborts the batch.
///
/// Return
/// ------
/// * One `Result` per input record, in input order.
pub fn propagate_all(
    records: &[CatalogRecord],
    epoch: Option<Epoch>,
    params: &PropagationParams,
) -> Vec<Result<PropagationResult, HeliorbitError>> {
    records
        .iter()
        .map(|record| {
            let result = record
                .to_orbital_elements()
                .and_then(|elements| match epoch {
                    Some(epoch) => heliocentric_position_at(&elements, epoch, params),
                    None => heliocentric_position(&elements, params),
                });
            if let Err(err) = &result {
                warn!(body = record.full_name(), kind = %record.kind(), "propagation failed: {err}");
            }
            result
        })
        .collect()
}
