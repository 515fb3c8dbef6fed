//! # Canonical orbital elements
//!
//! [`OrbitalElements`] is the single shape every catalog row is converted into
//! before propagation. Only the eccentricity and the semi-major axis are
//! mandatory; every angular element is an explicit `Option` so that a missing
//! column is never confused with a value of zero.
//!
//! ## Units
//!
//! - Lengths: **AU**
//! - Angles: **degrees** (converted to radians by the propagator)
//! - Mean motion: **degrees per day**
//! - Epoch: **Julian Date (TDB)**
use std::fmt;

use crate::{
    constants::{
        AstronomicalUnit, Degree, JulianDate, DAYS_PER_JULIAN_YEAR, GAUSS_GRAV, RADEG,
    },
    heliorbit_errors::HeliorbitError,
    orbit_type::Element,
};

/// Classical orbital elements with explicit optionality.
///
/// Units
/// -----
/// * `eccentricity`: unitless, `[0, 1)` for the propagator.
/// * `semi_major_axis`: AU, strictly positive.
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`, `mean_anomaly`: degrees.
/// * `perihelion_distance`, `aphelion_distance`: AU.
/// * `mean_longitude`, `periapsis_longitude`: degrees.
/// * `mean_motion`: degrees per day.
/// * `period_years`: Julian years.
/// * `epoch`: Julian Date (TDB) at which `mean_anomaly` is valid.
///
/// See also
/// --------
/// * [`crate::catalog::CatalogRecord::to_orbital_elements`] – Construction from catalog rows.
/// * [`crate::propagator::heliocentric_position`] – Consumes the angular elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrbitalElements {
    pub eccentricity: f64,
    pub semi_major_axis: AstronomicalUnit,
    pub inclination: Option<Degree>,
    pub ascending_node_longitude: Option<Degree>,
    pub periapsis_argument: Option<Degree>,
    pub mean_anomaly: Option<Degree>,

    pub perihelion_distance: Option<AstronomicalUnit>,
    pub mean_longitude: Option<Degree>,
    pub periapsis_longitude: Option<Degree>,
    pub aphelion_distance: Option<AstronomicalUnit>,
    pub mean_motion: Option<f64>,
    pub period_years: Option<f64>,
    pub epoch: Option<JulianDate>,
}

impl OrbitalElements {
    /// Build an element set with only `e` and `a` set; every other field is unset.
    pub fn new(eccentricity: f64, semi_major_axis: AstronomicalUnit) -> Self {
        OrbitalElements {
            eccentricity,
            semi_major_axis,
            ..Default::default()
        }
    }

    /// Set the four angular elements `(i, Ω, ω, M)` at once, in degrees.
    pub fn with_angles(
        mut self,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
    ) -> Self {
        self.inclination = Some(inclination);
        self.ascending_node_longitude = Some(ascending_node_longitude);
        self.periapsis_argument = Some(periapsis_argument);
        self.mean_anomaly = Some(mean_anomaly);
        self
    }

    /// Set the epoch (JD, TDB) of the mean anomaly.
    pub fn with_epoch(mut self, epoch: JulianDate) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Check the domain constraints shared by every propagation path.
    ///
    /// Return
    /// ------
    /// * `Ok(())` when `0 ≤ e < 1` and `a` is finite and strictly positive.
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::InvalidEccentricity`] – `e` outside `[0, 1)` or NaN.
    /// * [`HeliorbitError::InvalidSemiMajorAxis`] – `a ≤ 0`, NaN or infinite.
    pub fn validate(&self) -> Result<(), HeliorbitError> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(HeliorbitError::InvalidEccentricity(self.eccentricity));
        }
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return Err(HeliorbitError::InvalidSemiMajorAxis(self.semi_major_axis));
        }
        Ok(())
    }

    /// List the angular elements required by the full 3D transform that are unset.
    pub fn missing_angles(&self) -> Vec<Element> {
        [
            (Element::Inclination, self.inclination),
            (Element::AscendingNodeLongitude, self.ascending_node_longitude),
            (Element::PeriapsisArgument, self.periapsis_argument),
            (Element::MeanAnomaly, self.mean_anomaly),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(element, _)| element)
        .collect()
    }

    /// Perihelion distance `q` (AU): the catalog value when present, else `a(1 − e)`.
    pub fn perihelion(&self) -> AstronomicalUnit {
        self.perihelion_distance
            .unwrap_or(self.semi_major_axis * (1.0 - self.eccentricity))
    }

    /// Aphelion distance `Q` (AU): the catalog value when present, else `a(1 + e)`.
    pub fn aphelion(&self) -> AstronomicalUnit {
        self.aphelion_distance
            .unwrap_or(self.semi_major_axis * (1.0 + self.eccentricity))
    }

    /// Mean motion in degrees per day.
    ///
    /// Uses the catalog value when present, else Kepler's third law for a
    /// massless body around the Sun: `n = k·a^(−3/2)` with the Gaussian constant `k`.
    pub fn mean_motion_deg_per_day(&self) -> f64 {
        self.mean_motion
            .unwrap_or_else(|| GAUSS_GRAV / self.semi_major_axis.powf(1.5) / RADEG)
    }

    /// Orbital period in days, derived from the mean motion.
    pub fn period_days(&self) -> f64 {
        360.0 / self.mean_motion_deg_per_day()
    }

    /// Orbital period in Julian years: the catalog value when present, else derived.
    pub fn period(&self) -> f64 {
        self.period_years
            .unwrap_or_else(|| self.period_days() / DAYS_PER_JULIAN_YEAR)
    }

    /// Mean anomaly advanced from [`Self::epoch`] to `target` (JD, TDB).
    ///
    /// `M(t) = M₀ + n·(t − t₀)`, normalized to `[0, 360)` degrees.
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::InsufficientElements`] – `mean_anomaly` or `epoch` unset.
    pub fn mean_anomaly_at(&self, target: JulianDate) -> Result<Degree, HeliorbitError> {
        let missing: Vec<Element> = [
            (Element::MeanAnomaly, self.mean_anomaly.is_none()),
            (Element::Epoch, self.epoch.is_none()),
        ]
        .into_iter()
        .filter_map(|(element, unset)| unset.then_some(element))
        .collect();

        match (self.mean_anomaly, self.epoch) {
            (Some(m0), Some(t0)) => {
                let m = m0 + self.mean_motion_deg_per_day() * (target - t0);
                Ok(m.rem_euclid(360.0))
            }
            _ => Err(HeliorbitError::InsufficientElements(missing)),
        }
    }

    /// Copy of these elements with the mean anomaly moved to `target` (JD, TDB).
    pub fn at_epoch(&self, target: JulianDate) -> Result<OrbitalElements, HeliorbitError> {
        let mean_anomaly = self.mean_anomaly_at(target)?;
        Ok(OrbitalElements {
            mean_anomaly: Some(mean_anomaly),
            epoch: Some(target),
            ..self.clone()
        })
    }
}

fn fmt_optional_angle(value: Option<Degree>) -> String {
    match value {
        Some(v) => format!("{v:.6}°"),
        None => "unset".to_string(),
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epoch {
            Some(epoch) => writeln!(f, "Orbital Elements @ epoch (JD): {epoch:.6}")?,
            None => writeln!(f, "Orbital Elements @ epoch (JD): unset")?,
        }
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {}",
            fmt_optional_angle(self.inclination)
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {}",
            fmt_optional_angle(self.ascending_node_longitude)
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {}",
            fmt_optional_angle(self.periapsis_argument)
        )?;
        writeln!(
            f,
            "  M   (mean anomaly)          = {}",
            fmt_optional_angle(self.mean_anomaly)
        )
    }
}

#[cfg(test)]
mod test_orbital_elements {
    use super::*;
    use approx::assert_relative_eq;

    fn earth_like() -> OrbitalElements {
        OrbitalElements::new(0.0167, 1.0).with_angles(0.00005, -11.26, 114.2, 358.6)
    }

    #[test]
    fn test_validate_domain() {
        assert!(earth_like().validate().is_ok());
        assert!(OrbitalElements::new(0.0, 1.0).validate().is_ok());

        assert_eq!(
            OrbitalElements::new(1.0, 1.0).validate(),
            Err(HeliorbitError::InvalidEccentricity(1.0))
        );
        assert_eq!(
            OrbitalElements::new(-0.1, 1.0).validate(),
            Err(HeliorbitError::InvalidEccentricity(-0.1))
        );
        assert!(OrbitalElements::new(f64::NAN, 1.0).validate().is_err());
        assert_eq!(
            OrbitalElements::new(0.5, 0.0).validate(),
            Err(HeliorbitError::InvalidSemiMajorAxis(0.0))
        );
        assert!(OrbitalElements::new(0.5, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_missing_angles() {
        assert!(earth_like().missing_angles().is_empty());

        let mut elements = earth_like();
        elements.mean_anomaly = None;
        elements.inclination = None;
        assert_eq!(
            elements.missing_angles(),
            vec![Element::Inclination, Element::MeanAnomaly]
        );

        assert_eq!(OrbitalElements::new(0.1, 2.0).missing_angles().len(), 4);
    }

    #[test]
    fn test_apsides() {
        let elements = OrbitalElements::new(0.9, 2.0);
        assert_relative_eq!(elements.perihelion(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(elements.aphelion(), 3.8, epsilon = 1e-12);

        let elements = OrbitalElements {
            perihelion_distance: Some(0.25),
            aphelion_distance: Some(3.5),
            ..OrbitalElements::new(0.9, 2.0)
        };
        assert_eq!(elements.perihelion(), 0.25);
        assert_eq!(elements.aphelion(), 3.5);
    }

    #[test]
    fn test_period_from_third_law() {
        // a = 1 AU → one sidereal year
        let elements = OrbitalElements::new(0.0, 1.0);
        assert_relative_eq!(elements.period_days(), 365.2568983, epsilon = 1e-4);
        assert_relative_eq!(elements.period(), 1.0000189, epsilon = 1e-6);

        let elements = OrbitalElements {
            mean_motion: Some(1.0),
            period_years: Some(0.9856),
            ..OrbitalElements::new(0.0, 1.0)
        };
        assert_eq!(elements.period_days(), 360.0);
        assert_eq!(elements.period(), 0.9856);
    }

    #[test]
    fn test_mean_anomaly_at() {
        let elements = OrbitalElements {
            mean_motion: Some(0.5),
            ..OrbitalElements::new(0.2, 1.5).with_angles(10.0, 20.0, 30.0, 350.0)
        }
        .with_epoch(2_460_000.5);

        assert_relative_eq!(
            elements.mean_anomaly_at(2_460_010.5).unwrap(),
            355.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            elements.mean_anomaly_at(2_460_030.5).unwrap(),
            5.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            elements.mean_anomaly_at(2_459_990.5).unwrap(),
            345.0,
            epsilon = 1e-9
        );

        let advanced = elements.at_epoch(2_460_010.5).unwrap();
        assert_eq!(advanced.epoch, Some(2_460_010.5));
        assert_eq!(advanced.inclination, Some(10.0));
    }

    #[test]
    fn test_mean_anomaly_at_requires_epoch() {
        let elements = OrbitalElements::new(0.2, 1.5);
        assert_eq!(
            elements.mean_anomaly_at(2_460_000.5),
            Err(HeliorbitError::InsufficientElements(vec![
                Element::MeanAnomaly,
                Element::Epoch
            ]))
        );

        let elements = earth_like();
        assert_eq!(
            elements.mean_anomaly_at(2_460_000.5),
            Err(HeliorbitError::InsufficientElements(vec![Element::Epoch]))
        );
    }

    #[test]
    fn test_display_marks_unset() {
        let text = format!("{}", OrbitalElements::new(0.1, 2.0));
        assert!(text.contains("unset"));
        assert!(text.contains("2.000000 AU"));
    }
}
