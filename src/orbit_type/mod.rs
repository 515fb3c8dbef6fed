//! # Orbital element representations
//!
//! - [`orbital_elements`](crate::orbit_type::orbital_elements) – The canonical
//!   [`OrbitalElements`] record `(a, e, i, Ω, ω, M)` plus the optional alternate
//!   fields found in some catalogs (`q`, `L`, `ϖ`, `Q`, `n`, period, epoch).
//! - [`Element`] – Names of the individual elements, used to report which
//!   ones are missing when a propagation path cannot run.
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use heliorbit::orbit_type::OrbitalElements;
//! use heliorbit::propagator::{heliocentric_position, PropagationParams};
//!
//! let elements = OrbitalElements::new(0.0167, 1.0).with_angles(0.00005, -11.26, 114.2, 358.6);
//! let result = heliocentric_position(&elements, &PropagationParams::default()).unwrap();
//! println!("r = {} AU", result.radius);
//! ```
use std::fmt;

/// Canonical orbital elements with explicit optionality.
pub mod orbital_elements;

pub use orbital_elements::OrbitalElements;

/// Individual orbital element that a propagation path may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    SemiMajorAxis,
    Inclination,
    AscendingNodeLongitude,
    PeriapsisArgument,
    MeanAnomaly,
    MeanLongitude,
    Epoch,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Element::SemiMajorAxis => "semi-major axis (a)",
            Element::Inclination => "inclination (i)",
            Element::AscendingNodeLongitude => "longitude of ascending node (Ω)",
            Element::PeriapsisArgument => "argument of periapsis (ω)",
            Element::MeanAnomaly => "mean anomaly (M)",
            Element::MeanLongitude => "mean longitude (L)",
            Element::Epoch => "epoch",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod orbit_type_test {
    use super::*;
    use crate::heliorbit_errors::HeliorbitError;

    #[test]
    fn test_insufficient_elements_message() {
        let err = HeliorbitError::InsufficientElements(vec![
            Element::PeriapsisArgument,
            Element::MeanAnomaly,
        ]);
        assert_eq!(
            err.to_string(),
            "Insufficient orbital elements, missing: argument of periapsis (ω), mean anomaly (M)"
        );
    }
}
