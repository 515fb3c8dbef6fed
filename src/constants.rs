//! # Constants and type definitions for heliorbit
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **unit type aliases** used by the propagator and the catalog readers.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, Gaussian gravitational constant)
//! - Unit conversions (degrees ↔ radians, years ↔ days)
//! - Type aliases documenting the unit carried by a plain `f64`

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (radians per day for a = 1 AU)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Number of fixed-point refinements performed by the reference Kepler solver
pub const KEPLER_FIXED_ITERATIONS: usize = 10;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Date (days, TDB)
pub type JulianDate = f64;
