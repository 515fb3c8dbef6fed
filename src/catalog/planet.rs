//! Planet catalog rows.
//!
//! Source header:
//!
//! ```text
//! full_name,T (years),e,a (AU),i,L (mean long.),varpi (long.peri),Om (Long. Ascend node),om (arg peri),diameter (km),Orbital Vel. (km/s)
//! ```
//!
//! Planet tables give the mean longitude `L` and the longitude of perihelion
//! `ϖ` instead of a mean anomaly. The conversion to [`OrbitalElements`] derives
//! `M = L − ϖ`, which is the only element mapping done on this path.
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::reader::{required, required_name},
    constants::{AstronomicalUnit, Degree},
    orbit_type::OrbitalElements,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlanetRow {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(rename = "T (years)", default)]
    period_years: Option<f64>,
    #[serde(default)]
    e: Option<f64>,
    #[serde(rename = "a (AU)", alias = "a", default)]
    a: Option<f64>,
    #[serde(default)]
    i: Option<f64>,
    #[serde(rename = "L (mean long.)", default)]
    mean_longitude: Option<f64>,
    #[serde(rename = "varpi (long.peri)", default)]
    periapsis_longitude: Option<f64>,
    #[serde(rename = "Om (Long. Ascend node)", default)]
    ascending_node_longitude: Option<f64>,
    #[serde(rename = "om (arg peri)", default)]
    periapsis_argument: Option<f64>,
    #[serde(rename = "diameter (km)", default)]
    diameter_km: Option<f64>,
    #[serde(rename = "Orbital Vel. (km/s)", default)]
    orbital_velocity_km_s: Option<f64>,
}

/// One row of the planet catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetElements {
    pub full_name: String,
    pub period_years: Option<f64>,
    pub eccentricity: f64,
    pub semi_major_axis: AstronomicalUnit,
    pub inclination: Option<Degree>,
    pub mean_longitude: Option<Degree>,
    pub periapsis_longitude: Option<Degree>,
    pub ascending_node_longitude: Option<Degree>,
    pub periapsis_argument: Option<Degree>,
    pub diameter_km: Option<f64>,
    pub orbital_velocity_km_s: Option<f64>,
}

impl TryFrom<RawPlanetRow> for PlanetElements {
    type Error = String;

    fn try_from(raw: RawPlanetRow) -> Result<Self, Self::Error> {
        Ok(PlanetElements {
            full_name: required_name(raw.full_name)?,
            period_years: raw.period_years,
            eccentricity: required(raw.e, "e")?,
            semi_major_axis: required(raw.a, "a (AU)")?,
            inclination: raw.i,
            mean_longitude: raw.mean_longitude,
            periapsis_longitude: raw.periapsis_longitude,
            ascending_node_longitude: raw.ascending_node_longitude,
            periapsis_argument: raw.periapsis_argument,
            diameter_km: raw.diameter_km,
            orbital_velocity_km_s: raw.orbital_velocity_km_s,
        })
    }
}

impl PlanetElements {
    /// Mean anomaly `M = L − ϖ` in `[0, 360)` degrees, when both longitudes are known.
    pub fn mean_anomaly(&self) -> Option<Degree> {
        match (self.mean_longitude, self.periapsis_longitude) {
            (Some(l), Some(varpi)) => Some((l - varpi).rem_euclid(360.0)),
            _ => None,
        }
    }

    pub fn to_orbital_elements(&self) -> OrbitalElements {
        let mean_anomaly = self.mean_anomaly();
        if mean_anomaly.is_none() {
            debug!(
                body = %self.full_name,
                "mean anomaly left unset, L or varpi missing"
            );
        }

        OrbitalElements {
            eccentricity: self.eccentricity,
            semi_major_axis: self.semi_major_axis,
            inclination: self.inclination,
            ascending_node_longitude: self.ascending_node_longitude,
            periapsis_argument: self.periapsis_argument,
            mean_anomaly,
            mean_longitude: self.mean_longitude,
            periapsis_longitude: self.periapsis_longitude,
            period_years: self.period_years,
            ..Default::default()
        }
    }
}
