//! Comet catalog rows.
//!
//! Source header:
//!
//! ```text
//! full_name,neo,pha,H,G,M1,M2,epoch,e,a,q,i,om,w,ma,ad,n,per_y,moid
//! ```
//!
//! Comet tables are the least regular of the three: many rows leave `a` empty
//! (only `q` is reliable for long-period comets) and magnitude columns often
//! carry placeholders. Numeric cells that do not parse are treated as unset
//! instead of failing the whole file.
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::reader::{deserialize_flag, required, required_name},
    constants::{AstronomicalUnit, Degree, JulianDate},
    heliorbit_errors::HeliorbitError,
    orbit_type::{Element, OrbitalElements},
};

#[derive(Debug, Deserialize)]
pub(crate) struct RawCometRow {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    neo: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pha: bool,
    #[serde(rename = "H", default, deserialize_with = "csv::invalid_option")]
    h: Option<f64>,
    #[serde(rename = "G", default, deserialize_with = "csv::invalid_option")]
    g: Option<f64>,
    #[serde(rename = "M1", default, deserialize_with = "csv::invalid_option")]
    m1: Option<f64>,
    #[serde(rename = "M2", default, deserialize_with = "csv::invalid_option")]
    m2: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    epoch: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    e: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    a: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    q: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    i: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    om: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    w: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ma: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ad: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    n: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    per_y: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    moid: Option<f64>,
}

/// One row of the comet catalog.
///
/// `semi_major_axis` holds the catalog value when present, else `q / (1 − e)`
/// for elliptic orbits. It stays `None` for parabolic or hyperbolic rows with
/// no `a` column, and for rows where neither `a` nor `q` is given.
#[derive(Debug, Clone, PartialEq)]
pub struct CometElements {
    pub full_name: String,
    pub neo: bool,
    pub pha: bool,
    pub total_magnitude: Option<f64>,
    pub slope_parameter: Option<f64>,
    pub m1: Option<f64>,
    pub m2: Option<f64>,
    pub epoch: Option<JulianDate>,
    pub eccentricity: f64,
    pub semi_major_axis: Option<AstronomicalUnit>,
    pub perihelion_distance: Option<AstronomicalUnit>,
    pub inclination: Option<Degree>,
    pub ascending_node_longitude: Option<Degree>,
    pub periapsis_argument: Option<Degree>,
    pub mean_anomaly: Option<Degree>,
    pub aphelion_distance: Option<AstronomicalUnit>,
    pub mean_motion: Option<f64>,
    pub period_years: Option<f64>,
    pub moid: Option<AstronomicalUnit>,
}

/// `a = q / (1 − e)`, defined for elliptic orbits only.
fn semi_major_axis_from_perihelion(q: AstronomicalUnit, e: f64) -> Option<AstronomicalUnit> {
    (e < 1.0).then(|| q / (1.0 - e))
}

impl TryFrom<RawCometRow> for CometElements {
    type Error = String;

    fn try_from(raw: RawCometRow) -> Result<Self, Self::Error> {
        let full_name = required_name(raw.full_name)?;
        let eccentricity = required(raw.e, "e")?;

        let semi_major_axis = raw.a.or_else(|| {
            let derived = raw
                .q
                .and_then(|q| semi_major_axis_from_perihelion(q, eccentricity));
            if derived.is_some() {
                debug!(body = %full_name, "semi-major axis derived from perihelion distance");
            }
            derived
        });

        Ok(CometElements {
            full_name,
            neo: raw.neo,
            pha: raw.pha,
            total_magnitude: raw.h,
            slope_parameter: raw.g,
            m1: raw.m1,
            m2: raw.m2,
            epoch: raw.epoch,
            eccentricity,
            semi_major_axis,
            perihelion_distance: raw.q,
            inclination: raw.i,
            ascending_node_longitude: raw.om,
            periapsis_argument: raw.w,
            mean_anomaly: raw.ma,
            aphelion_distance: raw.ad,
            mean_motion: raw.n,
            period_years: raw.per_y,
            moid: raw.moid,
        })
    }
}

impl CometElements {
    /// Convert to [`OrbitalElements`].
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::InvalidEccentricity`] – no semi-major axis and `e` outside `[0, 1)`.
    /// * [`HeliorbitError::InsufficientElements`] – elliptic orbit with neither `a` nor `q`.
    pub fn to_orbital_elements(&self) -> Result<OrbitalElements, HeliorbitError> {
        let semi_major_axis = match self.semi_major_axis {
            Some(a) => a,
            None if !(0.0..1.0).contains(&self.eccentricity) => {
                return Err(HeliorbitError::InvalidEccentricity(self.eccentricity))
            }
            None => {
                return Err(HeliorbitError::InsufficientElements(vec![
                    Element::SemiMajorAxis,
                ]))
            }
        };

        Ok(OrbitalElements {
            eccentricity: self.eccentricity,
            semi_major_axis,
            inclination: self.inclination,
            ascending_node_longitude: self.ascending_node_longitude,
            periapsis_argument: self.periapsis_argument,
            mean_anomaly: self.mean_anomaly,
            perihelion_distance: self.perihelion_distance,
            aphelion_distance: self.aphelion_distance,
            mean_motion: self.mean_motion,
            period_years: self.period_years,
            epoch: self.epoch,
            ..Default::default()
        })
    }
}
