//! Near-Earth object catalog rows.
//!
//! Source header (the trailing comma produces one unnamed column, which is ignored):
//!
//! ```text
//! neo,pha,full_name,diameter,orbit_id,epoch,e,a,q,i,w,per_y,om,ma,ad,n,moid,H,class,Notes,
//! ```
//!
//! In this table `om` is the longitude of the ascending node and `w` the
//! argument of perihelion.
use serde::Deserialize;

use crate::{
    catalog::reader::{deserialize_flag, non_blank, required, required_name},
    constants::{AstronomicalUnit, Degree, JulianDate},
    orbit_type::OrbitalElements,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RawNeoRow {
    #[serde(default, deserialize_with = "deserialize_flag")]
    neo: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pha: bool,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    diameter: Option<f64>,
    #[serde(default)]
    orbit_id: Option<String>,
    #[serde(default)]
    epoch: Option<f64>,
    #[serde(default)]
    e: Option<f64>,
    #[serde(default)]
    a: Option<f64>,
    #[serde(default)]
    q: Option<f64>,
    #[serde(default)]
    i: Option<f64>,
    #[serde(default)]
    w: Option<f64>,
    #[serde(default)]
    per_y: Option<f64>,
    #[serde(default)]
    om: Option<f64>,
    #[serde(default)]
    ma: Option<f64>,
    #[serde(default)]
    ad: Option<f64>,
    #[serde(default)]
    n: Option<f64>,
    #[serde(default)]
    moid: Option<f64>,
    #[serde(rename = "H", default)]
    h: Option<f64>,
    #[serde(default)]
    class: Option<String>,
    #[serde(rename = "Notes", default)]
    notes: Option<String>,
}

/// One row of the near-Earth object catalog.
///
/// Angles are degrees, distances AU, `mean_motion` degrees per day and
/// `epoch` a Julian Date (TDB).
#[derive(Debug, Clone, PartialEq)]
pub struct NeoElements {
    pub full_name: String,
    pub neo: bool,
    pub pha: bool,
    pub diameter_km: Option<f64>,
    pub orbit_id: Option<String>,
    pub epoch: Option<JulianDate>,
    pub eccentricity: f64,
    pub semi_major_axis: AstronomicalUnit,
    pub perihelion_distance: Option<AstronomicalUnit>,
    pub inclination: Option<Degree>,
    pub periapsis_argument: Option<Degree>,
    pub period_years: Option<f64>,
    pub ascending_node_longitude: Option<Degree>,
    pub mean_anomaly: Option<Degree>,
    pub aphelion_distance: Option<AstronomicalUnit>,
    pub mean_motion: Option<f64>,
    pub moid: Option<AstronomicalUnit>,
    pub absolute_magnitude: Option<f64>,
    pub orbit_class: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<RawNeoRow> for NeoElements {
    type Error = String;

    fn try_from(raw: RawNeoRow) -> Result<Self, Self::Error> {
        Ok(NeoElements {
            full_name: required_name(raw.full_name)?,
            neo: raw.neo,
            pha: raw.pha,
            diameter_km: raw.diameter,
            orbit_id: non_blank(raw.orbit_id),
            epoch: raw.epoch,
            eccentricity: required(raw.e, "e")?,
            semi_major_axis: required(raw.a, "a")?,
            perihelion_distance: raw.q,
            inclination: raw.i,
            periapsis_argument: raw.w,
            period_years: raw.per_y,
            ascending_node_longitude: raw.om,
            mean_anomaly: raw.ma,
            aphelion_distance: raw.ad,
            mean_motion: raw.n,
            moid: raw.moid,
            absolute_magnitude: raw.h,
            orbit_class: non_blank(raw.class),
            notes: non_blank(raw.notes),
        })
    }
}

impl NeoElements {
    pub fn to_orbital_elements(&self) -> OrbitalElements {
        OrbitalElements {
            eccentricity: self.eccentricity,
            semi_major_axis: self.semi_major_axis,
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
        }
    }
}

#[cfg(test)]
mod neo_test {
    use super::*;
    use crate::{catalog::reader::read_rows, heliorbit_errors::HeliorbitError};

    const HEADER: &str =
        "neo,pha,full_name,diameter,orbit_id,epoch,e,a,q,i,w,per_y,om,ma,ad,n,moid,H,class,Notes,";

    fn parse(body: &str) -> Result<Vec<NeoElements>, HeliorbitError> {
        let text = format!("{HEADER}\n{body}");
        read_rows::<_, RawNeoRow, NeoElements>(text.as_bytes())
    }

    #[test]
    fn test_parse_neo_row() {
        let rows = parse(
            "Y,N,433 Eros (A898 PA),16.84,JPL 659,2460600.5,0.2228,1.4581,1.1331,10.828,178.92,1.76,304.28,310.55,1.783,0.5597,0.149,10.38,AMO,,\n",
        )
        .unwrap();
        let eros = &rows[0];
        assert_eq!(eros.full_name, "433 Eros (A898 PA)");
        assert!(eros.neo);
        assert!(!eros.pha);
        assert_eq!(eros.orbit_id.as_deref(), Some("JPL 659"));
        assert_eq!(eros.epoch, Some(2460600.5));
        assert_eq!(eros.periapsis_argument, Some(178.92));
        assert_eq!(eros.ascending_node_longitude, Some(304.28));
        assert_eq!(eros.mean_anomaly, Some(310.55));
        assert_eq!(eros.absolute_magnitude, Some(10.38));
        assert_eq!(eros.orbit_class.as_deref(), Some("AMO"));
        assert_eq!(eros.notes, None);
    }

    #[test]
    fn test_conversion_copies_every_element() {
        let rows = parse(
            "Y,Y,99942 Apophis (2004 MN4),0.34,JPL 220,2460600.5,0.1912,0.9224,0.7460,3.34,126.6,0.886,203.96,142.9,1.099,1.1125,0.0001,19.09,ATE,,\n",
        )
        .unwrap();
        let elements = rows[0].to_orbital_elements();
        assert_eq!(elements.eccentricity, 0.1912);
        assert_eq!(elements.semi_major_axis, 0.9224);
        assert_eq!(elements.inclination, Some(3.34));
        assert_eq!(elements.ascending_node_longitude, Some(203.96));
        assert_eq!(elements.periapsis_argument, Some(126.6));
        assert_eq!(elements.mean_anomaly, Some(142.9));
        assert_eq!(elements.perihelion_distance, Some(0.7460));
        assert_eq!(elements.aphelion_distance, Some(1.099));
        assert_eq!(elements.mean_motion, Some(1.1125));
        assert_eq!(elements.epoch, Some(2460600.5));
        assert!(elements.missing_angles().is_empty());
    }

    #[test]
    fn test_empty_cells_are_unset() {
        let rows = parse("N,N,2024 AB,,,,0.5,2.1,,,,,,,,,,,,,\n").unwrap();
        let row = &rows[0];
        assert_eq!(row.inclination, None);
        assert_eq!(row.mean_anomaly, None);
        assert_eq!(row.epoch, None);
        assert_eq!(row.orbit_id, None);
        assert_eq!(row.to_orbital_elements().missing_angles().len(), 4);
    }

    #[test]
    fn test_missing_semi_major_axis_is_row_error() {
        let err = parse(
            "Y,N,ok,,,,0.5,2.1,,,,,,,,,,,,,\nY,N,bad,,,,0.5,,,,,,,,,,,,,,\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            HeliorbitError::CatalogRow {
                row: 2,
                reason: "missing required column 'a'".into()
            }
        );
    }
}
