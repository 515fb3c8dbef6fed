//! # Tabular position output
//!
//! Turns catalog records into one [`PositionRow`] per body and writes them as
//! CSV with the columns
//!
//! ```text
//! kind,full_name,x,y,z,r,eccentric_anomaly,true_anomaly,status
//! ```
//!
//! `status` is `ok` for the full propagator, `circular` for planets placed on
//! their flat ring, and the error text for bodies that could not be
//! evaluated. Failed rows leave every numeric column empty.
use std::io;

use hifitime::Epoch;
use serde::Serialize;
use tracing::debug;

use crate::{
    catalog::{CatalogKind, CatalogRecord},
    heliorbit_errors::HeliorbitError,
    propagator::{
        circular_approximation, propagate_all, CircularApproximation, PropagationParams,
        PropagationResult,
    },
};

pub const STATUS_OK: &str = "ok";
pub const STATUS_CIRCULAR: &str = "circular";

/// How a batch of records is evaluated.
///
/// Fields
/// ------
/// * `params` – Solver and output length unit.
/// * `epoch` – Common target instant, each row's own epoch when `None`.
/// * `circular_planets` – Send planet rows to [`circular_approximation`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationOptions {
    pub params: PropagationParams,
    pub epoch: Option<Epoch>,
    pub circular_planets: bool,
}

impl EvaluationOptions {
    fn uses_ring(&self, record: &CatalogRecord) -> bool {
        self.circular_planets && record.kind() == CatalogKind::Planet
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRow {
    pub kind: String,
    pub full_name: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub r: Option<f64>,
    pub eccentric_anomaly: Option<f64>,
    pub true_anomaly: Option<f64>,
    pub status: String,
}

impl PositionRow {
    fn failed(record: &CatalogRecord, err: &HeliorbitError) -> Self {
        PositionRow {
            kind: record.kind().to_string(),
            full_name: record.full_name().to_string(),
            x: None,
            y: None,
            z: None,
            r: None,
            eccentric_anomaly: None,
            true_anomaly: None,
            status: err.to_string(),
        }
    }

    fn full(record: &CatalogRecord, result: &PropagationResult) -> Self {
        PositionRow {
            kind: record.kind().to_string(),
            full_name: record.full_name().to_string(),
            x: Some(result.x()),
            y: Some(result.y()),
            z: Some(result.z()),
            r: Some(result.radius),
            eccentric_anomaly: Some(result.eccentric_anomaly),
            true_anomaly: Some(result.true_anomaly),
            status: STATUS_OK.into(),
        }
    }

    fn circular(record: &CatalogRecord, ring: &CircularApproximation) -> Self {
        PositionRow {
            kind: record.kind().to_string(),
            full_name: record.full_name().to_string(),
            x: Some(ring.position.x),
            y: Some(ring.position.y),
            z: Some(ring.position.z),
            r: Some(ring.radius),
            eccentric_anomaly: None,
            true_anomaly: None,
            status: STATUS_CIRCULAR.into(),
        }
    }

    fn from_result(record: &CatalogRecord, result: &Result<PropagationResult, HeliorbitError>) -> Self {
        match result {
            Ok(position) => PositionRow::full(record, position),
            Err(err) => PositionRow::failed(record, err),
        }
    }

    /// `true` unless the body could not be evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.status == STATUS_OK || self.status == STATUS_CIRCULAR
    }
}

fn ring_row(record: &CatalogRecord, params: &PropagationParams) -> PositionRow {
    match record
        .to_orbital_elements()
        .and_then(|elements| circular_approximation(&elements, params))
    {
        Ok(ring) => PositionRow::circular(record, &ring),
        Err(err) => {
            debug!(body = record.full_name(), "circular approximation failed: {err}");
            PositionRow::failed(record, &err)
        }
    }
}

/// Evaluate every record, one row per record in input order.
///
/// Planet rows go through [`circular_approximation`] when
/// `options.circular_planets` is set; every other row goes through
/// [`propagate_all`]. A failure becomes a row carrying the error text.
pub fn evaluate_records(records: &[CatalogRecord], options: &EvaluationOptions) -> Vec<PositionRow> {
    let full_bodies: Vec<CatalogRecord> = records
        .iter()
        .filter(|r| !options.uses_ring(r))
        .cloned()
        .collect();
    let mut full_results = propagate_all(&full_bodies, options.epoch, &options.params).into_iter();

    records
        .iter()
        .filter_map(|record| {
            if options.uses_ring(record) {
                Some(ring_row(record, &options.params))
            } else {
                full_results
                    .next()
                    .map(|result| PositionRow::from_result(record, &result))
            }
        })
        .collect()
}

/// Write `rows` as CSV, header first.
///
/// Errors
/// ------
/// * [`HeliorbitError::Csv`] / [`HeliorbitError::IoError`] – the sink rejected a write.
pub fn write_positions<W: io::Write>(sink: W, rows: &[PositionRow]) -> Result<(), HeliorbitError> {
    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
