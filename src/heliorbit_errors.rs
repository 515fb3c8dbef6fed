use itertools::Itertools;
use thiserror::Error;

use crate::orbit_type::Element;

fn format_elements(elements: &[Element]) -> String {
    elements.iter().join(", ")
}

#[derive(Error, Debug)]
pub enum HeliorbitError {
    #[error("Invalid eccentricity {0}: only elliptic orbits with 0 <= e < 1 are supported")]
    InvalidEccentricity(f64),

    #[error("Invalid semi-major axis {0}: must be finite and strictly positive")]
    InvalidSemiMajorAxis(f64),

    #[error("Insufficient orbital elements, missing: {}", format_elements(.0))]
    InsufficientElements(Vec<Element>),

    #[error("Invalid propagation parameter: {0}")]
    InvalidPropagationParameter(String),

    #[error("Catalog row {row}: {reason}")]
    CatalogRow { row: usize, reason: String },

    #[error("Unknown catalog kind: {0}")]
    UnknownCatalogKind(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for HeliorbitError {
    fn eq(&self, other: &Self) -> bool {
        use HeliorbitError::*;
        match (self, other) {
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a == b,
            (InvalidSemiMajorAxis(a), InvalidSemiMajorAxis(b)) => a == b,
            (InsufficientElements(a), InsufficientElements(b)) => a == b,
            (InvalidPropagationParameter(a), InvalidPropagationParameter(b)) => a == b,
            (
                CatalogRow {
                    row: ra,
                    reason: sa,
                },
                CatalogRow {
                    row: rb,
                    reason: sb,
                },
            ) => ra == rb && sa == sb,
            (UnknownCatalogKind(a), UnknownCatalogKind(b)) => a == b,

            // not comparable, equal when the variant matches
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
