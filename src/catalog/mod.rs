//! # Solar-system body catalogs
//!
//! Readers for the three tabular sources the propagator consumes, and the
//! tagged union [`CatalogRecord`] that unifies them.
//!
//! - [`planet`] – major planets, given with mean longitude `L` and longitude
//!   of perihelion `ϖ`.
//! - [`neo`] – near-Earth objects with full osculating elements.
//! - [`comet`] – comets, where `a` is frequently missing and derived from `q`.
//!
//! Each table keeps its own column vocabulary in its typed record. Conversion
//! into the canonical [`OrbitalElements`] happens once, through
//! [`CatalogRecord::to_orbital_elements`].
//!
//! ## Example
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use heliorbit::catalog::{Catalog, CatalogKind};
//!
//! let records = Catalog::read(CatalogKind::Neo, Utf8Path::new("data/neo_pha.csv")).unwrap();
//! for record in &records {
//!     println!("{}: {}", record.kind(), record.full_name());
//! }
//! ```
use std::{fmt, fs::File, io, str::FromStr};

use camino::Utf8Path;
use tracing::debug;

use crate::{heliorbit_errors::HeliorbitError, orbit_type::OrbitalElements};

pub mod comet;
pub mod neo;
pub mod planet;
pub(crate) mod reader;

pub use comet::CometElements;
pub use neo::NeoElements;
pub use planet::PlanetElements;

use comet::RawCometRow;
use neo::RawNeoRow;
use planet::RawPlanetRow;
use reader::read_rows;

/// Which source table a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Planet,
    Neo,
    Comet,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogKind::Planet => "planet",
            CatalogKind::Neo => "neo",
            CatalogKind::Comet => "comet",
        };
        f.write_str(name)
    }
}

impl FromStr for CatalogKind {
    type Err = HeliorbitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planet" | "planets" => Ok(CatalogKind::Planet),
            "neo" | "neos" | "neo_pha" | "neo-pha" => Ok(CatalogKind::Neo),
            "comet" | "comets" => Ok(CatalogKind::Comet),
            _ => Err(HeliorbitError::UnknownCatalogKind(s.to_string())),
        }
    }
}

/// A row from any of the catalogs.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRecord {
    Planet(PlanetElements),
    Neo(NeoElements),
    Comet(CometElements),
}

impl CatalogRecord {
    pub fn full_name(&self) -> &str {
        match self {
            CatalogRecord::Planet(p) => &p.full_name,
            CatalogRecord::Neo(n) => &n.full_name,
            CatalogRecord::Comet(c) => &c.full_name,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        match self {
            CatalogRecord::Planet(_) => CatalogKind::Planet,
            CatalogRecord::Neo(_) => CatalogKind::Neo,
            CatalogRecord::Comet(_) => CatalogKind::Comet,
        }
    }

    /// Potentially hazardous asteroid flag. Always `false` for planets.
    pub fn is_pha(&self) -> bool {
        match self {
            CatalogRecord::Planet(_) => false,
            CatalogRecord::Neo(n) => n.pha,
            CatalogRecord::Comet(c) => c.pha,
        }
    }

    /// Convert into the canonical element set used by the propagator.
    ///
    /// Mapping
    /// -------
    /// * Planet – `e, a, i, Ω, ω` copied, `M = L − ϖ` in `[0, 360)` when both are set.
    /// * NEO – every element copied, `M = ma`.
    /// * Comet – every element copied, `a` derived from `q` when absent and `e < 1`.
    ///
    /// Angular elements the source does not provide stay unset.
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::InsufficientElements`] – a comet whose semi-major axis
    ///   is neither given nor derivable.
    /// * [`HeliorbitError::InvalidEccentricity`] – a comet on an open orbit with no `a`.
    pub fn to_orbital_elements(&self) -> Result<OrbitalElements, HeliorbitError> {
        match self {
            CatalogRecord::Planet(p) => Ok(p.to_orbital_elements()),
            CatalogRecord::Neo(n) => Ok(n.to_orbital_elements()),
            CatalogRecord::Comet(c) => c.to_orbital_elements(),
        }
    }
}

impl From<PlanetElements> for CatalogRecord {
    fn from(value: PlanetElements) -> Self {
        CatalogRecord::Planet(value)
    }
}

impl From<NeoElements> for CatalogRecord {
    fn from(value: NeoElements) -> Self {
        CatalogRecord::Neo(value)
    }
}

impl From<CometElements> for CatalogRecord {
    fn from(value: CometElements) -> Self {
        CatalogRecord::Comet(value)
    }
}

/// Read the planet catalog at `path`.
pub fn read_planets(path: &Utf8Path) -> Result<Vec<PlanetElements>, HeliorbitError> {
    debug!(%path, "reading planet catalog");
    read_rows::<_, RawPlanetRow, PlanetElements>(File::open(path)?)
}

/// Read the near-Earth object catalog at `path`.
pub fn read_neos(path: &Utf8Path) -> Result<Vec<NeoElements>, HeliorbitError> {
    debug!(%path, "reading NEO catalog");
    read_rows::<_, RawNeoRow, NeoElements>(File::open(path)?)
}

/// Read the comet catalog at `path`.
pub fn read_comets(path: &Utf8Path) -> Result<Vec<CometElements>, HeliorbitError> {
    debug!(%path, "reading comet catalog");
    read_rows::<_, RawCometRow, CometElements>(File::open(path)?)
}

/// Entry point reading any catalog into [`CatalogRecord`]s.
pub struct Catalog;

impl Catalog {
    /// Read the file at `path` as a catalog of the given kind.
    ///
    /// Arguments
    /// ---------
    /// * `kind` – Source table layout.
    /// * `path` – CSV file with a header row.
    ///
    /// Return
    /// ------
    /// * Every row as a [`CatalogRecord`], in file order.
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::IoError`] – the file cannot be opened.
    /// * [`HeliorbitError::Csv`] – malformed CSV.
    /// * [`HeliorbitError::CatalogRow`] – a row lacks a required field.
    pub fn read(kind: CatalogKind, path: &Utf8Path) -> Result<Vec<CatalogRecord>, HeliorbitError> {
        Ok(match kind {
            CatalogKind::Planet => into_records(read_planets(path)?),
            CatalogKind::Neo => into_records(read_neos(path)?),
            CatalogKind::Comet => into_records(read_comets(path)?),
        })
    }

    /// Same as [`Catalog::read`] on an in-memory or streamed source.
    pub fn from_reader<R: io::Read>(
        kind: CatalogKind,
        reader: R,
    ) -> Result<Vec<CatalogRecord>, HeliorbitError> {
        Ok(match kind {
            CatalogKind::Planet => {
                into_records(read_rows::<_, RawPlanetRow, PlanetElements>(reader)?)
            }
            CatalogKind::Neo => into_records(read_rows::<_, RawNeoRow, NeoElements>(reader)?),
            CatalogKind::Comet => {
                into_records(read_rows::<_, RawCometRow, CometElements>(reader)?)
            }
        })
    }
}

/// Keep planets and only the potentially hazardous small bodies.
///
/// Planets carry no hazard flag and are always kept; NEO and comet rows are
/// kept when their `pha` column is set.
pub fn hazardous_only(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let before = records.len();
    let kept: Vec<CatalogRecord> = records
        .into_iter()
        .filter(|r| r.kind() == CatalogKind::Planet || r.is_pha())
        .collect();
    debug!(before, kept = kept.len(), "kept hazardous bodies");
    kept
}

fn into_records<T: Into<CatalogRecord>>(rows: Vec<T>) -> Vec<CatalogRecord> {
    rows.into_iter().map(Into::into).collect()
}
