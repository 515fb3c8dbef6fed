//! # CSV plumbing shared by the catalog readers
//!
//! Every catalog is read the same way: a header row, one body per line,
//! surrounding whitespace trimmed, columns matched by header name. Each row is
//! first deserialized into a loose `Raw*Row` struct (every column optional),
//! then checked into its typed record with `TryFrom`. A row that fails the
//! check aborts the read with [`HeliorbitError::CatalogRow`] carrying its
//! 1-based data row number.
use std::io;

use csv::{ReaderBuilder, Trim};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use tracing::debug;

use crate::heliorbit_errors::HeliorbitError;

/// Deserialize and check every data row of a catalog.
///
/// Arguments
/// ---------
/// * `reader` – Any byte source holding the CSV text, header row included.
///
/// Return
/// ------
/// * The typed records, in file order.
///
/// Errors
/// ------
/// * [`HeliorbitError::Csv`] – malformed CSV or a cell that cannot be parsed.
/// * [`HeliorbitError::CatalogRow`] – a row is missing a required field.
pub(crate) fn read_rows<R, Raw, T>(reader: R) -> Result<Vec<T>, HeliorbitError>
where
    R: io::Read,
    Raw: DeserializeOwned,
    T: TryFrom<Raw, Error = String>,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<Raw>().enumerate() {
        let raw = row?;
        let record =
            T::try_from(raw).map_err(|reason| HeliorbitError::CatalogRow { row: idx + 1, reason })?;
        records.push(record);
    }

    debug!(rows = records.len(), "catalog rows parsed");
    Ok(records)
}

/// Unwrap a required numeric column.
pub(crate) fn required<T>(value: Option<T>, column: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("missing required column '{column}'"))
}

/// Unwrap a required, non-blank name column.
pub(crate) fn required_name(value: Option<String>) -> Result<String, String> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err("missing required column 'full_name'".to_string()),
    }
}

/// Keep a free-text column only when it carries something.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Deserialize a yes/no catalog flag.
///
/// Accepts `Y`/`N`, `1`/`0` and `true`/`false` (any case). An empty cell is `false`.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "y" | "yes" | "1" | "true" => Ok(true),
            "n" | "no" | "0" | "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid flag value '{other}'"
            ))),
        },
    }
}
