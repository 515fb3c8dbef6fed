//! Heliocentric position CLI
//!
//! Reads one or more body catalogs, evaluates each body at a single instant
//! and writes the positions as CSV.
//!
//! Usage:
//!   heliorbit --planets data/planets.csv \
//!             --neos data/neo_pha.csv \
//!             --comets data/comets.csv \
//!             --unit km --output positions.csv

use std::{fs::File, io};

use anyhow::{bail, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use hifitime::Epoch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use heliorbit::{
    catalog::{hazardous_only, Catalog, CatalogKind, CatalogRecord},
    heliorbit_errors::HeliorbitError,
    output::{evaluate_records, write_positions, EvaluationOptions},
    propagator::{LengthUnit, PropagationParams},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitArg {
    Au,
    Km,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Fixed,
    Newton,
}

#[derive(Parser, Debug)]
#[command(
    name = "heliorbit",
    about = "Heliocentric positions of planets, NEOs and comets from orbital elements"
)]
struct Args {
    /// Planet catalog (CSV)
    #[arg(long)]
    planets: Option<Utf8PathBuf>,

    /// Near-Earth object catalog (CSV)
    #[arg(long)]
    neos: Option<Utf8PathBuf>,

    /// Comet catalog (CSV)
    #[arg(long)]
    comets: Option<Utf8PathBuf>,

    /// Output length unit
    #[arg(long, value_enum, default_value = "au")]
    unit: UnitArg,

    /// Kepler solver
    #[arg(long, value_enum, default_value = "fixed")]
    solver: SolverArg,

    /// Newton step tolerance (radians)
    #[arg(long, default_value_t = 1e-12)]
    tolerance: f64,

    /// Newton iteration cap, or iteration count of the fixed solver
    #[arg(long)]
    max_iter: Option<usize>,

    /// Evaluate at this Julian Date (TDB) instead of each row's own epoch
    #[arg(long)]
    epoch: Option<f64>,

    /// Place planets on a flat ring at their mean longitude
    #[arg(long)]
    circular_planets: bool,

    /// Keep only potentially hazardous NEOs and comets (planets are always kept)
    #[arg(long)]
    pha_only: bool,

    /// Output CSV file, stdout when omitted
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn propagation_params(&self) -> Result<PropagationParams, HeliorbitError> {
        let builder = PropagationParams::builder().length_unit(match self.unit {
            UnitArg::Au => LengthUnit::AstronomicalUnit,
            UnitArg::Km => LengthUnit::Kilometer,
        });
        let builder = match (self.solver, self.max_iter) {
            (SolverArg::Fixed, Some(iterations)) => builder.fixed_iterations(iterations),
            (SolverArg::Fixed, None) => builder,
            (SolverArg::Newton, max_iter) => builder.newton(self.tolerance, max_iter.unwrap_or(50)),
        };
        builder.build()
    }

    fn evaluation_options(&self) -> Result<EvaluationOptions, HeliorbitError> {
        Ok(EvaluationOptions {
            params: self.propagation_params()?,
            epoch: self.epoch.map(Epoch::from_jde_tdb),
            circular_planets: self.circular_planets,
        })
    }

    fn catalogs(&self) -> Vec<(CatalogKind, &Utf8PathBuf)> {
        [
            (CatalogKind::Planet, self.planets.as_ref()),
            (CatalogKind::Neo, self.neos.as_ref()),
            (CatalogKind::Comet, self.comets.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|p| (kind, p)))
        .collect()
    }
}

/// Load the requested catalogs, evaluate them and write the CSV to `sink`.
fn run<W: io::Write>(args: &Args, sink: W) -> Result<()> {
    let catalogs = args.catalogs();
    if catalogs.is_empty() {
        bail!("no catalog given, use --planets, --neos or --comets");
    }
    let options = args.evaluation_options()?;

    let mut records: Vec<CatalogRecord> = Vec::new();
    for (kind, path) in catalogs {
        let loaded = Catalog::read(kind, path)?;
        info!("Loaded {} {kind} rows from {path}", loaded.len());
        records.extend(loaded);
    }
    if args.pha_only {
        records = hazardous_only(records);
        info!("Kept {} rows after hazardous selection", records.len());
    }

    let rows = evaluate_records(&records, &options);
    write_positions(sink, &rows)?;

    let failures = rows.iter().filter(|r| !r.is_evaluated()).count();
    info!(
        "Evaluated {} bodies ({} failed) in {}",
        rows.len(),
        failures,
        options.params.length_unit
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &args.output {
        Some(path) => run(&args, File::create(path)?),
        None => run(&args, io::stdout().lock()),
    }
}

#[cfg(test)]
mod cli_test {
    use super::*;
    use heliorbit::constants::AU;

    const PLANETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/planets.csv");
    const NEOS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/neo_pha.csv");

    fn run_to_records(argv: &[&str]) -> Vec<csv::StringRecord> {
        let args = Args::try_parse_from(argv).unwrap();
        let mut buffer = Vec::new();
        run(&args, &mut buffer).unwrap();
        csv::Reader::from_reader(buffer.as_slice())
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_no_catalog_is_an_error() {
        let args = Args::try_parse_from(["heliorbit", "--unit", "km"]).unwrap();
        let err = run(&args, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no catalog given"));
    }

    #[test]
    fn test_invalid_solver_settings_are_rejected() {
        let args = Args::try_parse_from([
            "heliorbit", "--neos", NEOS, "--solver", "newton", "--max-iter", "0",
        ])
        .unwrap();
        assert!(run(&args, Vec::new()).is_err());
    }

    #[test]
    fn test_circular_planets_status() {
        let rows = run_to_records(&["heliorbit", "--planets", PLANETS, "--circular-planets"]);
        assert_eq!(rows.len(), 8);
        for row in &rows {
            assert_eq!(&row[0], "planet");
            assert_eq!(row[4].parse::<f64>().unwrap(), 0.0);
            assert_eq!(&row[6], "");
            assert_eq!(&row[7], "");
            assert_eq!(&row[8], "circular");
        }
        assert_eq!(&rows[2][1], "Earth");
        assert_eq!(rows[2][5].parse::<f64>().unwrap(), 1.00000261);
    }

    #[test]
    fn test_failed_body_keeps_error_text() {
        let rows = run_to_records(&["heliorbit", "--neos", NEOS]);
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][8], "ok");

        let failed = &rows[3];
        assert_eq!(&failed[1], "(2023 ZZ9)");
        for column in 2..8 {
            assert_eq!(&failed[column], "");
        }
        assert_eq!(
            &failed[8],
            "Insufficient orbital elements, missing: mean anomaly (M)"
        );
    }

    #[test]
    fn test_kilometer_unit_scales_output() {
        let au = run_to_records(&["heliorbit", "--neos", NEOS]);
        let km = run_to_records(&["heliorbit", "--neos", NEOS, "--unit", "km"]);

        for (au, km) in au.iter().zip(&km).take(3) {
            for column in 2..6 {
                let au_value: f64 = au[column].parse().unwrap();
                let km_value: f64 = km[column].parse().unwrap();
                approx::assert_relative_eq!(km_value, au_value * AU, max_relative = 1e-12);
            }
            assert_eq!(&au[6], &km[6]);
        }
    }

    #[test]
    fn test_pha_only_selection() {
        let rows = run_to_records(&["heliorbit", "--planets", PLANETS, "--neos", NEOS, "--pha-only"]);
        let neos: Vec<&str> = rows
            .iter()
            .filter(|r| &r[0] == "neo")
            .map(|r| r.get(1).unwrap_or_default())
            .collect();
        assert_eq!(
            neos,
            vec!["99942 Apophis (2004 MN4)", "101955 Bennu (1999 RQ36)"]
        );
        assert_eq!(rows.iter().filter(|r| &r[0] == "planet").count(), 8);
    }
}
