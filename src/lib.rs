pub mod catalog;
pub mod constants;
pub mod heliorbit_errors;
pub mod kepler;
pub mod orbit_type;
pub mod output;
pub mod propagator;

pub use catalog::{hazardous_only, Catalog, CatalogKind, CatalogRecord};
pub use heliorbit_errors::HeliorbitError;
pub use orbit_type::{Element, OrbitalElements};
pub use propagator::{
    circular_approximation, heliocentric_position, heliocentric_position_at, propagate_all,
    KeplerSolver, LengthUnit, PropagationParams, PropagationResult,
};
