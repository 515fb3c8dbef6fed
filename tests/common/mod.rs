#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use heliorbit::propagator::PropagationResult;

pub fn data_path(file: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(file)
}

pub fn assert_position_close(actual: &PropagationResult, expected: [f64; 3], epsilon: f64) {
    assert_relative_eq!(actual.x(), expected[0], epsilon = epsilon);
    assert_relative_eq!(actual.y(), expected[1], epsilon = epsilon);
    assert_relative_eq!(actual.z(), expected[2], epsilon = epsilon);
}

/// `r = a(1 − e cos E)` and `|position| = r`.
pub fn assert_radius_consistent(result: &PropagationResult, a: f64, e: f64) {
    let expected = a * result.length_unit.scale_from_au() * (1.0 - e * result.eccentric_anomaly.cos());
    assert_relative_eq!(result.radius, expected, max_relative = 1e-12);
    assert_relative_eq!(result.position.norm(), result.radius, max_relative = 1e-12);
}
