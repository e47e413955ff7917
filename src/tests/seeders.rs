use core::f64::consts::TAU;

use crate::{body_presets, KeplerOrbit, ReferenceBody};

pub(super) fn test_body() -> ReferenceBody {
    body_presets::kerbin()
}

fn random_inclination() -> f64 {
    if rand::random_bool(0.5) {
        rand::random_range(0.05..3.0)
    } else {
        0.0
    }
}

pub(super) fn random_circular() -> KeplerOrbit {
    KeplerOrbit::new(
        0.0,
        rand::random_range(7e5..5e7),
        random_inclination(),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(-1e4..1e4),
        test_body(),
    )
}

pub(super) fn random_elliptic() -> KeplerOrbit {
    KeplerOrbit::new(
        rand::random_range(0.01..0.9),
        rand::random_range(7e5..5e7),
        random_inclination(),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(-1e4..1e4),
        test_body(),
    )
}

pub(super) fn random_hyperbolic() -> KeplerOrbit {
    KeplerOrbit::new(
        rand::random_range(1.1..4.0),
        rand::random_range(7e5..5e7),
        random_inclination(),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(-3.0..3.0),
        rand::random_range(-1e4..1e4),
        test_body(),
    )
}

/// An elliptic orbit that is inclined and eccentric enough for every
/// node and apsis to be well-defined.
pub(super) fn random_inclined_elliptic() -> KeplerOrbit {
    KeplerOrbit::new(
        rand::random_range(0.05..0.8),
        rand::random_range(7e5..5e7),
        rand::random_range(0.1..3.0),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(0.0..TAU),
        rand::random_range(-1e4..1e4),
        test_body(),
    )
}

/// A circular equatorial orbit around the test body with the given period.
pub(super) fn circular_with_period(period: f64, inclination: f64) -> KeplerOrbit {
    let body = test_body();
    let radius = (body.mu * period * period / (TAU * TAU)).cbrt();
    KeplerOrbit::new(0.0, radius, inclination, 0.0, 0.0, 0.0, 0.0, body)
}
