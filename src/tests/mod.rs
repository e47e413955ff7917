#![cfg(test)]

use core::f64::consts::TAU;

use glam::DVec3;

use crate::{
    solvers::{self, sinhcosh},
    swap_yz, KeplerOrbit, OrbitAnomalies, OrbitError, OrbitFrame, OrbitShape, Propagator,
    ReferenceBody, StateVectors,
};

/// How many random orbits each randomized test goes through.
const RANDOM_CASES: usize = 256;

mod kinematics;
mod seeders;

use assertions::*;
use seeders::*;

fn unit_orbit() -> KeplerOrbit {
    KeplerOrbit::default()
}

#[test]
fn unit_orbit_positions() {
    let orbit = unit_orbit();
    let period = orbit.get_orbital_period();
    assert_almost_eq(period, TAU, "period of unit orbit");

    let expected = [
        (0.0, DVec3::new(1.0, 0.0, 0.0)),
        (0.25, DVec3::new(0.0, 1.0, 0.0)),
        (0.5, DVec3::new(-1.0, 0.0, 0.0)),
        (0.75, DVec3::new(0.0, -1.0, 0.0)),
        (1.0, DVec3::new(1.0, 0.0, 0.0)),
    ];

    for (fraction, position) in expected {
        assert_almost_eq_vec3(
            orbit.get_native_position_at_time(fraction * period),
            position,
            &format!("native position of unit orbit at {fraction} of a period"),
        );
    }
}

#[test]
fn unit_orbit_velocity() {
    let orbit = unit_orbit();
    assert_almost_eq_vec3(
        orbit.get_native_velocity_at_time(0.0),
        DVec3::new(0.0, 1.0, 0.0),
        "native velocity of unit orbit at epoch",
    );
}

#[test]
fn shape_classification() {
    let elliptic = KeplerOrbit::new(0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, ReferenceBody::default());
    match elliptic.get_shape() {
        OrbitShape::Elliptic { period } => {
            assert_almost_eq(period, elliptic.get_orbital_period(), "period in shape")
        }
        OrbitShape::Hyperbolic => panic!("e = 0.5 classified as hyperbolic"),
    }

    let parabolic = KeplerOrbit::new(1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, ReferenceBody::default());
    assert_eq!(parabolic.get_shape(), OrbitShape::Hyperbolic);
    assert_eq!(parabolic.get_apoapsis(), f64::INFINITY);

    let hyperbolic = KeplerOrbit::new(2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, ReferenceBody::default());
    assert_eq!(hyperbolic.get_shape(), OrbitShape::Hyperbolic);
    assert!(hyperbolic.get_semi_major_axis() < 0.0);
}

#[test]
fn apsides_from_apoapsis() {
    let orbit = KeplerOrbit::with_apoapsis(3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, test_body());
    assert_almost_eq(orbit.get_eccentricity(), 0.5, "eccentricity");
    assert_almost_eq(orbit.get_apoapsis(), 3.0, "apoapsis");
    assert_almost_eq(orbit.get_semi_major_axis(), 2.0, "semi-major axis");
    assert_almost_eq(orbit.get_semi_latus_rectum(), 1.5, "semi-latus rectum");
}

#[test]
fn native_normal_matches_angular_momentum() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_elliptic();
        let position = orbit.get_native_position_at_time(0.0);
        let velocity = orbit.get_native_velocity_at_time(0.0);

        assert_almost_eq_vec3(
            orbit.get_native_orbit_normal(),
            position.cross(velocity).normalize(),
            &format!("native normal of {orbit:?}"),
        );
    }
}

#[test]
fn radius_follows_conic_equation() {
    for _ in 0..RANDOM_CASES {
        let orbit = if rand::random_bool(0.5) {
            random_elliptic()
        } else {
            random_hyperbolic()
        };
        let t = rand::random_range(-1e4..1e4);

        let eccentric_anomaly = orbit.solve_eccentric_anomaly_at_time(t);
        let true_anomaly = orbit.get_true_anomaly_at_eccentric_anomaly(eccentric_anomaly);

        assert_almost_eq_vec3_relative(
            orbit.get_native_position_at_time(t),
            orbit.get_native_position_at_true_anomaly(true_anomaly),
            &format!("position at t = {t} of {orbit:?}"),
        );
    }
}

#[test]
fn elliptic_solver_satisfies_keplers_equation() {
    for _ in 0..RANDOM_CASES {
        let eccentricity = rand::random_range(0.0..0.999);
        let mean_anomaly = rand::random_range(-20.0..20.0);

        let eccentric_anomaly = solvers::solve_elliptic(eccentricity, mean_anomaly);
        let residual = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;

        assert_almost_eq_within(
            residual,
            0.0,
            1e-10,
            &format!("Kepler residual at e = {eccentricity}, M = {mean_anomaly}"),
        );
    }
}

#[test]
fn elliptic_solver_keeps_whole_turns() {
    let eccentricity = 0.5;
    for mean_anomaly in [1.0, 4.0, -1.0, -7.08, 0.875 * TAU, 3.5 * TAU + 3.5] {
        let eccentric_anomaly = solvers::solve_elliptic(eccentricity, mean_anomaly);
        let residual = eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly;

        assert_almost_eq_within(
            residual,
            0.0,
            1e-10,
            &format!("Kepler residual at M = {mean_anomaly}"),
        );
    }

    // Second revolution, past the halfway point
    let orbit = KeplerOrbit::new(0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, ReferenceBody::default());
    let mean_motion = orbit.get_mean_motion();
    let eccentric_anomaly = orbit.solve_eccentric_anomaly_at_time(1.75 * TAU / mean_motion);
    assert!(
        eccentric_anomaly > 1.5 * TAU && eccentric_anomaly < 2.0 * TAU,
        "{eccentric_anomaly}"
    );

    let true_anomaly = orbit.get_true_anomaly_at_eccentric_anomaly(eccentric_anomaly);
    assert!(
        true_anomaly > 1.5 * TAU && true_anomaly < 2.0 * TAU,
        "{true_anomaly}"
    );
}

#[test]
fn hyperbolic_solver_satisfies_keplers_equation() {
    for _ in 0..RANDOM_CASES {
        let eccentricity = rand::random_range(1.01..10.0);
        let mean_anomaly = rand::random_range(-100.0..100.0);

        let eccentric_anomaly = solvers::solve_hyperbolic(eccentricity, mean_anomaly);
        let residual = eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly - mean_anomaly;

        assert_almost_eq_within(
            residual / mean_anomaly.abs().max(1.0),
            0.0,
            1e-10,
            &format!("hyperbolic Kepler residual at e = {eccentricity}, M = {mean_anomaly}"),
        );
    }
}

#[test]
fn sinhcosh_matches_std() {
    for x in [-10.0, -1.5, -0.1, 0.0, 0.3, 2.0, 7.5] {
        let (sinh, cosh) = sinhcosh(x);
        assert_almost_eq_relative(sinh, f64::sinh(x), &format!("sinh({x})"));
        assert_almost_eq_relative(cosh, f64::cosh(x), &format!("cosh({x})"));
    }
}

#[test]
fn state_vector_conversion() {
    for _ in 0..RANDOM_CASES {
        let orbit = if rand::random_bool(0.5) {
            random_elliptic()
        } else {
            random_hyperbolic()
        };
        let t = rand::random_range(-1e4..1e4);

        let state_vectors = StateVectors {
            position: orbit.get_native_position_at_time(t),
            velocity: orbit.get_native_velocity_at_time(t),
        };
        let rebuilt = state_vectors.to_kepler_orbit(orbit.body.clone(), t);

        assert_almost_eq_relative(
            rebuilt.get_periapsis(),
            orbit.get_periapsis(),
            &format!("periapsis of rebuilt {orbit:?}"),
        );
        assert_almost_eq(
            rebuilt.get_eccentricity(),
            orbit.get_eccentricity(),
            &format!("eccentricity of rebuilt {orbit:?}"),
        );

        for later in [t, t + 100.0, t + 1000.0] {
            assert_almost_eq_vec3_relative(
                rebuilt.get_native_position_at_time(later),
                orbit.get_native_position_at_time(later),
                &format!("position at t = {later} of rebuilt {orbit:?}"),
            );
        }
    }
}

#[test]
fn circular_equatorial_state_vector_conversion() {
    let orbit = KeplerOrbit::circular(7e5, 0.0, test_body());
    let state_vectors = StateVectors {
        position: orbit.get_native_position_at_time(0.0),
        velocity: orbit.get_native_velocity_at_time(0.0),
    };
    let rebuilt = state_vectors.to_kepler_orbit(test_body(), 0.0);

    assert!(rebuilt.eccentricity < 1e-9, "{rebuilt:?}");
    assert_eq!(rebuilt.long_asc_node, 0.0);
    assert_eq!(rebuilt.arg_pe, 0.0);
    assert_almost_eq(rebuilt.inclination, 0.0, "inclination");
    assert_almost_eq_relative(rebuilt.periapsis, 7e5, "radius");
}

#[test]
fn error_kinds() {
    let unattainable = OrbitError::UnattainableAnomaly {
        true_anomaly: 170.0,
        eccentricity: 2.0,
    };
    assert_eq!(unattainable.kind(), crate::ErrorKind::UnattainableAnomaly);
    assert_eq!(OrbitError::NoApoapsis.kind(), crate::ErrorKind::UndefinedEvent);
    assert_eq!(OrbitError::NotPeriodic.kind(), crate::ErrorKind::UndefinedEvent);

    let message = unattainable.to_string();
    assert!(message.contains("170"), "{message}");
}

#[test]
fn working_frame_is_a_swap_of_native() {
    let orbit = random_inclined_elliptic();
    let t = 123.0;

    assert_eq!(
        orbit.get_relative_position_at_time(t),
        swap_yz(orbit.get_native_position_at_time(t))
    );
    assert_eq!(
        orbit.get_velocity_at_time(t),
        swap_yz(orbit.get_native_velocity_at_time(t))
    );
}

#[test]
fn maximum_true_anomaly() {
    let elliptic = KeplerOrbit::new(0.3, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, test_body());
    assert_eq!(elliptic.get_maximum_true_anomaly(), 180.0);

    let hyperbolic = KeplerOrbit::new(2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, test_body());
    assert_almost_eq(hyperbolic.get_maximum_true_anomaly(), 120.0, "max true anomaly");

    // Close to a parabola, the asymptote opens up towards 180 degrees
    let near_parabolic = KeplerOrbit::new(1.0001, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, test_body());
    assert!(near_parabolic.get_maximum_true_anomaly() > 178.0);
    assert!(near_parabolic.get_maximum_true_anomaly() < 180.0);
}

#[test]
fn parabolic_time_queries_are_nan() {
    use crate::OrbitEvents;

    let parabolic = KeplerOrbit::new(1.0, 7e5, 0.0, 0.0, 0.0, 0.0, 0.0, test_body());

    assert_eq!(parabolic.get_semi_major_axis(), f64::INFINITY);
    assert_eq!(parabolic.get_mean_motion(), 0.0);
    assert!(parabolic.get_next_periapsis_time(0.0).is_nan());

    let time = parabolic
        .get_time_of_true_anomaly(90.0, 0.0)
        .unwrap_or_else(|e| panic!("{e}"));
    assert!(time.is_nan(), "{time}");
}

#[test]
fn body_presets_match_published_values() {
    use crate::body_presets;

    assert_eq!(body_presets::kerbin().mu, 3.531_6e12);
    assert_eq!(body_presets::mun().mu, 6.513_839_8e10);
    assert_eq!(body_presets::mun().radius, 2.0e5);
}
