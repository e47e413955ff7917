use core::f64::consts::PI;

use super::*;

use crate::{OrbitEvents, OrbitKinematics};

fn random_orbit() -> KeplerOrbit {
    match rand::random_range(0..3) {
        0 => random_circular(),
        1 => random_elliptic(),
        _ => random_hyperbolic(),
    }
}

#[test]
fn radius_is_position_length() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_orbit();
        let t = rand::random_range(-1e4..1e4);

        assert_almost_eq_relative(
            orbit.get_radius_at_time(t),
            orbit.get_native_position_at_time(t).length(),
            &format!("radius of {orbit:?}"),
        );
    }
}

#[test]
fn maneuver_basis_is_orthonormal() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_orbit();
        let t = rand::random_range(-1e4..1e4);
        let what = format!("t = {t} on {orbit:?}");

        let prograde = orbit.get_prograde_at_time(t);
        let radial = orbit.get_radial_plus_at_time(t);
        let normal = orbit.get_normal_plus_at_time(t);

        assert_unit_vec3(prograde, &format!("prograde at {what}"));
        assert_unit_vec3(radial, &format!("radial-plus at {what}"));
        assert_unit_vec3(normal, &format!("normal-plus at {what}"));

        assert_orthogonal(prograde, radial, &format!("prograde and radial at {what}"));
        assert_orthogonal(prograde, normal, &format!("prograde and normal at {what}"));
        assert_orthogonal(radial, normal, &format!("radial and normal at {what}"));

        assert!(
            radial.dot(orbit.get_up_at_time(t)) > 0.0,
            "radial-plus points inward at {what}"
        );
    }
}

#[test]
fn horizontal_is_level() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_orbit();
        let t = rand::random_range(-1e4..1e4);
        let what = format!("t = {t} on {orbit:?}");

        let up = orbit.get_up_at_time(t);
        let horizontal = orbit.get_horizontal_at_time(t);

        assert_unit_vec3(horizontal, &format!("horizontal at {what}"));
        assert_orthogonal(up, horizontal, &format!("up and horizontal at {what}"));
        assert!(
            horizontal.dot(orbit.get_prograde_at_time(t)) > 0.0,
            "horizontal points against the motion at {what}"
        );
    }
}

#[test]
fn radial_matches_up_at_periapsis() {
    let orbit = KeplerOrbit::new(0.3, 8e5, 0.7, 1.2, 0.4, 0.0, 0.0, test_body());

    assert_almost_eq_vec3(
        orbit.get_radial_plus_at_time(0.0),
        orbit.get_up_at_time(0.0),
        "radial-plus at periapsis",
    );
    assert_almost_eq_vec3(
        orbit.get_horizontal_at_time(0.0),
        orbit.get_prograde_at_time(0.0),
        "horizontal at periapsis",
    );
}

#[test]
fn equatorial_surface_directions() {
    let orbit = KeplerOrbit::circular(7e5, 0.0, test_body());

    assert_almost_eq_vec3(orbit.get_up_at_time(0.0), DVec3::X, "up");
    assert_almost_eq_vec3(orbit.get_north_at_time(0.0), DVec3::Y, "north");
    assert_almost_eq_vec3(orbit.get_east_at_time(0.0), DVec3::Z, "east");

    // Prograde equatorial orbits fly eastwards
    assert_almost_eq_vec3(
        orbit.get_prograde_at_time(0.0),
        orbit.get_east_at_time(0.0),
        "prograde",
    );
}

#[test]
fn surface_basis_is_orthonormal() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_inclined_elliptic();
        let t = rand::random_range(-1e4..1e4);
        let what = format!("t = {t} on {orbit:?}");

        let up = orbit.get_up_at_time(t);
        let north = orbit.get_north_at_time(t);
        let east = orbit.get_east_at_time(t);

        assert_unit_vec3(north, &format!("north at {what}"));
        assert_unit_vec3(east, &format!("east at {what}"));
        assert_orthogonal(up, north, &format!("up and north at {what}"));
        assert_orthogonal(up, east, &format!("up and east at {what}"));
        assert_orthogonal(north, east, &format!("north and east at {what}"));

        assert!(
            north.dot(orbit.body.up) > 0.0,
            "north points away from the pole at {what}"
        );
    }
}

#[test]
fn separation_across_bodies() {
    let here = test_body();
    let there = test_body().with_position(DVec3::new(1e8, 0.0, 0.0));

    let a = KeplerOrbit::circular(7e5, 0.0, here);
    let b = KeplerOrbit::new(0.0, 7e5, 0.0, 0.0, 0.0, PI, 0.0, there);

    // a sits at +X of its body, b at -X of its own
    assert_almost_eq_relative(
        a.get_separation_at_time(&b, 0.0),
        1e8 - 1.4e6,
        "separation",
    );
    assert_eq!(a.get_separation_at_time(&a, 123.0), 0.0);
}

#[test]
fn zero_burn_keeps_trajectory() {
    for _ in 0..RANDOM_CASES {
        let orbit = random_orbit();
        let t = rand::random_range(-1e4..1e4);
        let perturbed = orbit.get_perturbed_orbit(t, DVec3::ZERO);

        assert_eq!(perturbed.get_epoch(), t);
        for later in [t, t + 500.0] {
            assert_almost_eq_vec3_relative(
                perturbed.get_relative_position_at_time(later),
                orbit.get_relative_position_at_time(later),
                &format!("position at t = {later} after a zero burn on {orbit:?}"),
            );
        }
    }
}

#[test]
fn prograde_burn_raises_apoapsis() {
    let orbit = KeplerOrbit::circular(7e5, 0.0, test_body());
    let speed = orbit.get_velocity_at_time(0.0).length();
    let burn = orbit.get_prograde_at_time(0.0) * 100.0;
    let raised = orbit.get_perturbed_orbit(0.0, burn);

    assert_almost_eq_relative(raised.get_periapsis(), 7e5, "periapsis after burn");
    assert!(raised.get_apoapsis() > 7e5 * 1.1, "{raised:?}");
    assert_almost_eq_relative(
        raised.get_velocity_at_time(0.0).length(),
        speed + 100.0,
        "speed after burn",
    );
}

#[test]
fn normal_burn_tilts_plane() {
    let orbit = KeplerOrbit::circular(7e5, 0.0, test_body());
    let speed = orbit.get_velocity_at_time(0.0).length();
    let burn = orbit.get_normal_plus_at_time(0.0) * speed;
    let tilted = orbit.get_perturbed_orbit(0.0, burn);

    assert_almost_eq(
        tilted.get_relative_inclination(&orbit),
        45.0,
        "relative inclination after normal burn",
    );
}
