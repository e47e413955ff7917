use glam::DVec3;

use crate::{exclude, swap_yz, OrbitFrame, Propagator, StateVectors};

/// Position-derived quantities and local direction vectors.
///
/// This trait is implemented for every [`Propagator`]. All direction
/// vectors are unit vectors in the working frame.
///
/// # Example
/// ```
/// use orbit_analysis::{body_presets, KeplerOrbit, OrbitKinematics};
///
/// let orbit = KeplerOrbit::circular(700_000.0, 0.0, body_presets::kerbin());
///
/// let prograde = orbit.get_prograde_at_time(30.0);
/// let up = orbit.get_up_at_time(30.0);
/// assert!(prograde.dot(up).abs() < 1e-9);
/// ```
pub trait OrbitKinematics: OrbitFrame {
    /// Gets the distance from the center of the reference body at a given
    /// time, in meters.
    fn get_radius_at_time(&self, t: f64) -> f64 {
        self.get_relative_position_at_time(t).length()
    }

    /// Gets the unit vector along the orbital velocity.
    fn get_prograde_at_time(&self, t: f64) -> DVec3 {
        self.get_velocity_at_time(t).normalize()
    }

    /// Gets the unit vector pointing radially outward from the body's center.
    fn get_up_at_time(&self, t: f64) -> DVec3 {
        self.get_relative_position_at_time(t).normalize()
    }

    /// Gets the unit vector pointing radially outward and perpendicular
    /// to prograde.
    ///
    /// This only matches [`get_up_at_time`][Self::get_up_at_time] at the apsides.
    fn get_radial_plus_at_time(&self, t: f64) -> DVec3 {
        exclude(self.get_prograde_at_time(t), self.get_up_at_time(t)).normalize()
    }

    /// Gets the orbit normal, named like the other maneuver directions.
    ///
    /// The orbit normal does not depend on time; `_t` is only there for
    /// symmetry.
    fn get_normal_plus_at_time(&self, _t: f64) -> DVec3 {
        self.get_orbit_normal()
    }

    /// Gets the unit vector parallel to the body's surface, pointing in the
    /// same general direction as the orbital velocity.
    ///
    /// This assumes an ideally spherical body.
    fn get_horizontal_at_time(&self, t: f64) -> DVec3 {
        exclude(self.get_up_at_time(t), self.get_prograde_at_time(t)).normalize()
    }

    /// Gets the unit vector parallel to the body's surface, pointing north.
    ///
    /// This is the direction towards the body's north pole with the
    /// vertical component removed.
    fn get_north_at_time(&self, t: f64) -> DVec3 {
        let body = self.get_reference_body();
        let to_north_pole = body.up * body.radius - self.get_relative_position_at_time(t);
        exclude(self.get_up_at_time(t), to_north_pole).normalize()
    }

    /// Gets the unit vector parallel to the body's surface, pointing east.
    fn get_east_at_time(&self, t: f64) -> DVec3 {
        self.get_up_at_time(t).cross(self.get_north_at_time(t))
    }

    /// Gets the distance between two orbiting objects at a given time,
    /// in meters.
    ///
    /// The orbits may be centered on different bodies; world positions are
    /// compared.
    fn get_separation_at_time(&self, other: &impl Propagator, t: f64) -> f64 {
        (self.get_absolute_position_at_time(t) - other.get_absolute_position_at_time(t)).length()
    }

    /// Gets the orbit that results from instantly adding `delta_v` to the
    /// orbital velocity at time `t`.
    ///
    /// `delta_v` is in the working frame, in meters per second.
    /// The new orbit is built by the propagator, with an epoch of `t`.
    #[must_use]
    fn get_perturbed_orbit(&self, t: f64, delta_v: DVec3) -> Self
    where
        Self: Sized,
    {
        let state_vectors = StateVectors {
            position: swap_yz(self.get_relative_position_at_time(t)),
            velocity: swap_yz(self.get_velocity_at_time(t) + delta_v),
        };
        self.with_native_state_vectors(state_vectors, t)
    }
}

impl<T: Propagator + ?Sized> OrbitKinematics for T {}
