//! Working-frame primitives.
//!
//! Propagators report vectors in their native frame, which has the polar
//! axis along +Z. The working frame swaps the Y and Z axes. Since the swap
//! is a reflection, cross products of working-frame vectors follow the
//! host's handedness: for instance `up × north` points east, and the orbit
//! normal is `r × v` normalized.

use core::f64::consts::TAU;

use glam::{DVec3, Vec3Swizzles};

use crate::Propagator;

/// Converts a vector between the native and the working frame.
///
/// The swap is its own inverse, so this goes both ways.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use orbit_analysis::swap_yz;
///
/// let v = DVec3::new(1.0, 2.0, 3.0);
/// assert_eq!(swap_yz(v), DVec3::new(1.0, 3.0, 2.0));
/// assert_eq!(swap_yz(swap_yz(v)), v);
/// ```
#[inline]
pub fn swap_yz(vector: DVec3) -> DVec3 {
    vector.xzy()
}

/// Gets the component of `vector` orthogonal to `direction`.
///
/// `direction` does not need to be normalized, but must not be zero.
#[inline]
pub fn exclude(direction: DVec3, vector: DVec3) -> DVec3 {
    vector.reject_from(direction)
}

/// Gets the unsigned angle between two vectors, in degrees.
///
/// The result is within `[0, 180]`. Zero-length inputs yield NaN.
#[inline]
pub fn angle_between(a: DVec3, b: DVec3) -> f64 {
    a.angle_between(b).to_degrees()
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn clamp_degrees_360(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle in degrees into `[-180, 180)`.
pub fn clamp_degrees_180(angle: f64) -> f64 {
    let wrapped = clamp_degrees_360(angle);
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wraps an angle in radians into `[0, 2pi)`.
pub fn clamp_radians_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Propagator outputs presented in the working frame.
///
/// This trait is implemented for every [`Propagator`].
pub trait OrbitFrame: Propagator {
    /// Gets the orbital velocity at a given time, in meters per second.
    fn get_velocity_at_time(&self, t: f64) -> DVec3 {
        swap_yz(self.get_native_velocity_at_time(t))
    }

    /// Gets the position relative to the reference body's center at a
    /// given time, in meters.
    fn get_relative_position_at_time(&self, t: f64) -> DVec3 {
        swap_yz(self.get_native_position_at_time(t))
    }

    /// Gets the world position at a given time, in meters.
    fn get_absolute_position_at_time(&self, t: f64) -> DVec3 {
        self.get_reference_body().position + self.get_relative_position_at_time(t)
    }

    /// Gets the unit vector perpendicular to the orbital plane.
    ///
    /// Looking down along this normal, the orbiting object revolves
    /// counterclockwise in the host's handedness.
    fn get_orbit_normal(&self) -> DVec3 {
        -swap_yz(self.get_native_orbit_normal()).normalize()
    }

    /// Gets the unit vector pointing from the reference body to the periapsis.
    fn get_periapsis_direction(&self) -> DVec3 {
        swap_yz(self.get_native_periapsis_direction())
    }

    /// Converts a direction into a true anomaly, in degrees.
    ///
    /// The vector is projected into the orbital plane, and the true anomaly
    /// is the angle it makes with the periapsis direction, measured in the
    /// direction of motion.
    ///
    /// The returned value is always within `[0, 360)`.
    ///
    /// # Degenerate Input
    /// A vector perpendicular to the orbital plane has no projection and
    /// yields NaN.
    fn get_true_anomaly_from_vector(&self, vector: DVec3) -> f64 {
        let normal = self.get_orbit_normal();
        let projected = exclude(normal, vector);
        let to_periapsis = self.get_periapsis_direction();
        let angle_from_pe = angle_between(to_periapsis, projected);

        // normal x periapsis points at 90 degrees of true anomaly, the middle
        // of the outgoing half of the orbit. Anything more than 90 degrees
        // away from it is on the infalling half.
        let outgoing = normal.cross(to_periapsis);
        if angle_between(projected, outgoing) < 90.0 {
            angle_from_pe
        } else {
            clamp_degrees_360(360.0 - angle_from_pe)
        }
    }
}

impl<T: Propagator + ?Sized> OrbitFrame for T {}
