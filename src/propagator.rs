use core::f64::consts::TAU;

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ReferenceBody, StateVectors};

/// The shape of an orbit, as far as the anomaly conversions are concerned.
///
/// Parabolic trajectories (an eccentricity of exactly 1) are treated
/// as hyperbolic. Their semi-major axis is infinite and their mean motion
/// is zero, so every time-valued query on them (such as
/// [`get_time_of_true_anomaly`][crate::OrbitAnomalies::get_time_of_true_anomaly])
/// comes back as NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrbitShape {
    /// A closed orbit, with an eccentricity below 1.
    Elliptic {
        /// The time it takes to complete one revolution, in seconds.
        period: f64,
    },
    /// An open trajectory, with an eccentricity of at least 1.
    Hyperbolic,
}

/// A trait for the two-body propagator that the analysis layers read from.
///
/// Implementors report their state in their own *native* frame, a
/// right-handed frame with the body's polar axis along +Z.
/// The analysis layers never hand native vectors back to callers; see
/// [`OrbitFrame`][crate::OrbitFrame] for the working frame.
///
/// [`KeplerOrbit`][crate::KeplerOrbit] is the propagator shipped with this
/// crate, but a host simulation can implement this trait on its own orbit
/// type and get every query in this crate for free.
///
/// # Examples
/// ```
/// use orbit_analysis::{KeplerOrbit, OrbitShape, Propagator};
///
/// let orbit = KeplerOrbit::default();
/// assert!(matches!(orbit.get_shape(), OrbitShape::Elliptic { .. }));
/// ```
pub trait Propagator {
    /// Gets the eccentricity of the orbit.
    ///
    /// An eccentricity of 0 means the orbit is a perfect circle.
    /// Between 0 and 1, the orbit is elliptic.
    /// An eccentricity of 1 or more is an open trajectory.
    fn get_eccentricity(&self) -> f64;

    /// Gets the periapsis radius of the orbit, in meters.
    ///
    /// This is measured from the center of the reference body.
    fn get_periapsis(&self) -> f64;

    /// Gets the mean anomaly at the orbit's epoch, in radians.
    fn get_mean_anomaly_at_epoch(&self) -> f64;

    /// Gets the time at which the mean anomaly equals
    /// [the mean anomaly at epoch][Self::get_mean_anomaly_at_epoch], in seconds.
    fn get_epoch(&self) -> f64;

    /// Gets the body this orbit is centered on.
    fn get_reference_body(&self) -> &ReferenceBody;

    /// Gets the position relative to the reference body at a given time,
    /// in the native frame.
    fn get_native_position_at_time(&self, t: f64) -> DVec3;

    /// Gets the velocity at a given time, in the native frame.
    fn get_native_velocity_at_time(&self, t: f64) -> DVec3;

    /// Gets the unit angular momentum direction of the orbit,
    /// in the native frame.
    fn get_native_orbit_normal(&self) -> DVec3;

    /// Gets the unit vector pointing from the reference body to the
    /// periapsis, in the native frame.
    ///
    /// For a circular orbit this is the direction of zero true anomaly.
    fn get_native_periapsis_direction(&self) -> DVec3;

    /// Creates a new orbit around the same body from native-frame state
    /// vectors taken at time `t`.
    #[must_use]
    fn with_native_state_vectors(&self, state_vectors: StateVectors, t: f64) -> Self
    where
        Self: Sized;

    /// Gets the shape of the orbit.
    fn get_shape(&self) -> OrbitShape {
        if self.get_eccentricity() < 1.0 {
            OrbitShape::Elliptic {
                period: self.get_orbital_period(),
            }
        } else {
            OrbitShape::Hyperbolic
        }
    }

    /// Gets the semi-major axis of the orbit, in meters.
    ///
    /// This function returns infinity for parabolic orbits,
    /// and negative values for hyperbolic orbits.
    fn get_semi_major_axis(&self) -> f64 {
        self.get_periapsis() / (1.0 - self.get_eccentricity())
    }

    /// Gets the semi-latus rectum of the orbit, in meters.
    fn get_semi_latus_rectum(&self) -> f64 {
        self.get_periapsis() * (1.0 + self.get_eccentricity())
    }

    /// Gets the apoapsis radius of the orbit, in meters.
    /// Returns infinity for parabolic orbits.
    /// Returns negative values for hyperbolic orbits.
    fn get_apoapsis(&self) -> f64 {
        let eccentricity = self.get_eccentricity();
        if eccentricity == 1.0 {
            f64::INFINITY
        } else {
            self.get_semi_major_axis() * (1.0 + eccentricity)
        }
    }

    /// Gets the time it takes to complete one revolution of the orbit,
    /// in seconds.
    ///
    /// This function returns infinite values for parabolic trajectories and
    /// NaN for hyperbolic trajectories. Prefer [`get_shape`][Self::get_shape]
    /// when the caller needs to handle both.
    fn get_orbital_period(&self) -> f64 {
        // T = 2pi * sqrt(a^3 / GM)
        // https://en.wikipedia.org/wiki/Orbital_period
        TAU * (self.get_semi_major_axis().powi(3) / self.get_reference_body().mu).sqrt()
    }
}
