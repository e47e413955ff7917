//! # Keplerian Orbit Analysis
//! This library crate answers questions about Keplerian two-body orbits,
//! like the ones you'd find in a game like Kerbal Space Program:
//! *when* is the next periapsis, *where* does this orbit cross that one,
//! *how close* will two vessels get, and *what* does this burn look like
//! in maneuver-node coordinates.
//!
//! Every query is a pure function of an orbit, a time and (for two-orbit
//! queries) a second orbit. Nothing is cached and nothing is mutated, so
//! queries can be made from any number of threads at once.
//!
//! ## Getting started
//! The crate is organized in layers, each an extension trait implemented
//! for every [`Propagator`]:
//! - [`OrbitFrame`]: state vectors in the working frame, the orbit normal,
//!   and converting directions into true anomalies.
//! - [`OrbitKinematics`]: radius, the prograde/radial/normal basis, the
//!   north/east surface basis, and perturbed orbits.
//! - [`OrbitAnomalies`]: conversions between true, eccentric and mean
//!   anomaly, and between mean anomaly and time.
//! - [`OrbitEvents`]: apsis and node times, closest approach, phase angle,
//!   synodic period, relative inclination and maneuver decomposition.
//!
//! The [`Propagator`] trait is the seam to the two-body propagator.
//! [`KeplerOrbit`] implements it from classical orbital elements, and a host
//! simulation can implement it on its own orbit type instead.
//!
//! ## Frames and units
//! Propagators report vectors in a *native* frame with the polar axis
//! along +Z. Every vector returned by this crate is in the *working* frame
//! instead, which swaps the Y and Z axes so that +Y is the host's vertical
//! axis. See [`swap_yz`].
//!
//! Distances are in meters and times in seconds. True anomalies and every
//! angle returned to the caller are in **degrees**; eccentric and mean
//! anomalies are in radians.
//!
//! ## Example
//!
//! ```rust
//! use orbit_analysis::{body_presets, KeplerOrbit, OrbitError, OrbitEvents};
//!
//! # fn main() {
//! let low_orbit = KeplerOrbit::circular(700_000.0, 0.0, body_presets::kerbin());
//!
//! let periapsis_time = low_orbit.get_next_periapsis_time(120.0);
//! assert!(periapsis_time >= 120.0);
//!
//! let escape = KeplerOrbit::new(1.5, 700_000.0, 0.0, 0.0, 0.0, 0.0, 0.0, body_presets::kerbin());
//! assert_eq!(escape.get_next_apoapsis_time(0.0), Err(OrbitError::NoApoapsis));
//! # }
//! ```

#![warn(missing_docs)]

mod anomaly;
mod approach;
mod body;
pub mod body_presets;
mod error;
mod events;
mod frame;
mod kepler_orbit;
mod kinematics;
mod propagator;
mod solvers;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use anomaly::OrbitAnomalies;
pub use approach::ApproachSearch;
pub use body::ReferenceBody;
pub use error::{ErrorKind, OrbitError};
pub use events::OrbitEvents;
pub use frame::{
    angle_between, clamp_degrees_180, clamp_degrees_360, clamp_radians_two_pi, exclude, swap_yz,
    OrbitFrame,
};
pub use kepler_orbit::KeplerOrbit;
pub use kinematics::OrbitKinematics;
pub use propagator::{OrbitShape, Propagator};
pub use solvers::sinhcosh;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D perifocal vector into a 3D vector.
///
/// Each element is named `eXY`, where `X` is the row and `Y` is the column.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use orbit_analysis::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///    e11: 1.0, e12: 0.0,
///    e21: 0.0, e22: 1.0,
///    e31: 0.0, e32: 0.0,
/// };
///
/// let vec = DVec2::new(1.0, 2.0);
///
/// let result = matrix.dot_vec(vec);
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 0.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// Computes a dot product between this matrix and a 2D vector.
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }

    /// The first column of the matrix.
    pub fn p(&self) -> DVec3 {
        DVec3::new(self.e11, self.e21, self.e31)
    }

    /// The second column of the matrix.
    pub fn q(&self) -> DVec3 {
        DVec3::new(self.e12, self.e22, self.e32)
    }
}

/// A struct representing a position and velocity at a point in the orbit.
///
/// The position vector is in meters, relative to the reference body,
/// while the velocity vector is in meters per second.
///
/// State vectors can be used to form an orbit, see
/// [`to_kepler_orbit`][Self::to_kepler_orbit] for more information.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    /// The 3D position at a point in the orbit, in meters.
    pub position: DVec3,
    /// The 3D velocity at a point in the orbit, in meters per second.
    pub velocity: DVec3,
}

#[cfg(test)]
mod tests;
