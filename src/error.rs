#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An error describing why an orbital event query has no answer.
///
/// All of these describe geometry that cannot occur on the given
/// trajectory. None of them are computational failures, and retrying
/// the same query will always give the same error.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrbitError {
    /// ### The requested true anomaly lies beyond the asymptote of a hyperbola.
    /// A hyperbolic trajectory only sweeps through true anomalies strictly
    /// between `-M` and `+M`, where `M` is its
    /// [maximum true anomaly][crate::OrbitAnomalies::get_maximum_true_anomaly].
    #[error(
        "true anomaly of {true_anomaly} degrees is not attained by an orbit \
        with eccentricity {eccentricity}"
    )]
    UnattainableAnomaly {
        /// The requested true anomaly, in degrees.
        true_anomaly: f64,
        /// The eccentricity of the orbit that was queried.
        eccentricity: f64,
    },

    /// ### Apoapsis requested on an open trajectory.
    /// Hyperbolic trajectories keep receding and have no farthest point.
    #[error("hyperbolic trajectories have no apoapsis")]
    NoApoapsis,

    /// ### The requested radius is outside the orbit's radial range.
    #[error(
        "radius of {radius} m is never reached: periapsis is {periapsis} m \
        and apoapsis is {apoapsis} m"
    )]
    RadiusNeverReached {
        /// The requested radius, in meters.
        radius: f64,
        /// The periapsis radius of the orbit, in meters.
        periapsis: f64,
        /// The apoapsis radius of the orbit, in meters.
        /// Negative for hyperbolic trajectories.
        apoapsis: f64,
    },

    /// ### A periodic quantity was requested from an open trajectory.
    #[error("hyperbolic trajectories have no orbital period")]
    NotPeriodic,
}

/// The broad class an [`OrbitError`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A true or mean anomaly that the trajectory never reaches.
    UnattainableAnomaly,
    /// An event (apoapsis, node, radius, period) that does not exist
    /// for the given orbit or orbit pair.
    UndefinedEvent,
}

impl OrbitError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrbitError::UnattainableAnomaly { .. } => ErrorKind::UnattainableAnomaly,
            OrbitError::NoApoapsis
            | OrbitError::RadiusNeverReached { .. }
            | OrbitError::NotPeriodic => ErrorKind::UndefinedEvent,
        }
    }
}
