use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A struct representing the body an orbit is centered on.
///
/// Every orbit carries its own copy of the body it orbits, so queries
/// never reach into shared simulation state.
///
/// Vectors are expressed in the working frame, where the Y axis is
/// the host's vertical axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceBody {
    /// The name of the celestial body.
    pub name: String,

    /// The gravitational parameter of the body, in m^3 s^-2.
    ///
    /// In other words, mu = GM.
    pub mu: f64,

    /// The mean radius of the body, in meters.
    pub radius: f64,

    /// The world position of the body's center, in meters.
    pub position: DVec3,

    /// The unit vector along the body's polar axis, pointing north.
    pub up: DVec3,
}

impl ReferenceBody {
    /// Creates a new `ReferenceBody` at the world origin, with its
    /// polar axis along +Y.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `mu` - The gravitational parameter of the body, in m^3 s^-2.
    /// * `radius` - The mean radius of the body, in meters.
    pub fn new(name: impl Into<String>, mu: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            mu,
            radius,
            position: DVec3::ZERO,
            up: DVec3::Y,
        }
    }

    /// Returns this body moved to a different world position.
    #[must_use]
    pub fn with_position(self, position: DVec3) -> Self {
        Self { position, ..self }
    }

    /// Returns this body with a different polar axis.
    ///
    /// The axis is normalized before being stored.
    #[must_use]
    pub fn with_up(self, up: DVec3) -> Self {
        Self {
            up: up.normalize(),
            ..self
        }
    }
}

impl Default for ReferenceBody {
    /// Creates a unit body.
    ///
    /// The unit body has a gravitational parameter of 1 and a radius
    /// of 0.5, so that the default unit orbit clears its surface.
    fn default() -> Self {
        Self::new("Unit", 1.0, 0.5)
    }
}
