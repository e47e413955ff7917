use core::f64::consts::PI;

use glam::DVec3;

use crate::{
    angle_between, clamp_degrees_180, clamp_degrees_360, exclude, ApproachSearch, OrbitAnomalies,
    OrbitError, OrbitFrame, OrbitShape, Propagator,
};

/// Orbital events and relationships between orbits.
///
/// This trait is implemented for every [`Propagator`]. Angles are in
/// degrees and times in seconds.
///
/// # Example
/// ```
/// use orbit_analysis::{body_presets, KeplerOrbit, OrbitEvents};
///
/// let kerbin = body_presets::kerbin();
/// let vessel = KeplerOrbit::new(0.05, 680_000.0, 0.3, 1.0, 0.5, 2.0, 0.0, kerbin.clone());
/// let station = KeplerOrbit::circular(720_000.0, 0.0, kerbin);
///
/// let an = vessel.get_ascending_node_true_anomaly(&station);
/// let dn = vessel.get_descending_node_true_anomaly(&station);
/// assert!(((dn - an).rem_euclid(360.0) - 180.0).abs() < 1e-9);
/// ```
pub trait OrbitEvents: OrbitAnomalies {
    /// Gets the next time at which the orbiting object is at periapsis.
    ///
    /// For elliptic orbits, this is a time within `[t, t + period)`.
    /// For hyperbolic orbits, this can be a time in the past, if the
    /// periapsis has already been passed.
    fn get_next_periapsis_time(&self, t: f64) -> f64 {
        match self.get_shape() {
            // Zero true anomaly is zero mean anomaly
            OrbitShape::Elliptic { .. } => self.get_time_at_mean_anomaly(0.0, t),
            OrbitShape::Hyperbolic => t - self.get_mean_anomaly_at_time(t) / self.get_mean_motion(),
        }
    }

    /// Gets the next time at which the orbiting object is at apoapsis.
    ///
    /// This is a time within `[t, t + period)`.
    ///
    /// # Errors
    /// [`OrbitError::NoApoapsis`] for hyperbolic orbits.
    fn get_next_apoapsis_time(&self, t: f64) -> Result<f64, OrbitError> {
        match self.get_shape() {
            // 180 degrees of true anomaly is pi radians of mean anomaly
            OrbitShape::Elliptic { .. } => Ok(self.get_time_at_mean_anomaly(PI, t)),
            OrbitShape::Hyperbolic => Err(OrbitError::NoApoapsis),
        }
    }

    /// Gets the true anomaly at which this orbit crosses its ascending node
    /// with `other`'s orbital plane.
    ///
    /// The returned value is always within `[0, 360)`.
    fn get_ascending_node_true_anomaly(&self, other: &impl Propagator) -> f64 {
        let to_node = self.get_orbit_normal().cross(other.get_orbit_normal());
        self.get_true_anomaly_from_vector(to_node)
    }

    /// Gets the true anomaly at which this orbit crosses its descending
    /// node with `other`'s orbital plane.
    ///
    /// The returned value is always within `[0, 360)`.
    fn get_descending_node_true_anomaly(&self, other: &impl Propagator) -> f64 {
        clamp_degrees_360(self.get_ascending_node_true_anomaly(other) + 180.0)
    }

    /// Gets the true anomaly at which this orbit crosses the body's equator
    /// going northwards if the orbit is prograde, or southwards if it is
    /// retrograde.
    ///
    /// The returned value is always within `[0, 360)`.
    fn get_ascending_node_equatorial_true_anomaly(&self) -> f64 {
        let to_node = self
            .get_reference_body()
            .up
            .cross(self.get_orbit_normal());
        self.get_true_anomaly_from_vector(to_node)
    }

    /// Gets the true anomaly at which this orbit crosses the body's equator
    /// going southwards if the orbit is prograde, or northwards if it is
    /// retrograde.
    ///
    /// The returned value is always within `[0, 360)`.
    fn get_descending_node_equatorial_true_anomaly(&self) -> f64 {
        clamp_degrees_360(self.get_ascending_node_equatorial_true_anomaly() + 180.0)
    }

    /// Returns whether the orbit actually reaches a node at the given true
    /// anomaly.
    ///
    /// This is always true for elliptic orbits. A hyperbolic orbit misses
    /// nodes that fall within the opening angle of the hyperbola.
    fn is_true_anomaly_attained(&self, true_anomaly: f64) -> bool {
        clamp_degrees_180(true_anomaly).abs() <= self.get_maximum_true_anomaly()
    }

    /// Returns whether this orbit has an ascending node with `other`.
    fn has_ascending_node(&self, other: &impl Propagator) -> bool {
        self.is_true_anomaly_attained(self.get_ascending_node_true_anomaly(other))
    }

    /// Returns whether this orbit has a descending node with `other`.
    fn has_descending_node(&self, other: &impl Propagator) -> bool {
        self.is_true_anomaly_attained(self.get_descending_node_true_anomaly(other))
    }

    /// Returns whether this orbit has an ascending node with the equator.
    fn has_ascending_node_equatorial(&self) -> bool {
        self.is_true_anomaly_attained(self.get_ascending_node_equatorial_true_anomaly())
    }

    /// Returns whether this orbit has a descending node with the equator.
    fn has_descending_node_equatorial(&self) -> bool {
        self.is_true_anomaly_attained(self.get_descending_node_equatorial_true_anomaly())
    }

    /// Gets the next time at which this orbit crosses its ascending node
    /// with `other`.
    ///
    /// For elliptic orbits this is a time within `[t, t + period)`.
    /// Hyperbolic orbits return `t` unchanged.
    ///
    /// # Errors
    /// Never fails at the moment; the `Result` leaves room for a real
    /// hyperbolic solution.
    fn get_time_of_ascending_node(
        &self,
        other: &impl Propagator,
        t: f64,
    ) -> Result<f64, OrbitError> {
        match self.get_shape() {
            OrbitShape::Elliptic { .. } => {
                self.get_time_of_true_anomaly(self.get_ascending_node_true_anomaly(other), t)
            }
            OrbitShape::Hyperbolic => Ok(t),
        }
    }

    /// Gets the next time at which this orbit crosses its descending node
    /// with `other`.
    ///
    /// For elliptic orbits this is a time within `[t, t + period)`.
    /// Hyperbolic orbits return `t` unchanged.
    ///
    /// # Errors
    /// Never fails at the moment; see
    /// [`get_time_of_ascending_node`][Self::get_time_of_ascending_node].
    fn get_time_of_descending_node(
        &self,
        other: &impl Propagator,
        t: f64,
    ) -> Result<f64, OrbitError> {
        match self.get_shape() {
            OrbitShape::Elliptic { .. } => {
                self.get_time_of_true_anomaly(self.get_descending_node_true_anomaly(other), t)
            }
            OrbitShape::Hyperbolic => Ok(t),
        }
    }

    /// Gets the next time at which the orbiting object crosses the
    /// equator at its ascending node.
    ///
    /// For elliptic orbits this is a time within `[t, t + period)`.
    /// Hyperbolic orbits return `t` unchanged.
    ///
    /// # Errors
    /// Never fails at the moment; see
    /// [`get_time_of_ascending_node`][Self::get_time_of_ascending_node].
    fn get_time_of_ascending_node_equatorial(&self, t: f64) -> Result<f64, OrbitError> {
        match self.get_shape() {
            OrbitShape::Elliptic { .. } => {
                self.get_time_of_true_anomaly(self.get_ascending_node_equatorial_true_anomaly(), t)
            }
            OrbitShape::Hyperbolic => Ok(t),
        }
    }

    /// Gets the next time at which the orbiting object crosses the
    /// equator at its descending node.
    ///
    /// For elliptic orbits this is a time within `[t, t + period)`.
    /// For hyperbolic orbits this can be a time in the past, if the node
    /// has already been passed.
    ///
    /// # Errors
    /// [`OrbitError::UnattainableAnomaly`] if the orbit is hyperbolic and
    /// never reaches its descending node.
    fn get_time_of_descending_node_equatorial(&self, t: f64) -> Result<f64, OrbitError> {
        self.get_time_of_true_anomaly(self.get_descending_node_equatorial_true_anomaly(), t)
    }

    /// Gets the time after which the phase angle between the two orbiting
    /// objects repeats, in seconds.
    ///
    /// This only really makes sense for nearly circular orbits in similar
    /// planes. Two co-rotating orbits with equal periods never change phase,
    /// and give an infinite synodic period.
    ///
    /// # Errors
    /// [`OrbitError::NotPeriodic`] if either orbit is hyperbolic.
    fn get_synodic_period(&self, other: &impl Propagator) -> Result<f64, OrbitError> {
        let (
            OrbitShape::Elliptic { period: own_period },
            OrbitShape::Elliptic {
                period: other_period,
            },
        ) = (self.get_shape(), other.get_shape())
        else {
            return Err(OrbitError::NotPeriodic);
        };

        // Relative retrograde motion speeds up the phase change
        let sign = if self.get_orbit_normal().dot(other.get_orbit_normal()) >= 0.0 {
            1.0
        } else {
            -1.0
        };

        Ok((1.0 / (1.0 / own_period - sign / other_period)).abs())
    }

    /// Gets the phase angle from this orbiting object to `other`'s, at a
    /// given time.
    ///
    /// `other`'s position is projected into this orbital plane, and the
    /// angle is measured in the direction of motion, within `[0, 360)`.
    /// This only makes sense if both orbits share a reference body.
    fn get_phase_angle(&self, other: &impl Propagator, t: f64) -> f64 {
        let normal = self.get_orbit_normal();
        let position = self.get_relative_position_at_time(t);
        let projected_other = exclude(normal, other.get_relative_position_at_time(t));

        let angle = angle_between(position, projected_other);
        if normal.cross(position).dot(projected_other) < 0.0 {
            clamp_degrees_360(360.0 - angle)
        } else {
            angle
        }
    }

    /// Gets the angle between the two orbital planes, within `[0, 180]`.
    ///
    /// Two orbits in the same plane but going opposite directions have a
    /// relative inclination of 180 degrees.
    fn get_relative_inclination(&self, other: &impl Propagator) -> f64 {
        angle_between(self.get_orbit_normal(), other.get_orbit_normal())
    }

    /// Gets the next time at which the orbiting object is at the given
    /// distance from the body's center.
    ///
    /// For elliptic orbits this is a time within `[t, t + period)`.
    /// For hyperbolic orbits, the next future crossing is returned if there
    /// is one; otherwise the outgoing crossing is returned, which may be in
    /// the past.
    ///
    /// # Errors
    /// [`OrbitError::RadiusNeverReached`] if the radius is below periapsis,
    /// or above apoapsis for elliptic orbits.
    fn get_next_time_of_radius(&self, t: f64, radius: f64) -> Result<f64, OrbitError> {
        let periapsis = self.get_periapsis();
        let apoapsis = self.get_apoapsis();

        let reachable = match self.get_shape() {
            OrbitShape::Elliptic { .. } => radius >= periapsis && radius <= apoapsis,
            OrbitShape::Hyperbolic => radius >= periapsis,
        };
        if !reachable {
            return Err(OrbitError::RadiusNeverReached {
                radius,
                periapsis,
                apoapsis,
            });
        }

        let (outgoing_time, incoming_time) = match self.get_shape() {
            OrbitShape::Elliptic { .. } => {
                let outgoing = self.get_true_anomaly_at_radius(radius);
                (
                    self.get_time_of_true_anomaly(outgoing, t)?,
                    self.get_time_of_true_anomaly(360.0 - outgoing, t)?,
                )
            }
            OrbitShape::Hyperbolic => {
                // r = a (1 - e cosh F), solved for F. Far out, the true
                // anomaly rounds onto the asymptote while F stays well-defined.
                let cosh_ecc_anom =
                    ((1.0 - radius / self.get_semi_major_axis()) / self.get_eccentricity())
                        .max(1.0);
                let ecc_anom = cosh_ecc_anom.acosh();
                (
                    self.get_time_at_mean_anomaly(
                        self.get_mean_anomaly_at_eccentric_anomaly(ecc_anom),
                        t,
                    ),
                    self.get_time_at_mean_anomaly(
                        self.get_mean_anomaly_at_eccentric_anomaly(-ecc_anom),
                        t,
                    ),
                )
            }
        };

        if incoming_time > t && (incoming_time < outgoing_time || outgoing_time <= t) {
            Ok(incoming_time)
        } else {
            Ok(outgoing_time)
        }
    }

    /// Expresses a velocity change at time `t` in maneuver-node coordinates.
    ///
    /// The returned vector holds the radial-plus, normal-minus and prograde
    /// components of `delta_v`, in that order.
    fn get_maneuver_node_delta_v(&self, t: f64, delta_v: DVec3) -> DVec3 {
        DVec3::new(
            self.get_radial_plus_at_time(t).dot(delta_v),
            (-self.get_normal_plus_at_time(t)).dot(delta_v),
            self.get_prograde_at_time(t).dot(delta_v),
        )
    }

    /// Gets the time at which this orbiting object next comes nearest to
    /// `other`'s, using the [default search settings][ApproachSearch::default].
    ///
    /// Elliptic orbits are searched for one period after `t`. Hyperbolic
    /// orbits are searched for the next 100 radians of mean anomaly, which
    /// may miss the actual closest approach at very high eccentricities.
    fn get_next_closest_approach_time(&self, other: &impl Propagator, t: f64) -> f64 {
        self.get_next_closest_approach_time_with(other, t, &ApproachSearch::default())
    }

    /// Like [`get_next_closest_approach_time`][Self::get_next_closest_approach_time],
    /// with custom search settings.
    fn get_next_closest_approach_time_with(
        &self,
        other: &impl Propagator,
        t: f64,
        search: &ApproachSearch,
    ) -> f64 {
        search.closest_approach_time(self, other, t)
    }

    /// Gets the distance between the two orbiting objects at the time found
    /// by [`get_next_closest_approach_time`][Self::get_next_closest_approach_time],
    /// in meters.
    fn get_next_closest_approach_distance(&self, other: &impl Propagator, t: f64) -> f64 {
        self.get_next_closest_approach_distance_with(other, t, &ApproachSearch::default())
    }

    /// Like [`get_next_closest_approach_distance`][Self::get_next_closest_approach_distance],
    /// with custom search settings.
    fn get_next_closest_approach_distance_with(
        &self,
        other: &impl Propagator,
        t: f64,
        search: &ApproachSearch,
    ) -> f64 {
        let approach_time = self.get_next_closest_approach_time_with(other, t, search);
        self.get_separation_at_time(other, approach_time)
    }
}

impl<T: Propagator + ?Sized> OrbitEvents for T {}
