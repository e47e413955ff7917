use core::f64::consts::TAU;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    solvers::{self, sinhcosh},
    Matrix3x2, Propagator, ReferenceBody, StateVectors,
};

/// A struct representing a Keplerian orbit, described by its classical
/// orbital elements.
///
/// This is the [`Propagator`] shipped with this crate. Its native frame is
/// right-handed, with the reference body's polar axis along +Z and the
/// longitude of the ascending node measured from +X.
///
/// # Example
/// ```
/// use orbit_analysis::{KeplerOrbit, ReferenceBody};
///
/// let orbit = KeplerOrbit::new(
///     // Eccentricity
///     0.1,
///
///     // Periapsis
///     700_000.0,
///
///     // Inclination
///     0.2,
///
///     // Argument of periapsis
///     0.0,
///
///     // Longitude of ascending node
///     0.0,
///
///     // Mean anomaly at epoch
///     0.0,
///
///     // Epoch
///     0.0,
///
///     // Body this orbit is centered on
///     orbit_analysis::body_presets::kerbin(),
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerOrbit {
    /// The eccentricity of the orbit.
    /// e < 1: ellipse
    /// e = 1: parabola
    /// e > 1: hyperbola
    ///
    /// See more: <https://en.wikipedia.org/wiki/Orbital_eccentricity>
    pub eccentricity: f64,

    /// The periapsis radius of the orbit, in meters.
    ///
    /// This is the distance between the body's center and
    /// the closest point of the orbit.
    pub periapsis: f64,

    /// The inclination of the orbit, in radians.
    ///
    /// In simple terms, it tells you how "tilted" the orbit is
    /// relative to the body's equator.
    pub inclination: f64,

    /// The argument of periapsis of the orbit, in radians.
    ///
    /// The angle from the body's ascending node to its periapsis,
    /// measured in the direction of motion.
    /// <https://en.wikipedia.org/wiki/Argument_of_periapsis>
    pub arg_pe: f64,

    /// The longitude of ascending node of the orbit, in radians.
    ///
    /// Measured from the native +X axis in the equatorial plane.
    /// <https://en.wikipedia.org/wiki/Longitude_of_the_ascending_node>
    pub long_asc_node: f64,

    /// The mean anomaly at [`epoch`][Self::epoch], in radians.
    ///
    /// For hyperbolic orbits, it's unbounded.
    pub mean_anomaly: f64,

    /// The time at which the orbit has [`mean_anomaly`][Self::mean_anomaly],
    /// in seconds.
    pub epoch: f64,

    /// The body this orbit is centered on.
    pub body: ReferenceBody,
}

impl KeplerOrbit {
    /// Creates a new `KeplerOrbit` instance with the given parameters.
    ///
    /// Note: This function uses eccentricity instead of apoapsis.
    /// If you want to provide an apoapsis instead, consider using the
    /// [`KeplerOrbit::with_apoapsis`] function instead.
    ///
    /// ### Parameters
    /// - `eccentricity`: The eccentricity of the orbit.
    /// - `periapsis`: The periapsis radius of the orbit, in meters.
    /// - `inclination`: The inclination of the orbit, in radians.
    /// - `arg_pe`: The argument of periapsis of the orbit, in radians.
    /// - `long_asc_node`: The longitude of ascending node of the orbit, in radians.
    /// - `mean_anomaly`: The mean anomaly at epoch, in radians.
    /// - `epoch`: The time of `mean_anomaly`, in seconds.
    /// - `body`: The body the orbit is centered on.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        eccentricity: f64,
        periapsis: f64,
        inclination: f64,
        arg_pe: f64,
        long_asc_node: f64,
        mean_anomaly: f64,
        epoch: f64,
        body: ReferenceBody,
    ) -> KeplerOrbit {
        KeplerOrbit {
            eccentricity,
            periapsis,
            inclination,
            arg_pe,
            long_asc_node,
            mean_anomaly,
            epoch,
            body,
        }
    }

    /// Creates a new `KeplerOrbit` instance from its apsides.
    ///
    /// Note: This function uses apoapsis instead of eccentricity, so it can
    /// only describe closed orbits. Use [`KeplerOrbit::new`] for open
    /// trajectories.
    ///
    /// ### Parameters
    /// - `apoapsis`: The apoapsis radius of the orbit, in meters.
    /// - `periapsis`: The periapsis radius of the orbit, in meters.
    /// - The remaining parameters are as in [`KeplerOrbit::new`].
    #[allow(clippy::too_many_arguments)]
    pub fn with_apoapsis(
        apoapsis: f64,
        periapsis: f64,
        inclination: f64,
        arg_pe: f64,
        long_asc_node: f64,
        mean_anomaly: f64,
        epoch: f64,
        body: ReferenceBody,
    ) -> KeplerOrbit {
        let eccentricity = (apoapsis - periapsis) / (apoapsis + periapsis);
        KeplerOrbit::new(
            eccentricity,
            periapsis,
            inclination,
            arg_pe,
            long_asc_node,
            mean_anomaly,
            epoch,
            body,
        )
    }

    /// Creates a circular, equatorial orbit of the given radius.
    ///
    /// The orbiting object sits on the native +X axis at `epoch`.
    pub fn circular(radius: f64, epoch: f64, body: ReferenceBody) -> KeplerOrbit {
        KeplerOrbit::new(0.0, radius, 0.0, 0.0, 0.0, 0.0, epoch, body)
    }

    /// Gets the matrix that rotates perifocal (PQW) vectors into the
    /// native frame.
    ///
    /// The first column is the periapsis direction P, the second column is
    /// Q, the direction of 90 degrees of true anomaly.
    pub fn get_transformation_matrix(&self) -> Matrix3x2 {
        let mut matrix = Matrix3x2::default();

        let (sin_inc, cos_inc) = self.inclination.sin_cos();
        let (sin_arg_pe, cos_arg_pe) = self.arg_pe.sin_cos();
        let (sin_lan, cos_lan) = self.long_asc_node.sin_cos();

        // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
        matrix.e11 = cos_arg_pe * cos_lan - sin_arg_pe * cos_inc * sin_lan;
        matrix.e12 = -(sin_arg_pe * cos_lan + cos_arg_pe * cos_inc * sin_lan);

        matrix.e21 = cos_arg_pe * sin_lan + sin_arg_pe * cos_inc * cos_lan;
        matrix.e22 = cos_arg_pe * cos_inc * cos_lan - sin_arg_pe * sin_lan;

        matrix.e31 = sin_arg_pe * sin_inc;
        matrix.e32 = cos_arg_pe * sin_inc;

        matrix
    }

    /// Gets the eccentric anomaly at a given time, solving Kepler's equation.
    ///
    /// For open trajectories the hyperbolic eccentric anomaly is returned.
    pub fn solve_eccentric_anomaly_at_time(&self, t: f64) -> f64 {
        let semi_major_axis = self.get_semi_major_axis();
        let mean_motion = (self.body.mu / semi_major_axis.powi(3).abs()).sqrt();
        let mean_anomaly = self.mean_anomaly + mean_motion * (t - self.epoch);

        if self.eccentricity < 1.0 {
            solvers::solve_elliptic(self.eccentricity, mean_anomaly)
        } else {
            solvers::solve_hyperbolic(self.eccentricity, mean_anomaly)
        }
    }

    /// Gets the true anomaly at a given eccentric anomaly, in radians.
    ///
    /// For elliptic orbits the result follows the eccentric anomaly
    /// continuously, so whole revolutions are kept.
    pub fn get_true_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let eccentricity = self.eccentricity;
        if eccentricity < 1.0 {
            // https://en.wikipedia.org/wiki/True_anomaly#From_the_eccentric_anomaly
            let (s, c) = eccentric_anomaly.sin_cos();
            let beta = eccentricity / (1.0 + (1.0 - eccentricity * eccentricity).sqrt());

            eccentric_anomaly + 2.0 * (beta * s / (1.0 - beta * c)).atan()
        } else {
            // tan(f/2) = sqrt((e+1)/(e-1))*tanh(H/2)
            2.0 * (((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt()
                * (eccentric_anomaly * 0.5).tanh())
            .atan()
        }
    }

    /// Gets the position relative to the body at a given true anomaly
    /// (in radians), in the native frame.
    pub fn get_native_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        let radius =
            self.get_semi_latus_rectum() / (1.0 + self.eccentricity * true_anomaly.cos());
        let (sin, cos) = true_anomaly.sin_cos();
        self.get_transformation_matrix()
            .dot_vec(DVec2::new(radius * cos, radius * sin))
    }

    /// Gets the state vectors at a given eccentric anomaly, in the native frame.
    pub fn get_native_state_vectors_at_eccentric_anomaly(
        &self,
        eccentric_anomaly: f64,
    ) -> StateVectors {
        let (pqw_position, pqw_velocity) = self.pqw_state_at_eccentric_anomaly(eccentric_anomaly);
        let matrix = self.get_transformation_matrix();

        StateVectors {
            position: matrix.dot_vec(pqw_position),
            velocity: matrix.dot_vec(pqw_velocity),
        }
    }

    /// Position and velocity in the perifocal plane.
    fn pqw_state_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> (DVec2, DVec2) {
        let eccentricity = self.eccentricity;
        let semi_major_axis = self.get_semi_major_axis();
        let mu = self.body.mu;

        if eccentricity < 1.0 {
            // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
            // Equations 6 to 8:
            //   r  = a (1 - e cos E)
            //   o  = a [cos E - e, sqrt(1-e^2) sin E]
            //   o' = sqrt(GM a) / r [-sin E, sqrt(1-e^2) cos E]
            let (sin, cos) = eccentric_anomaly.sin_cos();
            let q_mult = (1.0 - eccentricity * eccentricity).sqrt();
            let radius = semi_major_axis * (1.0 - eccentricity * cos);
            let outer_mult = (mu * semi_major_axis).sqrt() / radius;

            (
                DVec2::new(semi_major_axis * (cos - eccentricity), semi_major_axis * q_mult * sin),
                DVec2::new(-outer_mult * sin, outer_mult * q_mult * cos),
            )
        } else {
            // https://space.stackexchange.com/a/54418
            // With a < 0:
            //   r  = a (1 - e cosh F)
            //   o  = [a (cosh F - e), -a sqrt(e^2-1) sinh F]
            //   o' = sqrt(-GM a) / r [-sinh F, sqrt(e^2-1) cosh F]
            let (sinh, cosh) = sinhcosh(eccentric_anomaly);
            let q_mult = (eccentricity * eccentricity - 1.0).sqrt();
            let radius = semi_major_axis * (1.0 - eccentricity * cosh);
            let outer_mult = (-mu * semi_major_axis).sqrt() / radius;

            (
                DVec2::new(
                    semi_major_axis * (cosh - eccentricity),
                    -semi_major_axis * q_mult * sinh,
                ),
                DVec2::new(-outer_mult * sinh, outer_mult * q_mult * cosh),
            )
        }
    }
}

impl Propagator for KeplerOrbit {
    #[inline]
    fn get_eccentricity(&self) -> f64 {
        self.eccentricity
    }

    #[inline]
    fn get_periapsis(&self) -> f64 {
        self.periapsis
    }

    #[inline]
    fn get_mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly
    }

    #[inline]
    fn get_epoch(&self) -> f64 {
        self.epoch
    }

    #[inline]
    fn get_reference_body(&self) -> &ReferenceBody {
        &self.body
    }

    fn get_native_position_at_time(&self, t: f64) -> DVec3 {
        let (pqw_position, _) =
            self.pqw_state_at_eccentric_anomaly(self.solve_eccentric_anomaly_at_time(t));
        self.get_transformation_matrix().dot_vec(pqw_position)
    }

    fn get_native_velocity_at_time(&self, t: f64) -> DVec3 {
        let (_, pqw_velocity) =
            self.pqw_state_at_eccentric_anomaly(self.solve_eccentric_anomaly_at_time(t));
        self.get_transformation_matrix().dot_vec(pqw_velocity)
    }

    fn get_native_orbit_normal(&self) -> DVec3 {
        let matrix = self.get_transformation_matrix();
        matrix.p().cross(matrix.q())
    }

    fn get_native_periapsis_direction(&self) -> DVec3 {
        self.get_transformation_matrix().p()
    }

    fn with_native_state_vectors(&self, state_vectors: StateVectors, t: f64) -> Self {
        state_vectors.to_kepler_orbit(self.body.clone(), t)
    }
}

impl Default for KeplerOrbit {
    /// Creates a unit orbit.
    ///
    /// The unit orbit is a perfect circle of radius 1 and no "tilt",
    /// around the [default body][ReferenceBody::default].
    fn default() -> Self {
        Self::circular(1.0, 0.0, ReferenceBody::default())
    }
}

/// Below this, the node line or the eccentricity vector is treated as
/// undefined and a fallback reference direction is used.
const DEGENERATE_EPSILON: f64 = 1e-12;

impl StateVectors {
    /// Create a new [`KeplerOrbit`] from native-frame state vectors
    /// taken at time `time`, around the given body.
    ///
    /// Equatorial orbits get a longitude of ascending node of zero, and
    /// circular orbits get an argument of periapsis of zero, so that the
    /// remaining angles stay well-defined.
    ///
    /// # Parabolic Support
    /// This function does not support parabolic trajectories.
    /// Non-finite values may be returned for such cases.
    ///
    /// # Constraints
    /// The position must not be at the origin, and the velocity must not
    /// be zero or parallel to the position.
    ///
    /// # Example
    /// ```
    /// use orbit_analysis::{KeplerOrbit, Propagator};
    ///
    /// let orbit = KeplerOrbit::default();
    /// let sv = orbit.get_native_state_vectors_at_eccentric_anomaly(0.0);
    ///
    /// let new_orbit = sv.to_kepler_orbit(orbit.body.clone(), 0.0);
    ///
    /// assert!((orbit.get_periapsis() - new_orbit.get_periapsis()).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn to_kepler_orbit(self, body: ReferenceBody, time: f64) -> KeplerOrbit {
        // Reference:
        // https://orbital-mechanics.space/classical-orbital-elements/orbital-elements-and-the-state-vector.html
        let mu = body.mu;
        let radius = self.position.length();

        // Orbital angular momentum
        let angular_momentum_vector = self.position.cross(self.velocity);
        let angular_momentum = angular_momentum_vector.length();
        let normal = angular_momentum_vector / angular_momentum;

        let inclination = normal.z.clamp(-1.0, 1.0).acos();

        // Line of nodes, Z cross h
        let node_vector = DVec3::new(-normal.y, normal.x, 0.0);
        let node_len = node_vector.length();
        let (long_asc_node, node_dir) = if node_len > DEGENERATE_EPSILON {
            let node_dir = node_vector / node_len;
            (node_dir.y.atan2(node_dir.x).rem_euclid(TAU), node_dir)
        } else {
            (0.0, DVec3::X)
        };
        let node_perp = normal.cross(node_dir);

        let eccentricity_vector =
            self.velocity.cross(angular_momentum_vector) / mu - self.position / radius;
        let eccentricity = eccentricity_vector.length();
        let (arg_pe, periapsis_dir) = if eccentricity > DEGENERATE_EPSILON {
            let arg_pe = eccentricity_vector
                .dot(node_perp)
                .atan2(eccentricity_vector.dot(node_dir))
                .rem_euclid(TAU);
            (arg_pe, eccentricity_vector / eccentricity)
        } else {
            (0.0, node_dir)
        };
        let periapsis_perp = normal.cross(periapsis_dir);

        let true_anomaly = self
            .position
            .dot(periapsis_perp)
            .atan2(self.position.dot(periapsis_dir));

        // r = (h^2 / mu) / (1 + e * cos(theta)), at theta = 0
        let periapsis = angular_momentum * angular_momentum / mu / (1.0 + eccentricity);

        let mean_anomaly = if eccentricity < 1.0 {
            // tan(E / 2) = sqrt((1 - e)/(1 + e)) * tan(v / 2), in atan2 form
            let (sin, cos) = true_anomaly.sin_cos();
            let eccentric_anomaly =
                ((1.0 - eccentricity * eccentricity).sqrt() * sin).atan2(eccentricity + cos);
            // M = E - e sin E
            eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
        } else {
            // tanh(H/2) = tan(f/2) * sqrt((e-1)/(e+1))
            let eccentric_anomaly = 2.0
                * ((true_anomaly * 0.5).tan()
                    * ((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt())
                .atanh();
            // M = e sinh(H) - H
            eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly
        };

        KeplerOrbit::new(
            eccentricity,
            periapsis,
            inclination,
            arg_pe,
            long_asc_node,
            if eccentricity < 1.0 {
                mean_anomaly.rem_euclid(TAU)
            } else {
                mean_anomaly
            },
            time,
            body,
        )
    }
}
