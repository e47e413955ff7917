use core::f64::consts::PI;

use crate::{
    clamp_degrees_180, clamp_degrees_360, clamp_radians_two_pi, OrbitError, OrbitKinematics,
    OrbitShape, Propagator,
};

/// How far below 1 a computed `cosh(E)` may fall and still be read as
/// periapsis.
const COSH_ROUNDING_TOLERANCE: f64 = 1e-12;

/// Conversions between true, eccentric and mean anomaly, and time.
///
/// This trait is implemented for every [`Propagator`].
///
/// # Units
/// True anomalies are in degrees. Eccentric and mean anomalies are in
/// radians. Times are in seconds.
///
/// # Elliptic and Hyperbolic Orbits
/// For elliptic orbits, anomalies wrap around and are normalized into
/// `[0, 2pi)` (or `[0, 360)` degrees). For hyperbolic orbits they are
/// unbounded, and the true anomaly only exists strictly between
/// `-M` and `+M`, where `M` is the
/// [maximum true anomaly][Self::get_maximum_true_anomaly].
pub trait OrbitAnomalies: OrbitKinematics {
    /// Gets the mean motion, the rate of increase of the mean anomaly,
    /// in radians per second.
    ///
    /// This is zero for a parabolic trajectory, whose semi-major axis is
    /// infinite.
    fn get_mean_motion(&self) -> f64 {
        (self.get_reference_body().mu / self.get_semi_major_axis().powi(3).abs()).sqrt()
    }

    /// Gets the mean anomaly at a given time, in radians.
    ///
    /// For elliptic orbits, the value returned is always within `[0, 2pi)`.
    /// For hyperbolic orbits, the value can be any number.
    fn get_mean_anomaly_at_time(&self, t: f64) -> f64 {
        let mean_anomaly =
            self.get_mean_anomaly_at_epoch() + self.get_mean_motion() * (t - self.get_epoch());

        match self.get_shape() {
            OrbitShape::Elliptic { .. } => clamp_radians_two_pi(mean_anomaly),
            OrbitShape::Hyperbolic => mean_anomaly,
        }
    }

    /// Gets the next time at which the orbiting object reaches the given
    /// mean anomaly, counting from time `t`.
    ///
    /// For elliptic orbits, this is a time within `[t, t + period)`.
    /// For hyperbolic orbits, this can be any time, including a time in the
    /// past if the given mean anomaly was already passed.
    fn get_time_at_mean_anomaly(&self, mean_anomaly: f64, t: f64) -> f64 {
        let difference = mean_anomaly - self.get_mean_anomaly_at_time(t);

        let difference = match self.get_shape() {
            OrbitShape::Elliptic { .. } => clamp_radians_two_pi(difference),
            OrbitShape::Hyperbolic => difference,
        };

        t + difference / self.get_mean_motion()
    }

    /// Gets the largest true anomaly the orbit reaches, in degrees.
    ///
    /// This is 180 degrees for elliptic orbits. For hyperbolic orbits, it is
    /// the angle of the asymptote, which the true anomaly never reaches.
    fn get_maximum_true_anomaly(&self) -> f64 {
        match self.get_shape() {
            OrbitShape::Elliptic { .. } => 180.0,
            OrbitShape::Hyperbolic => (-1.0 / self.get_eccentricity()).acos().to_degrees(),
        }
    }

    /// Converts a true anomaly (in degrees) into an eccentric anomaly
    /// (in radians).
    ///
    /// For elliptic orbits, the returned value is within `[0, 2pi)`.
    /// For hyperbolic orbits, the hyperbolic eccentric anomaly is returned;
    /// it is negative on the infalling half of the trajectory.
    ///
    /// # Errors
    /// [`OrbitError::UnattainableAnomaly`] if the orbit is hyperbolic and the
    /// true anomaly is at or past the asymptote.
    fn get_eccentric_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> Result<f64, OrbitError> {
        let eccentricity = self.get_eccentricity();
        let true_anomaly_deg = clamp_degrees_360(true_anomaly);
        let true_anomaly = true_anomaly_deg.to_radians();

        let cos_true_anomaly = true_anomaly.cos();
        let denominator = 1.0 + eccentricity * cos_true_anomaly;
        let cos_ecc_anom = (eccentricity + cos_true_anomaly) / denominator;

        match self.get_shape() {
            OrbitShape::Elliptic { .. } => {
                let mut sin_ecc_anom = (1.0 - cos_ecc_anom * cos_ecc_anom).max(0.0).sqrt();
                if true_anomaly > PI {
                    sin_ecc_anom = -sin_ecc_anom;
                }

                Ok(clamp_radians_two_pi(sin_ecc_anom.atan2(cos_ecc_anom)))
            }
            OrbitShape::Hyperbolic => {
                let unattainable = OrbitError::UnattainableAnomaly {
                    true_anomaly: true_anomaly_deg,
                    eccentricity,
                };

                if clamp_degrees_180(true_anomaly_deg).abs() >= self.get_maximum_true_anomaly() {
                    return Err(unattainable);
                }

                // Same rational formula as the elliptic case, read as cosh(E).
                // The guard above can let through an anomaly that rounds onto
                // the asymptote, where the denominator vanishes or flips sign.
                if denominator <= 0.0
                    || cos_ecc_anom.is_nan()
                    || cos_ecc_anom < 1.0 - COSH_ROUNDING_TOLERANCE
                {
                    return Err(unattainable);
                }
                // Rounding can dip just below 1 near periapsis
                let cosh_ecc_anom = cos_ecc_anom.max(1.0);

                let ecc_anom = cosh_ecc_anom.acosh();
                if true_anomaly > PI {
                    Ok(-ecc_anom)
                } else {
                    Ok(ecc_anom)
                }
            }
        }
    }

    /// Converts an eccentric anomaly into a mean anomaly, both in radians.
    ///
    /// For elliptic orbits, the returned value is within `[0, 2pi)`.
    /// For hyperbolic orbits, the returned value can be any number.
    fn get_mean_anomaly_at_eccentric_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let eccentricity = self.get_eccentricity();

        match self.get_shape() {
            // https://en.wikipedia.org/wiki/Kepler%27s_equation#Equation
            OrbitShape::Elliptic { .. } => {
                clamp_radians_two_pi(eccentric_anomaly - eccentricity * eccentric_anomaly.sin())
            }
            // https://en.wikipedia.org/wiki/Kepler%27s_equation#Hyperbolic_Kepler_equation
            OrbitShape::Hyperbolic => eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly,
        }
    }

    /// Converts a true anomaly (in degrees) into a mean anomaly (in radians).
    ///
    /// # Errors
    /// [`OrbitError::UnattainableAnomaly`] if the orbit is hyperbolic and never
    /// reaches the true anomaly.
    fn get_mean_anomaly_at_true_anomaly(&self, true_anomaly: f64) -> Result<f64, OrbitError> {
        let eccentric_anomaly = self.get_eccentric_anomaly_at_true_anomaly(true_anomaly)?;
        Ok(self.get_mean_anomaly_at_eccentric_anomaly(eccentric_anomaly))
    }

    /// Gets the next time at which the orbiting object reaches the given
    /// true anomaly (in degrees), counting from time `t`.
    ///
    /// See [`get_time_at_mean_anomaly`][Self::get_time_at_mean_anomaly] for
    /// which occurrence is returned.
    ///
    /// # Errors
    /// [`OrbitError::UnattainableAnomaly`] if the orbit is hyperbolic and never
    /// reaches the true anomaly.
    fn get_time_of_true_anomaly(&self, true_anomaly: f64, t: f64) -> Result<f64, OrbitError> {
        let mean_anomaly = self.get_mean_anomaly_at_true_anomaly(true_anomaly)?;
        Ok(self.get_time_at_mean_anomaly(mean_anomaly, t))
    }

    /// Gets the true anomaly at which the orbit reaches the given radius,
    /// in degrees.
    ///
    /// The result is within `[0, 180]`; the orbit also reaches the radius
    /// at the mirrored anomaly `360 - result`. Radii outside the orbit's
    /// range are clamped to the nearest apsis. Circular orbits return 0.
    ///
    /// On a hyperbola, radii large enough to round the result onto the
    /// asymptote return the [maximum true anomaly][Self::get_maximum_true_anomaly]
    /// itself, which no conversion accepts.
    fn get_true_anomaly_at_radius(&self, radius: f64) -> f64 {
        let eccentricity = self.get_eccentricity();
        if eccentricity == 0.0 {
            return 0.0;
        }

        // r = p / (1 + e cos v)
        let cos_true_anomaly = (self.get_semi_latus_rectum() / radius - 1.0) / eccentricity;
        cos_true_anomaly.clamp(-1.0, 1.0).acos().to_degrees()
    }
}

impl<T: Propagator + ?Sized> OrbitAnomalies for T {}
