#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{OrbitAnomalies, OrbitKinematics, OrbitShape, Propagator};

/// Settings for the closest-approach search.
///
/// Closest approach has no closed form, so it is found with a
/// coarse-to-fine grid search: the search window is split into
/// [`divisions`][Self::divisions] samples, the window is re-centered on the
/// best sample and shrunk to one sample spacing on either side, and this is
/// repeated [`refinements`][Self::refinements] times.
///
/// The search only looks at a bounded window after the query time and only
/// ever zooms into one dip, so it can miss a closer approach elsewhere.
///
/// The default settings sample 20 points per pass over 8 passes.
///
/// # Example
/// ```
/// use orbit_analysis::{body_presets, ApproachSearch, KeplerOrbit, OrbitEvents};
///
/// let a = KeplerOrbit::circular(700_000.0, 0.0, body_presets::kerbin());
/// let b = KeplerOrbit::circular(750_000.0, 0.0, body_presets::kerbin());
///
/// let coarse = ApproachSearch { refinements: 4, ..ApproachSearch::default() };
/// let t = a.get_next_closest_approach_time_with(&b, 0.0, &coarse);
/// assert!(t >= 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ApproachSearch {
    /// The number of samples taken per pass.
    pub divisions: u32,

    /// The number of passes.
    pub refinements: u32,

    /// How far ahead to search when the first orbit is hyperbolic,
    /// expressed in radians of mean anomaly.
    ///
    /// Elliptic orbits are searched for one period.
    pub hyperbolic_mean_anomaly_span: f64,
}

impl Default for ApproachSearch {
    fn default() -> Self {
        Self {
            divisions: 20,
            refinements: 8,
            hyperbolic_mean_anomaly_span: 100.0,
        }
    }
}

impl ApproachSearch {
    /// Gets the length of the search window for an orbit, in seconds.
    pub fn window<P: Propagator + ?Sized>(&self, orbit: &P) -> f64 {
        match orbit.get_shape() {
            OrbitShape::Elliptic { period } => period,
            OrbitShape::Hyperbolic => self.hyperbolic_mean_anomaly_span / orbit.get_mean_motion(),
        }
    }

    /// Finds the time within `[t, t + window]` at which `a` comes nearest
    /// to `b`.
    pub fn closest_approach_time<A, B>(&self, a: &A, b: &B, t: f64) -> f64
    where
        A: Propagator + ?Sized,
        B: Propagator,
    {
        let divisions = self.divisions.max(1);
        let earliest = t;
        let latest = t + self.window(a);

        let mut min_time = earliest;
        let mut max_time = latest;
        let mut best_time = t;
        let mut best_distance = f64::MAX;

        for pass in 0..self.refinements {
            let dt = (max_time - min_time) / f64::from(divisions);

            for i in 0..divisions {
                let sample_time = min_time + f64::from(i) * dt;
                let distance = a.get_separation_at_time(b, sample_time);
                if distance < best_distance {
                    best_distance = distance;
                    best_time = sample_time;
                }
            }

            log::trace!(
                "closest approach pass {pass}: best {best_distance} m at t = {best_time} s \
                (step {dt} s)"
            );

            min_time = (best_time - dt).clamp(earliest, latest);
            max_time = (best_time + dt).clamp(earliest, latest);
        }

        best_time
    }
}
