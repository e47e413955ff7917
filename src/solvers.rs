//! Solvers for Kepler's equation.
//!
//! These turn a mean anomaly into an eccentric anomaly. Only the
//! [`KeplerOrbit`][crate::KeplerOrbit] propagator needs them; the analysis
//! layers only ever go the other way (true to eccentric to mean anomaly),
//! which has a closed form.

use core::f64::consts::{PI, TAU};

/// A constant used to get the initial seed for the eccentric anomaly.
///
/// It's very arbitrary, but according to some testing, a value just
/// below 1 works better than exactly 1.
///
/// Source:
/// "Two fast and accurate routines for solving the elliptic Kepler
/// equation for all values of the eccentricity and mean anomaly"
/// by Daniele Tommasini and David N. Olivieri,
/// section 2.1.2, 'The "rational seed"'
///
/// <https://doi.org/10.1051/0004-6361/202141423>
const B: f64 = 0.999999;

/// The degree used for the Laguerre method.
///
/// The paper "An improved algorithm due to
/// laguerre for the solution of Kepler's equation."
/// says:
///
/// > Similar experimentation has been done with values of n both greater and smaller
/// > than n = 5. The speed of convergence seems to be very insensitive to the choice of n.
const N_F64: f64 = 5.0;

/// The maximum number of iterations for the numerical approach algorithms.
///
/// This is used to prevent infinite loops in case the method fails to converge.
const NUMERIC_MAX_ITERS: u32 = 1000;

/// Iteration stops once a step is smaller than this, in radians.
const STEP_TOLERANCE: f64 = 1e-14;

const PI_SQUARED: f64 = PI * PI;

/// sinh(5), the upper edge of the interval where the cubic seed is used.
const SINH_5: f64 = 74.20321057778875;

#[inline]
fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - (eccentricity * eccentric_anomaly.sin()) - mean_anomaly
}
#[inline]
fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - (eccentricity * eccentric_anomaly.cos())
}
#[inline]
fn keplers_equation_second_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * eccentric_anomaly.sin()
}

/// Get the hyperbolic sine and cosine of a number.
///
/// Usually faster than calling `x.sinh()` and `x.cosh()` separately.
///
/// Returns a tuple which contains:
/// - 0: The hyperbolic sine of the number.
/// - 1: The hyperbolic cosine of the number.
pub fn sinhcosh(x: f64) -> (f64, f64) {
    let e_x = x.exp();
    let e_neg_x = (-x).exp();

    ((e_x - e_neg_x) * 0.5, (e_x + e_neg_x) * 0.5)
}

/// Gets the elliptic eccentric anomaly at a given mean anomaly.
///
/// # Unchecked Operation
/// This function does not check whether the eccentricity is below 1.
///
/// # Source
/// From the paper
/// "An improved algorithm due to laguerre for the solution of Kepler's equation."
/// by Bruce A. Conway
/// <https://doi.org/10.1007/bf01230852>
pub(crate) fn solve_elliptic(eccentricity: f64, mut mean_anomaly: f64) -> f64 {
    let mut sign = 1.0;
    // Use the symmetry and periodicity of the eccentric anomaly
    // Equation 2 from the paper
    // "Two fast and accurate routines for solving
    // the elliptic Kepler equation for all values
    // of the eccentricity and mean anomaly"
    let mut turns = (mean_anomaly / TAU).floor();
    mean_anomaly -= turns * TAU;
    if mean_anomaly > PI {
        mean_anomaly -= TAU;
        turns += 1.0;
    }
    if mean_anomaly < 0.0 {
        mean_anomaly = -mean_anomaly;
        sign = -1.0;
    }

    // Starting guess
    // Section 2.1.2, 'The "rational seed"', equation 19:
    // E_0 = M + (4beM(pi - M)) / (8eM + 4e(e-pi) + pi^2)
    let mut eccentric_anomaly = mean_anomaly
        + (4.0 * eccentricity * B * mean_anomaly * (PI - mean_anomaly))
            / (8.0 * eccentricity * mean_anomaly
                + 4.0 * eccentricity * (eccentricity - PI)
                + PI_SQUARED);

    // Laguerre's method
    //
    // D = sqrt((n-1)^2(f'(x_i))^2 - n(n-1)f(x_i)f''(x_i))
    //
    // x_i+1 = x_i - (nf(x_i) / (f'(x_i) +/- D))
    // ...where the "+/-" is chosen to so that abs(denominator) is maximized
    for _ in 0..NUMERIC_MAX_ITERS {
        let f = keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = keplers_equation_derivative(eccentric_anomaly, eccentricity);
        let fpp = keplers_equation_second_derivative(eccentric_anomaly, eccentricity);

        let n = N_F64;
        let n_minus_1 = n - 1.0;
        let d = ((n_minus_1 * n_minus_1) * fp * fp - n * n_minus_1 * f * fpp)
            .abs()
            .sqrt()
            .copysign(fp);

        let delta = n * f / (fp + d);

        if !delta.is_finite() {
            log::debug!(
                "elliptic Kepler solver: non-finite step at e = {eccentricity}, M = {mean_anomaly}"
            );
            break;
        }

        eccentric_anomaly -= delta;

        if delta.abs() < STEP_TOLERANCE {
            break;
        }
    }

    (eccentric_anomaly * sign) + turns * TAU
}

/// Get an initial guess for the hyperbolic eccentric anomaly.
///
/// Below `e sinh(5) - 5`, the hyperbolic Kepler equation is replaced with
/// its cubic Taylor expansion `(e/6) F^3 + (e - 1) F = M`. Since
/// `sinh(F) > F + F^3/6`, the root of that cubic never lies below the true
/// root, which keeps the iteration in [`solve_hyperbolic`] on the convex side.
///
/// Above it, the analytical guess and Schröder refinement of
/// "A new method for solving the hyperbolic Kepler equation"
/// by Baisheng Wu et al. (Equations 13 and 15) is used.
fn approx_hyperbolic(eccentricity: f64, mean_anomaly: f64) -> f64 {
    let sign = mean_anomaly.signum();
    let mean_anomaly = mean_anomaly.abs();

    sign * if mean_anomaly < eccentricity * SINH_5 - 5.0 {
        solve_monotone_cubic(eccentricity / 6.0, 0.0, eccentricity - 1.0, -mean_anomaly)
    } else {
        // Equation 13
        // A *very* rough guess, with an error that may exceed 1%.
        let rough_guess = (2.0 * mean_anomaly / eccentricity).ln();

        // Equation 15, with the repeated terms pulled out:
        //   alpha = e_c^2 / (4 * M_h) + F_a
        //   beta  = 1 / (e_c * c_a - 1)
        //   gamma = alpha * beta
        //
        //   delta = (6 gamma + 3 e_c s_a beta gamma^2)
        //         / (6 + 6 e_c s_a beta gamma + e_c c_a beta gamma^2)
        let (c_a, s_a) = {
            let left = 2.0 * mean_anomaly / eccentricity;
            let right = eccentricity / (2.0 * mean_anomaly);

            (0.5 * (left + right), 0.5 * (left - right))
        };

        let alpha = eccentricity * eccentricity / (4.0 * mean_anomaly) + rough_guess;
        let beta = (eccentricity * c_a - 1.0).recip();
        let gamma = alpha * beta;
        let gamma_sq = gamma * gamma;

        let delta = (6.0 * gamma + 3.0 * (eccentricity * s_a * beta) * gamma_sq)
            / (6.0
                + 6.0 * (eccentricity * s_a * beta) * gamma
                + (eccentricity * c_a * beta) * gamma_sq);

        rough_guess + delta
    }
}

/// Gets the hyperbolic eccentric anomaly at a given mean anomaly.
///
/// # Unchecked Operation
/// This function does not check whether the eccentricity is at least 1.
///
/// # Source
/// Equation 25 of "A new method for solving the hyperbolic Kepler equation"
/// by Baisheng Wu et al.
pub(crate) fn solve_hyperbolic(eccentricity: f64, mean_anomaly: f64) -> f64 {
    let mut ecc_anom = approx_hyperbolic(eccentricity, mean_anomaly);

    /*
    Fourth-order Schröder iteration of the second kind:

    F_1 = F_0 - (
        (6hr - 3h^2 h'' r^3) /
        (6 - 6h h'' r^2 + h^2 h''' r^3)
    )

    ...where:
    h   = e_c sinh(F_0) - F_0 - M_h
    h'  = e_c cosh(F_0) - 1
    h'' = e_c sinh(F_0)
    h'''= e_c cosh(F_0)
    r   = 1 / h'
     */
    for _ in 0..NUMERIC_MAX_ITERS {
        let (sinh_eca, cosh_eca) = sinhcosh(ecc_anom);

        let hppp = eccentricity * cosh_eca;
        let hp = hppp - 1.0;
        let hpp = eccentricity * sinh_eca;
        let h = hpp - ecc_anom - mean_anomaly;

        let h_sq = h * h;
        let r = hp.recip();
        let r_sq = r * r;
        let r_cub = r_sq * r;

        let denominator = 6.0 - 6.0 * h * hpp * r_sq + h_sq * hppp * r_cub;

        if denominator.abs() < 1e-30 || !denominator.is_finite() {
            log::debug!(
                "hyperbolic Kepler solver: denominator is too small or not finite \
                at e = {eccentricity}, M = {mean_anomaly}"
            );
            break;
        }

        let numerator = 6.0 * h * r - 3.0 * h_sq * hpp * r_cub;
        let delta = numerator / denominator;

        ecc_anom -= delta;

        if delta.abs() < STEP_TOLERANCE * ecc_anom.abs().max(1.0) {
            break;
        }
    }

    ecc_anom
}

/// Solve a cubic equation to get its real root.
///
/// The cubic equation is in the form of:
/// ax^3 + bx^2 + cx + d
///
/// The cubic equation is assumed to be monotone.
/// If it isn't monotone (i.e., the discriminant
/// is negative), it returns NaN.
fn solve_monotone_cubic(a: f64, b: f64, c: f64, d: f64) -> f64 {
    // Normalize coefficients so that a = 1
    let b = b / a;
    let c = c / a;
    let d = d / a;

    // Depress the cubic equation
    // t^3 + pt + q = 0
    // ...where, since a = 1:
    // p = (3c - b^2) / 3
    // q = (2b^3 - 9bc + 27d) / 27
    let b_sq = b * b;

    let p = (3.0 * c - b_sq) / 3.0;
    let q = (2.0 * b_sq * b - 9.0 * b * c + 27.0 * d) / 27.0;

    let q_div_two = q / 2.0;
    let p_div_three = p / 3.0;
    let p_div_three_cubed = p_div_three * p_div_three * p_div_three;
    let discriminant = q_div_two * q_div_two + p_div_three_cubed;

    if discriminant < 0.0 {
        return f64::NAN;
    }

    let t = {
        let sqrt_discriminant = discriminant.sqrt();
        let neg_q_div_two = -q_div_two;
        let u = (neg_q_div_two + sqrt_discriminant).cbrt();
        let v = (neg_q_div_two - sqrt_discriminant).cbrt();
        u + v
    };

    // x = t - b / 3a
    t - b / 3.0
}
