use thiserror::Error;

use crate::models::{GeoPoint, GeodesicResult};

/// WGS-84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 semi-minor axis in meters
pub const WGS84_B: f64 = 6_356_752.314245;

/// WGS-84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257223563;

/// Iteration cap used when none is configured
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Change in lambda below which the iteration is considered settled
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Errors that can occur while solving for a geodesic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesicError {
    #[error("Vincenty formula failed to converge after {iterations} iterations")]
    Convergence { iterations: u32 },
}

/// Vincenty inverse solver with a fixed iteration cap
#[derive(Debug, Clone, Copy)]
pub struct GeodesicSolver {
    max_iterations: u32,
}

impl GeodesicSolver {
    /// A cap of zero is treated as one so every solve runs at least one pass
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Distance in meters plus initial and final bearings between two points
    pub fn solve(&self, from: GeoPoint, to: GeoPoint) -> Result<GeodesicResult, GeodesicError> {
        vincenty_inverse(from, to, self.max_iterations)
    }

    /// Ellipsoidal distance between two points in feet
    pub fn distance_feet(&self, from: GeoPoint, to: GeoPoint) -> Result<f64, GeodesicError> {
        Ok(self.solve(from, to)?.distance_feet())
    }
}

impl Default for GeodesicSolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

/// Solve the inverse geodesic problem between two points on WGS-84
///
/// Iterates on the difference in longitude on the auxiliary sphere until it
/// moves by less than [`CONVERGENCE_TOLERANCE`]. Nearly antipodal pairs do not
/// settle and are reported as [`GeodesicError::Convergence`].
///
/// # Arguments
/// * `from` - Start point in degrees
/// * `to` - End point in degrees
/// * `max_iterations` - Number of non-converged passes allowed before giving up;
///   zero is treated as one
///
/// # Returns
/// GeodesicResult with distance in meters and bearings in degrees. Coincident
/// points return a zero distance with both bearings zero.
pub fn vincenty_inverse(
    from: GeoPoint,
    to: GeoPoint,
    max_iterations: u32,
) -> Result<GeodesicResult, GeodesicError> {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let l = (to.longitude - from.longitude).to_radians();

    // Reduced latitudes
    let tan_u1 = (1.0 - WGS84_F) * phi1.tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;
    let tan_u2 = (1.0 - WGS84_F) * phi2.tan();
    let cos_u2 = 1.0 / (1.0 + tan_u2 * tan_u2).sqrt();
    let sin_u2 = tan_u2 * cos_u2;

    let max_iterations = max_iterations.max(1);
    let mut lambda = l;
    let mut iterations = 0;

    let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
        let sin_lambda = lambda.sin();
        let cos_lambda = lambda.cos();

        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        if sin_sigma == 0.0 {
            return Ok(GeodesicResult::default());
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Equatorial line: cos_sq_alpha is zero and cos(2σm) is undefined
        let mut cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha;
        if cos_2sigma_m.is_nan() {
            cos_2sigma_m = 0.0;
        }

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - lambda_prev).abs() <= CONVERGENCE_TOLERANCE {
            break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
        }

        iterations += 1;
        if iterations >= max_iterations {
            return Err(GeodesicError::Convergence { iterations });
        }
    };

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let cos_2sigma_m_sq = cos_2sigma_m * cos_2sigma_m;
    let delta_sigma = b
        * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m_sq)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m_sq)));

    let distance_meters = WGS84_B * a * (sigma - delta_sigma);

    let sin_lambda = lambda.sin();
    let cos_lambda = lambda.cos();
    let initial_bearing =
        (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let final_bearing =
        (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    Ok(GeodesicResult {
        distance_meters,
        initial_bearing: initial_bearing.to_degrees(),
        final_bearing: final_bearing.to_degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn san_francisco() -> GeoPoint {
        GeoPoint::new(37.7749, -122.4194)
    }

    fn los_angeles() -> GeoPoint {
        GeoPoint::new(34.0522, -118.2437)
    }

    #[test]
    fn test_san_francisco_to_los_angeles() {
        let result =
            vincenty_inverse(san_francisco(), los_angeles(), DEFAULT_MAX_ITERATIONS).unwrap();

        assert!(
            result.distance_meters > 550_000.0 && result.distance_meters < 565_000.0,
            "Distance should be ~559km, got {}",
            result.distance_meters
        );
        assert!((result.initial_bearing - 136.377).abs() < 0.01);
        assert!((result.final_bearing - 138.829).abs() < 0.01);
    }

    #[test]
    fn test_coincident_points() {
        let result =
            vincenty_inverse(san_francisco(), san_francisco(), DEFAULT_MAX_ITERATIONS).unwrap();

        assert_eq!(result.distance_meters, 0.0);
        assert_eq!(result.initial_bearing, 0.0);
        assert_eq!(result.final_bearing, 0.0);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let result = vincenty_inverse(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            DEFAULT_MAX_ITERATIONS,
        )
        .unwrap();

        assert!(result.distance_meters > 110_000.0 && result.distance_meters < 112_000.0);
        assert!((result.initial_bearing - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_equator_to_pole() {
        // Quarter meridian on WGS-84 is ~10,001,966 m
        let result = vincenty_inverse(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(90.0, 0.0),
            DEFAULT_MAX_ITERATIONS,
        )
        .unwrap();

        assert!((result.distance_meters - 10_001_965.73).abs() < 1.0);
    }

    #[test]
    fn test_near_antipodal_fails_to_converge() {
        let result = vincenty_inverse(
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 179.9999),
            DEFAULT_MAX_ITERATIONS,
        );

        assert_eq!(
            result,
            Err(GeodesicError::Convergence {
                iterations: DEFAULT_MAX_ITERATIONS
            })
        );
    }

    #[test]
    fn test_solver_distance_feet() {
        let solver = GeodesicSolver::default();
        let feet = solver
            .distance_feet(san_francisco(), GeoPoint::new(37.77491, -122.41939))
            .unwrap();

        assert!(feet > 0.0 && feet < 5.0, "Expected under 5ft, got {}", feet);
    }

    #[test]
    fn test_zero_cap_runs_one_pass() {
        let solver = GeodesicSolver::new(0);
        assert_eq!(solver.max_iterations(), 1);

        let result = solver.solve(san_francisco(), los_angeles());
        assert_eq!(result, Err(GeodesicError::Convergence { iterations: 1 }));

        let result = vincenty_inverse(san_francisco(), los_angeles(), 0);
        assert_eq!(result, Err(GeodesicError::Convergence { iterations: 1 }));
    }
}
