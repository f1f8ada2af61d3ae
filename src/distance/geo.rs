//! Point-to-point distance functions and instance generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mean Earth radius in kilometres used by [`haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line distance between two planar points `(x, y)`.
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Great-circle distance in kilometres between two `(lat, lon)` points
/// given in degrees.
///
/// # Examples
///
/// ```
/// use u_aco::distance::haversine;
///
/// // One degree of longitude along the equator.
/// let d = haversine((0.0, 0.0), (0.0, 1.0));
/// assert!((d - 111.195).abs() < 1e-3);
/// ```
pub fn haversine(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lon2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    // Rounding can push `h` just past 1 for near-antipodal points.
    let h = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Generates `n` points uniformly distributed in `[0, scale)²`.
///
/// The same `seed` always yields the same instance.
pub fn random_points(n: usize, seed: u64, scale: f64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x: f64 = rng.random();
            let y: f64 = rng.random();
            (x * scale, y * scale)
        })
        .collect()
}
