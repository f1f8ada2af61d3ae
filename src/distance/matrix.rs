//! Dense distance matrix.

use super::geo::{euclidean, haversine};
use crate::error::AcoError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries are expected to be non-negative with a zero diagonal. Symmetry
/// is typical but not required; the colony works on directed edges.
///
/// # Examples
///
/// ```
/// use u_aco::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (0.0, 8.0)]);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.route_length(&[0, 1, 2]) - 18.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, AcoError> {
        if data.len() != size * size {
            return Err(AcoError::ShapeMismatch {
                size,
                len: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails if any row's length differs from the number of rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, AcoError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(AcoError::ShapeMismatch {
                size,
                len: rows.iter().map(Vec::len).sum(),
            });
        }
        Ok(Self {
            data: rows.concat(),
            size,
        })
    }

    /// Computes a Euclidean distance matrix from planar `(x, y)` points.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::from_fn(points, euclidean)
    }

    /// Computes a great-circle distance matrix (km) from `(lat, lon)`
    /// points in degrees.
    pub fn from_lat_lon(coords: &[(f64, f64)]) -> Self {
        Self::from_fn(coords, haversine)
    }

    fn from_fn(points: &[(f64, f64)], dist: fn((f64, f64), (f64, f64)) -> f64) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = dist(points[i], points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// First entry that is negative or not finite, as `(from, to, value)`.
    pub fn find_invalid(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|&d| !d.is_finite() || d < 0.0)
            .map(|idx| (idx / self.size, idx % self.size, self.data[idx]))
    }

    /// Length of the closed tour visiting `route` in order and returning
    /// from the last node to the first.
    ///
    /// Routes with fewer than two nodes have length zero.
    pub fn route_length(&self, route: &[usize]) -> f64 {
        if route.len() < 2 {
            return 0.0;
        }
        let closing = self.get(route[route.len() - 1], route[0]);
        route
            .windows(2)
            .map(|w| self.get(w[0], w[1]))
            .sum::<f64>()
            + closing
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_from_points() {
        let dm = unit_square();
        assert_eq!(dm.size(), 4);
        assert!((dm.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((dm.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
        for i in 0..4 {
            assert_eq!(dm.get(i, i), 0.0);
        }
        assert!(dm.is_symmetric(1e-12));
    }

    #[test]
    fn test_from_lat_lon() {
        let dm = DistanceMatrix::from_lat_lon(&[(0.0, 0.0), (0.0, 1.0)]);
        assert!((dm.get(0, 1) - 111.195).abs() < 1e-3);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert_eq!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(AcoError::ShapeMismatch { size: 2, len: 3 })
        );
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![3.0, 0.0]]).expect("square");
        assert_eq!(dm.get(0, 1), 2.0);
        assert_eq!(dm.get(1, 0), 3.0);
        assert!(!dm.is_symmetric(1e-10));
        assert_eq!(dm.to_rows(), vec![vec![0.0, 2.0], vec![3.0, 0.0]]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DistanceMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, AcoError::ShapeMismatch { size: 2, len: 3 });
    }

    #[test]
    fn test_route_length_includes_closing_edge() {
        let dm = unit_square();
        assert!((dm.route_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        assert!((dm.route_length(&[0, 2, 1, 3]) - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
        assert_eq!(dm.route_length(&[2]), 0.0);
        assert_eq!(dm.route_length(&[]), 0.0);
    }

    #[test]
    fn test_find_invalid() {
        assert_eq!(DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0)]).find_invalid(), None);

        let mut dm = DistanceMatrix::new(3);
        dm.set(1, 2, -4.0);
        assert_eq!(dm.find_invalid(), Some((1, 2, -4.0)));

        let mut dm = DistanceMatrix::new(2);
        dm.set(1, 0, f64::INFINITY);
        assert_eq!(dm.find_invalid(), Some((1, 0, f64::INFINITY)));

        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, f64::NAN);
        assert!(matches!(dm.find_invalid(), Some((0, 1, v)) if v.is_nan()));
    }

    #[test]
    fn test_route_length_directed() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert_eq!(dm.route_length(&[0, 1]), 25.0);
    }
}
