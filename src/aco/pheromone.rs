//! Pheromone trail storage and update rule.

/// A dense n×n pheromone matrix stored in row-major order.
///
/// Cell `(i, j)` holds the trail on the directed edge `i → j`. The colony
/// owns the live matrix; callers only ever receive clones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a matrix with `1 / size` in every cell.
    pub fn uniform(size: usize) -> Self {
        let value = if size == 0 { 0.0 } else { 1.0 / size as f64 };
        Self {
            data: vec![value; size * size],
            size,
        }
    }

    /// Trail on the directed edge `from → to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Multiplies every cell by `1 - decay`.
    pub fn evaporate(&mut self, decay: f64) {
        let keep = 1.0 - decay;
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `amount` to every directed edge of the closed tour `route`,
    /// including the edge from the last node back to the first.
    pub fn deposit(&mut self, route: &[usize], amount: f64) {
        let n = route.len();
        for (i, &from) in route.iter().enumerate() {
            let to = route[(i + 1) % n];
            self.data[from * self.size + to] += amount;
        }
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copies the matrix out as nested rows, e.g. for a heatmap.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest cell values, for colour scaling.
    ///
    /// Returns `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }
}
