//! Sparse feature vectors produced by vectorizers

/// Fixed-width sparse feature vector.
///
/// Entries are kept sorted by column index with no duplicates, every index
/// below `dim`. Columns absent from `entries` are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// All-zero vector of the given width
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs in any order.
    ///
    /// Values for repeated indices are summed; zero values and indices
    /// outside `dim` are dropped.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().filter(|(i, _)| *i < dim).collect();
        entries.sort_by_key(|(i, _)| *i);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (idx, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == idx => *acc += value,
                _ => merged.push((idx, value)),
            }
        }
        merged.retain(|(_, v)| *v != 0.0);

        Self {
            dim,
            entries: merged,
        }
    }

    /// Build from a dense slice
    pub fn from_dense(values: &[f64]) -> Self {
        Self::from_pairs(values.len(), values.iter().copied().enumerate())
    }

    /// Width of the vector (vocabulary size)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Non-zero entries sorted by index
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at a column
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product against a dense row of the same width
    pub fn dot(&self, row: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(i, v)| row.get(*i).copied().unwrap_or(0.0) * v)
            .sum()
    }

    /// Squared Euclidean distance to a dense point of the same width
    pub fn squared_distance(&self, point: &[f64]) -> f64 {
        let point_norm: f64 = point.iter().map(|p| p * p).sum();
        let cross = self.dot(point);
        let self_norm: f64 = self.entries.iter().map(|(_, v)| v * v).sum();
        (self_norm - 2.0 * cross + point_norm).max(0.0)
    }

    /// Scale every entry in place
    pub(crate) fn scale(&mut self, factor: f64) {
        for (_, v) in &mut self.entries {
            *v *= factor;
        }
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    /// Densify, mainly for tests and debugging
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (i, v) in &self.entries {
            dense[*i] = *v;
        }
        dense
    }
}
