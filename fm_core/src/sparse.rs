use ndarray::Array1;

/// Nonzero entries of one instance's feature vector.
///
/// Entries live in parallel index/value buffers with strictly increasing
/// indices, so each feature appears at most once and iteration order is
/// the feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl SparseVector {
    /// Creates a sparse vector from parallel buffers.
    ///
    /// # Panics
    /// If the buffers differ in length or `indices` is not strictly
    /// increasing.
    pub fn new(indices: Vec<usize>, values: Vec<f32>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "index and value buffers must have same length"
        );
        assert!(
            indices.windows(2).all(|w| w[0] < w[1]),
            "indices must be strictly increasing"
        );
        Self { indices, values }
    }

    /// Returns the number of nonzero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Feature ids present in this vector, in increasing order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterates the `(feature id, value)` pairs in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Dot product against a dense vector.
    ///
    /// # Panics
    /// If any index falls outside `dense`.
    pub fn dot(&self, dense: &Array1<f32>) -> f32 {
        self.iter().map(|(j, v)| v * dense[j]).sum()
    }

    /// Adds `alpha * self` into `out`, touching only the present indices.
    ///
    /// # Panics
    /// If any index falls outside `out`.
    pub fn scaled_add_to(&self, alpha: f32, out: &mut Array1<f32>) {
        for (j, v) in self.iter() {
            out[j] += alpha * v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_yields_pairs_in_order() {
        let x = SparseVector::new(vec![3, 7], vec![1.5, -2.0]);
        let pairs: Vec<_> = x.iter().collect();
        assert_eq!(pairs, vec![(3, 1.5), (7, -2.0)]);
        assert_eq!(x.nnz(), 2);
    }

    #[test]
    fn dot_skips_absent_entries() {
        let x = SparseVector::new(vec![0, 2], vec![2.0, 3.0]);
        let dense = Array1::from_vec(vec![1.0, 10.0, 4.0]);
        assert_eq!(x.dot(&dense), 14.0);
    }

    #[test]
    fn scaled_add_touches_only_present_indices() {
        let x = SparseVector::new(vec![1], vec![2.0]);
        let mut out = Array1::from_vec(vec![1.0, 1.0, 1.0]);
        x.scaled_add_to(0.5, &mut out);
        assert_eq!(out, Array1::from_vec(vec![1.0, 2.0, 1.0]));
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn unsorted_indices_are_rejected() {
        SparseVector::new(vec![2, 1], vec![1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn duplicate_indices_are_rejected() {
        SparseVector::new(vec![1, 1], vec![1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn mismatched_buffers_are_rejected() {
        SparseVector::new(vec![0], vec![1.0, 2.0]);
    }
}
