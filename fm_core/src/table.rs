use std::collections::HashMap;

use ndarray::Array1;

/// Row-keyed factor matrix: one dense rank-length row per feature id.
///
/// Only the rows a holder actually needs are materialized, so a full model,
/// a pulled snapshot and a pushed delta all share this representation.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    rank: usize,
    rows: HashMap<usize, Array1<f32>>,
}

impl FactorTable {
    /// Creates an empty table whose rows will all have length `rank`.
    pub fn new(rank: usize) -> Self {
        Self {
            rank,
            rows: HashMap::new(),
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of materialized rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn contains(&self, feature: usize) -> bool {
        self.rows.contains_key(&feature)
    }

    /// Inserts the row for `feature`, replacing any previous value.
    ///
    /// # Panics
    /// If `row` does not have exactly `rank` entries.
    pub fn insert(&mut self, feature: usize, row: Array1<f32>) {
        assert_eq!(row.len(), self.rank, "factor row length must equal rank");
        self.rows.insert(feature, row);
    }

    /// Returns the row for `feature`.
    ///
    /// # Panics
    /// If no row is materialized for `feature`. The materialized set is
    /// fixed to cover every feature the holder's data can reference, so a
    /// missing row is a construction-time mismatch, not a runtime
    /// condition.
    pub fn row(&self, feature: usize) -> &Array1<f32> {
        match self.rows.get(&feature) {
            Some(row) => row,
            None => panic!("no factor row for feature {feature}"),
        }
    }

    /// Mutable variant of [`row`](Self::row), with the same contract.
    pub fn row_mut(&mut self, feature: usize) -> &mut Array1<f32> {
        match self.rows.get_mut(&feature) {
            Some(row) => row,
            None => panic!("no factor row for feature {feature}"),
        }
    }

    /// Non-panicking lookup.
    #[inline]
    pub fn get(&self, feature: usize) -> Option<&Array1<f32>> {
        self.rows.get(&feature)
    }

    /// Iterates `(feature id, row)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Array1<f32>)> + '_ {
        self.rows.iter().map(|(&feature, row)| (feature, row))
    }
}
