use std::ops::Range;

use crate::{
    error::{FmErr, Result},
    sparse::SparseVector,
};

/// A single labeled training instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub features: SparseVector,
    pub label: f32,
}

impl Instance {
    pub fn new(features: SparseVector, label: f32) -> Self {
        Self { features, label }
    }
}

/// Sequential source of labeled instances.
///
/// The cursor contract: `reset` rewinds to the first instance, `read`
/// returns the instance under the cursor and advances it, and reading more
/// than `size()` instances since the last rewind is an error. An over-read
/// is a counting bug in the caller and aborts whatever loop hit it.
pub trait DataSource {
    /// Number of instances one full pass yields.
    fn size(&self) -> usize;

    /// Rewinds the read cursor to the start.
    fn reset(&mut self);

    /// Reads the instance under the cursor and advances it.
    fn read(&mut self) -> Result<&Instance>;
}

/// A data source over instances held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    instances: Vec<Instance>,
    cursor: usize,
}

impl MemorySource {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self {
            instances,
            cursor: 0,
        }
    }

    /// Copies the instances in `range` out into a new source.
    ///
    /// # Panics
    /// If `range` falls outside the source.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self::new(self.instances[range].to_vec())
    }
}

impl DataSource for MemorySource {
    fn size(&self) -> usize {
        self.instances.len()
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn read(&mut self) -> Result<&Instance> {
        let idx = self.cursor;
        if idx >= self.instances.len() {
            return Err(FmErr::SourceExhausted {
                read: idx,
                size: self.instances.len(),
            });
        }
        self.cursor += 1;
        Ok(&self.instances[idx])
    }
}

/// Derives the used-feature indicator for `source` with one full scan:
/// entry `j` is true iff feature `j` appears in at least one instance.
///
/// The source is left rewound.
///
/// # Panics
/// If an instance references a feature id at or above `num_features`.
pub fn scan_used_features<S: DataSource>(source: &mut S, num_features: usize) -> Result<Vec<bool>> {
    let mut mask = vec![false; num_features];

    source.reset();
    for _ in 0..source.size() {
        let instance = source.read()?;
        for &j in instance.features.indices() {
            mask[j] = true;
        }
    }

    source.reset();
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_features(feature_sets: &[&[usize]]) -> MemorySource {
        let instances = feature_sets
            .iter()
            .map(|&set| {
                let values = vec![1.0; set.len()];
                Instance::new(SparseVector::new(set.to_vec(), values), 0.0)
            })
            .collect();
        MemorySource::new(instances)
    }

    #[test]
    fn read_walks_instances_in_order() {
        let mut source = source_with_features(&[&[0], &[1]]);

        assert_eq!(source.size(), 2);
        assert_eq!(source.read().unwrap().features.indices(), &[0]);
        assert_eq!(source.read().unwrap().features.indices(), &[1]);
    }

    #[test]
    fn read_past_end_is_an_error() {
        let mut source = source_with_features(&[&[0]]);
        source.read().unwrap();

        let err = source.read().unwrap_err();
        assert_eq!(err, FmErr::SourceExhausted { read: 1, size: 1 });
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let mut source = source_with_features(&[&[0], &[1]]);
        source.read().unwrap();
        source.reset();

        assert_eq!(source.read().unwrap().features.indices(), &[0]);
    }

    #[test]
    fn slice_copies_a_subrange() {
        let source = source_with_features(&[&[0], &[1], &[2]]);
        let mut shard = source.slice(1..3);

        assert_eq!(shard.size(), 2);
        assert_eq!(shard.read().unwrap().features.indices(), &[1]);
    }

    #[test]
    fn scan_marks_only_present_features() {
        let mut source = source_with_features(&[&[0, 2], &[2]]);

        let mask = scan_used_features(&mut source, 4).unwrap();
        assert_eq!(mask, vec![true, false, true, false]);

        // The scan leaves the source rewound.
        assert_eq!(source.read().unwrap().features.indices(), &[0, 2]);
    }
}
