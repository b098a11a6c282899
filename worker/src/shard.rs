use std::ops::Range;

/// Splits `total` instances into `num_workers` contiguous shards and
/// returns the one owned by `worker_id`.
///
/// Shards are disjoint, cover `0..total` and differ in size by at most
/// one, with the remainder going to the lowest worker ids.
///
/// # Panics
/// If `num_workers` is zero or `worker_id` is out of range.
pub fn shard_range(total: usize, worker_id: usize, num_workers: usize) -> Range<usize> {
    assert!(num_workers > 0, "num_workers must be positive");
    assert!(worker_id < num_workers, "worker_id out of range");

    let base = total / num_workers;
    let rem = total % num_workers;

    let start = worker_id * base + worker_id.min(rem);
    let len = base + usize::from(worker_id < rem);

    start..start + len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shards_are_balanced_and_cover_everything() {
        let ranges: Vec<_> = (0..4).map(|w| shard_range(11, w, 4)).collect();

        assert_eq!(ranges[0], 0..3);
        assert_eq!(ranges[1], 3..6);
        assert_eq!(ranges[2], 6..9);
        assert_eq!(ranges[3], 9..11);
    }

    #[test]
    fn single_worker_owns_the_full_range() {
        assert_eq!(shard_range(7, 0, 1), 0..7);
    }

    #[test]
    fn more_workers_than_data_leaves_empty_shards() {
        assert_eq!(shard_range(1, 0, 3), 0..1);
        assert_eq!(shard_range(1, 1, 3), 1..1);
        assert_eq!(shard_range(1, 2, 3), 1..1);
    }

    #[test]
    #[should_panic(expected = "worker_id out of range")]
    fn out_of_range_worker_is_rejected() {
        shard_range(10, 2, 2);
    }
}
