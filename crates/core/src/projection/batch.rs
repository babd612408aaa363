//! Fixed-size batching for bulk table requests.

/// Split `items` into consecutive batches of at most `limit` items.
///
/// The batches exactly partition the input in its original order; only the
/// final batch may be smaller than `limit`. `limit` must be non-zero and is
/// [`MAX_BATCH_OPERATIONS`](crate::storage::MAX_BATCH_OPERATIONS) for every
/// bulk request issued by the reconciler.
pub fn batch<T>(items: &[T], limit: usize) -> Vec<&[T]> {
    items.chunks(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MAX_BATCH_OPERATIONS;

    fn assert_exact_partition(len: usize) {
        let items: Vec<usize> = (0..len).collect();
        let batches = batch(&items, MAX_BATCH_OPERATIONS);

        let flattened: Vec<usize> = batches.iter().flat_map(|b| b.iter().copied()).collect();
        assert_eq!(flattened, items);
        assert!(batches.iter().all(|b| b.len() <= MAX_BATCH_OPERATIONS));
        assert!(batches.iter().all(|b| !b.is_empty()));
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        let items: Vec<u32> = Vec::new();
        assert!(batch(&items, MAX_BATCH_OPERATIONS).is_empty());
    }

    #[test]
    fn test_partition_below_at_and_above_limit() {
        assert_exact_partition(24);
        assert_exact_partition(25);
        assert_exact_partition(26);
    }

    #[test]
    fn test_partition_many_batches() {
        assert_exact_partition(100);

        let items: Vec<usize> = (0..100).collect();
        let batches = batch(&items, MAX_BATCH_OPERATIONS);
        assert_eq!(batches.len(), 4);
    }

    #[test]
    fn test_last_batch_may_be_smaller() {
        let items: Vec<usize> = (0..26).collect();
        let batches = batch(&items, MAX_BATCH_OPERATIONS);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 25);
        assert_eq!(batches[1].len(), 1);
    }
}
