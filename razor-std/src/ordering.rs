//! Ordered insertion for the event store and the batch queue.

use razor_core::Call;
use std::{cmp::Ordering, sync::Arc};

/// Orders calls in the event store and the batch queue.
pub type Comparator = Arc<dyn Fn(&Call, &Call) -> Ordering + Send + Sync>;

/// Insert `item` keeping `items` sorted by `comparator`, returning its index.
///
/// The last and first elements are checked before bisecting, so appending in
/// order is constant time. Equal items go after the existing ones. Without a
/// comparator the item is appended.
pub fn binary_insert<T>(
    items: &mut Vec<T>,
    item: T,
    comparator: Option<&dyn Fn(&T, &T) -> Ordering>,
) -> usize {
    let index = match (comparator, items.first(), items.last()) {
        (Some(compare), Some(first), Some(last)) => {
            if compare(&item, last) != Ordering::Less {
                items.len()
            } else if compare(&item, first) == Ordering::Less {
                0
            } else {
                items.partition_point(|probe| compare(probe, &item) != Ordering::Greater)
            }
        }
        _ => items.len(),
    };
    items.insert(index, item);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> Vec<i32> {
        vec![10, 12, 12, 13, 15]
    }

    fn insert(items: &mut Vec<i32>, item: i32) -> usize {
        binary_insert(items, item, Some(&|a: &i32, b: &i32| a.cmp(b)))
    }

    #[test]
    fn inserts_at_the_beginning() {
        let mut items = numbers();
        assert_eq!(insert(&mut items, 1), 0);
        assert_eq!(items, [1, 10, 12, 12, 13, 15]);

        let mut items = numbers();
        insert(&mut items, 10);
        assert_eq!(items, [10, 10, 12, 12, 13, 15]);
    }

    #[test]
    fn inserts_in_the_middle() {
        let mut items = numbers();
        insert(&mut items, 14);
        assert_eq!(items, [10, 12, 12, 13, 14, 15]);

        let mut items = numbers();
        assert_eq!(insert(&mut items, 12), 3);
        assert_eq!(items, [10, 12, 12, 12, 13, 15]);
    }

    #[test]
    fn inserts_at_the_end() {
        let mut items = numbers();
        assert_eq!(insert(&mut items, 15), 5);
        insert(&mut items, 16);
        assert_eq!(items, [10, 12, 12, 13, 15, 15, 16]);
    }

    #[test]
    fn inserts_into_empty() {
        let mut items = Vec::new();
        insert(&mut items, 15);
        assert_eq!(items, [15]);
    }

    #[test]
    fn appends_without_comparator() {
        let mut items = numbers();
        binary_insert(&mut items, 1, None);
        assert_eq!(items, [10, 12, 12, 13, 15, 1]);
    }

    #[test]
    fn equal_keys_keep_arrival_order() {
        let mut items = vec![(1, 'a'), (2, 'b')];
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        binary_insert(&mut items, (1, 'c'), Some(&by_key));
        assert_eq!(items, [(1, 'a'), (1, 'c'), (2, 'b')]);
    }
}
