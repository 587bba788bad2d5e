use std::{cmp::Ordering, cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;

struct Entry<T> {
    priority: OrderedFloat<f64>,
    /// Insertion counter, breaks ties so equal priorities pop first-in first-out
    sequence: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (OrderedFloat<f64>, u64) {
        (self.priority, self.sequence)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-priority queue keyed by a numeric cost.
///
/// Items with equal priority come out in insertion order. The same item may be
/// pushed more than once; stale copies are the caller's business.
pub struct PriorityFrontier<T> {
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_sequence: u64,
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        PriorityFrontier {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(Entry {
            priority: OrderedFloat(priority),
            sequence,
            item,
        }));
    }

    /// Remove the item with the lowest priority, returning it with its priority.
    pub fn pop(&mut self) -> Option<(f64, T)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.priority.into_inner(), entry.item))
    }

    pub fn peek_priority(&self) -> Option<f64> {
        self.heap
            .peek()
            .map(|Reverse(entry)| entry.priority.into_inner())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_priority_first() {
        let mut frontier = PriorityFrontier::new();
        frontier.push("c", 3.0);
        frontier.push("a", 1.0);
        frontier.push("b", 2.5);
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.peek_priority(), Some(1.0));
        assert_eq!(frontier.pop(), Some((1.0, "a")));
        assert_eq!(frontier.pop(), Some((2.5, "b")));
        assert_eq!(frontier.pop(), Some((3.0, "c")));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut frontier = PriorityFrontier::new();
        for item in ["first", "second", "third"] {
            frontier.push(item, 4.0);
        }
        frontier.push("urgent", 1.0);
        let order = std::iter::from_fn(|| frontier.pop().map(|(_, item)| item)).collect::<Vec<_>>();
        assert_eq!(order, vec!["urgent", "first", "second", "third"]);
    }
}
