// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Backing stores for a [`PriorityQueue`](crate::PriorityQueue).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use compare::Compare;

use crate::error::{Error, Result};
use crate::heap::IntervalHeap;

/// A value stored under an integer priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prioritized<T> {
    pub priority: i64,
    pub value: T,
}

impl<T> Prioritized<T> {
    pub fn new(value: T, priority: i64) -> Prioritized<T> {
        Prioritized { priority: priority, value: value }
    }
}

/// Orders `Prioritized` values by priority alone.
///
/// Values with equal priority compare equal, whatever they hold.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByPriority;

impl<T> Compare<Prioritized<T>> for ByPriority {
    fn compare(&self, l: &Prioritized<T>, r: &Prioritized<T>) -> Ordering {
        l.priority.cmp(&r.priority)
    }
}

/// Storage behind a priority queue.
///
/// `dequeue_min` and `dequeue_max` fail with `Error::EmptyContainer` when
/// the store holds nothing.
pub trait Store<T> {
    fn enqueue(&mut self, value: T, priority: i64);
    fn dequeue_min(&mut self) -> Result<T>;
    fn dequeue_max(&mut self) -> Result<T>;
    fn count(&self) -> usize;
}

/// A store backed by an interval heap; both ends are reached in `O(log n)`.
#[derive(Clone)]
pub struct IntervalHeapStore<T> {
    heap: IntervalHeap<Prioritized<T>, ByPriority>,
}

impl<T> IntervalHeapStore<T> {
    pub fn new() -> IntervalHeapStore<T> {
        IntervalHeapStore { heap: IntervalHeap::with_comparator(ByPriority) }
    }

    pub fn with_capacity(capacity: usize) -> IntervalHeapStore<T> {
        IntervalHeapStore {
            heap: IntervalHeap::with_capacity_and_comparator(capacity, ByPriority),
        }
    }
}

impl<T> Default for IntervalHeapStore<T> {
    fn default() -> IntervalHeapStore<T> { IntervalHeapStore::new() }
}

impl<T: Debug> Debug for IntervalHeapStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IntervalHeapStore").field("heap", &self.heap).finish()
    }
}

impl<T> Store<T> for IntervalHeapStore<T> {
    fn enqueue(&mut self, value: T, priority: i64) {
        self.heap.push(Prioritized::new(value, priority));
    }

    fn dequeue_min(&mut self) -> Result<T> {
        self.heap.remove_min().map(|entry| entry.value)
    }

    fn dequeue_max(&mut self) -> Result<T> {
        self.heap.remove_max().map(|entry| entry.value)
    }

    fn count(&self) -> usize { self.heap.len() }
}

/// A store backed by an ordered map, kept as a baseline for the heap.
///
/// Entries are keyed by priority and then by arrival, so equal priorities
/// never collide.
#[derive(Clone, Debug)]
pub struct SortedSetStore<T> {
    entries: BTreeMap<(i64, u64), T>,
    seq: u64,
}

impl<T> SortedSetStore<T> {
    pub fn new() -> SortedSetStore<T> {
        SortedSetStore { entries: BTreeMap::new(), seq: 0 }
    }
}

impl<T> Default for SortedSetStore<T> {
    fn default() -> SortedSetStore<T> { SortedSetStore::new() }
}

impl<T> Store<T> for SortedSetStore<T> {
    fn enqueue(&mut self, value: T, priority: i64) {
        self.entries.insert((priority, self.seq), value);
        self.seq = self.seq.wrapping_add(1);
    }

    fn dequeue_min(&mut self) -> Result<T> {
        self.entries.pop_first().map(|(_, value)| value).ok_or(Error::EmptyContainer)
    }

    fn dequeue_max(&mut self) -> Result<T> {
        self.entries.pop_last().map(|(_, value)| value).ok_or(Error::EmptyContainer)
    }

    fn count(&self) -> usize { self.entries.len() }
}

#[cfg(test)]
mod test {
    use rand::{thread_rng, Rng};

    use super::{IntervalHeapStore, SortedSetStore, Store};
    use crate::error::Error;

    #[test]
    fn test_heap_store_returns_values() {
        let mut store = IntervalHeapStore::new();
        store.enqueue("a", 5);
        store.enqueue("b", 1);
        store.enqueue("c", 9);
        assert_eq!(store.count(), 3);
        assert_eq!(store.dequeue_min(), Ok("b"));
        assert_eq!(store.dequeue_max(), Ok("c"));
        assert_eq!(store.dequeue_max(), Ok("a"));
        assert_eq!(store.dequeue_min(), Err(Error::EmptyContainer));
    }

    #[test]
    fn test_sorted_store_keeps_equal_priorities() {
        let mut store = SortedSetStore::new();
        store.enqueue('x', 3);
        store.enqueue('y', 3);
        store.enqueue('z', 3);
        assert_eq!(store.count(), 3);
        let mut out = vec![];
        while let Ok(c) = store.dequeue_max() {
            out.push(c);
        }
        out.sort();
        assert_eq!(out, vec!['x', 'y', 'z']);
    }

    #[test]
    fn fuzz_stores_agree() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let mut heap = IntervalHeapStore::with_capacity(64);
            let mut set = SortedSetStore::new();
            for _ in 0..200 {
                if rng.gen_bool(0.6) {
                    let priority = rng.gen_range(-20..20);
                    // The value is its own priority so tie order doesn't matter.
                    heap.enqueue(priority, priority);
                    set.enqueue(priority, priority);
                } else if rng.gen() {
                    assert_eq!(heap.dequeue_min(), set.dequeue_min());
                } else {
                    assert_eq!(heap.dequeue_max(), set.dequeue_max());
                }
                assert_eq!(heap.count(), set.count());
            }
        }
    }
}
