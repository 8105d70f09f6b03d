// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::store::{IntervalHeapStore, Store};

/// A double-ended priority queue of values keyed by an integer priority.
///
/// Values with equal priority come out in no particular order.
///
/// # Examples
///
/// ```
/// use interval_pqueue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.enqueue("a", 5);
/// queue.enqueue("b", 1);
/// queue.enqueue("c", 9);
///
/// assert_eq!(queue.dequeue_min(), Ok("b"));
/// assert_eq!(queue.dequeue_max(), Ok("c"));
/// assert_eq!(queue.count(), 1);
/// ```
#[derive(Clone)]
pub struct PriorityQueue<T, S: Store<T> = IntervalHeapStore<T>> {
    store: S,
    _marker: PhantomData<T>,
}

impl<T, S: Store<T> + Default> Default for PriorityQueue<T, S> {
    fn default() -> PriorityQueue<T, S> {
        Self::with_store(S::default())
    }
}

impl<T, S: Store<T> + Debug> Debug for PriorityQueue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PriorityQueue").field("store", &self.store).finish()
    }
}

impl<T> PriorityQueue<T> {
    /// Returns an empty queue backed by an interval heap.
    pub fn new() -> PriorityQueue<T> {
        Self::with_store(IntervalHeapStore::new())
    }
}

impl<T, S: Store<T>> PriorityQueue<T, S> {
    /// Returns a queue over the given store.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_pqueue::{PriorityQueue, SortedSetStore};
    ///
    /// let mut queue = PriorityQueue::with_store(SortedSetStore::new());
    /// queue.enqueue('x', 2);
    /// assert_eq!(queue.dequeue_max(), Ok('x'));
    /// ```
    pub fn with_store(store: S) -> PriorityQueue<T, S> {
        PriorityQueue { store: store, _marker: PhantomData }
    }

    /// Adds `value` to the queue under `priority`.
    pub fn enqueue(&mut self, value: T, priority: i64) {
        trace!("enqueue at priority {}", priority);
        self.store.enqueue(value, priority);
    }

    /// Removes and returns a value with the lowest priority.
    ///
    /// # Errors
    ///
    /// Fails with `Error::QueueEmpty` if the queue is empty.
    pub fn dequeue_min(&mut self) -> Result<T> {
        self.check_not_empty("dequeue_min")?;
        self.store.dequeue_min()
    }

    /// Removes and returns a value with the highest priority.
    ///
    /// # Errors
    ///
    /// Fails with `Error::QueueEmpty` if the queue is empty.
    pub fn dequeue_max(&mut self) -> Result<T> {
        self.check_not_empty("dequeue_max")?;
        self.store.dequeue_max()
    }

    fn check_not_empty(&self, op: &str) -> Result<()> {
        if self.store.count() == 0 {
            debug!("{} on an empty queue", op);
            return Err(Error::QueueEmpty);
        }
        trace!("{} with {} queued", op, self.store.count());
        Ok(())
    }

    /// Returns the number of values in the queue.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Consumes the queue and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod test {
    use rand::{thread_rng, Rng};

    use super::PriorityQueue;
    use crate::error::Error;
    use crate::store::{SortedSetStore, Store};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_scenario() {
        init();
        let mut queue = PriorityQueue::new();
        queue.enqueue("a", 5);
        queue.enqueue("b", 1);
        queue.enqueue("c", 9);
        assert_eq!(queue.dequeue_min(), Ok("b"));
        assert_eq!(queue.dequeue_max(), Ok("c"));
        assert_eq!(queue.dequeue_max(), Ok("a"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_queue() {
        init();
        let mut queue = PriorityQueue::<String>::new();
        assert_eq!(queue.dequeue_min(), Err(Error::QueueEmpty));
        assert_eq!(queue.dequeue_max(), Err(Error::QueueEmpty));

        queue.enqueue("only".to_string(), 0);
        assert_eq!(queue.dequeue_max(), Ok("only".to_string()));
        assert_eq!(queue.dequeue_min(), Err(Error::QueueEmpty));
        assert_eq!(queue.count(), 0);
    }

    #[test]
    fn test_sorted_set_backend() {
        init();
        let mut queue = PriorityQueue::with_store(SortedSetStore::new());
        assert_eq!(queue.dequeue_max(), Err(Error::QueueEmpty));
        for (i, &p) in [4, -2, 7, 4].iter().enumerate() {
            queue.enqueue(i, p);
        }
        assert_eq!(queue.dequeue_min(), Ok(1));
        assert_eq!(queue.dequeue_max(), Ok(2));
        assert_eq!(queue.into_store().count(), 2);
    }

    #[test]
    fn fuzz_dequeue_order() {
        init();
        let mut rng = thread_rng();
        for _ in 0..20 {
            let mut queue = PriorityQueue::new();
            let mut enqueued = 0;
            for _ in 0..200 {
                let p = rng.gen_range(-100..100);
                queue.enqueue((p, enqueued), p);
                enqueued += 1;
            }
            assert_eq!(queue.count(), enqueued);

            let mut low = i64::MIN;
            let mut high = i64::MAX;
            while !queue.is_empty() {
                let (p, _) = if rng.gen() {
                    let entry = queue.dequeue_min().unwrap();
                    assert!(entry.0 >= low);
                    low = entry.0;
                    entry
                } else {
                    let entry = queue.dequeue_max().unwrap();
                    assert!(entry.0 <= high);
                    high = entry.0;
                    entry
                };
                assert!(low <= p && p <= high);
            }
            assert_eq!(queue.dequeue_min(), Err(Error::QueueEmpty));
        }
    }
}
