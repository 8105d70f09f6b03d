// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-ended priority queue implemented with an interval heap.
//!
//! An [`IntervalHeap`] stores its items in a complete binary tree of
//! `(low, high)` pairs and accepts custom comparators from the [`compare`]
//! crate. Insertion and popping the smallest or greatest item are
//! `O(log n)`. Retrieving the smallest or greatest item is `O(1)`.
//!
//! A [`PriorityQueue`] sits on top of a [`Store`] and keeps arbitrary
//! values under an `i64` priority. The default store is an
//! [`IntervalHeapStore`]; a [`SortedSetStore`] built on `BTreeMap` is
//! available as a baseline.
//!
//! Neither type synchronizes access. Put it behind a `Mutex` to share it
//! between threads.
//!
//! ```
//! use interval_pqueue::{Error, PriorityQueue};
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("low", -3);
//! queue.enqueue("high", 12);
//!
//! assert_eq!(queue.dequeue_max(), Ok("high"));
//! assert_eq!(queue.dequeue_max(), Ok("low"));
//! assert_eq!(queue.dequeue_min(), Err(Error::QueueEmpty));
//! ```
//!
//! [`compare`]: https://docs.rs/compare

mod error;
mod heap;
mod queue;
mod store;

pub use crate::error::{Error, Result};
pub use crate::heap::{Drain, IntervalHeap, IntoIter, Iter};
pub use crate::queue::PriorityQueue;
pub use crate::store::{ByPriority, IntervalHeapStore, Prioritized, SortedSetStore, Store};
