// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::iter;
use std::mem;
use std::slice;
use std::vec;

use compare::{Compare, Natural, natural};
use log::debug;

use crate::error::{Error, Result};

// An interval heap is a binary tree structure with the following properties:
//
// (1) Each node (except possibly the last leaf) contains two items
//     where the low one is less than or equal to the high one.
// (2) The low items form a min-heap.
// (3) The high items form a max-heap, where a node holding a single item
//     uses its low item as its high one.
//
// This implies that the min and max items are always in the root node.
//
// Nodes are stored in a Vec. Here's the layout of a tree with 13 items
// (7 nodes) where the numbers are the *node indices* in the Vec:
//
//            0
//         /     \
//       1         2
//      / \       / \
//     3   4     5   6 (high: None)
//
// Children of node `i` live at `2i + 1` and `2i + 2`. Only the last node
// may lack its high item, and only when the item count is odd.

#[derive(Clone)]
struct Node<T> {
    low: T,
    high: Option<T>,
}

impl<T> Node<T> {
    fn new(low: T) -> Node<T> {
        Node { low: low, high: None }
    }

    /// The upper endpoint of the node's interval.
    fn max(&self) -> &T {
        self.high.as_ref().unwrap_or(&self.low)
    }

    fn max_mut(&mut self) -> &mut T {
        match self.high {
            Some(ref mut high) => high,
            None => &mut self.low,
        }
    }

    /// Puts `item` into the empty high slot, keeping the pair ordered.
    fn fill<C: Compare<T>>(&mut self, item: T, cmp: &C) {
        debug_assert!(self.high.is_none());
        if cmp.compares_lt(&item, &self.low) {
            self.high = Some(mem::replace(&mut self.low, item));
        } else {
            self.high = Some(item);
        }
    }

    /// Restores rule (1) after one of the endpoints was replaced.
    fn order<C: Compare<T>>(&mut self, cmp: &C) {
        if let Some(ref mut high) = self.high {
            if cmp.compares_gt(&self.low, high) {
                mem::swap(&mut self.low, high);
            }
        }
    }
}

fn is_root(x: usize) -> bool { x == 0 }

fn parent(x: usize) -> usize {
    debug_assert!(!is_root(x));
    (x - 1) / 2
}

/// Number of nodes needed to hold `items` items.
fn nodes_for(items: usize) -> usize { (items + 1) / 2 }

/// Borrows a node and one of its descendants at the same time.
fn pair_mut<T>(v: &mut [Node<T>], upper: usize, lower: usize) -> (&mut Node<T>, &mut Node<T>) {
    debug_assert!(upper < lower);
    let (head, tail) = v.split_at_mut(lower);
    (&mut head[upper], &mut tail[0])
}

/// The low item of the last node has just been inserted and is smaller
/// than its parent's low item. Moves it up through the low items.
fn bubble_up_min<T, C: Compare<T>>(v: &mut [Node<T>], cmp: &C) {
    let mut node = v.len() - 1;
    while !is_root(node) {
        let par = parent(node);
        let (p, n) = pair_mut(v, par, node);
        if !cmp.compares_lt(&n.low, &p.low) {
            return;
        }
        mem::swap(&mut p.low, &mut n.low);
        node = par;
    }
}

/// The high item of the last node (its low item if it has only one) has
/// just been inserted and is greater than its parent's low item. Moves it
/// up through the high items.
fn bubble_up_max<T, C: Compare<T>>(v: &mut [Node<T>], cmp: &C) {
    let mut node = v.len() - 1;
    while !is_root(node) {
        let par = parent(node);
        let (p, n) = pair_mut(v, par, node);
        if !cmp.compares_gt(n.max(), p.max()) {
            return;
        }
        mem::swap(p.max_mut(), n.max_mut());
        node = par;
    }
}

/// The low item of the root of an otherwise valid interval heap has been
/// replaced without violating rule (1) for the root. This function
/// restores the interval heap properties.
fn sift_down_min<T, C: Compare<T>>(v: &mut [Node<T>], cmp: &C) {
    let mut node = 0;
    loop {
        let c1 = node * 2 + 1;
        let c2 = node * 2 + 2;
        if v.len() <= c1 { return; } // No children. We're done.
        // Pick child with lowest min, the left one on ties
        let ch = if c2 < v.len() && cmp.compares_lt(&v[c2].low, &v[c1].low) { c2 }
                 else { c1 };
        let (n, c) = pair_mut(v, node, ch);
        if !cmp.compares_gt(&n.low, &c.low) {
            return;
        }
        mem::swap(&mut n.low, &mut c.low);
        c.order(cmp);
        node = ch;
    }
}

/// The high item of the root of an otherwise valid interval heap has been
/// replaced without violating rule (1) for the root. This function
/// restores the interval heap properties.
fn sift_down_max<T, C: Compare<T>>(v: &mut [Node<T>], cmp: &C) {
    let mut node = 0;
    loop {
        let c1 = node * 2 + 1;
        let c2 = node * 2 + 2;
        if v.len() <= c1 { return; }
        // Pick child with greatest max, the left one on ties
        let ch = if c2 < v.len() && cmp.compares_gt(v[c2].max(), v[c1].max()) { c2 }
                 else { c1 };
        let (n, c) = pair_mut(v, node, ch);
        if !cmp.compares_lt(n.max(), c.max()) {
            return;
        }
        mem::swap(n.max_mut(), c.max_mut());
        c.order(cmp);
        node = ch;
    }
}

/// A double-ended priority queue implemented with an interval heap.
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the heap's
/// comparator, changes while it is in the heap. This is normally only
/// possible through `Cell`, `RefCell`, global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct IntervalHeap<T, C: Compare<T> = Natural<T>> {
    nodes: Vec<Node<T>>,
    len: usize,
    cmp: C,
}

impl<T, C: Compare<T> + Default> Default for IntervalHeap<T, C> {
    #[inline]
    fn default() -> IntervalHeap<T, C> {
        Self::with_comparator(C::default())
    }
}

impl<T: Ord> IntervalHeap<T> {
    /// Returns an empty heap ordered according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_pqueue::IntervalHeap;
    ///
    /// let heap = IntervalHeap::<u32>::new();
    /// assert!(heap.is_empty());
    /// ```
    pub fn new() -> IntervalHeap<T> { Self::with_comparator(natural()) }

    /// Returns an empty heap with the given capacity and ordered according to the
    /// natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_pqueue::IntervalHeap;
    ///
    /// let heap = IntervalHeap::<u32>::with_capacity(5);
    /// assert!(heap.is_empty());
    /// assert!(heap.capacity() >= 5);
    /// ```
    pub fn with_capacity(capacity: usize) -> IntervalHeap<T> {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<T: Ord> From<Vec<T>> for IntervalHeap<T> {
    /// Returns a heap containing all the items of the given vector and ordered
    /// according to the natural order of its items.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_pqueue::IntervalHeap;
    ///
    /// let heap = IntervalHeap::from(vec![5, 1, 6, 4]);
    /// assert_eq!(heap.len(), 4);
    /// assert_eq!(heap.min_max(), Some((&1, &6)));
    /// ```
    fn from(vec: Vec<T>) -> IntervalHeap<T> {
        Self::from_vec_and_comparator(vec, natural())
    }
}

impl<T, C: Compare<T>> IntervalHeap<T, C> {
    /// Returns an empty heap ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    /// use interval_pqueue::IntervalHeap;
    ///
    /// let cmp = natural::<u32>().rev();
    /// let mut heap = IntervalHeap::with_comparator(cmp);
    /// heap.push(1);
    /// heap.push(2);
    /// assert_eq!(heap.min(), Some(&2));
    /// ```
    pub fn with_comparator(cmp: C) -> IntervalHeap<T, C> {
        IntervalHeap { nodes: vec![], len: 0, cmp: cmp }
    }

    /// Returns an empty heap with the given capacity and ordered according to the given
    /// comparator.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> IntervalHeap<T, C> {
        IntervalHeap { nodes: Vec::with_capacity(nodes_for(capacity)), len: 0, cmp: cmp }
    }

    /// Returns a heap containing all the items of the given vector and ordered
    /// according to the given comparator.
    pub fn from_vec_and_comparator(vec: Vec<T>, cmp: C) -> IntervalHeap<T, C> {
        let mut heap = Self::with_capacity_and_comparator(vec.len(), cmp);
        heap.extend(vec);
        heap
    }

    /// Returns an iterator visiting all items in the heap in arbitrary order.
    pub fn iter(&self) -> Iter<T> {
        debug_assert!(self.is_valid());
        Iter(Items::new(self.nodes.iter(), self.len))
    }

    /// Returns a reference to the smallest item in the heap.
    ///
    /// Returns `None` if the heap is empty.
    pub fn min(&self) -> Option<&T> {
        debug_assert!(self.is_valid());
        self.nodes.first().map(|root| &root.low)
    }

    /// Returns a reference to the greatest item in the heap.
    ///
    /// Returns `None` if the heap is empty.
    pub fn max(&self) -> Option<&T> {
        debug_assert!(self.is_valid());
        self.nodes.first().map(Node::max)
    }

    /// Returns references to the smallest and greatest items in the heap.
    ///
    /// Returns `None` if the heap is empty.
    pub fn min_max(&self) -> Option<(&T, &T)> {
        debug_assert!(self.is_valid());
        self.nodes.first().map(|root| (&root.low, root.max()))
    }

    /// Returns a reference to the smallest item in the heap.
    ///
    /// # Errors
    ///
    /// Fails with `Error::EmptyContainer` if the heap is empty.
    pub fn peek_min(&self) -> Result<&T> {
        self.min().ok_or(Error::EmptyContainer)
    }

    /// Returns a reference to the greatest item in the heap.
    ///
    /// # Errors
    ///
    /// Fails with `Error::EmptyContainer` if the heap is empty.
    pub fn peek_max(&self) -> Result<&T> {
        self.max().ok_or(Error::EmptyContainer)
    }

    /// Returns the number of items the heap can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity() * 2
    }

    /// Reserves the minimum capacity for exactly `additional` more items to be inserted into the
    /// heap.
    ///
    /// Does nothing if the capacity is already sufficient.
    pub fn reserve_exact(&mut self, additional: usize) {
        let nodes = nodes_for(self.len + additional).saturating_sub(self.nodes.len());
        self.nodes.reserve_exact(nodes);
    }

    /// Reserves capacity for at least `additional` more items to be inserted into the heap.
    ///
    /// The heap may reserve more space to avoid frequent reallocations.
    pub fn reserve(&mut self, additional: usize) {
        let nodes = nodes_for(self.len + additional).saturating_sub(self.nodes.len());
        self.nodes.reserve(nodes);
    }

    /// Discards as much additional capacity from the heap as possible.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Removes the low item of the last node, moving its high item down if
    /// it has one and dropping the node otherwise.
    fn pop_last_low(&mut self) -> Option<T> {
        let last = self.nodes.last_mut()?;
        match last.high.take() {
            Some(high) => Some(mem::replace(&mut last.low, high)),
            None => self.nodes.pop().map(|node| node.low),
        }
    }

    /// Removes the greatest item of the last node, dropping the node if it
    /// becomes empty.
    fn pop_last_high(&mut self) -> Option<T> {
        let last = self.nodes.last_mut()?;
        match last.high.take() {
            Some(high) => Some(high),
            None => self.nodes.pop().map(|node| node.low),
        }
    }

    /// Removes the smallest item from the heap and returns it.
    ///
    /// Returns `None` if the heap was empty.
    pub fn pop_min(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        let min = match self.len {
            0 => None,
            1 | 2 => self.pop_last_low(),
            _ => {
                let item = self.pop_last_low()?;
                let res = mem::replace(&mut self.nodes[0].low, item);
                sift_down_min(&mut self.nodes, &self.cmp);
                Some(res)
            }
        };
        if min.is_some() { self.len -= 1; }
        debug_assert!(self.is_valid());
        min
    }

    /// Removes the greatest item from the heap and returns it.
    ///
    /// Returns `None` if the heap was empty.
    pub fn pop_max(&mut self) -> Option<T> {
        debug_assert!(self.is_valid());
        let max = match self.len {
            0 => None,
            1 | 2 => self.pop_last_high(),
            _ => {
                let item = self.pop_last_high()?;
                let res = mem::replace(self.nodes[0].max_mut(), item);
                sift_down_max(&mut self.nodes, &self.cmp);
                Some(res)
            }
        };
        if max.is_some() { self.len -= 1; }
        debug_assert!(self.is_valid());
        max
    }

    /// Removes the smallest item from the heap and returns it.
    ///
    /// # Errors
    ///
    /// Fails with `Error::EmptyContainer` if the heap is empty, leaving it untouched.
    pub fn remove_min(&mut self) -> Result<T> {
        self.pop_min().ok_or_else(|| {
            debug!("remove_min on an empty heap");
            Error::EmptyContainer
        })
    }

    /// Removes the greatest item from the heap and returns it.
    ///
    /// # Errors
    ///
    /// Fails with `Error::EmptyContainer` if the heap is empty, leaving it untouched.
    pub fn remove_max(&mut self) -> Result<T> {
        self.pop_max().ok_or_else(|| {
            debug!("remove_max on an empty heap");
            Error::EmptyContainer
        })
    }

    /// Pushes an item onto the heap.
    pub fn push(&mut self, item: T) {
        debug_assert!(self.is_valid());
        // The item lands in node `len / 2`: a fresh node when `len` is even,
        // the free high slot of the last node when it is odd. Which half of
        // the heap may be violated is decided against that node's parent.
        let node = self.len / 2;
        let side = if is_root(node) { Ordering::Equal }
                   else { self.cmp.compare(&item, &self.nodes[parent(node)].low) };
        match self.nodes.last_mut() {
            Some(last) if last.high.is_none() => last.fill(item, &self.cmp),
            _ => self.nodes.push(Node::new(item)),
        }
        self.len += 1;
        match side {
            Ordering::Less => bubble_up_min(&mut self.nodes, &self.cmp),
            Ordering::Greater => bubble_up_max(&mut self.nodes, &self.cmp),
            Ordering::Equal => {}
        }
        debug_assert!(self.is_valid());
    }

    /// Inserts a value into the heap.
    ///
    /// Accepts either an item or an `Option` of one.
    ///
    /// # Errors
    ///
    /// Fails with `Error::InvalidArgument` if the value is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use interval_pqueue::{Error, IntervalHeap};
    ///
    /// let mut heap = IntervalHeap::<i32>::new();
    /// assert_eq!(heap.insert(3), Ok(()));
    /// assert_eq!(heap.insert(None), Err(Error::InvalidArgument));
    /// assert_eq!(heap.len(), 1);
    /// ```
    pub fn insert<V: Into<Option<T>>>(&mut self, value: V) -> Result<()> {
        match value.into() {
            Some(item) => {
                self.push(item);
                Ok(())
            }
            None => {
                debug!("rejected an absent value");
                Err(Error::InvalidArgument)
            }
        }
    }

    /// Consumes the heap and returns its items as a vector in arbitrary order.
    pub fn into_vec(self) -> Vec<T> { self.into_iter().collect() }

    /// Consumes the heap and returns its items as a vector in sorted (ascending) order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len);
        while let Some(item) = self.pop_min() {
            vec.push(item);
        }
        vec
    }

    /// Returns the number of items in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all items from the heap.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.len = 0;
    }

    /// Clears the heap, returning an iterator over the removed items in arbitrary order.
    pub fn drain(&mut self) -> Drain<T> {
        let len = mem::replace(&mut self.len, 0);
        Drain(Items::new(self.nodes.drain(..), len))
    }

    /// Checks if the heap is valid.
    ///
    /// The heap is valid if:
    ///
    /// 1. It holds `ceil(len / 2)` nodes, all of them full except possibly
    ///    the last one, which is single exactly when `len` is odd, AND
    /// 2a. Each node's low item is less than or equal to its high item, AND
    /// 2b. Each node's low item is greater than or equal to the low item of the
    ///     node's parent, AND
    /// 2c. Each node's high item is less than or equal to the high item of the
    ///     node's parent
    pub(crate) fn is_valid(&self) -> bool {
        let last = self.nodes.len().wrapping_sub(1);
        let complete = self.nodes.len() == nodes_for(self.len) &&
            self.nodes.iter().enumerate().all(|(i, node)| {
                node.high.is_some() || (i == last && self.len % 2 == 1)
            });

        complete && self.nodes.iter().enumerate().all(|(i, node)| {
            let ordered = node.high.as_ref()
                .map_or(true, |high| self.cmp.compares_le(&node.low, high)); // 2a
            ordered && (is_root(i) || {
                let par = &self.nodes[parent(i)];
                self.cmp.compares_ge(&node.low, &par.low) &&   // 2b
                self.cmp.compares_le(node.max(), par.max())     // 2c
            })
        })
    }
}

impl<T: Debug, C: Compare<T>> Debug for IntervalHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, C: Compare<T> + Default> iter::FromIterator<T> for IntervalHeap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> IntervalHeap<T, C> {
        let mut heap = IntervalHeap::default();
        heap.extend(iter);
        heap
    }
}

impl<T, C: Compare<T>> Extend<T> for IntervalHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<'a, T: 'a + Copy, C: Compare<T>> Extend<&'a T> for IntervalHeap<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// Splits a node, owned or borrowed, into its endpoints.
trait Endpoints {
    type Output;
    fn endpoints(self) -> (Self::Output, Option<Self::Output>);
}

impl<T> Endpoints for Node<T> {
    type Output = T;
    fn endpoints(self) -> (T, Option<T>) { (self.low, self.high) }
}

impl<'a, T> Endpoints for &'a Node<T> {
    type Output = &'a T;
    fn endpoints(self) -> (&'a T, Option<&'a T>) { (&self.low, self.high.as_ref()) }
}

/// Flattens a sequence of nodes into their items, low before high.
#[derive(Clone)]
struct Items<I, E> {
    nodes: I,
    high: Option<E>,
    len: usize,
}

impl<I, E> Items<I, E> {
    fn new(nodes: I, len: usize) -> Items<I, E> {
        Items { nodes: nodes, high: None, len: len }
    }
}

impl<I, E> Iterator for Items<I, E> where I: Iterator, I::Item: Endpoints<Output = E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        let item = match self.high.take() {
            Some(high) => high,
            None => {
                let (low, high) = self.nodes.next()?.endpoints();
                self.high = high;
                low
            }
        };
        self.len -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

/// An iterator over an `IntervalHeap` in arbitrary order.
///
/// Acquire through [`IntervalHeap::iter`](struct.IntervalHeap.html#method.iter).
pub struct Iter<'a, T: 'a>(Items<slice::Iter<'a, Node<T>>, &'a T>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline] fn next(&mut self) -> Option<&'a T> { self.0.next() }
    #[inline] fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A consuming iterator over an `IntervalHeap` in arbitrary order.
///
/// Acquire through [`IntoIterator::into_iter`](
/// https://doc.rust-lang.org/stable/std/iter/trait.IntoIterator.html#tymethod.into_iter).
pub struct IntoIter<T>(Items<vec::IntoIter<Node<T>>, T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator that drains an `IntervalHeap` in arbitrary order.
///
/// Acquire through [`IntervalHeap::drain`](struct.IntervalHeap.html#method.drain).
pub struct Drain<'a, T: 'a>(Items<vec::Drain<'a, Node<T>>, T>);

impl<'a, T: 'a> Iterator for Drain<'a, T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T: 'a> ExactSizeIterator for Drain<'a, T> {}

impl<T, C: Compare<T>> IntoIterator for IntervalHeap<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(Items::new(self.nodes.into_iter(), self.len)) }
}

impl<'a, T, C: Compare<T>> IntoIterator for &'a IntervalHeap<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}
