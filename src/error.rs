// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Errors raised by the heap and the queue built on top of it.
///
/// A failed operation never modifies the container it was called on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An absent value was offered for insertion.
    #[error("absent values cannot be stored in the heap")]
    InvalidArgument,

    /// A peek or removal was attempted on an empty heap.
    #[error("empty heap")]
    EmptyContainer,

    /// A dequeue was attempted on an empty priority queue.
    #[error("empty queue")]
    QueueEmpty,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(Error::EmptyContainer.to_string(), "empty heap");
        assert_eq!(Error::QueueEmpty.to_string(), "empty queue");
        assert_eq!(Error::InvalidArgument.to_string(),
                   "absent values cannot be stored in the heap");
    }
}
