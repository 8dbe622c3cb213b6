//! Bump arena and indexed binary min-heap over caller-supplied memory.
//!
//! `bump-heap` provides two allocation-free primitives for search and
//! scheduling loops:
//!
//! - [`Arena`]: linear allocator over one byte buffer, aligned regions,
//!   bulk [`reset`](Arena::reset) only
//! - [`IndexedHeap`]: binary min-heap over integer handles with a reverse
//!   position map: O(1) [`contains`](IndexedHeap::contains), O(log n)
//!   re-prioritization of a queued handle
//!
//! The heap is ordered either by a [`HeapOrder`] (usually a closure over an
//! external key store) or by keys it keeps itself ([`PriorityQueue`]). Its
//! backing arrays are carved from an arena in one step.
//!
//! Fallible operations return [`Error`]; nothing allocates after
//! construction.
//!
//! # Example
//!
//! ```
//! use bump_heap::{Arena, Error, PriorityQueue};
//!
//! let mut buffer = [0u8; 1024];
//! let arena = Arena::new(&mut buffer);
//! let mut queue = PriorityQueue::with_capacity_in(&arena, 4).unwrap();
//!
//! queue.add(0, 5.0).unwrap();
//! queue.add(1, 2.0).unwrap();
//! queue.add(2, 8.0).unwrap();
//!
//! assert_eq!(queue.remove_root(), Ok(1));
//! assert!(!queue.contains(1));
//! assert!(queue.contains(0));
//!
//! // A removed handle can be queued again.
//! queue.add(1, 1.0).unwrap();
//! assert_eq!(queue.add(1, 1.0), Err(Error::AlreadyExists));
//! ```

#![deny(missing_docs)]

mod arena;
mod error;
mod fixed_vec;
mod heap;
mod iter;
mod priority;

pub use arena::{Arena, DEFAULT_ALIGNMENT, align_up};
pub use error::Error;
pub use fixed_vec::FixedVec;
pub use heap::{HeapOrder, HeapStorage, IndexedHeap, SENTINEL};
pub use iter::Handles;
pub use priority::{Priorities, PriorityQueue};

#[cfg(test)]
mod tests;
