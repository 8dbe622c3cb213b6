//! Heap specialization that stores one numeric priority per handle.

use std::cmp::Ordering;

use crate::{Arena, Error, HeapOrder, HeapStorage, IndexedHeap};

/// Per-handle `f64` keys, compared numerically.
///
/// `0.0` and `-0.0` are equal. Any `NaN`, whatever its sign, sorts after
/// every other value, so it never displaces a real priority from the root.
#[derive(Debug)]
pub struct Priorities<'a> {
    keys: &'a mut [f64],
}

impl<'a> Priorities<'a> {
    /// Wraps one key slot per handle. Callers check the slot count.
    #[must_use]
    pub(crate) const fn new(keys: &'a mut [f64]) -> Self {
        Self { keys }
    }

    /// Returns the last key recorded for `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range.
    #[must_use]
    pub fn key(&self, handle: usize) -> f64 {
        self.keys[handle]
    }

    /// Returns the number of key slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no key slots.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl HeapOrder for Priorities<'_> {
    fn compare(&self, a: usize, b: usize) -> Ordering {
        compare_keys(self.keys[a], self.keys[b])
    }
}

/// Numeric order with every `NaN` after every number.
fn compare_keys(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Indexed min-heap that keeps each handle's priority itself.
///
/// # Example
///
/// ```
/// use bump_heap::{Arena, Error, PriorityQueue};
///
/// let mut buffer = [0u8; 512];
/// let arena = Arena::new(&mut buffer);
/// let mut queue = PriorityQueue::with_capacity_in(&arena, 4).unwrap();
///
/// queue.add(0, 5.0).unwrap();
/// queue.add(1, 2.0).unwrap();
/// queue.add(2, 8.0).unwrap();
/// assert_eq!(queue.add(1, 9.0), Err(Error::AlreadyExists));
///
/// queue.update_priority(2, 1.0).unwrap();
/// assert_eq!(queue.pop(), Ok((2, 1.0)));
/// assert_eq!(queue.remove_root(), Ok(1));
/// assert!(queue.contains(0));
/// ```
pub type PriorityQueue<'a> = IndexedHeap<'a, Priorities<'a>>;

impl<'a> IndexedHeap<'a, Priorities<'a>> {
    /// Creates an empty queue over `storage` with one key slot per handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] unless `keys` has exactly one slot
    /// per handle of `storage`.
    pub fn with_priorities(storage: HeapStorage<'a>, keys: &'a mut [f64]) -> Result<Self, Error> {
        if keys.len() != storage.capacity() {
            return Err(Error::OutOfBounds);
        }
        Ok(Self::new(storage, Priorities::new(keys)))
    }

    /// Carves heap storage and key slots for `capacity` handles from
    /// `arena` in one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the arena cannot hold them, and
    /// [`Error::OutOfBounds`] if `capacity` is `usize::MAX`.
    pub fn with_capacity_in(arena: &'a Arena<'_>, capacity: usize) -> Result<Self, Error> {
        if capacity == usize::MAX {
            return Err(Error::OutOfBounds);
        }
        let (storage, keys) = arena.all_or_nothing(|arena| {
            let storage = arena.heap_storage(capacity).ok()?;
            let keys = arena.alloc_slice(capacity, f64::INFINITY)?;
            Some((storage, keys))
        })?;
        Self::with_priorities(storage, keys)
    }

    /// Queues `handle` with `priority`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `handle >= capacity` or the queue
    /// is full, and [`Error::AlreadyExists`] if `handle` is already queued.
    /// The stored priority is untouched on failure.
    pub fn add(&mut self, handle: usize, priority: f64) -> Result<(), Error> {
        self.check_vacant(handle)?;
        self.order_mut().keys[handle] = priority;
        self.push_vacant(handle);
        Ok(())
    }

    /// Replaces the priority of a queued handle and restores heap order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if nothing is queued and
    /// [`Error::OutOfBounds`] if `handle` is out of range or not queued.
    pub fn update_priority(&mut self, handle: usize, priority: f64) -> Result<(), Error> {
        let slot = self.slot_of(handle)?;
        let old = std::mem::replace(&mut self.order_mut().keys[handle], priority);
        if compare_keys(priority, old) == Ordering::Less {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        Ok(())
    }

    /// Returns the priority of `handle` if it is queued.
    #[must_use]
    pub fn priority(&self, handle: usize) -> Option<f64> {
        self.contains(handle).then(|| self.order().key(handle))
    }

    /// Removes the handle with the smallest priority, returning it with
    /// its priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if nothing is queued.
    pub fn pop(&mut self) -> Result<(usize, f64), Error> {
        let handle = self.remove_root()?;
        Ok((handle, self.order().key(handle)))
    }
}
