//! Binary min-heap over integer handles with a reverse position map.
//!
//! The heap stores handles in `0..capacity`, never the data they refer to.
//! Ordering comes from a [`HeapOrder`], typically a closure over an
//! external store such as a distance table. Because every queued handle's
//! slot is tracked, membership is O(1) and re-prioritizing a queued handle
//! is O(log n) without searching.

use std::cmp::Ordering;

use crate::{Arena, Error, Handles};

/// Position-map value of a handle that is not queued.
pub const SENTINEL: usize = usize::MAX;

/// Total order over heap handles.
///
/// Implemented for every `Fn(usize, usize) -> Ordering` closure, so a
/// closure capturing the external data store is the usual way to order a
/// heap.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use bump_heap::{Arena, IndexedHeap};
///
/// let dist = [Cell::new(7), Cell::new(3), Cell::new(5)];
/// let mut buffer = [0u8; 256];
/// let arena = Arena::new(&mut buffer);
/// let mut heap = IndexedHeap::new_in(&arena, 3, |a: usize, b: usize| {
///     dist[a].get().cmp(&dist[b].get())
/// })
/// .unwrap();
///
/// for handle in 0..3 {
///     heap.insert(handle).unwrap();
/// }
/// dist[0].set(1);
/// heap.decrease_key(0).unwrap();
/// assert_eq!(heap.remove_root(), Ok(0));
/// ```
pub trait HeapOrder {
    /// Compares the keys of handles `a` and `b`.
    fn compare(&self, a: usize, b: usize) -> Ordering;
}

impl<F> HeapOrder for F
where
    F: Fn(usize, usize) -> Ordering,
{
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self(a, b)
    }
}

/// Backing arrays of an [`IndexedHeap`].
///
/// `indices` holds one slot per handle plus the unused slot 0;
/// `positions` holds one entry per handle. The sizes are checked on
/// construction, so a mis-sized pair cannot reach the heap.
#[derive(Debug)]
pub struct HeapStorage<'a> {
    indices: &'a mut [usize],
    positions: &'a mut [usize],
}

impl<'a> HeapStorage<'a> {
    /// Pairs an indices array of `capacity + 1` slots with a positions
    /// array of `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] unless
    /// `indices.len() == positions.len() + 1`.
    pub const fn new(indices: &'a mut [usize], positions: &'a mut [usize]) -> Result<Self, Error> {
        if indices.len() != positions.len() + 1 {
            return Err(Error::OutOfBounds);
        }
        Ok(Self { indices, positions })
    }

    /// Returns the number of distinct handles the storage can track.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.positions.len()
    }
}

/// Indexed binary min-heap.
///
/// Slots are 1-based: the minimum lives in `indices[1]` and the children
/// of slot `p` are `2p` and `2p + 1`. Between calls:
///
/// - every parent compares less than or equal to its children;
/// - `positions[indices[p]] == p` for every occupied slot `p`, and
///   `positions[h] == SENTINEL` for every handle `h` not queued.
///
/// Equal keys never swap: sift-up stops at an equal parent, and sift-down
/// prefers the left child on ties and stops at an equal child.
#[derive(Debug)]
pub struct IndexedHeap<'a, O> {
    indices: &'a mut [usize],
    positions: &'a mut [usize],
    count: usize,
    order: O,
}

impl<'a, O: HeapOrder> IndexedHeap<'a, O> {
    /// Creates an empty heap over `storage`, ordered by `order`.
    ///
    /// Every position entry is reset to [`SENTINEL`].
    pub fn new(storage: HeapStorage<'a>, order: O) -> Self {
        let HeapStorage { indices, positions } = storage;
        positions.fill(SENTINEL);
        Self {
            indices,
            positions,
            count: 0,
            order,
        }
    }

    /// Carves storage for `capacity` handles from `arena` and creates an
    /// empty heap over it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the arena cannot hold the storage.
    pub fn new_in(arena: &'a Arena<'_>, capacity: usize, order: O) -> Result<Self, Error> {
        Ok(Self::new(arena.heap_storage(capacity)?, order))
    }

    /// Queues `handle`, ordered by its current key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `handle >= capacity` or the heap is
    /// full, and [`Error::AlreadyExists`] if `handle` is already queued.
    pub fn insert(&mut self, handle: usize) -> Result<(), Error> {
        self.check_vacant(handle)?;
        self.push_vacant(handle);
        Ok(())
    }

    /// Removes and returns the handle with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if nothing is queued.
    pub fn remove_root(&mut self) -> Result<usize, Error> {
        if self.count == 0 {
            return Err(Error::Empty);
        }
        let root = self.indices[1];
        let last = self.indices[self.count];
        self.count -= 1;
        self.positions[root] = SENTINEL;
        if self.count > 0 {
            self.place(1, last);
            self.sift_down(1);
        }
        Ok(root)
    }

    /// Returns the handle with the smallest key without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<usize> {
        (self.count > 0).then(|| self.indices[1])
    }

    /// Returns `true` if `handle` is currently queued. O(1).
    #[must_use]
    pub fn contains(&self, handle: usize) -> bool {
        self.positions
            .get(handle)
            .is_some_and(|&slot| slot != SENTINEL)
    }

    /// Returns the slot of `handle`, or `None` if it is not queued.
    #[must_use]
    pub fn position(&self, handle: usize) -> Option<usize> {
        self.positions
            .get(handle)
            .copied()
            .filter(|&slot| slot != SENTINEL)
    }

    /// Restores heap order after the key of `handle` changed in either
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if nothing is queued and
    /// [`Error::OutOfBounds`] if `handle` is out of range or not queued.
    pub fn update(&mut self, handle: usize) -> Result<(), Error> {
        let slot = self.slot_of(handle)?;
        if self.sift_up(slot) == slot {
            self.sift_down(slot);
        }
        Ok(())
    }

    /// Restores heap order after the key of `handle` decreased.
    ///
    /// # Errors
    ///
    /// Same as [`update`](IndexedHeap::update).
    pub fn decrease_key(&mut self, handle: usize) -> Result<(), Error> {
        let slot = self.slot_of(handle)?;
        self.sift_up(slot);
        Ok(())
    }

    /// Restores heap order after the key of `handle` increased.
    ///
    /// # Errors
    ///
    /// Same as [`update`](IndexedHeap::update).
    pub fn increase_key(&mut self, handle: usize) -> Result<(), Error> {
        let slot = self.slot_of(handle)?;
        self.sift_down(slot);
        Ok(())
    }

    /// Dequeues every handle. O(capacity); storage is kept.
    pub fn clear(&mut self) {
        self.positions.fill(SENTINEL);
        self.count = 0;
    }

    /// Returns the number of queued handles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no handle is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of distinct handles the heap can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Returns the order the heap compares handles with.
    #[must_use]
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Returns the order mutably.
    ///
    /// Changing the key of a queued handle through it must be followed by
    /// [`update`](IndexedHeap::update) or one of its directed forms.
    pub const fn order_mut(&mut self) -> &mut O {
        &mut self.order
    }

    /// Returns an iterator over queued handles in slot order.
    ///
    /// The first handle is the minimum; the rest follow heap layout, not
    /// key order.
    #[must_use]
    pub fn iter(&self) -> Handles<'_> {
        Handles::new(self.indices[1..=self.count].iter())
    }

    /// Checks that `handle` can be queued.
    pub(crate) fn check_vacant(&self, handle: usize) -> Result<(), Error> {
        match self.positions.get(handle) {
            None => Err(Error::OutOfBounds),
            Some(&slot) if slot != SENTINEL => Err(Error::AlreadyExists),
            Some(_) if self.count == self.capacity() => Err(Error::OutOfBounds),
            Some(_) => Ok(()),
        }
    }

    /// Appends a handle that passed [`check_vacant`](Self::check_vacant)
    /// and sifts it up.
    pub(crate) fn push_vacant(&mut self, handle: usize) {
        self.count += 1;
        self.place(self.count, handle);
        self.sift_up(self.count);
    }

    /// Looks up the slot of a queued handle.
    pub(crate) fn slot_of(&self, handle: usize) -> Result<usize, Error> {
        if self.count == 0 {
            return Err(Error::Empty);
        }
        self.position(handle).ok_or(Error::OutOfBounds)
    }

    /// Moves the handle at `slot` toward the root while it is strictly
    /// less than its parent. Returns its final slot.
    pub(crate) fn sift_up(&mut self, mut slot: usize) -> usize {
        let handle = self.indices[slot];
        while slot > 1 {
            let parent = slot / 2;
            let above = self.indices[parent];
            if self.order.compare(handle, above) != Ordering::Less {
                break;
            }
            self.place(slot, above);
            slot = parent;
        }
        self.place(slot, handle);
        slot
    }

    /// Moves the handle at `slot` toward the leaves while its smaller
    /// child is strictly less than it. Returns its final slot.
    pub(crate) fn sift_down(&mut self, mut slot: usize) -> usize {
        let handle = self.indices[slot];
        while slot <= self.count / 2 {
            let left = 2 * slot;
            let right = left + 1;
            let child = if right <= self.count
                && self.order.compare(self.indices[right], self.indices[left]) == Ordering::Less
            {
                right
            } else {
                left
            };
            let below = self.indices[child];
            if self.order.compare(below, handle) != Ordering::Less {
                break;
            }
            self.place(slot, below);
            slot = child;
        }
        self.place(slot, handle);
        slot
    }

    fn place(&mut self, slot: usize, handle: usize) {
        self.indices[slot] = handle;
        self.positions[handle] = slot;
    }

    /// Panics unless heap order and the position bijection both hold.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.count <= self.capacity());
        for slot in 1..=self.count {
            let handle = self.indices[slot];
            assert_eq!(self.positions[handle], slot, "position of handle {handle}");
            for child in [2 * slot, 2 * slot + 1] {
                if child <= self.count {
                    assert_ne!(
                        self.order.compare(self.indices[child], handle),
                        Ordering::Less,
                        "slot {child} orders before its parent {slot}",
                    );
                }
            }
        }
        let queued = self.positions.iter().filter(|&&slot| slot != SENTINEL).count();
        assert_eq!(queued, self.count, "queued handles vs count");
    }
}

impl<'s, O: HeapOrder> IntoIterator for &'s IndexedHeap<'_, O> {
    type Item = usize;
    type IntoIter = Handles<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
