use std::cell::Cell;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::{Error, FixedVec, HeapStorage, SENTINEL};

/// Alignment used by [`Arena::alloc`]: two pointer widths.
pub const DEFAULT_ALIGNMENT: usize = 2 * size_of::<usize>();

/// Rounds `value` up to the next multiple of `align`.
///
/// Returns `None` if the rounded value does not fit in `usize`.
///
/// `align` must be a power of two.
#[must_use]
pub const fn align_up(value: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    match value.checked_add(mask) {
        Some(bumped) => Some(bumped & !mask),
        None => None,
    }
}

/// Linear bump allocator over a single caller-supplied byte buffer.
///
/// Regions are handed out by advancing an offset and are never freed
/// individually. [`reset`](Arena::reset) rewinds the offset to zero; it
/// needs `&mut self`, so no region handed out earlier can outlive it.
///
/// Allocation goes through `&self`, so any number of regions may be
/// borrowed at once. The arena is not `Sync`.
///
/// # Example
///
/// ```
/// use bump_heap::Arena;
///
/// let mut buffer = [0u8; 256];
/// let mut arena = Arena::new(&mut buffer);
///
/// let a = arena.alloc_aligned(10, 8).unwrap();
/// let b = arena.alloc_aligned(4, 64).unwrap();
/// assert_eq!(b.as_ptr() as usize % 64, 0);
/// assert!(a.as_ptr() < b.as_ptr());
///
/// arena.reset();
/// assert_eq!(arena.offset(), 0);
/// ```
#[derive(Debug)]
pub struct Arena<'buf> {
    /// Start of the backing buffer.
    base: NonNull<u8>,
    /// Buffer length in bytes.
    capacity: usize,
    /// Bytes consumed so far, padding included.
    offset: Cell<usize>,
    _marker: PhantomData<&'buf mut [u8]>,
}

impl<'buf> Arena<'buf> {
    /// Creates an arena over `buffer` with offset 0.
    ///
    /// Bookkeeping lives in the returned value, so the whole buffer is
    /// available for allocation.
    #[must_use]
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        let capacity = buffer.len();
        Self {
            base: NonNull::from(buffer).cast::<u8>(),
            capacity,
            offset: Cell::new(0),
            _marker: PhantomData,
        }
    }

    /// Allocates `size` zeroed bytes whose address is a multiple of `align`.
    ///
    /// Returns `None` and leaves the arena untouched if the aligned region
    /// does not fit in the remaining space.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_aligned(&self, size: usize, align: usize) -> Option<&mut [u8]> {
        assert!(
            align.is_power_of_two(),
            "alignment {align} is not a power of two",
        );
        let base = self.base.as_ptr().addr();
        let cursor = base.checked_add(self.offset.get())?;
        let start = align_up(cursor, align)? - base;
        let end = start.checked_add(size)?;
        if end > self.capacity {
            return None;
        }
        self.offset.set(end);

        // SAFETY: start <= end <= capacity, so the region lies inside the
        // buffer. Every live region ends at or before the old offset:
        // reset needs `&mut self`, and `all_or_nothing` only rewinds past
        // regions that were already dropped.
        let region = unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr().add(start), size) };
        region.fill(0);
        Some(region)
    }

    /// Allocates `size` zeroed bytes at [`DEFAULT_ALIGNMENT`].
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> Option<&mut [u8]> {
        self.alloc_aligned(size, DEFAULT_ALIGNMENT)
    }

    /// Allocates a slice of `len` copies of `value`, aligned for `T`.
    ///
    /// Returns `None` if the slice does not fit or its byte size overflows.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice<T: Copy>(&self, len: usize, value: T) -> Option<&mut [T]> {
        let size = size_of::<T>().checked_mul(len)?;
        let bytes = self.alloc_aligned(size, align_of::<T>())?;

        #[allow(clippy::cast_ptr_alignment)]
        let ptr = bytes.as_mut_ptr().cast::<T>();
        // SAFETY: the region is `len * size_of::<T>()` bytes, aligned for
        // `T`, and exclusively borrowed for as long as `bytes` was. Every
        // element is written by `fill` before it is read; `T: Copy` has no
        // drop glue, so the arena never needs to run destructors.
        let slice = unsafe { std::slice::from_raw_parts_mut(ptr, len) };
        slice.fill(value);
        Some(slice)
    }

    /// Like [`alloc_slice`](Arena::alloc_slice), reporting exhaustion as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the slice does not fit.
    #[allow(clippy::mut_from_ref)]
    pub fn try_alloc_slice<T: Copy>(&self, len: usize, value: T) -> Result<&mut [T], Error> {
        self.alloc_slice(len, value).ok_or(Error::OutOfMemory)
    }

    /// Carves the two arrays an indexed heap of `capacity` handles needs.
    ///
    /// Either both arrays are allocated or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `capacity` is `usize::MAX`, and
    /// [`Error::OutOfMemory`] if the arrays do not fit.
    pub fn heap_storage(&self, capacity: usize) -> Result<HeapStorage<'_>, Error> {
        let slots = capacity.checked_add(1).ok_or(Error::OutOfBounds)?;
        let (indices, positions) = self.all_or_nothing(|arena| {
            let indices = arena.alloc_slice(slots, SENTINEL)?;
            let positions = arena.alloc_slice(capacity, SENTINEL)?;
            Some((indices, positions))
        })?;
        HeapStorage::new(indices, positions)
    }

    /// Carves backing storage for a [`FixedVec`] of `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the storage does not fit.
    pub fn fixed_vec<T: Copy + Default>(&self, capacity: usize) -> Result<FixedVec<'_, T>, Error> {
        let items = self.try_alloc_slice(capacity, T::default())?;
        Ok(FixedVec::new(items))
    }

    /// Runs a multi-step carve, rewinding the offset if any step fails.
    pub(crate) fn all_or_nothing<'s, R>(
        &'s self,
        carve: impl FnOnce(&'s Self) -> Option<R>,
    ) -> Result<R, Error> {
        let mark = self.offset.get();
        carve(self).ok_or_else(|| {
            // Regions from the failed carve were dropped with its closure.
            self.offset.set(mark);
            Error::OutOfMemory
        })
    }

    /// Rewinds the offset to zero.
    ///
    /// Contents are not cleared; allocation zeroes regions on the way out.
    pub const fn reset(&mut self) {
        *self.offset.get_mut() = 0;
    }

    /// Returns the buffer size in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes consumed, alignment padding included.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Returns the number of bytes past the current offset.
    ///
    /// An aligned request may fit in fewer bytes than this.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.offset.get()
    }
}
