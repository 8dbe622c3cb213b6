use crate::Error;

/// Fixed-capacity array over caller-supplied storage.
///
/// Never grows past the length of its buffer. Removal swaps the last
/// element into the hole, so it is O(1) but does not preserve order.
///
/// # Example
///
/// ```
/// use bump_heap::{Error, FixedVec};
///
/// let mut storage = [0u32; 3];
/// let mut frontier = FixedVec::new(&mut storage);
/// frontier.push(10).unwrap();
/// frontier.push(20).unwrap();
/// frontier.push(30).unwrap();
/// assert_eq!(frontier.push(40), Err(Error::OutOfBounds));
///
/// assert_eq!(frontier.swap_remove(0), Ok(10));
/// assert_eq!(frontier.as_slice(), &[30, 20]);
/// ```
#[derive(Debug)]
pub struct FixedVec<'a, T> {
    items: &'a mut [T],
    len: usize,
}

impl<'a, T: Copy> FixedVec<'a, T> {
    /// Creates an empty array whose capacity is `buffer.len()`.
    #[must_use]
    pub const fn new(buffer: &'a mut [T]) -> Self {
        Self {
            items: buffer,
            len: 0,
        }
    }

    /// Appends `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the array is full.
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        let slot = self.items.get_mut(self.len).ok_or(Error::OutOfBounds)?;
        *slot = value;
        self.len += 1;
        Ok(())
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<T, Error> {
        self.as_slice().get(index).copied().ok_or(Error::OutOfBounds)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfBounds)
    }

    /// Removes and returns the element at `index`, moving the last element
    /// into its place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> Result<T, Error> {
        let value = self.get(index)?;
        self.len -= 1;
        self.items[index] = self.items[self.len];
        Ok(value)
    }

    /// Removes every element. Storage is kept.
    pub const fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if another push would fail.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == self.items.len()
    }

    /// Returns the maximum number of elements.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.len]
    }

    /// Returns the elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items[..self.len]
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<'s, T: Copy> IntoIterator for &'s FixedVec<'_, T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
