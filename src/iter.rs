/// Iterator over the handles queued in an [`IndexedHeap`](crate::IndexedHeap),
/// in slot order.
///
/// Created by [`IndexedHeap::iter`](crate::IndexedHeap::iter).
#[derive(Clone, Debug)]
pub struct Handles<'a> {
    inner: std::slice::Iter<'a, usize>,
}

impl<'a> Handles<'a> {
    /// Creates a handle iterator over occupied heap slots.
    #[must_use]
    pub(crate) const fn new(inner: std::slice::Iter<'a, usize>) -> Self {
        Self { inner }
    }
}

impl Iterator for Handles<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Handles<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Handles<'_> {}
