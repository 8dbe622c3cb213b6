use super::*;

/// Byte buffer with a known base alignment, so offsets are predictable.
#[repr(C, align(64))]
struct Aligned<const N: usize>([u8; N]);

impl<const N: usize> Aligned<N> {
    const fn new() -> Self {
        Self([0; N])
    }
}

/// Pops every handle, returning them in extraction order.
fn drain<O: HeapOrder>(heap: &mut IndexedHeap<'_, O>) -> Vec<usize> {
    let mut out = Vec::with_capacity(heap.len());
    while let Ok(handle) = heap.remove_root() {
        heap.assert_invariants();
        out.push(handle);
    }
    out
}

mod arena;
