use proptest::prelude::*;

use super::*;

#[test]
fn new_arena_is_empty() {
    let mut buffer = [0u8; 32];
    let arena = Arena::new(&mut buffer);
    assert_eq!(arena.capacity(), 32);
    assert_eq!(arena.offset(), 0);
    assert_eq!(arena.remaining(), 32);
}

#[test]
fn empty_buffer_fits_only_zero_sized() {
    let mut buffer = [0u8; 0];
    let arena = Arena::new(&mut buffer);
    assert_eq!(arena.capacity(), 0);
    assert!(arena.alloc_aligned(1, 1).is_none());
    assert_eq!(arena.alloc_aligned(0, 1).as_deref().map(<[u8]>::len), Some(0));
}

#[test]
fn align_up_rounds_to_multiple() {
    assert_eq!(align_up(0, 16), Some(0));
    assert_eq!(align_up(73, 16), Some(80));
    assert_eq!(align_up(96, 16), Some(96));
    assert_eq!(align_up(5, 1), Some(5));
    assert_eq!(align_up(usize::MAX, 2), None);
}

#[test]
fn alloc_respects_alignment() {
    let mut buffer = [0u8; 2048];
    let arena = Arena::new(&mut buffer);
    for shift in 0..9 {
        let align = 1usize << shift;
        let region = arena.alloc_aligned(3, align).unwrap();
        assert_eq!(region.as_ptr() as usize % align, 0, "align {align}");
        assert_eq!(region.len(), 3);
    }
}

#[test]
fn default_alignment_is_two_pointers() {
    assert_eq!(DEFAULT_ALIGNMENT, 2 * size_of::<usize>());
    let mut buffer = [0u8; 256];
    let arena = Arena::new(&mut buffer);
    arena.alloc_aligned(1, 1).unwrap();
    let region = arena.alloc(8).unwrap();
    assert_eq!(region.as_ptr() as usize % DEFAULT_ALIGNMENT, 0);
}

#[test]
fn successive_allocs_do_not_overlap() {
    let mut buffer = [0u8; 256];
    let arena = Arena::new(&mut buffer);
    let a = arena.alloc_aligned(10, 4).unwrap();
    let b = arena.alloc_aligned(10, 8).unwrap();
    a.fill(0xAA);
    b.fill(0xBB);

    assert!(a.as_ptr() as usize + a.len() <= b.as_ptr() as usize);
    assert!(a.iter().all(|&byte| byte == 0xAA));
    assert!(b.iter().all(|&byte| byte == 0xBB));
}

#[test]
fn offset_counts_padding() {
    let mut storage = Aligned::<64>::new();
    let arena = Arena::new(&mut storage.0);
    arena.alloc_aligned(3, 1).unwrap();
    assert_eq!(arena.offset(), 3);
    arena.alloc_aligned(4, 8).unwrap();
    assert_eq!(arena.offset(), 12);
    assert_eq!(arena.remaining(), 52);
}

#[test]
fn exhaustion_leaves_offset_unchanged() {
    let mut buffer = [0u8; 64];
    let arena = Arena::new(&mut buffer);
    arena.alloc_aligned(40, 1).unwrap();

    assert!(arena.alloc_aligned(30, 1).is_none());
    assert_eq!(arena.offset(), 40);

    // The rest still fits exactly.
    assert_eq!(arena.alloc_aligned(24, 1).as_deref().map(<[u8]>::len), Some(24));
    assert_eq!(arena.remaining(), 0);
}

#[test]
fn padding_can_exhaust_arena() {
    let mut storage = Aligned::<64>::new();
    let arena = Arena::new(&mut storage.0);
    arena.alloc_aligned(1, 1).unwrap();
    assert!(arena.alloc_aligned(1, 64).is_none());
    assert_eq!(arena.offset(), 1);
}

#[test]
fn oversized_request_fails_without_overflow() {
    let mut buffer = [0u8; 16];
    let arena = Arena::new(&mut buffer);
    assert!(arena.alloc_aligned(usize::MAX, 1).is_none());
    assert!(arena.alloc_slice::<u64>(usize::MAX, 0).is_none());
    assert_eq!(arena.offset(), 0);
}

#[test]
fn reset_restarts_at_base() {
    let mut buffer = [0u8; 64];
    let mut arena = Arena::new(&mut buffer);
    let base = arena.alloc_aligned(8, 1).unwrap().as_ptr() as usize;
    arena.alloc_aligned(56, 1).unwrap();
    assert!(arena.alloc_aligned(1, 1).is_none());

    arena.reset();
    assert_eq!(arena.offset(), 0);
    let again = arena.alloc_aligned(64, 1).unwrap();
    assert_eq!(again.as_ptr() as usize, base);
}

#[test]
fn alloc_zeroes_reused_memory() {
    let mut buffer = [0u8; 32];
    let mut arena = Arena::new(&mut buffer);
    arena.alloc_aligned(32, 1).unwrap().fill(0xFF);

    arena.reset();
    let region = arena.alloc_aligned(32, 1).unwrap();
    assert!(region.iter().all(|&byte| byte == 0));
}

#[test]
#[should_panic(expected = "alignment 3 is not a power of two")]
fn non_power_of_two_alignment_panics() {
    let mut buffer = [0u8; 32];
    let arena = Arena::new(&mut buffer);
    let _ = arena.alloc_aligned(4, 3);
}

#[test]
#[should_panic(expected = "alignment 0 is not a power of two")]
fn zero_alignment_panics() {
    let mut buffer = [0u8; 32];
    let arena = Arena::new(&mut buffer);
    let _ = arena.alloc_aligned(4, 0);
}

#[test]
fn alloc_slice_is_typed_and_filled() {
    let mut buffer = [0u8; 256];
    let arena = Arena::new(&mut buffer);
    arena.alloc_aligned(1, 1).unwrap();

    let words = arena.alloc_slice(5, 7u64).unwrap();
    assert_eq!(words.as_ptr() as usize % align_of::<u64>(), 0);
    assert_eq!(words, &[7; 5]);

    words[2] = 9;
    let flags = arena.alloc_slice(3, true).unwrap();
    assert_eq!(flags, &[true; 3]);
    assert_eq!(words[2], 9);
}

#[test]
fn try_alloc_slice_reports_out_of_memory() {
    let mut buffer = [0u8; 16];
    let arena = Arena::new(&mut buffer);
    assert_eq!(
        arena.try_alloc_slice(100, 0u32).map(|s| s.len()),
        Err(Error::OutOfMemory),
    );
}

#[test]
fn heap_storage_sizes_arrays() {
    let mut buffer = [0u8; 512];
    let arena = Arena::new(&mut buffer);
    let storage = arena.heap_storage(6).unwrap();
    assert_eq!(storage.capacity(), 6);
}

#[test]
fn heap_storage_is_all_or_nothing() {
    // Room for eight words: capacity 4 needs nine, capacity 3 needs seven.
    let mut storage = Aligned::<{ 8 * size_of::<usize>() }>::new();
    let arena = Arena::new(&mut storage.0);
    assert_eq!(arena.heap_storage(4).err(), Some(Error::OutOfMemory));
    assert_eq!(arena.offset(), 0);

    assert!(arena.heap_storage(3).is_ok());
    assert_eq!(arena.offset(), 7 * size_of::<usize>());
}

#[test]
fn heap_storage_rejects_max_capacity() {
    let mut buffer = [0u8; 16];
    let arena = Arena::new(&mut buffer);
    assert_eq!(arena.heap_storage(usize::MAX).err(), Some(Error::OutOfBounds));
}

#[test]
fn fixed_vec_carved_from_arena() {
    let mut buffer = [0u8; 128];
    let arena = Arena::new(&mut buffer);
    let mut list = arena.fixed_vec::<u32>(4).unwrap();
    assert_eq!(list.capacity(), 4);
    list.push(1).unwrap();
    assert_eq!(list.get(0), Ok(1));

    assert_eq!(arena.fixed_vec::<u64>(1000).err(), Some(Error::OutOfMemory));
}

proptest! {
    #[test]
    fn regions_are_aligned_and_disjoint(
        requests in proptest::collection::vec((0usize..64, 0u32..7), 1..40),
    ) {
        let mut buffer = vec![0u8; 1024];
        let arena = Arena::new(&mut buffer);
        let mut spans: Vec<(usize, usize)> = Vec::new();
        for (size, shift) in requests {
            let align = 1usize << shift;
            let before = arena.offset();
            match arena.alloc_aligned(size, align) {
                Some(region) => {
                    let start = region.as_ptr() as usize;
                    prop_assert_eq!(start % align, 0);
                    prop_assert_eq!(region.len(), size);
                    spans.push((start, start + size));
                }
                None => prop_assert_eq!(arena.offset(), before),
            }
            prop_assert!(arena.offset() <= arena.capacity());
        }
        for (i, a) in spans.iter().enumerate() {
            for b in &spans[i + 1..] {
                prop_assert!(a.1 <= b.0 || b.1 <= a.0, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn offset_never_decreases(
        sizes in proptest::collection::vec(0usize..200, 1..20),
    ) {
        let mut buffer = vec![0u8; 512];
        let arena = Arena::new(&mut buffer);
        let mut last = 0;
        for size in sizes {
            let _ = arena.alloc(size);
            prop_assert!(arena.offset() >= last);
            last = arena.offset();
        }
    }
}
