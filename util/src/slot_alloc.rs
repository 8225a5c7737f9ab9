//! A fixed capacity pool of dense integer ids.

/// A fixed capacity pool of dense integer ids in `0..capacity`.
///
/// Only a high-water mark of never used ids and a stack of returned ids are maintained, so both
/// [`alloc`][Self::alloc] and [`free`][Self::free] are `O(1)`. Returned ids are reused before any
/// id above the high-water mark is handed out.
///
/// Running out of ids is treated as a bug in the caller's capacity computation and panics.
#[derive(Clone, Debug, Default)]
pub struct SlotAlloc {
    capacity: usize,
    high_water: usize,
    returned: Vec<usize>,
    #[cfg(debug_assertions)]
    live: Vec<bool>,
}

impl SlotAlloc {
    /// Creates an allocator for the ids `0..capacity` with all ids free.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            high_water: 0,
            returned: Vec::with_capacity(capacity),
            #[cfg(debug_assertions)]
            live: vec![false; capacity],
        }
    }

    /// Creates an allocator where the ids `0..count` are already live.
    pub fn with_live_prefix(capacity: usize, count: usize) -> Self {
        assert!(count <= capacity, "live prefix {count} exceeds capacity {capacity}");
        let mut alloc = Self::new(capacity);
        alloc.high_water = count;
        #[cfg(debug_assertions)]
        alloc.live[..count].fill(true);
        alloc
    }

    /// Returns the number of ids managed by this allocator.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently live ids.
    pub fn live_count(&self) -> usize {
        self.high_water - self.returned.len()
    }

    /// Marks a free id as live and returns it.
    ///
    /// # Panics
    ///
    /// Panics when all ids are live.
    #[inline]
    pub fn alloc(&mut self) -> usize {
        let id = if let Some(id) = self.returned.pop() {
            id
        } else {
            assert!(
                self.high_water < self.capacity,
                "slot allocator exhausted all {} ids",
                self.capacity
            );
            self.high_water += 1;
            self.high_water - 1
        };
        #[cfg(debug_assertions)]
        {
            debug_assert!(!self.live[id]);
            self.live[id] = true;
        }
        id
    }

    /// Returns a live id to the pool.
    ///
    /// Freeing an id that is not live is a caller bug. It is detected in debug builds only.
    #[inline]
    pub fn free(&mut self, id: usize) {
        debug_assert!(id < self.high_water, "freeing never allocated id {id}");
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.live[id], "freeing id {id} that is not live");
            self.live[id] = false;
        }
        self.returned.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_returned_ids_first() {
        let mut alloc = SlotAlloc::new(4);
        assert_eq!(alloc.alloc(), 0);
        assert_eq!(alloc.alloc(), 1);
        assert_eq!(alloc.alloc(), 2);
        alloc.free(1);
        assert_eq!(alloc.live_count(), 2);
        assert_eq!(alloc.alloc(), 1);
        assert_eq!(alloc.alloc(), 3);
        assert_eq!(alloc.live_count(), 4);
    }

    #[test]
    fn live_prefix() {
        let mut alloc = SlotAlloc::with_live_prefix(5, 3);
        assert_eq!(alloc.live_count(), 3);
        assert_eq!(alloc.alloc(), 3);
        alloc.free(0);
        assert_eq!(alloc.alloc(), 0);
        assert_eq!(alloc.alloc(), 4);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn exhaustion_panics() {
        let mut alloc = SlotAlloc::new(2);
        alloc.alloc();
        alloc.alloc();
        alloc.alloc();
    }
}
