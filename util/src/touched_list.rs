//! A reusable fixed capacity list of integers.

/// A reusable append-only list of integers with a capacity fixed at construction.
///
/// The list never reallocates. Callers size it so that it cannot overflow (e.g. one entry per
/// color of a refinement); overflowing is a bug and panics.
#[derive(Clone, Debug, Default)]
pub struct TouchedList {
    capacity: usize,
    items: Vec<usize>,
}

impl TouchedList {
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry.
    #[inline]
    pub fn push(&mut self, value: usize) {
        assert!(
            self.items.len() < self.capacity,
            "touched list overflow at {} entries",
            self.items.len()
        );
        self.items.push(value)
    }

    /// Removes all entries, keeping the storage.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear()
    }

    /// Returns the entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.items[index]
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all entries, yielding them in insertion order.
    pub fn drain(&mut self) -> impl Iterator<Item = usize> + '_ {
        self.items.drain(..)
    }
}
