//! A `UnionFind` maintains a partition of `0..n` under merges of classes.

#[cfg(test)]
#[path = "tests/test_union_find.rs"]
mod test_union_find;

/// Disjoint sets over the dense universe `0..n` with path compression and union by rank.
///
/// Every element starts in its own singleton class. [`find`][Self::find] returns the current
/// representative of an element's class, [`union`][Self::union] merges two classes.
#[derive(Clone, Debug, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    group_count: usize,
}

impl UnionFind {
    /// Creates a union-find structure with `n` singleton classes.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            group_count: n,
        }
    }

    /// Returns the size of the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of classes.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Returns the representative of `element`'s class.
    ///
    /// Compresses the path from `element` to its representative. This is iterative, so long
    /// chains cannot exhaust the stack.
    pub fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merges the classes of `a` and `b`.
    ///
    /// Returns `false` if they already were in the same class.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut a = self.find(a);
        let mut b = self.find(b);
        if a == b {
            return false;
        }
        if self.rank[a] < self.rank[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        if self.rank[a] == self.rank[b] {
            self.rank[a] += 1;
        }
        self.group_count -= 1;
        true
    }

    /// Returns `true` if `a` and `b` are in the same class.
    pub fn same_class(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
