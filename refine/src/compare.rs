//! Comparison strategies for tie labels.
//!
//! Strategies are applied to tie indices, so labels live wherever the caller keeps them. There
//! are three strategies of decreasing strength:
//!
//! * [`Total`] wraps a total weak order and implements [`TieOrder`].
//! * [`Partial`] wraps a partial order and implements [`PartialTieOrder`].
//! * [`Compatible`] wraps an arbitrary predicate and only implements [`Compatibility`].
//!
//! Every [`TieOrder`] is a [`PartialTieOrder`] and every [`PartialTieOrder`] is a
//! [`Compatibility`]. Entry points ask for the weakest trait under which their result is a well
//! defined equivalence. Entry points accepting a [`Compatibility`] treat the predicate as a
//! relation only: if it is not a preorder, mutual domination need not be transitive and the
//! resulting partition depends on the order in which nodes are compared.

use std::cmp::Ordering;

/// Decides whether one tie can stand in for another.
pub trait Compatibility {
    /// Returns `true` if tie `a` is dominated by tie `b`, i.e. `b` can take the place of `a`.
    fn compatible(&self, a: usize, b: usize) -> bool;
}

/// A partial order on ties.
pub trait PartialTieOrder: Compatibility {
    /// Compares two ties, returning `None` if they are incomparable.
    fn partial_compare(&self, a: usize, b: usize) -> Option<Ordering>;
}

/// A total weak order on ties.
pub trait TieOrder: PartialTieOrder {
    /// Compares two ties.
    fn compare(&self, a: usize, b: usize) -> Ordering;
}

/// A total weak order given by a comparison function on tie indices.
#[derive(Clone, Copy, Debug)]
pub struct Total<F>(pub F);

/// A partial order given by a comparison function on tie indices.
#[derive(Clone, Copy, Debug)]
pub struct Partial<F>(pub F);

/// A compatibility predicate on tie indices.
#[derive(Clone, Copy, Debug)]
pub struct Compatible<F>(pub F);

/// The order where all ties are equivalent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unlabeled;

impl<F: Fn(usize, usize) -> Ordering> TieOrder for Total<F> {
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F: Fn(usize, usize) -> Ordering> PartialTieOrder for Total<F> {
    #[inline]
    fn partial_compare(&self, a: usize, b: usize) -> Option<Ordering> {
        Some((self.0)(a, b))
    }
}

impl<F: Fn(usize, usize) -> Ordering> Compatibility for Total<F> {
    #[inline]
    fn compatible(&self, a: usize, b: usize) -> bool {
        (self.0)(a, b).is_le()
    }
}

impl<F: Fn(usize, usize) -> Option<Ordering>> PartialTieOrder for Partial<F> {
    #[inline]
    fn partial_compare(&self, a: usize, b: usize) -> Option<Ordering> {
        (self.0)(a, b)
    }
}

impl<F: Fn(usize, usize) -> Option<Ordering>> Compatibility for Partial<F> {
    #[inline]
    fn compatible(&self, a: usize, b: usize) -> bool {
        matches!((self.0)(a, b), Some(Ordering::Less | Ordering::Equal))
    }
}

impl<F: Fn(usize, usize) -> bool> Compatibility for Compatible<F> {
    #[inline]
    fn compatible(&self, a: usize, b: usize) -> bool {
        (self.0)(a, b)
    }
}

impl TieOrder for Unlabeled {
    fn compare(&self, _a: usize, _b: usize) -> Ordering {
        Ordering::Equal
    }
}

impl PartialTieOrder for Unlabeled {
    fn partial_compare(&self, _a: usize, _b: usize) -> Option<Ordering> {
        Some(Ordering::Equal)
    }
}

impl Compatibility for Unlabeled {
    fn compatible(&self, _a: usize, _b: usize) -> bool {
        true
    }
}

/// Orders ties by the label stored for them in `labels`.
pub fn by_label<K: Ord>(labels: &[K]) -> Total<impl Fn(usize, usize) -> Ordering + '_> {
    Total(move |a: usize, b: usize| labels[a].cmp(&labels[b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies() {
        let labels = [3, 1, 3];
        let order = by_label(&labels);
        assert_eq!(order.compare(0, 1), Ordering::Greater);
        assert!(order.compatible(1, 0));
        assert!(order.compatible(0, 2));
        assert!(!order.compatible(0, 1));

        let values = [2, 3, 4];
        let divides = Partial(|a: usize, b: usize| {
            let (a, b) = (values[a], values[b]);
            if a == b {
                Some(Ordering::Equal)
            } else if b % a == 0 {
                Some(Ordering::Less)
            } else if a % b == 0 {
                Some(Ordering::Greater)
            } else {
                None
            }
        });
        assert!(divides.compatible(0, 2));
        assert!(!divides.compatible(2, 0));
        assert!(!divides.compatible(1, 2));
        assert_eq!(divides.partial_compare(0, 1), None);

        let never = Compatible(|_: usize, _: usize| false);
        assert!(!never.compatible(0, 0));
        assert!(Unlabeled.compatible(0, 1));
    }
}
