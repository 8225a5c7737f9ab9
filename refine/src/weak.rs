//! Weak and weak exact equivalence.
//!
//! These are the coarsest notions: a node's position is described only by its own ties, without
//! looking at where they lead. Weak equivalence separates nodes with ties from nodes without (or,
//! with ordered labels, by the largest label of a node's ties). Weak exact equivalence compares the
//! number of ties (or, with ordered labels, the multiset of labels up to equivalence).
//!
//! Both are a single refinement pass relative to the universal partition.

use rolequiv_network::PositionView;

use crate::{
    canonical::{check_partition, universal},
    compare::TieOrder,
    regular::{ordered_relative_pass, relative_pass},
    state::SplitMode,
    PartitionError,
};

/// Returns the weak equivalence, separating nodes with ties from nodes without.
pub fn weak_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    let all = universal(view.node_count());
    relative_pass(view, &all, &all, SplitMode::Existence)
}

/// Returns the weak equivalence refining `to_refine`.
pub fn refining_weak_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(relative_pass(view, &universal(n), to_refine, SplitMode::Existence))
}

/// Returns the weak equivalence for ordered tie labels.
///
/// Nodes are equivalent when they have no ties or when the largest labels of their ties are
/// equivalent.
pub fn weak_equivalence_ordered<V: PositionView, O: TieOrder>(view: &V, order: &O) -> Vec<usize> {
    let all = universal(view.node_count());
    ordered_relative_pass(view, &all, &all, SplitMode::Existence, order)
}

/// Returns the weak equivalence for ordered tie labels refining `to_refine`.
pub fn refining_weak_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    to_refine: &[usize],
    order: &O,
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(ordered_relative_pass(
        view,
        &universal(n),
        to_refine,
        SplitMode::Existence,
        order,
    ))
}

/// Returns the weak exact equivalence, grouping nodes by their number of ties.
pub fn weak_exact_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    let all = universal(view.node_count());
    relative_pass(view, &all, &all, SplitMode::Counting)
}

/// Returns the weak exact equivalence refining `to_refine`.
pub fn refining_weak_exact_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(relative_pass(view, &universal(n), to_refine, SplitMode::Counting))
}

/// Returns the weak exact equivalence for ordered tie labels.
///
/// Nodes are equivalent when their ties can be paired up such that paired ties have equivalent
/// labels.
pub fn weak_exact_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    order: &O,
) -> Vec<usize> {
    let all = universal(view.node_count());
    ordered_relative_pass(view, &all, &all, SplitMode::Counting, order)
}

/// Returns the weak exact equivalence for ordered tie labels refining `to_refine`.
pub fn refining_weak_exact_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    to_refine: &[usize],
    order: &O,
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(ordered_relative_pass(
        view,
        &universal(n),
        to_refine,
        SplitMode::Counting,
        order,
    ))
}
