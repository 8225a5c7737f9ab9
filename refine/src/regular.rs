//! Regular equivalence.
//!
//! A partition is a regular equivalence when any two nodes of the same class have ties into the
//! same set of classes. The maximal regular equivalence refining a given partition is computed by
//! repeatedly splitting classes relative to the current partition until nothing changes.
//!
//! The *relative* variants perform a single pass against a fixed reference partition instead:
//! two nodes stay together iff their ties lead into the same set of reference classes.

use rolequiv_network::PositionView;

use crate::{
    canonical::{check_partition, class_count, universal},
    compare::{Compatibility, TieOrder},
    engine::{
        counting_universe, existence_universe, neighbor_pass, ordered_neighbor_pass,
        pairwise_pass, refine_to_fixpoint, OrderedScratch,
    },
    state::{RefinementState, SplitMode},
    PartitionError,
};

/// Returns the maximal regular equivalence.
pub fn regular_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    regular_fixpoint(view, &universal(view.node_count()))
}

/// Returns the maximal regular equivalence refining `to_refine`.
pub fn refining_regular_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    check_partition(to_refine, view.node_count())?;
    Ok(regular_fixpoint(view, to_refine))
}

fn regular_fixpoint<V: PositionView>(view: &V, to_refine: &[usize]) -> Vec<usize> {
    let n = view.node_count();
    let mut state = RefinementState::from_partition(to_refine, existence_universe(n));
    refine_to_fixpoint(&mut state, |state, snapshot| {
        let universe = state.universe();
        neighbor_pass(state, view, snapshot, universe, SplitMode::Existence)
    });
    state.into_partition()
}

/// Returns the coarsest partition in which nodes of a class have ties into the same set of
/// classes of `reference`.
pub fn relative_regular_equivalence<V: PositionView>(
    view: &V,
    reference: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    refining_relative_regular_equivalence(view, reference, &universal(view.node_count()))
}

/// Returns the coarsest partition refining `to_refine` in which nodes of a class have ties into
/// the same set of classes of `reference`.
pub fn refining_relative_regular_equivalence<V: PositionView>(
    view: &V,
    reference: &[usize],
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(reference, n)?;
    check_partition(to_refine, n)?;
    Ok(relative_pass(view, reference, to_refine, SplitMode::Existence))
}

/// Single pass of [`neighbor_pass`] with validated arguments.
pub(crate) fn relative_pass<V: PositionView>(
    view: &V,
    reference: &[usize],
    to_refine: &[usize],
    mode: SplitMode,
) -> Vec<usize> {
    let n = view.node_count();
    let universe = match mode {
        SplitMode::Existence => existence_universe(n),
        SplitMode::Counting => counting_universe(n, view.tie_count()),
    };
    let mut state = RefinementState::from_partition(to_refine, universe);
    neighbor_pass(
        &mut state,
        view,
        reference,
        class_count(reference),
        mode,
    );
    log::trace!("{mode:?} pass: {} classes", state.class_count());
    state.into_partition()
}

/// Returns the maximal regular equivalence for ordered tie labels.
///
/// Nodes of a class must reach the same classes, and for each such class the largest label of
/// their ties into it must be equivalent. This is mutual domination where a tie is dominated by
/// any tie with a label at least as large.
pub fn regular_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    order: &O,
) -> Vec<usize> {
    ordered_fixpoint(view, &universal(view.node_count()), order)
}

/// Returns the maximal regular equivalence for ordered tie labels refining `to_refine`.
///
/// See [`regular_equivalence_ordered`].
pub fn refining_regular_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    to_refine: &[usize],
    order: &O,
) -> Result<Vec<usize>, PartitionError> {
    check_partition(to_refine, view.node_count())?;
    Ok(ordered_fixpoint(view, to_refine, order))
}

fn ordered_fixpoint<V: PositionView, O: TieOrder>(
    view: &V,
    to_refine: &[usize],
    order: &O,
) -> Vec<usize> {
    let n = view.node_count();
    let mut state = RefinementState::from_partition(to_refine, existence_universe(n));
    let mut scratch = OrderedScratch::new(n);
    refine_to_fixpoint(&mut state, |state, snapshot| {
        let universe = state.universe();
        ordered_neighbor_pass(
            state,
            view,
            snapshot,
            universe,
            SplitMode::Existence,
            order,
            &mut scratch,
        )
    });
    state.into_partition()
}

/// Returns the coarsest partition refining `to_refine` in which nodes of a class reach the same
/// classes of `reference` with equivalent maximal tie labels.
pub fn refining_relative_regular_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    reference: &[usize],
    to_refine: &[usize],
    order: &O,
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(reference, n)?;
    check_partition(to_refine, n)?;
    Ok(ordered_relative_pass(
        view,
        reference,
        to_refine,
        SplitMode::Existence,
        order,
    ))
}

/// Single pass of [`ordered_neighbor_pass`] with validated arguments.
pub(crate) fn ordered_relative_pass<V: PositionView, O: TieOrder>(
    view: &V,
    reference: &[usize],
    to_refine: &[usize],
    mode: SplitMode,
    order: &O,
) -> Vec<usize> {
    let n = view.node_count();
    let universe = match mode {
        SplitMode::Existence => existence_universe(n),
        SplitMode::Counting => counting_universe(n, view.tie_count()),
    };
    let mut state = RefinementState::from_partition(to_refine, universe);
    let mut scratch = OrderedScratch::new(n);
    ordered_neighbor_pass(
        &mut state,
        view,
        reference,
        class_count(reference),
        mode,
        order,
        &mut scratch,
    );
    log::trace!("ordered {mode:?} pass: {} classes", state.class_count());
    state.into_partition()
}

/// Returns the maximal regular equivalence refining `to_refine` under an arbitrary tie
/// compatibility.
///
/// Node `i` is dominated by node `j` when every tie of `i` is dominated by a tie of `j` into the
/// same class. Classes are split into groups of mutually dominating nodes by comparing each node
/// against one representative per group, which takes `O(n * m)`-style time per round but works
/// for partial orders where the label-sorting approach of [`refining_regular_equivalence_ordered`]
/// does not apply.
pub fn refining_regular_equivalence_dominated<V: PositionView, C: Compatibility>(
    view: &V,
    to_refine: &[usize],
    compat: &C,
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    let mut state = RefinementState::from_partition(to_refine, existence_universe(n));
    refine_to_fixpoint(&mut state, |state, snapshot| {
        pairwise_pass(state, snapshot, |classes, a, b| {
            regularly_dominated(view, classes, compat, a, b)
                && regularly_dominated(view, classes, compat, b, a)
        })
    });
    Ok(state.into_partition())
}

/// Returns `true` if every tie of `node` is dominated by a tie of `by` into the same class.
pub fn regularly_dominated<V: PositionView, C: Compatibility>(
    view: &V,
    classes: &[usize],
    compat: &C,
    node: usize,
    by: usize,
) -> bool {
    view.ties(node).all(|tie| {
        let class = classes[view.opposite(node, tie)];
        view.ties(by)
            .any(|other| classes[view.opposite(by, other)] == class && compat.compatible(tie, other))
    })
}

#[cfg(test)]
mod tests {
    use rolequiv_network::Network;

    use super::*;
    use crate::compare::{by_label, Unlabeled};

    #[test]
    fn chain_is_discrete() {
        let network = Network::new(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(regular_equivalence(&network.outgoing()), [0, 1, 2, 3]);
    }

    #[test]
    fn cycle_is_universal() {
        let network = Network::new(5, (0..5).map(|i| (i, (i + 1) % 5)));
        assert_eq!(regular_equivalence(&network.outgoing()), [0; 5]);
    }

    #[test]
    fn star_center_and_leaves() {
        let network = Network::new(5, (1..5).map(|i| (0, i)));
        assert_eq!(regular_equivalence(&network.outgoing()), [0, 1, 1, 1, 1]);

        // With ties in both directions every node has a tie into the single class.
        let network = Network::new(5, (1..5).flat_map(|i| [(0, i), (i, 0)]));
        assert_eq!(regular_equivalence(&network.outgoing()), [0; 5]);
    }

    #[test]
    fn relative_is_one_step() {
        let network = Network::new(4, [(0, 1), (1, 2), (2, 3)]);
        let view = network.outgoing();
        assert_eq!(
            relative_regular_equivalence(&view, &[0, 0, 0, 0]).unwrap(),
            [0, 0, 0, 1]
        );
        assert_eq!(
            relative_regular_equivalence(&view, &[0, 0, 0, 1]).unwrap(),
            [0, 0, 1, 2]
        );
    }

    #[test]
    fn ordered_uses_maximum_label() {
        // 0 and 1 both reach class {2, 3}; 0 with labels 1 and 5, 1 with label 5 only.
        let network = Network::new(4, [(0, 2), (0, 3), (1, 3)]);
        let labels = [1, 5, 5];
        let view = network.outgoing();
        let result = regular_equivalence_ordered(&view, &by_label(&labels));
        assert_eq!(result, [0, 0, 1, 1]);

        let labels = [1, 5, 4];
        let result = regular_equivalence_ordered(&view, &by_label(&labels));
        assert_eq!(result, [0, 1, 2, 2]);
    }

    #[test]
    fn unlabeled_order_matches_unordered() {
        let network = Network::new(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (5, 5), (0, 3)]);
        let view = network.incoming();
        assert_eq!(
            regular_equivalence_ordered(&view, &Unlabeled),
            regular_equivalence(&view)
        );
        assert_eq!(
            refining_regular_equivalence_dominated(&view, &[0; 6], &Unlabeled).unwrap(),
            regular_equivalence(&view)
        );
    }

    #[test]
    fn rejects_malformed_partitions() {
        let network = Network::new(3, [(0, 1)]);
        let view = network.outgoing();
        assert!(matches!(
            refining_regular_equivalence(&view, &[0, 2, 1]),
            Err(PartitionError::NotCanonical { index: 1, .. })
        ));
        assert!(matches!(
            relative_regular_equivalence(&view, &[0, 0]),
            Err(PartitionError::LengthMismatch { expected: 3, found: 2 })
        ));
    }
}
