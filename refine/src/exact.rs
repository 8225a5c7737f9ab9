//! Exact equivalence.
//!
//! Exact equivalence strengthens regular equivalence by counting: nodes of the same class need
//! the same number of ties into each class. Equivalently, the ties of two class mates can be
//! matched one to one such that matched ties lead into the same class. The maximal exact
//! equivalence is the coarsest equitable partition.
//!
//! Without labels, or with totally ordered labels, the matching condition reduces to comparing
//! counts per class (and per label), which the block refinement handles directly. For partial
//! orders and arbitrary compatibilities a bipartite matching has to be found for each compared
//! pair, see [`refining_exact_equivalence_matched`].

use rolequiv_network::PositionView;

use crate::{
    canonical::{check_partition, universal},
    compare::{Compatibility, TieOrder},
    engine::{
        counting_universe, existence_universe, neighbor_pass, ordered_neighbor_pass,
        pairwise_pass, refine_to_fixpoint, OrderedScratch,
    },
    oracle::{BipartiteGraph, MatchingOracle},
    regular::{ordered_relative_pass, relative_pass},
    state::{RefinementState, SplitMode},
    PartitionError,
};

/// Returns the maximal exact equivalence.
pub fn exact_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    exact_fixpoint(view, &universal(view.node_count()))
}

/// Returns the maximal exact equivalence refining `to_refine`.
pub fn refining_exact_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    check_partition(to_refine, view.node_count())?;
    Ok(exact_fixpoint(view, to_refine))
}

fn exact_fixpoint<V: PositionView>(view: &V, to_refine: &[usize]) -> Vec<usize> {
    let n = view.node_count();
    let mut state =
        RefinementState::from_partition(to_refine, counting_universe(n, view.tie_count()));
    refine_to_fixpoint(&mut state, |state, snapshot| {
        let universe = state.universe();
        neighbor_pass(state, view, snapshot, universe, SplitMode::Counting)
    });
    state.into_partition()
}

/// Returns the coarsest partition in which nodes of a class have the same number of ties into
/// each class of `reference`.
pub fn relative_exact_equivalence<V: PositionView>(
    view: &V,
    reference: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    refining_relative_exact_equivalence(view, reference, &universal(view.node_count()))
}

/// Returns the coarsest partition refining `to_refine` in which nodes of a class have the same
/// number of ties into each class of `reference`.
pub fn refining_relative_exact_equivalence<V: PositionView>(
    view: &V,
    reference: &[usize],
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(reference, n)?;
    check_partition(to_refine, n)?;
    Ok(relative_pass(view, reference, to_refine, SplitMode::Counting))
}

/// Returns the maximal exact equivalence for ordered tie labels.
///
/// Nodes of a class need, for each class, the same number of ties into it with each label up to
/// equivalence of labels.
pub fn exact_equivalence_ordered<V: PositionView, O: TieOrder>(view: &V, order: &O) -> Vec<usize> {
    ordered_fixpoint(view, &universal(view.node_count()), order)
}

/// Returns the maximal exact equivalence for ordered tie labels refining `to_refine`.
///
/// See [`exact_equivalence_ordered`].
pub fn refining_exact_equivalence_ordered<V: PositionView, O: TieOrder>(
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
    let mut state =
        RefinementState::from_partition(to_refine, counting_universe(n, view.tie_count()));
    let mut scratch = OrderedScratch::new(n);
    refine_to_fixpoint(&mut state, |state, snapshot| {
        let universe = state.universe();
        ordered_neighbor_pass(
            state,
            view,
            snapshot,
            universe,
            SplitMode::Counting,
            order,
            &mut scratch,
        )
    });
    state.into_partition()
}

/// Returns the coarsest partition refining `to_refine` in which nodes of a class have the same
/// number of ties with each label into each class of `reference`.
pub fn refining_relative_exact_equivalence_ordered<V: PositionView, O: TieOrder>(
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
        SplitMode::Counting,
        order,
    ))
}

/// Returns the maximal exact equivalence refining `to_refine` under an arbitrary tie
/// compatibility.
///
/// Node `i` is dominated by node `j` when the ties of `i` can be matched injectively to ties of
/// `j` into the same classes such that each tie is dominated by its partner. Matchings are
/// delegated to `oracle`. Classes are split into groups of mutually dominating nodes by comparing
/// each node against one representative per group.
pub fn refining_exact_equivalence_matched<V, C, M>(
    view: &V,
    to_refine: &[usize],
    compat: &C,
    oracle: &mut M,
) -> Result<Vec<usize>, PartitionError>
where
    V: PositionView,
    C: Compatibility,
    M: MatchingOracle,
{
    let n = view.node_count();
    check_partition(to_refine, n)?;
    // Pairwise splitting only ever creates non-empty classes.
    let mut state = RefinementState::from_partition(to_refine, existence_universe(n));
    let mut matcher = ExactMatcher::default();
    refine_to_fixpoint(&mut state, |state, snapshot| {
        pairwise_pass(state, snapshot, |classes, a, b| {
            view.degree(a) == view.degree(b)
                && matcher.dominated(view, classes, compat, oracle, a, b)
                && matcher.dominated(view, classes, compat, oracle, b, a)
        })
    });
    Ok(state.into_partition())
}

/// Buffers for exact domination tests.
#[derive(Default)]
struct ExactMatcher {
    left: Vec<usize>,
    right: Vec<usize>,
    graph: BipartiteGraph,
}

impl ExactMatcher {
    fn dominated<V: PositionView, C: Compatibility, M: MatchingOracle>(
        &mut self,
        view: &V,
        classes: &[usize],
        compat: &C,
        oracle: &mut M,
        node: usize,
        by: usize,
    ) -> bool {
        self.left.clear();
        self.left.extend(view.ties(node));
        self.right.clear();
        self.right.extend(view.ties(by));

        self.graph.reset(self.left.len(), self.right.len());
        for (a, &tie) in self.left.iter().enumerate() {
            let class = classes[view.opposite(node, tie)];
            for (b, &other) in self.right.iter().enumerate() {
                if classes[view.opposite(by, other)] == class && compat.compatible(tie, other) {
                    self.graph.add_edge(a, b);
                }
            }
        }
        oracle.saturates_left(&self.graph)
    }
}

/// Returns `true` if the ties of `node` can be matched injectively to ties of `by` into the same
/// classes, each tie dominated by its partner.
pub fn exactly_dominated<V, C, M>(
    view: &V,
    classes: &[usize],
    compat: &C,
    oracle: &mut M,
    node: usize,
    by: usize,
) -> bool
where
    V: PositionView,
    C: Compatibility,
    M: MatchingOracle,
{
    ExactMatcher::default().dominated(view, classes, compat, oracle, node, by)
}
