//! Strong and weak structural equivalence.
//!
//! Structural equivalences compare ties by the identity of the node they lead to rather than by
//! its class. Two nodes are strongly structurally equivalent when their ties lead to exactly the
//! same nodes. This needs no fixpoint: a single pass relative to the discrete partition suffices.
//!
//! Weak structural equivalence additionally forgives ties between the compared nodes themselves.
//! It is computed in two passes. The first groups nodes whose ties lead to the same nodes other
//! than themselves and who agree on having a loop. Nodes left alone by that grouping get a second
//! chance: two of them are merged when their targets including themselves coincide, which
//! requires them to be tied to each other in both directions.
//!
//! The `_dominated` variants build a domination graph inside each class of the partition to
//! refine and return its strongly connected components.

use rolequiv_network::PositionView;

use crate::{
    canonical::{check_partition, class_count, discrete, normalize, universal},
    compare::{Compatibility, TieOrder},
    engine::existence_universe,
    oracle::SccOracle,
    regular::{ordered_relative_pass, relative_pass},
    state::{BlockOrder, RefinementState, SplitMode},
    PartitionError,
};

/// Returns the strong structural equivalence.
pub fn strong_structural_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    let n = view.node_count();
    relative_pass(view, &discrete(n), &universal(n), SplitMode::Existence)
}

/// Returns the strong structural equivalence refining `to_refine`.
pub fn refining_strong_structural_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(relative_pass(view, &discrete(n), to_refine, SplitMode::Existence))
}

/// Returns the strong structural equivalence for ordered tie labels refining `to_refine`.
///
/// Nodes of a class have ties to the same nodes, and for each such node the largest labels of
/// their ties to it are equivalent.
pub fn refining_strong_structural_equivalence_ordered<V: PositionView, O: TieOrder>(
    view: &V,
    to_refine: &[usize],
    order: &O,
) -> Result<Vec<usize>, PartitionError> {
    let n = view.node_count();
    check_partition(to_refine, n)?;
    Ok(ordered_relative_pass(
        view,
        &discrete(n),
        to_refine,
        SplitMode::Existence,
        order,
    ))
}

/// Returns the weak structural equivalence.
pub fn weak_structural_equivalence<V: PositionView>(view: &V) -> Vec<usize> {
    weak_structural(view, &universal(view.node_count()))
}

/// Returns the weak structural equivalence refining `to_refine`.
pub fn refining_weak_structural_equivalence<V: PositionView>(
    view: &V,
    to_refine: &[usize],
) -> Result<Vec<usize>, PartitionError> {
    check_partition(to_refine, view.node_count())?;
    Ok(weak_structural(view, to_refine))
}

fn has_loop<V: PositionView>(view: &V, node: usize) -> bool {
    view.ties(node).any(|tie| view.opposite(node, tie) == node)
}

fn weak_structural<V: PositionView>(view: &V, to_refine: &[usize]) -> Vec<usize> {
    let n = view.node_count();

    let mut base: Vec<usize> = (0..n)
        .map(|node| 2 * to_refine[node] + has_loop(view, node) as usize)
        .collect();
    normalize(&mut base);

    let mut state = RefinementState::from_partition(&base, existence_universe(n));
    for node in 0..n {
        for tie in view.inverse_ties(node) {
            let owner = view.opposite(node, tie);
            if owner != node {
                state.split(owner, SplitMode::Existence);
            }
        }
        state.finish_block();
    }
    let grouped = state.into_partition();

    let mut sizes = vec![0usize; class_count(&grouped)];
    for &class in &grouped {
        sizes[class] += 1;
    }
    let alone: Vec<bool> = grouped.iter().map(|&class| sizes[class] == 1).collect();

    // Grouped nodes keep their classes, nodes left alone restart from their base class.
    let offset = class_count(&base);
    let mut seed: Vec<usize> = (0..n)
        .map(|node| {
            if alone[node] {
                base[node]
            } else {
                offset + grouped[node]
            }
        })
        .collect();
    normalize(&mut seed);

    let mut state = RefinementState::from_partition(&seed, existence_universe(n));
    for node in 0..n {
        if alone[node] {
            state.split(node, SplitMode::Existence);
        }
        for tie in view.inverse_ties(node) {
            let owner = view.opposite(node, tie);
            if owner != node && alone[owner] {
                state.split(owner, SplitMode::Existence);
            }
        }
        state.finish_block();
    }
    let result = state.into_partition();
    log::trace!(
        "weak structural equivalence: {} grouped, {} classes",
        alone.iter().filter(|&&alone| !alone).count(),
        class_count(&result)
    );
    result
}

/// Returns the strong structural equivalence under a tie compatibility, refining `to_refine`.
///
/// Node `i` is dominated by node `j` when every tie of `i` is dominated by a tie of `j` to the same
/// node. Nodes are equivalent when they are in the same strongly connected component of the
/// domination graph restricted to the classes of `to_refine`.
pub fn refining_strong_structural_equivalence_dominated<V, C, S>(
    view: &V,
    to_refine: &[usize],
    compat: &C,
    scc: &mut S,
) -> Result<Vec<usize>, PartitionError>
where
    V: PositionView,
    C: Compatibility,
    S: SccOracle,
{
    check_partition(to_refine, view.node_count())?;
    Ok(domination_components(view, to_refine, compat, scc, false))
}

/// Returns the weak structural equivalence under a tie compatibility, refining `to_refine`.
///
/// Like [`refining_strong_structural_equivalence_dominated`], but when testing whether `i` is
/// dominated by `j`, the targets of `i`'s ties are transposed: a tie of `i` to `i` has to be
/// matched by a tie of `j` to `j` and a tie of `i` to `j` by a tie of `j` to `i`. Mutual
/// domination is not transitive under this transposition. The result groups nodes linked by
/// chains of mutual domination.
pub fn refining_weak_structural_equivalence_dominated<V, C, S>(
    view: &V,
    to_refine: &[usize],
    compat: &C,
    scc: &mut S,
) -> Result<Vec<usize>, PartitionError>
where
    V: PositionView,
    C: Compatibility,
    S: SccOracle,
{
    check_partition(to_refine, view.node_count())?;
    Ok(domination_components(view, to_refine, compat, scc, true))
}

/// Returns `true` if every tie of `node` is dominated by a tie of `by` to the same node.
///
/// With `transpose`, `node` and `by` swap places in the targets of `node`'s ties.
pub fn structurally_dominated<V: PositionView, C: Compatibility>(
    view: &V,
    compat: &C,
    transpose: bool,
    node: usize,
    by: usize,
) -> bool {
    view.ties(node).all(|tie| {
        let mut target = view.opposite(node, tie);
        if transpose {
            if target == node {
                target = by;
            } else if target == by {
                target = node;
            }
        }
        view.ties(by)
            .any(|other| view.opposite(by, other) == target && compat.compatible(tie, other))
    })
}

fn domination_components<V, C, S>(
    view: &V,
    to_refine: &[usize],
    compat: &C,
    scc: &mut S,
    transpose: bool,
) -> Vec<usize>
where
    V: PositionView,
    C: Compatibility,
    S: SccOracle,
{
    let n = view.node_count();
    let order = BlockOrder::new(to_refine, class_count(to_refine));
    let mut edges = vec![];
    let mut candidates = vec![];
    let mut seen = vec![usize::MAX; n];

    for block in order.blocks() {
        for &node in block {
            // Any dominating node has a tie to the (possibly transposed) target of the first tie.
            candidates.clear();
            match view.ties(node).next().map(|tie| view.opposite(node, tie)) {
                Some(target) if !(transpose && target == node) => {
                    candidates.extend(
                        view.inverse_ties(target)
                            .map(|tie| view.opposite(target, tie)),
                    );
                    if transpose {
                        candidates.push(target);
                    }
                }
                _ => candidates.extend_from_slice(block),
            }

            for &other in &candidates {
                if other == node || seen[other] == node || to_refine[other] != to_refine[node] {
                    continue;
                }
                seen[other] = node;
                if structurally_dominated(view, compat, transpose, node, other) {
                    edges.push((node, other));
                }
            }
        }
    }

    log::trace!("domination graph: {} nodes, {} edges", n, edges.len());
    let mut labels = scc.components(n, &edges);
    normalize(&mut labels);
    labels
}
