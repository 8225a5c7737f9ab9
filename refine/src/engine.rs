//! Refinement passes shared by the equivalence families.
//!
//! A pass refines the coloring of a [`RefinementState`] relative to a reference labeling: after
//! the pass two nodes keep sharing a color only if they shared it before and their ties lead to
//! the same reference classes (with the same multiplicities or labels, depending on the variant).
//! Equivalences that must be stable with respect to themselves repeat passes against a snapshot of
//! the current coloring until no class splits any more.

use rolequiv_network::PositionView;
use rolequiv_util::fmt::fmt_classes;

use crate::{
    compare::TieOrder,
    state::{BlockOrder, RefinementState, SplitMode},
};

/// Colors needed by passes using [`SplitMode::Existence`].
pub(crate) fn existence_universe(node_count: usize) -> usize {
    2 * node_count
}

/// Colors needed by passes using [`SplitMode::Counting`].
///
/// A view may list a tie at both of its endpoints, so each tie can cause two splits.
pub(crate) fn counting_universe(node_count: usize, tie_count: usize) -> usize {
    2 * tie_count + node_count
}

/// Splits nodes by which reference classes their ties lead to.
///
/// Every reference class is one block. For each node `v` of the block, every node owning a tie
/// to `v` is split.
pub(crate) fn neighbor_pass<V: PositionView>(
    state: &mut RefinementState,
    view: &V,
    reference: &[usize],
    label_bound: usize,
    mode: SplitMode,
) {
    let order = BlockOrder::new(reference, label_bound);
    for block in order.blocks() {
        for &target in block {
            for tie in view.inverse_ties(target) {
                state.split(view.opposite(target, tie), mode);
            }
        }
        state.finish_block();
    }
}

/// Reusable buffers for [`ordered_neighbor_pass`].
#[derive(Default)]
pub(crate) struct OrderedScratch {
    entries: Vec<(usize, usize)>,
    stamp: Vec<usize>,
    current_stamp: usize,
}

impl OrderedScratch {
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            entries: vec![],
            stamp: vec![0; node_count],
            current_stamp: 0,
        }
    }
}

/// Splits nodes by which reference classes their ties lead to and by the labels of those ties.
///
/// Within each reference block the ties are sorted by decreasing label and processed in runs of
/// equivalent labels, each run being a block of its own. With [`SplitMode::Existence`] only the
/// first, i.e. largest, tie of each node into the reference block splits it. With
/// [`SplitMode::Counting`] every tie does.
pub(crate) fn ordered_neighbor_pass<V: PositionView, O: TieOrder>(
    state: &mut RefinementState,
    view: &V,
    reference: &[usize],
    label_bound: usize,
    mode: SplitMode,
    order: &O,
    scratch: &mut OrderedScratch,
) {
    let blocks = BlockOrder::new(reference, label_bound);
    for block in blocks.blocks() {
        let entries = &mut scratch.entries;
        entries.clear();
        for &target in block {
            for tie in view.inverse_ties(target) {
                entries.push((view.opposite(target, tie), tie));
            }
        }
        entries.sort_by(|a, b| order.compare(b.1, a.1));

        scratch.current_stamp += 1;
        let stamp = scratch.current_stamp;

        for run in entries.chunk_by(|a, b| order.compare(a.1, b.1).is_eq()) {
            for &(node, _) in run {
                if mode == SplitMode::Existence {
                    if scratch.stamp[node] == stamp {
                        continue;
                    }
                    scratch.stamp[node] = stamp;
                }
                state.split(node, mode);
            }
            state.finish_block();
        }
    }
}

/// Repeats `pass` against a snapshot of the current coloring until the class count is stable.
///
/// Passes only ever split classes, so an unchanged class count means an unchanged partition.
pub(crate) fn refine_to_fixpoint(
    state: &mut RefinementState,
    mut pass: impl FnMut(&mut RefinementState, &[usize]),
) {
    let mut snapshot = Vec::with_capacity(state.node_count());
    let mut round = 0usize;
    loop {
        let before = state.class_count();
        snapshot.clear();
        snapshot.extend(state.colors().iter().map(|color| color.index()));
        pass(state, &snapshot);
        round += 1;
        log::debug!(
            "refinement round {round}: {before} -> {} classes",
            state.class_count()
        );
        if state.class_count() == before {
            break;
        }
    }
    log::trace!(
        "fixpoint after {round} rounds: {}",
        fmt_classes(&snapshot)
    );
}

/// Splits each class of the snapshot into groups of mutually `equivalent` nodes.
///
/// Each node is compared against one representative of every group found so far in its class.
/// The first member of a class keeps the class's color, later groups get fresh colors.
pub(crate) fn pairwise_pass(
    state: &mut RefinementState,
    snapshot: &[usize],
    mut equivalent: impl FnMut(&[usize], usize, usize) -> bool,
) {
    let order = BlockOrder::new(snapshot, state.universe());
    let mut representatives: Vec<usize> = vec![];
    for block in order.blocks() {
        representatives.clear();
        for &node in block {
            match representatives
                .iter()
                .copied()
                .find(|&rep| equivalent(snapshot, node, rep))
            {
                Some(rep) => state.recolor(node, state.color(rep)),
                None => {
                    if !representatives.is_empty() {
                        let color = state.alloc_color();
                        state.recolor(node, color);
                    }
                    representatives.push(node);
                }
            }
        }
    }
}
