//! Mutable state of a single partition refinement.
//!
//! A refinement assigns every node a *color*. Colors are drawn from a fixed universe whose size
//! is an upper bound on the number of colors that can be in use at the same time. A color is live
//! while at least one node has it or while it is still referenced by the current block. Freed
//! colors are recycled, so auxiliary memory stays proportional to the universe no matter how many
//! classes are created over the course of a refinement.
//!
//! Refinements proceed in *blocks*. Within a block, nodes are split off their current color by
//! [`RefinementState::split`]. All nodes of the same color split in the same block end up in the
//! same new color. When the block ends, [`RefinementState::finish_block`] forgets these
//! assignments and frees colors that lost all their nodes.

use rolequiv_util::{SlotAlloc, TouchedList};

use crate::canonical::normalize;

/// A color of a [`RefinementState`], i.e. an index into its color universe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Color(usize);

impl Color {
    /// Returns the color's index in the universe.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// How repeated splits of the same node within one block behave.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SplitMode {
    /// A node split several times within a block moves only once.
    ///
    /// Used when a node's position only records whether some tie exists.
    Existence,
    /// A node moves to a further new color for every split within a block.
    ///
    /// Used when a node's position records how many ties exist.
    Counting,
}

/// The partition under refinement together with the scratch space needed to refine it.
///
/// This owns the node coloring, the population of each color, the allocator handing out
/// colors, the list of colors touched in the current block and the map from each touched color to
/// the color its split nodes move to.
#[derive(Clone, Debug)]
pub struct RefinementState {
    colors: Vec<Color>,
    counts: Vec<usize>,
    alloc: SlotAlloc,
    touched: TouchedList,
    split_into: Vec<Option<Color>>,
}

impl RefinementState {
    /// Creates a state colored by a canonical partition.
    pub fn from_partition(partition: &[usize], universe: usize) -> Self {
        debug_assert!(crate::canonical::check_format(partition).is_ok());
        let mut counts = vec![0; universe];
        let mut live = 0;
        for &class in partition {
            counts[class] += 1;
            live = live.max(class + 1);
        }
        Self {
            colors: partition.iter().map(|&class| Color(class)).collect(),
            counts,
            alloc: SlotAlloc::with_live_prefix(universe, live),
            touched: TouchedList::new(universe),
            split_into: vec![None; universe],
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.colors.len()
    }

    /// Returns the size of the color universe.
    pub fn universe(&self) -> usize {
        self.alloc.capacity()
    }

    /// Returns the current color of a node.
    #[inline]
    pub fn color(&self, node: usize) -> Color {
        self.colors[node]
    }

    /// Returns the current color of every node.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the number of nodes having a color.
    pub fn population(&self, color: Color) -> usize {
        self.counts[color.0]
    }

    /// Returns the number of live colors.
    ///
    /// Outside of a block this is the number of classes of the current partition.
    pub fn class_count(&self) -> usize {
        self.alloc.live_count()
    }

    /// Moves a node out of its current color as part of the current block.
    ///
    /// The first split of a color within a block allocates a fresh color and records it as the
    /// target for all further nodes split off that color in this block.
    ///
    /// In [`SplitMode::Existence`] the fresh color is also recorded as its own target. A node that
    /// was already moved and is split again therefore stays put. This self-mapping is what keeps
    /// the number of colors allocated per block bounded by the number of colors live at its start.
    ///
    /// In [`SplitMode::Counting`] the fresh color has no target yet, so a second split of the same
    /// node moves it on to another fresh color. Each split can allocate a color here, so the
    /// universe must account for one color per tie.
    #[inline]
    pub fn split(&mut self, node: usize, mode: SplitMode) {
        let old = self.colors[node];
        let target = match self.split_into[old.0] {
            Some(target) => target,
            None => {
                let target = Color(self.alloc.alloc());
                self.split_into[old.0] = Some(target);
                self.touched.push(old.0);
                if mode == SplitMode::Existence {
                    self.split_into[target.0] = Some(target);
                    self.touched.push(target.0);
                }
                target
            }
        };
        if target != old {
            self.move_node(node, old, target);
        }
    }

    /// Ends the current block.
    ///
    /// Forgets the split targets recorded during the block and frees every touched color that no
    /// longer has any nodes. Only touched colors are visited, not the whole universe.
    pub fn finish_block(&mut self) {
        for color in self.touched.drain() {
            self.split_into[color] = None;
            if self.counts[color] == 0 {
                self.alloc.free(color);
            }
        }
    }

    /// Allocates an unused color without assigning it to any node.
    ///
    /// The caller must move at least one node into the color before it could be freed.
    pub fn alloc_color(&mut self) -> Color {
        Color(self.alloc.alloc())
    }

    /// Moves a node to a given live color, outside of the block discipline.
    ///
    /// The node's previous color is freed if this leaves it empty.
    pub fn recolor(&mut self, node: usize, color: Color) {
        let old = self.colors[node];
        if old == color {
            return;
        }
        self.move_node(node, old, color);
        if self.counts[old.0] == 0 && self.split_into[old.0].is_none() {
            self.alloc.free(old.0);
        }
    }

    #[inline]
    fn move_node(&mut self, node: usize, from: Color, to: Color) {
        self.counts[from.0] -= 1;
        self.counts[to.0] += 1;
        self.colors[node] = to;
    }

    /// Consumes the state, returning the final coloring as a canonical partition.
    pub fn into_partition(self) -> Vec<usize> {
        debug_assert!(self.touched.is_empty(), "unfinished block");
        let mut colors: Vec<usize> = self.colors.iter().map(|color| color.0).collect();
        normalize(&mut colors);
        colors
    }
}

/// Nodes grouped by a labeling, in increasing label order.
///
/// Computed by counting sort in `O(n + label_bound)`. Each maximal run of nodes sharing a label is
/// a block. Within a block, nodes appear in increasing order.
#[derive(Clone, Debug, Default)]
pub struct BlockOrder {
    offsets: Vec<usize>,
    nodes: Vec<usize>,
}

impl BlockOrder {
    /// Groups the nodes `0..labels.len()` by their label. All labels must be below `label_bound`.
    pub fn new(labels: &[usize], label_bound: usize) -> Self {
        let mut offsets = vec![0; label_bound + 1];
        for &label in labels {
            offsets[label + 1] += 1;
        }
        for i in 0..label_bound {
            offsets[i + 1] += offsets[i];
        }
        let mut fill = offsets.clone();
        let mut nodes = vec![0; labels.len()];
        for (node, &label) in labels.iter().enumerate() {
            nodes[fill[label]] = node;
            fill[label] += 1;
        }
        Self { offsets, nodes }
    }

    /// Returns the non-empty blocks in increasing label order.
    pub fn blocks(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.offsets
            .windows(2)
            .filter(|range| range[0] < range[1])
            .map(|range| &self.nodes[range[0]..range[1]])
    }

    /// Returns all nodes, ordered by label.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }
}
