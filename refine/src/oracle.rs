//! Graph algorithms used as black boxes by some equivalences.
//!
//! Exact equivalences with non-trivial tie compatibility need to decide whether one neighborhood
//! can be matched into another, and domination based structural equivalences need strongly
//! connected components. Both are consumed through a trait so callers can substitute their own
//! implementations. The provided implementations are backed by `petgraph`.

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

/// A bipartite graph with `left` and `right` vertices, each side indexed from zero.
#[derive(Clone, Debug, Default)]
pub struct BipartiteGraph {
    left: usize,
    right: usize,
    edges: Vec<(usize, usize)>,
}

impl BipartiteGraph {
    /// Creates a bipartite graph without edges.
    pub fn new(left: usize, right: usize) -> Self {
        Self {
            left,
            right,
            edges: vec![],
        }
    }

    /// Removes all edges and resizes both sides, keeping the allocated storage.
    pub fn reset(&mut self, left: usize, right: usize) {
        self.left = left;
        self.right = right;
        self.edges.clear();
    }

    /// Adds an edge between the left vertex `a` and the right vertex `b`.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.left && b < self.right);
        self.edges.push((a, b));
    }

    /// Returns the number of left vertices.
    pub fn left_count(&self) -> usize {
        self.left
    }

    /// Returns the number of right vertices.
    pub fn right_count(&self) -> usize {
        self.right
    }

    /// Returns all edges as `(left, right)` pairs.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

/// Computes matchings of bipartite graphs.
pub trait MatchingOracle {
    /// Returns the size of a maximum matching.
    fn maximum_matching_size(&mut self, graph: &BipartiteGraph) -> usize;

    /// Returns `true` if there is a matching covering every left vertex.
    fn saturates_left(&mut self, graph: &BipartiteGraph) -> bool {
        if graph.left_count() > graph.right_count() {
            return false;
        }
        self.maximum_matching_size(graph) == graph.left_count()
    }
}

/// Computes strongly connected components of directed graphs.
pub trait SccOracle {
    /// Returns a component label for each of the `node_count` nodes of the directed graph with the
    /// given edges. Nodes share a label iff they are in the same strongly connected component.
    fn components(&mut self, node_count: usize, edges: &[(usize, usize)]) -> Vec<usize>;
}

/// [`MatchingOracle`] using `petgraph`'s maximum matching.
#[derive(Clone, Debug, Default)]
pub struct PetgraphMatching {
    graph: UnGraph<(), ()>,
}

impl MatchingOracle for PetgraphMatching {
    fn maximum_matching_size(&mut self, graph: &BipartiteGraph) -> usize {
        if graph.edges().is_empty() {
            return 0;
        }
        self.graph.clear();
        for _ in 0..graph.left_count() + graph.right_count() {
            self.graph.add_node(());
        }
        let offset = graph.left_count();
        for &(a, b) in graph.edges() {
            self.graph
                .add_edge(NodeIndex::new(a), NodeIndex::new(offset + b), ());
        }
        petgraph::algo::maximum_matching(&self.graph).len()
    }
}

/// [`SccOracle`] using `petgraph`'s implementation of Tarjan's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct PetgraphScc;

impl SccOracle for PetgraphScc {
    fn components(&mut self, node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut graph = DiGraph::<(), ()>::with_capacity(node_count, edges.len());
        for _ in 0..node_count {
            graph.add_node(());
        }
        for &(a, b) in edges {
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }

        let mut labels = vec![0; node_count];
        for (label, component) in petgraph::algo::tarjan_scc(&graph).into_iter().enumerate() {
            for node in component {
                labels[node.index()] = label;
            }
        }
        labels
    }
}
