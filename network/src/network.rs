use crate::{Direction, NetworkView};

/// Adjacency of one side of the ties in compressed form: the ties of node `i` are
/// `ties[offsets[i]..offsets[i + 1]]`.
#[derive(Clone, Debug, Default)]
struct Adjacency {
    offsets: Vec<usize>,
    ties: Vec<usize>,
}

impl Adjacency {
    fn build(node_count: usize, ties: impl Iterator<Item = (usize, usize)> + Clone) -> Self {
        let mut offsets = vec![0; node_count + 1];
        for (node, _) in ties.clone() {
            offsets[node + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }
        let mut fill = offsets.clone();
        let mut sorted = vec![0; offsets[node_count]];
        for (node, tie) in ties {
            sorted[fill[node]] = tie;
            fill[node] += 1;
        }
        Self {
            offsets,
            ties: sorted,
        }
    }

    fn get(&self, node: usize) -> &[usize] {
        &self.ties[self.offsets[node]..self.offsets[node + 1]]
    }
}

/// A directed multigraph with dense node and tie indices.
///
/// Loops and parallel ties are allowed. Ties are numbered in insertion order. Tie labels are not
/// stored here; callers keep them in a separate array indexed by tie.
#[derive(Clone, Debug, Default)]
pub struct Network {
    node_count: usize,
    endpoints: Vec<[usize; 2]>,
    outgoing: Adjacency,
    incoming: Adjacency,
    incident: Adjacency,
}

impl Network {
    /// Creates a network on `node_count` nodes from `(source, target)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not below `node_count`.
    pub fn new(node_count: usize, ties: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let endpoints: Vec<[usize; 2]> = ties
            .into_iter()
            .map(|(source, target)| {
                assert!(
                    source < node_count && target < node_count,
                    "tie {source} -> {target} out of range for {node_count} nodes"
                );
                [source, target]
            })
            .collect();

        let outgoing = Adjacency::build(
            node_count,
            endpoints.iter().enumerate().map(|(tie, &[s, _])| (s, tie)),
        );
        let incoming = Adjacency::build(
            node_count,
            endpoints.iter().enumerate().map(|(tie, &[_, t])| (t, tie)),
        );
        // Loops are listed once per node.
        let incident = Adjacency::build(
            node_count,
            endpoints.iter().enumerate().flat_map(|(tie, &[s, t])| {
                [Some((s, tie)), (s != t).then_some((t, tie))]
                    .into_iter()
                    .flatten()
            }),
        );

        Self {
            node_count,
            endpoints,
            outgoing,
            incoming,
            incident,
        }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of ties.
    pub fn tie_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns the `(source, target)` pair of a tie.
    pub fn tie(&self, tie: usize) -> (usize, usize) {
        let [source, target] = self.endpoints[tie];
        (source, target)
    }

    /// Returns the source of a tie.
    pub fn source(&self, tie: usize) -> usize {
        self.endpoints[tie][0]
    }

    /// Returns the target of a tie.
    pub fn target(&self, tie: usize) -> usize {
        self.endpoints[tie][1]
    }

    /// Returns the endpoint of `tie` that is not `node`, or `node` for loops.
    pub fn opposite(&self, node: usize, tie: usize) -> usize {
        let [source, target] = self.endpoints[tie];
        debug_assert!(node == source || node == target);
        if node == source {
            target
        } else {
            source
        }
    }

    /// Returns the ties leaving `node`, in insertion order.
    pub fn out_ties(&self, node: usize) -> &[usize] {
        self.outgoing.get(node)
    }

    /// Returns the ties entering `node`, in insertion order.
    pub fn in_ties(&self, node: usize) -> &[usize] {
        self.incoming.get(node)
    }

    /// Returns all ties incident to `node`, listing loops once.
    pub fn incident_ties(&self, node: usize) -> &[usize] {
        self.incident.get(node)
    }

    /// Returns a position view in the given direction.
    pub fn view(&self, direction: Direction) -> NetworkView<'_> {
        NetworkView::new(self, direction)
    }

    /// Returns the view where positions are made up of outgoing ties.
    pub fn outgoing(&self) -> NetworkView<'_> {
        self.view(Direction::Outgoing)
    }

    /// Returns the view where positions are made up of incoming ties.
    pub fn incoming(&self) -> NetworkView<'_> {
        self.view(Direction::Incoming)
    }

    /// Returns the view where positions are made up of all incident ties.
    pub fn symmetric(&self) -> NetworkView<'_> {
        self.view(Direction::Both)
    }
}
