use crate::Network;

/// A node-centric accessor for the ties defining each node's position.
///
/// Nodes are the dense range `0..node_count()` and ties the dense range `0..tie_count()`. Tie
/// indices are what comparison strategies receive, so they can be used to look up tie labels.
///
/// For every node `i` and tie `t` in `ties(i)`, the tie `t` also appears in `inverse_ties(j)` for
/// `j = opposite(i, t)`, and vice versa. Refinement iterates `inverse_ties` to find the nodes
/// whose positions mention a given node.
pub trait PositionView {
    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns an upper bound for all tie indices returned by this view.
    fn tie_count(&self) -> usize;

    /// Returns the ties defining `node`'s position.
    fn ties(&self, node: usize) -> impl Iterator<Item = usize> + '_;

    /// Returns the ties that are part of another node's position and lead to `node`.
    fn inverse_ties(&self, node: usize) -> impl Iterator<Item = usize> + '_;

    /// Returns the endpoint of `tie` that is not `node`, or `node` itself for loops.
    fn opposite(&self, node: usize, tie: usize) -> usize;

    /// Returns the number of ties defining `node`'s position.
    fn degree(&self, node: usize) -> usize {
        self.ties(node).count()
    }
}

/// Which ties of a [`Network`] make up a node's position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    /// Ties leaving the node.
    #[default]
    Outgoing,
    /// Ties entering the node.
    Incoming,
    /// All ties incident to the node, ignoring their direction.
    Both,
}

/// A [`PositionView`] of a [`Network`] in a fixed [`Direction`].
#[derive(Clone, Copy, Debug)]
pub struct NetworkView<'a> {
    network: &'a Network,
    direction: Direction,
}

impl<'a> NetworkView<'a> {
    /// Creates a view of `network` in the given direction.
    pub fn new(network: &'a Network, direction: Direction) -> Self {
        Self { network, direction }
    }

    /// Returns the viewed network.
    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Returns the direction of this view.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl PositionView for NetworkView<'_> {
    fn node_count(&self) -> usize {
        self.network.node_count()
    }

    fn tie_count(&self) -> usize {
        self.network.tie_count()
    }

    fn ties(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let ties = match self.direction {
            Direction::Outgoing => self.network.out_ties(node),
            Direction::Incoming => self.network.in_ties(node),
            Direction::Both => self.network.incident_ties(node),
        };
        ties.iter().copied()
    }

    fn inverse_ties(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let ties = match self.direction {
            Direction::Outgoing => self.network.in_ties(node),
            Direction::Incoming => self.network.out_ties(node),
            Direction::Both => self.network.incident_ties(node),
        };
        ties.iter().copied()
    }

    fn opposite(&self, node: usize, tie: usize) -> usize {
        self.network.opposite(node, tie)
    }

    fn degree(&self, node: usize) -> usize {
        match self.direction {
            Direction::Outgoing => self.network.out_ties(node).len(),
            Direction::Incoming => self.network.in_ties(node).len(),
            Direction::Both => self.network.incident_ties(node).len(),
        }
    }
}
