//! Networks and the node-centric position views consumed by role equivalence computations.
//!
//! A [`PositionView`] decides which ties make up a node's position. The same [`Network`] can be
//! viewed through its outgoing ties, its incoming ties or both, yielding different notions of
//! which nodes play the same role.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod network;
mod view;

pub use network::Network;
pub use view::{Direction, NetworkView, PositionView};
