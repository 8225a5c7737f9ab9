//! Role equivalences by partition refinement.
//!
//! A role equivalence is a partition of the nodes of a network such that nodes of the same class
//! are interchangeable with respect to their ties. This crate computes the coarsest such partition
//! for several notions of interchangeability, optionally refining a given partition and optionally
//! relative to a fixed reference partition:
//!
//! * [`regular`]: ties into the same set of classes.
//! * [`exact`]: the same number of ties into each class.
//! * [`structural`]: ties to the same nodes.
//! * [`weak`]: only the presence or number of ties.
//!
//! Nodes are the dense range `0..n` of a [`PositionView`][rolequiv_network::PositionView], and
//! partitions are slices assigning each node a class in the canonical format described in
//! [`canonical`]. All results are canonical.
//!
//! All notions share the same refinement machinery, see [`state`]. Colors identifying classes are
//! allocated from a universe of bounded size and recycled as soon as their last node leaves, so
//! the auxiliary memory of a refinement is `O(n)` or `O(n + m)`, independent of how many classes
//! are created and destroyed along the way.
//!
//! Tie labels enter through the comparison strategies of [`compare`]. Totally ordered labels are
//! handled by sorting ties within each block. Partial orders and arbitrary compatibilities fall
//! back to comparing nodes pairwise, using the [`oracle`]s for bipartite matching and strongly
//! connected components where needed.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod canonical;
pub mod compare;
pub mod exact;
pub mod lattice;
pub mod oracle;
pub mod regular;
pub mod state;
pub mod structural;
pub mod weak;

mod engine;
mod error;

pub use error::PartitionError;

#[doc(inline)]
pub use canonical::{check_format, class_count, discrete, is_refinement, normalize, universal};
#[doc(inline)]
pub use exact::{
    exact_equivalence, exact_equivalence_ordered, refining_exact_equivalence,
    refining_exact_equivalence_matched, refining_exact_equivalence_ordered,
    refining_relative_exact_equivalence, refining_relative_exact_equivalence_ordered,
    relative_exact_equivalence,
};
#[doc(inline)]
pub use lattice::{infimum, supremum};
#[doc(inline)]
pub use regular::{
    refining_regular_equivalence, refining_regular_equivalence_dominated,
    refining_regular_equivalence_ordered, refining_relative_regular_equivalence,
    refining_relative_regular_equivalence_ordered, regular_equivalence,
    regular_equivalence_ordered, relative_regular_equivalence,
};
#[doc(inline)]
pub use structural::{
    refining_strong_structural_equivalence, refining_strong_structural_equivalence_dominated,
    refining_strong_structural_equivalence_ordered, refining_weak_structural_equivalence,
    refining_weak_structural_equivalence_dominated, strong_structural_equivalence,
    weak_structural_equivalence,
};
#[doc(inline)]
pub use weak::{
    refining_weak_equivalence, refining_weak_equivalence_ordered,
    refining_weak_exact_equivalence, refining_weak_exact_equivalence_ordered, weak_equivalence,
    weak_equivalence_ordered, weak_exact_equivalence, weak_exact_equivalence_ordered,
};
