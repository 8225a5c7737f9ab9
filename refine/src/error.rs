use thiserror::Error;

/// Errors raised for malformed partition arguments.
///
/// These are raised before any refinement work starts, so a failing call never has partial
/// effects.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum PartitionError {
    /// The partition is not in canonical format.
    #[error("partition is not canonical: class {value} at index {index} exceeds the next unused class {limit}")]
    NotCanonical {
        /// Position of the first offending entry.
        index: usize,
        /// Class found at that position.
        value: usize,
        /// Largest class allowed at that position.
        limit: usize,
    },
    /// The partition does not assign a class to every node.
    #[error("partition has {found} entries but {expected} nodes are being partitioned")]
    LengthMismatch {
        /// Number of nodes.
        expected: usize,
        /// Length of the partition.
        found: usize,
    },
}
