//! Canonical partition format.
//!
//! A partition of `0..n` is stored as a slice `p` of length `n` assigning each node a class. It is
//! canonical when classes are numbered in order of first appearance without gaps, i.e. `p[0] == 0`
//! and `p[i] <= 1 + max(p[..i])`. Every partition has exactly one canonical labeling.

use crate::PartitionError;

const UNSEEN: usize = usize::MAX;

/// Relabels a partition in place into canonical format.
pub fn normalize(partition: &mut [usize]) {
    let bound = partition.iter().max().map_or(0, |&max| max + 1);
    let mut canonical = vec![UNSEEN; bound];
    let mut next = 0;
    for label in partition.iter_mut() {
        let entry = &mut canonical[*label];
        if *entry == UNSEEN {
            *entry = next;
            next += 1;
        }
        *label = *entry;
    }
}

/// Returns the canonical relabeling of a partition.
pub fn normalized(partition: &[usize]) -> Vec<usize> {
    let mut result = partition.to_vec();
    normalize(&mut result);
    result
}

/// Checks that a partition is in canonical format.
pub fn check_format(partition: &[usize]) -> Result<(), PartitionError> {
    let mut limit = 0;
    for (index, &value) in partition.iter().enumerate() {
        if value > limit {
            return Err(PartitionError::NotCanonical {
                index,
                value,
                limit,
            });
        }
        limit = limit.max(value + 1);
    }
    Ok(())
}

/// Checks that a partition argument is canonical and covers exactly `node_count` nodes.
pub(crate) fn check_partition(partition: &[usize], node_count: usize) -> Result<(), PartitionError> {
    if partition.len() != node_count {
        return Err(PartitionError::LengthMismatch {
            expected: node_count,
            found: partition.len(),
        });
    }
    check_format(partition)
}

/// Returns the number of classes of a canonical partition.
pub fn class_count(partition: &[usize]) -> usize {
    partition.iter().max().map_or(0, |&max| max + 1)
}

/// Returns the partition putting all `node_count` nodes into a single class.
pub fn universal(node_count: usize) -> Vec<usize> {
    vec![0; node_count]
}

/// Returns the partition putting each of the `node_count` nodes into its own class.
pub fn discrete(node_count: usize) -> Vec<usize> {
    (0..node_count).collect()
}

/// Returns `true` if every class of `fine` is contained in a class of `coarse`.
///
/// Both partitions must have the same length. Labels need not be canonical.
pub fn is_refinement(fine: &[usize], coarse: &[usize]) -> bool {
    assert_eq!(fine.len(), coarse.len(), "partitions of different lengths");
    let bound = fine.iter().max().map_or(0, |&max| max + 1);
    let mut coarse_of_fine = vec![UNSEEN; bound];
    for (&f, &c) in fine.iter().zip(coarse) {
        let entry = &mut coarse_of_fine[f];
        if *entry == UNSEEN {
            *entry = c;
        } else if *entry != c {
            return false;
        }
    }
    true
}
