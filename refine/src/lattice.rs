//! Meet and join of partitions.
//!
//! Partitions of the same node set are ordered by refinement. The infimum of two partitions is
//! their coarsest common refinement, the supremum their finest common coarsening.

use rolequiv_union_find::UnionFind;

use crate::{
    canonical::{check_format, class_count, normalize},
    engine::existence_universe,
    state::{BlockOrder, RefinementState, SplitMode},
    PartitionError,
};

fn check_pair(p1: &[usize], p2: &[usize]) -> Result<(), PartitionError> {
    check_format(p1)?;
    check_format(p2)?;
    if p1.len() != p2.len() {
        return Err(PartitionError::LengthMismatch {
            expected: p1.len(),
            found: p2.len(),
        });
    }
    Ok(())
}

/// Returns the coarsest partition refining both `p1` and `p2`.
///
/// Two nodes share a class of the result iff they share a class in both inputs.
pub fn infimum(p1: &[usize], p2: &[usize]) -> Result<Vec<usize>, PartitionError> {
    check_pair(p1, p2)?;
    let n = p1.len();
    let mut state = RefinementState::from_partition(p1, existence_universe(n));
    for block in BlockOrder::new(p2, class_count(p2)).blocks() {
        for &node in block {
            state.split(node, SplitMode::Existence);
        }
        state.finish_block();
    }
    Ok(state.into_partition())
}

/// Returns the finest partition coarsening both `p1` and `p2`.
///
/// Classes of `p1` that share a node with the same class of `p2` are merged transitively.
pub fn supremum(p1: &[usize], p2: &[usize]) -> Result<Vec<usize>, PartitionError> {
    check_pair(p1, p2)?;
    let mut classes = UnionFind::new(class_count(p1));
    let mut first = vec![usize::MAX; class_count(p2)];
    for (&c1, &c2) in p1.iter().zip(p2) {
        if first[c2] == usize::MAX {
            first[c2] = c1;
        } else {
            classes.union(first[c2], c1);
        }
    }
    let mut result: Vec<usize> = p1.iter().map(|&c1| classes.find(c1)).collect();
    normalize(&mut result);
    Ok(result)
}
