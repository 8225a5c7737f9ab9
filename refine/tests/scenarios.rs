#![allow(missing_docs)] // test only
use rolequiv_network::{Network, PositionView};
use rolequiv_refine::{
    compare::{by_label, Compatible, Partial, Unlabeled},
    oracle::{PetgraphMatching, PetgraphScc},
    *,
};

#[test]
fn regular_by_direction() {
    let network = Network::new(4, [(0, 1), (2, 1), (3, 0)]);
    assert_eq!(regular_equivalence(&network.incoming()), [0, 1, 2, 2]);
    assert_eq!(regular_equivalence(&network.outgoing()), [0, 1, 0, 2]);
    assert_eq!(
        refining_regular_equivalence(&network.outgoing(), &universal(4)).unwrap(),
        [0, 1, 0, 2]
    );
}

#[test]
fn weak_separates_isolates() {
    let network = Network::new(5, [(2, 0), (3, 1), (4, 2), (4, 3)]);
    let result = weak_equivalence(&network.outgoing());
    assert_eq!(result, [0, 0, 1, 1, 1]);
    assert_eq!(weak_exact_equivalence(&network.outgoing()), [0, 0, 1, 1, 2]);
}

/// Node 0 has ties to two nodes of class `x` and one of class `y`, node 1 to one of `x` and two
/// of `y`. Both reach the same classes but there is no matching of their ties.
fn unbalanced_pair() -> (Network, Vec<usize>) {
    let network = Network::new(8, [(0, 2), (0, 3), (0, 5), (1, 4), (1, 6), (1, 7)]);
    (network, vec![0, 0, 1, 1, 1, 2, 2, 2])
}

#[test]
fn exact_requires_matching() {
    let (network, to_refine) = unbalanced_pair();
    let view = network.outgoing();

    let regular = refining_regular_equivalence(&view, &to_refine).unwrap();
    assert_eq!(regular, [0, 0, 1, 1, 1, 2, 2, 2]);

    let exact = refining_exact_equivalence(&view, &to_refine).unwrap();
    assert_eq!(exact, [0, 1, 2, 2, 2, 3, 3, 3]);

    let mut oracle = PetgraphMatching::default();
    let matched =
        refining_exact_equivalence_matched(&view, &to_refine, &Unlabeled, &mut oracle).unwrap();
    assert_eq!(matched, exact);
}

#[test]
fn matched_with_partial_order() {
    // Ties of 0 are labeled 2 and 3, ties of 1 are labeled 4 and 6 under divisibility.
    let network = Network::new(4, [(0, 2), (0, 3), (1, 2), (1, 3)]);
    let view = network.outgoing();
    let values = [2, 3, 4, 6];
    let divides = Partial(|a: usize, b: usize| {
        let (a, b) = (values[a], values[b]);
        if a == b {
            Some(std::cmp::Ordering::Equal)
        } else if b % a == 0 {
            Some(std::cmp::Ordering::Less)
        } else if a % b == 0 {
            Some(std::cmp::Ordering::Greater)
        } else {
            None
        }
    });

    let mut oracle = PetgraphMatching::default();
    let result =
        refining_exact_equivalence_matched(&view, &[0, 0, 1, 1], &divides, &mut oracle).unwrap();
    // 0 is dominated by 1 but not the other way around.
    assert_eq!(result, [0, 1, 2, 2]);

    let everything = Compatible(|_: usize, _: usize| true);
    let result =
        refining_exact_equivalence_matched(&view, &[0, 0, 1, 1], &everything, &mut oracle)
            .unwrap();
    assert_eq!(result, [0, 0, 1, 1]);
    assert_eq!(
        refining_regular_equivalence_dominated(&view, &[0, 0, 1, 1], &everything).unwrap(),
        [0, 0, 1, 1]
    );
}

#[test]
fn refining_never_coarsens() {
    let network = Network::new(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    let view = network.outgoing();
    assert_eq!(regular_equivalence(&view), [0; 6]);

    let to_refine = [0, 0, 0, 1, 1, 1];
    let result = refining_regular_equivalence(&view, &to_refine).unwrap();
    assert!(is_refinement(&result, &to_refine));
    assert_eq!(result, to_refine);

    let to_refine = [0, 1, 1, 0, 1, 1];
    let result = refining_regular_equivalence(&view, &to_refine).unwrap();
    assert!(is_refinement(&result, &to_refine));
    assert_eq!(result, [0, 1, 2, 0, 1, 2]);
}

#[test]
fn relative_to_discrete_is_structural() {
    let network = Network::new(5, [(0, 3), (1, 3), (1, 4), (2, 3), (2, 4)]);
    let view = network.outgoing();
    assert_eq!(
        relative_regular_equivalence(&view, &discrete(5)).unwrap(),
        strong_structural_equivalence(&view)
    );
    assert_eq!(strong_structural_equivalence(&view), [0, 1, 1, 2, 2]);
}

#[test]
fn ordered_entry_points_accept_labels() {
    let network = Network::new(4, [(0, 2), (1, 3), (2, 0), (3, 1)]);
    let view = network.outgoing();
    let labels = ["a", "b", "a", "b"];
    let order = by_label(&labels);
    assert_eq!(regular_equivalence_ordered(&view, &order), [0, 1, 0, 1]);
    assert_eq!(exact_equivalence_ordered(&view, &order), [0, 1, 0, 1]);
    assert_eq!(weak_equivalence_ordered(&view, &order), [0, 1, 0, 1]);
    assert_eq!(regular_equivalence(&view), [0; 4]);
}

#[test]
fn empty_inputs() {
    let network = Network::new(0, []);
    let view = network.symmetric();
    assert_eq!(view.node_count(), 0);
    let mut matching = PetgraphMatching::default();
    let mut scc = PetgraphScc;

    assert!(regular_equivalence(&view).is_empty());
    assert!(exact_equivalence(&view).is_empty());
    assert!(weak_equivalence(&view).is_empty());
    assert!(weak_exact_equivalence(&view).is_empty());
    assert!(strong_structural_equivalence(&view).is_empty());
    assert!(weak_structural_equivalence(&view).is_empty());
    assert!(relative_regular_equivalence(&view, &[]).unwrap().is_empty());
    assert!(refining_exact_equivalence_matched(&view, &[], &Unlabeled, &mut matching)
        .unwrap()
        .is_empty());
    assert!(
        refining_weak_structural_equivalence_dominated(&view, &[], &Unlabeled, &mut scc)
            .unwrap()
            .is_empty()
    );
    assert!(infimum(&[], &[]).unwrap().is_empty());
    assert!(supremum(&[], &[]).unwrap().is_empty());
}

#[test]
fn malformed_arguments() {
    let network = Network::new(3, [(0, 1)]);
    let view = network.outgoing();
    let mut scc = PetgraphScc;

    assert_eq!(
        refining_exact_equivalence(&view, &[0, 1]),
        Err(PartitionError::LengthMismatch {
            expected: 3,
            found: 2
        })
    );
    assert!(matches!(
        refining_relative_exact_equivalence(&view, &[1, 0, 0], &[0, 0, 0]),
        Err(PartitionError::NotCanonical { index: 0, .. })
    ));
    assert!(matches!(
        refining_strong_structural_equivalence_dominated(&view, &[0, 0, 2], &Unlabeled, &mut scc),
        Err(PartitionError::NotCanonical { index: 2, .. })
    ));
    let error = refining_weak_equivalence(&view, &[0, 0, 0, 0]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "partition has 4 entries but 3 nodes are being partitioned"
    );
}
