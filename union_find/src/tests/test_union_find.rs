use super::*;
use rand::prelude::*;
use rand_pcg::Pcg64;

#[test]
fn singletons() {
    let mut uf = UnionFind::new(4);
    assert_eq!(uf.group_count(), 4);
    for i in 0..4 {
        assert_eq!(uf.find(i), i);
    }
    assert!(UnionFind::new(0).is_empty());
}

#[test]
fn union_and_find() {
    let mut uf = UnionFind::new(6);
    assert!(uf.union(0, 1));
    assert!(uf.union(2, 3));
    assert!(!uf.union(1, 0));
    assert!(uf.union(1, 3));
    assert_eq!(uf.group_count(), 3);
    assert!(uf.same_class(0, 2));
    assert!(!uf.same_class(0, 4));
    let root = uf.find(0);
    assert_eq!(uf.find(3), root);
}

#[test]
fn long_chain() {
    let n = 100_000;
    let mut uf = UnionFind::new(n);
    for i in 1..n {
        uf.union(i - 1, i);
    }
    assert_eq!(uf.group_count(), 1);
    let root = uf.find(0);
    assert!((0..n).all(|i| uf.find(i) == root));
}

#[test]
fn matches_naive_labels() {
    let mut rng = Pcg64::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.gen_range(1..40);
        let mut uf = UnionFind::new(n);
        let mut labels: Vec<usize> = (0..n).collect();

        for _ in 0..rng.gen_range(0..2 * n) {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            let merged = uf.union(a, b);
            let (la, lb) = (labels[a], labels[b]);
            assert_eq!(merged, la != lb);
            for label in labels.iter_mut() {
                if *label == lb {
                    *label = la;
                }
            }
        }

        for a in 0..n {
            for b in 0..n {
                assert_eq!(uf.same_class(a, b), labels[a] == labels[b]);
            }
        }
        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(uf.group_count(), distinct.len());
    }
}
