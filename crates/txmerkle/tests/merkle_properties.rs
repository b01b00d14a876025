use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use txmerkle::{
    calc_hash, calc_tree_height, calc_tree_width, check_merkle_root, compute_merkle_root,
    find_diff_leaf, merkle_root, Uint256,
};

fn random_leaves(rng: &mut StdRng, count: usize) -> Vec<Uint256> {
    (0..count).map(|_| Uint256::from_bytes(rng.gen())).collect()
}

fn parse(hexes: &[&str]) -> Vec<Uint256> {
    hexes.iter().map(|h| h.parse().unwrap()).collect()
}

#[test]
fn mainnet_block_100000() {
    let txids = parse(&[
        "8c14f0db3df150123e6f3dbbf30f8b955a8249b62ac1d1ff16284aefa3d06d87",
        "fff2525b8931402dd09222c50775608f75787bd2b87e56995a7bdd30f79702c4",
        "6359f0868171b1d194cbee1af2f16ea598ae8fad666d9b012c8ed2b79a236ec4",
        "e9a66845e05d5abc0ad04ec80f774a7e585c6e8db975962d069a522137b80c1d",
    ]);
    let expected: Uint256 = "f3e94742aca4b5ef85488dc37c06c3282295ffec960994b2c0d5ac2a25a95766"
        .parse()
        .unwrap();

    assert_eq!(compute_merkle_root(&txids), (expected, false));
    assert_eq!(calc_hash(2, 0, &txids), expected);
    assert!(check_merkle_root(&txids, &expected).is_ok());
}

#[test]
fn root_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(1);
    for count in 0..40 {
        let leaves = random_leaves(&mut rng, count);
        let copy = leaves.clone();
        assert_eq!(compute_merkle_root(&leaves), compute_merkle_root(&copy));
    }
}

#[test]
fn geometry_agrees_with_root_folding() {
    let mut rng = StdRng::seed_from_u64(2);
    for count in 1..130u64 {
        assert_eq!(calc_tree_width(0, count), count);

        let leaves = random_leaves(&mut rng, count as usize);
        let height = calc_tree_height(&leaves);
        assert_eq!(calc_tree_width(height, count), 1, "count={count}");
        if height > 0 {
            assert!(calc_tree_width(height - 1, count) > 1, "count={count}");
        }
        assert_eq!(calc_hash(height, 0, &leaves), merkle_root(&leaves), "count={count}");
    }
}

#[test]
fn random_leaves_are_not_mutated() {
    let mut rng = StdRng::seed_from_u64(3);
    for count in 1..64 {
        let leaves = random_leaves(&mut rng, count);
        assert!(!compute_merkle_root(&leaves).1, "count={count}");
    }
}

#[test]
fn duplicating_an_odd_tail_is_detected() {
    let mut rng = StdRng::seed_from_u64(4);
    for count in [3usize, 5, 7, 11, 13] {
        let leaves = random_leaves(&mut rng, count);
        let mut padded = leaves.clone();
        padded.push(leaves[count - 1]);

        let (root, mutated) = compute_merkle_root(&leaves);
        let (padded_root, padded_mutated) = compute_merkle_root(&padded);
        assert_eq!(root, padded_root);
        assert!(!mutated);
        assert!(padded_mutated);
        assert!(check_merkle_root(&padded, &root).is_err());
    }
}

#[test]
fn locates_every_single_leaf_change() {
    let mut rng = StdRng::seed_from_u64(5);
    for count in [2usize, 3, 4, 5, 6, 8, 9, 16, 17, 31] {
        let a = random_leaves(&mut rng, count);
        assert_eq!(find_diff_leaf(&a, &a), 0);

        for i in 0..count {
            let mut b = a.clone();
            b[i] = Uint256::from_bytes(rng.gen());
            assert_eq!(find_diff_leaf(&a, &b), i as u64, "count={count} i={i}");
        }
    }
}
