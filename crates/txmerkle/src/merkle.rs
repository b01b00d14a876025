//! Transaction Merkle tree as computed by block consensus.
//!
//! WARNING: this tree has a known flaw (CVE-2012-2459). Whenever a level
//! holds an odd number of nodes the last one is paired with a copy of
//! itself, so distinct transaction lists can commit to the same root:
//!
//! ```text
//!              A               A
//!            /  \            /   \
//!          B     C         B       C
//!         / \    |        / \     / \
//!        D   E   F       D   E   F   F
//!       / \ / \ / \     / \ / \ / \ / \
//!       1 2 3 4 5 6     1 2 3 4 5 6 5 6
//! ```
//!
//! Both lists hash to `A`, because `F` duplicated and `(F, F)` both give
//! `C`. The construction is consensus-critical and must stay as it is.
//! [`compute_merkle_root`] reports a list as mutated when two identical
//! siblings are hashed together at any level; callers treat that exactly
//! like a wrong root (see [`check_merkle_root`]). Assuming no double
//! SHA-256 collisions this catches every known way of altering the list
//! without altering the root.

use crate::crypto::{hash_pair, sha256d64};
use crate::types::Uint256;
use anyhow::{anyhow, Result};

/// Merkle root of `leaves`, plus whether the list is mutated.
///
/// An empty list yields the zero digest and `false`.
pub fn compute_merkle_root(leaves: &[Uint256]) -> (Uint256, bool) {
    fold_levels(leaves.to_vec(), true)
}

/// Merkle root of `leaves` without the mutation scan.
pub fn merkle_root(leaves: &[Uint256]) -> Uint256 {
    fold_levels(leaves.to_vec(), false).0
}

fn fold_levels(mut hashes: Vec<Uint256>, track_mutation: bool) -> (Uint256, bool) {
    let mut mutated = false;
    while hashes.len() > 1 {
        if track_mutation && !mutated {
            mutated = hashes.chunks_exact(2).any(|pair| pair[0] == pair[1]);
        }
        if hashes.len() % 2 == 1 {
            let last = hashes[hashes.len() - 1];
            hashes.push(last);
        }
        hashes = sha256d64(&hashes);
    }
    (hashes.first().copied().unwrap_or_default(), mutated)
}

/// Number of nodes at `height` in a tree over `leaves` leaves.
pub fn calc_tree_width(height: u64, leaves: u64) -> u64 {
    if height >= 64 {
        return u64::from(leaves > 0);
    }
    let span = 1u128 << height;
    ((u128::from(leaves) + span - 1) >> height) as u64
}

/// Height of the tree built over `hashes` (0 for zero or one leaf).
pub fn calc_tree_height(hashes: &[Uint256]) -> u64 {
    tree_height_for(hashes.len() as u64)
}

/// Same as [`calc_tree_height`] over a bare leaf count.
pub fn tree_height_for(mut leaves: u64) -> u64 {
    let mut height = 0;
    while leaves > 1 {
        leaves = leaves / 2 + leaves % 2;
        height += 1;
    }
    height
}

/// Widths of every level from the leaves up to the root.
pub fn level_widths(leaves: u64) -> Vec<u64> {
    if leaves == 0 {
        return Vec::new();
    }
    (0..=tree_height_for(leaves))
        .map(|height| calc_tree_width(height, leaves))
        .collect()
}

/// Hash of the node at (`height`, `pos`), rebuilt from the leaves.
///
/// Nothing is cached: every call walks the whole subtree under the node,
/// which is fine for the sparse lookups it serves.
///
/// # Panics
///
/// If `hashes` is empty, or if `pos` addresses a leaf past the end.
pub fn calc_hash(height: u64, pos: u64, hashes: &[Uint256]) -> Uint256 {
    // A block always has its coinbase; an empty list has no addressable nodes.
    assert!(!hashes.is_empty(), "calc_hash on an empty leaf list");
    if height == 0 {
        return hashes[pos as usize];
    }

    let left = calc_hash(height - 1, pos * 2, hashes);
    let right = if pos * 2 + 1 < calc_tree_width(height - 1, hashes.len() as u64) {
        calc_hash(height - 1, pos * 2 + 1, hashes)
    } else {
        left
    };
    hash_pair(&left, &right)
}

/// Index of the first leaf at which two equal-height trees diverge.
///
/// Returns 0 when both lists commit to the same root, which does not mean
/// the lists are equal. This is a diagnostic aid, never a consensus check.
///
/// # Panics
///
/// If either list is empty, or the two trees differ in height.
pub fn find_diff_leaf(hashes1: &[Uint256], hashes2: &[Uint256]) -> u64 {
    assert!(
        !hashes1.is_empty() && !hashes2.is_empty(),
        "find_diff_leaf on an empty leaf list"
    );
    if merkle_root(hashes1) == merkle_root(hashes2) {
        return 0;
    }

    let height = calc_tree_height(hashes1);
    let height2 = calc_tree_height(hashes2);
    assert_eq!(height, height2, "find_diff_leaf on trees of different height");

    let mut index = 0;
    for level in (1..height).rev() {
        if node_at(level, index, hashes1) != node_at(level, index, hashes2) {
            // left child differs
            index *= 2;
        } else {
            // right child differs; address its left child one level down
            index = index * 2 + 2;
        }
    }
    if node_at(0, index, hashes1) == node_at(0, index, hashes2) {
        index += 1;
    }
    index
}

// None for a node past the level width, so a shorter list reads as diverging there.
fn node_at(height: u64, pos: u64, hashes: &[Uint256]) -> Option<Uint256> {
    (pos < calc_tree_width(height, hashes.len() as u64)).then(|| calc_hash(height, pos, hashes))
}

/// Check that `leaves` commit to `expected` and are not mutated.
pub fn check_merkle_root(leaves: &[Uint256], expected: &Uint256) -> Result<()> {
    if leaves.is_empty() {
        return Err(anyhow!("no leaves to commit to"));
    }
    let (root, mutated) = compute_merkle_root(leaves);
    if root != *expected {
        return Err(anyhow!(
            "bad-txnmrklroot: computed {root}, expected {expected}"
        ));
    }
    if mutated {
        return Err(anyhow!(
            "bad-txns-duplicate: duplicate leaves hashed together under root {root}"
        ));
    }
    Ok(())
}
