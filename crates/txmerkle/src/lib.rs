//! Consensus transaction Merkle trees: root computation with mutation
//! detection, tree geometry, single-node hashing and divergence search.

pub mod crypto;
pub mod merkle;
pub mod types;

pub use merkle::{
    calc_hash, calc_tree_height, calc_tree_width, check_merkle_root, compute_merkle_root,
    find_diff_leaf, level_widths, merkle_root, tree_height_for,
};
pub use types::Uint256;
