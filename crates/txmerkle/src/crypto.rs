use crate::types::Uint256;
use sha2::{Digest, Sha256};

/// Hash bytes with SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Double SHA-256 of an arbitrary byte range: SHA256(SHA256(data)).
pub fn sha256d(data: &[u8]) -> Uint256 {
    Uint256::from_bytes(sha256(&sha256(data)))
}

/// Double hash of two digests fed as consecutive buffers: H(H(left || right)).
pub fn hash_pair(left: &Uint256, right: &Uint256) -> Uint256 {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    let first: [u8; 32] = hasher.finalize().into();
    Uint256::from_bytes(sha256(&first))
}

/// Batched double hash over adjacent 64-byte blocks.
///
/// `nodes` is read pairwise: block `i` is `nodes[2i] || nodes[2i + 1]`,
/// and the result holds one digest per block.
pub fn sha256d64(nodes: &[Uint256]) -> Vec<Uint256> {
    assert!(
        nodes.len() % 2 == 0,
        "sha256d64 needs whole 64-byte blocks, got {} digests",
        nodes.len()
    );
    let mut block = [0u8; 64];
    nodes
        .chunks_exact(2)
        .map(|pair| {
            block[..32].copy_from_slice(pair[0].as_bytes());
            block[32..].copy_from_slice(pair[1].as_bytes());
            sha256d(&block)
        })
        .collect()
}
