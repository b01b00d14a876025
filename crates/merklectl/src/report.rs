use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};
use txmerkle::{
    calc_hash, calc_tree_height, calc_tree_width, check_merkle_root, compute_merkle_root,
    find_diff_leaf, level_widths, Uint256,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RootReport {
    pub leaves: u64,
    pub root: Uint256,
    pub mutated: bool,
    pub height: u64,
    /// Node count per level, leaves first.
    pub widths: Vec<u64>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VerifyReport {
    pub root: Uint256,
    pub valid: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NodeReport {
    pub height: u64,
    pub pos: u64,
    pub hash: Uint256,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DiffReport {
    pub index: u64,
    /// Roots match; `index` is 0 and says nothing about the lists.
    pub equivalent: bool,
    pub left: Option<Uint256>,
    pub right: Option<Uint256>,
}

pub fn root(leaves: &[Uint256]) -> RootReport {
    let (root, mutated) = compute_merkle_root(leaves);
    let count = leaves.len() as u64;
    let widths = level_widths(count);
    for (height, width) in widths.iter().enumerate() {
        debug!(height, width, "tree level");
    }
    if mutated {
        warn!(%root, "leaf list is mutated: identical siblings hashed together");
    }
    RootReport {
        leaves: count,
        root,
        mutated,
        height: calc_tree_height(leaves),
        widths,
    }
}

pub fn verify(leaves: &[Uint256], expected: &str) -> Result<VerifyReport> {
    let root: Uint256 = expected.parse()?;
    check_merkle_root(leaves, &root)?;
    Ok(VerifyReport { root, valid: true })
}

pub fn node(leaves: &[Uint256], height: u64, pos: u64) -> Result<NodeReport> {
    if leaves.is_empty() {
        return Err(anyhow!("no leaves: an empty tree has no nodes"));
    }
    let tree_height = calc_tree_height(leaves);
    if height > tree_height {
        return Err(anyhow!(
            "height {height} out of range: tree of {} leaves has height {tree_height}",
            leaves.len()
        ));
    }
    let width = calc_tree_width(height, leaves.len() as u64);
    if pos >= width {
        return Err(anyhow!(
            "pos {pos} out of range: level {height} has {width} node(s)"
        ));
    }
    Ok(NodeReport {
        height,
        pos,
        hash: calc_hash(height, pos, leaves),
    })
}

pub fn diff(left: &[Uint256], right: &[Uint256]) -> Result<DiffReport> {
    if left.is_empty() || right.is_empty() {
        return Err(anyhow!("both leaf lists must be non-empty"));
    }
    let (lh, rh) = (calc_tree_height(left), calc_tree_height(right));
    if lh != rh {
        return Err(anyhow!(
            "trees differ in height ({lh} vs {rh}); divergence search needs equal heights"
        ));
    }

    let index = find_diff_leaf(left, right);
    // Only a zero index can stand for matching roots.
    let equivalent = index == 0 && txmerkle::merkle_root(left) == txmerkle::merkle_root(right);
    Ok(DiffReport {
        index,
        equivalent,
        left: left.get(index as usize).copied(),
        right: right.get(index as usize).copied(),
    })
}

fn or_none(leaf: Option<Uint256>) -> String {
    leaf.map_or_else(|| "<none>".to_string(), |l| l.to_string())
}

impl fmt::Display for RootReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "leaves:  {}", self.leaves)?;
        writeln!(f, "root:    {}", self.root)?;
        writeln!(f, "mutated: {}", self.mutated)?;
        writeln!(f, "height:  {}", self.height)?;
        let widths: Vec<String> = self.widths.iter().map(u64::to_string).collect();
        write!(f, "widths:  [{}]", widths.join(", "))
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ok: {}", self.root)
    }
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node ({}, {}): {}", self.height, self.pos, self.hash)
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.equivalent {
            return write!(f, "roots match; no divergent leaf");
        }
        writeln!(f, "first divergent leaf: {}", self.index)?;
        writeln!(f, "  left:  {}", or_none(self.left))?;
        write!(f, "  right: {}", or_none(self.right))
    }
}
