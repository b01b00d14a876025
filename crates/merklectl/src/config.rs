use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "merklectl", about = "Inspect consensus transaction Merkle trees")]
pub struct Config {
    /// Print reports as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the root of a leaf file, with mutation flag and level widths.
    Root {
        /// Leaf file: one txid per line, or a JSON array of txids.
        #[arg(long)]
        leaves: PathBuf,
    },

    /// Check a leaf file against an expected root. Fails on mismatch or mutation.
    Verify {
        #[arg(long)]
        leaves: PathBuf,
        /// Expected root, hex in display order.
        #[arg(long)]
        root: String,
    },

    /// Hash of a single tree node, rebuilt from the leaves.
    Node {
        #[arg(long)]
        leaves: PathBuf,
        /// 0 is the leaf level.
        #[arg(long)]
        height: u64,
        #[arg(long)]
        pos: u64,
    },

    /// Find the first leaf where two equal-height trees diverge.
    Diff {
        #[arg(long)]
        left: PathBuf,
        #[arg(long)]
        right: PathBuf,
    },
}
