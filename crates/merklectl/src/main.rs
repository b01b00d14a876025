mod config;
mod leaves;
mod report;

use crate::config::{Command, Config};
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::fmt::Display;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cfg = Config::parse();

    match cfg.cmd {
        Command::Root { leaves } => {
            let hashes = leaves::load(&leaves)?;
            info!("loaded {} leaves from {}", hashes.len(), leaves.display());
            emit(cfg.json, &report::root(&hashes))?;
        }

        Command::Verify { leaves, root } => {
            let hashes = leaves::load(&leaves)?;
            info!("loaded {} leaves from {}", hashes.len(), leaves.display());
            let verified = report::verify(&hashes, &root)?;
            info!("merkle root {} verified", verified.root);
            emit(cfg.json, &verified)?;
        }

        Command::Node { leaves, height, pos } => {
            let hashes = leaves::load(&leaves)?;
            info!("loaded {} leaves from {}", hashes.len(), leaves.display());
            emit(cfg.json, &report::node(&hashes, height, pos)?)?;
        }

        Command::Diff { left, right } => {
            let lhs = leaves::load(&left)?;
            let rhs = leaves::load(&right)?;
            info!(
                "loaded {} leaves from {}, {} from {}",
                lhs.len(),
                left.display(),
                rhs.len(),
                right.display()
            );
            emit(cfg.json, &report::diff(&lhs, &rhs)?)?;
        }
    }

    Ok(())
}

fn emit<T: Serialize + Display>(json: bool, report: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
