use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use txmerkle::Uint256;

/// Load a leaf file from disk.
pub fn load(path: &Path) -> Result<Vec<Uint256>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read leaf file {}", path.display()))?;
    parse(&data).with_context(|| format!("failed to parse leaf file {}", path.display()))
}

/// Parse leaves: a JSON array of hex txids, or one txid per line.
/// Blank lines and `#` comments are skipped in the line format.
pub fn parse(data: &str) -> Result<Vec<Uint256>> {
    if data.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(data)?);
    }

    let mut out = Vec::new();
    for (n, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let leaf = line
            .parse()
            .map_err(|e| anyhow!("line {}: {e}", n + 1))?;
        out.push(leaf);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "8c14f0db3df150123e6f3dbbf30f8b955a8249b62ac1d1ff16284aefa3d06d87";
    const B: &str = "fff2525b8931402dd09222c50775608f75787bd2b87e56995a7bdd30f79702c4";

    #[test]
    fn parses_lines_with_comments() {
        let data = format!("# block 100000\n{A}\n\n  {B}  \n");
        let leaves = parse(&data).unwrap();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].to_hex(), A);
        assert_eq!(leaves[1].to_hex(), B);
    }

    #[test]
    fn parses_json_array() {
        let data = format!("  [\"{A}\", \"{B}\"]");
        let leaves = parse(&data).unwrap();
        assert_eq!(leaves, parse(&format!("{A}\n{B}")).unwrap());
    }

    #[test]
    fn reports_bad_line_number() {
        let err = parse(&format!("{A}\nnot-a-txid\n")).unwrap_err();
        assert!(err.to_string().starts_with("line 2"));
    }

    #[test]
    fn empty_input_is_empty_list() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# nothing\n").unwrap().is_empty());
        assert!(parse("[]").unwrap().is_empty());
    }
}
