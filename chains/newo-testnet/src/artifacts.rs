//! Hardhat build artifacts.
//!
//! Contracts are compiled outside this workspace; the tools only read the
//! `abi` and creation `bytecode` from the JSON files Hardhat writes under
//! `artifacts/`.

use crate::error::SeedError;
use alloy_primitives::Bytes;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct HardhatArtifact {
    #[serde(default)]
    abi: serde_json::Value,
    #[serde(default)]
    bytecode: String,
}

impl Artifact {
    /// Loads `<name>` from a Hardhat artifacts directory.
    ///
    /// Looks at `<dir>/<name>.sol/<name>.json`, then `<dir>/<name>.json`, then
    /// anywhere below `dir` (dependency contracts such as `ERC1967Proxy` live
    /// under `@openzeppelin/...`).
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, SeedError> {
        let dir = dir.as_ref();
        let path = locate(dir, name).ok_or_else(|| {
            SeedError::artifact(name, format!("no artifact found under {}", dir.display()))
        })?;

        let raw = fs::read_to_string(&path).map_err(|e| {
            SeedError::artifact(name, format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(name, &raw)
    }

    pub fn parse(name: &str, raw: &str) -> Result<Self, SeedError> {
        let parsed: HardhatArtifact = serde_json::from_str(raw)
            .map_err(|e| SeedError::artifact(name, format!("invalid artifact JSON: {}", e)))?;

        let hex_code = parsed.bytecode.trim().trim_start_matches("0x");
        if hex_code.is_empty() {
            return Err(SeedError::artifact(
                name,
                "empty bytecode (abstract contract or interface)",
            ));
        }
        if hex_code.contains("__") {
            return Err(SeedError::artifact(name, "bytecode has unlinked libraries"));
        }
        let bytecode = hex::decode(hex_code)
            .map_err(|e| SeedError::artifact(name, format!("invalid bytecode hex: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            abi: parsed.abi,
            bytecode: Bytes::from(bytecode),
        })
    }

    /// Whether the ABI declares a function called `function`
    pub fn has_function(&self, function: &str) -> bool {
        self.abi.as_array().is_some_and(|items| {
            items.iter().any(|item| {
                item.get("type").and_then(|t| t.as_str()) == Some("function")
                    && item.get("name").and_then(|n| n.as_str()) == Some(function)
            })
        })
    }
}

fn locate(dir: &Path, name: &str) -> Option<PathBuf> {
    let file = format!("{}.json", name);
    [dir.join(format!("{}.sol", name)).join(&file), dir.join(&file)]
        .into_iter()
        .find(|p| p.is_file())
        .or_else(|| search(dir, &file))
}

fn search(dir: &Path, file: &str) -> Option<PathBuf> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.file_name().and_then(|n| n.to_str()) == Some(file) {
            return Some(path);
        }
    }
    // build-info holds compiler input/output, never contract artifacts
    subdirs.sort();
    subdirs
        .iter()
        .filter(|d| !d.ends_with("build-info"))
        .find_map(|d| search(d, file))
}
