//! Program id lookup in a workspace manifest (`Anchor.toml`).
//!
//! Only `name = "value"` entries are recognised; the manifest is never parsed
//! as a whole, so unrelated sections may contain anything.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::{ProbeError, Result};
use crate::types::ProgramId;

/// Manifest file name searched for when no explicit path is given.
pub const MANIFEST_FILE: &str = "Anchor.toml";

/// Extract the raw value for `name`. The first entry in file order wins.
pub fn lookup<'a>(manifest: &'a str, name: &str) -> Option<&'a str> {
    // The leading group keeps `my_ci_proof_core` from resolving `ci_proof_core`.
    let pattern = format!(r#"(?m)(?:^|[^\w]){}\s*=\s*"([^"]+)""#, regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    re.captures(manifest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve `name` from manifest text into a validated [`ProgramId`].
///
/// `source` names the manifest in error messages.
pub fn resolve(manifest: &str, name: &str, source: &str) -> Result<ProgramId> {
    let value = lookup(manifest, name).ok_or_else(|| ProbeError::ProgramNotInManifest {
        name: name.to_string(),
        manifest: source.to_string(),
    })?;

    ProgramId::from_base58(value).map_err(|reason| ProbeError::InvalidProgramId {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    })
}

/// Read the manifest at `path` and resolve `name` from it.
pub fn resolve_from_file(path: &Path, name: &str) -> Result<ProgramId> {
    let text = std::fs::read_to_string(path).map_err(|source| ProbeError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let id = resolve(&text, name, &path.display().to_string())?;
    tracing::debug!(program = name, %id, manifest = %path.display(), "resolved program id");
    Ok(id)
}

/// Locate the manifest.
///
/// Priority:
/// 1. `explicit` (from `--manifest` or the config file)
/// 2. Walk upward from `start` looking for `Anchor.toml`
/// 3. Fall back to `start/Anchor.toml`
pub fn discover(explicit: Option<&Path>, start: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    start.join(MANIFEST_FILE)
}
