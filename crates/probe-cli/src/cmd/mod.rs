pub mod resolve;
pub mod wait;

use anyhow::Context;
use clap::Args;
use probe_core::{Commitment, ProbeConfig};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Default, Clone)]
pub struct ManifestArgs {
    /// Path to Anchor.toml (default: search upward from the current directory)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Program name as listed in the manifest
    #[arg(long)]
    pub program: Option<String>,
}

impl ManifestArgs {
    pub fn apply(&self, cfg: &mut ProbeConfig) {
        if let Some(path) = &self.manifest {
            cfg.manifest = Some(path.clone());
        }
        if let Some(name) = &self.program {
            cfg.program = name.clone();
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub target: ManifestArgs,

    /// JSON-RPC endpoint of the node
    #[arg(long, env = "PROBE_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Log text that proves the program is live (case-sensitive substring)
    #[arg(long)]
    pub marker: Option<String>,

    /// Give up after this many attempts
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Pause between attempts, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Recent transactions inspected per attempt
    #[arg(long)]
    pub limit: Option<usize>,

    /// Confirmation level: processed, confirmed or finalized
    #[arg(long)]
    pub commitment: Option<Commitment>,

    /// Keep polling when the node errors instead of failing immediately
    #[arg(long)]
    pub retry_query_errors: bool,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

impl ProbeArgs {
    pub fn apply(&self, cfg: &mut ProbeConfig) {
        self.target.apply(cfg);
        if let Some(url) = &self.rpc_url {
            cfg.rpc_url = url.clone();
        }
        if let Some(marker) = &self.marker {
            cfg.marker = marker.clone();
        }
        if let Some(n) = self.max_attempts {
            cfg.max_attempts = n;
        }
        if let Some(ms) = self.interval_ms {
            cfg.interval_ms = ms;
        }
        if let Some(limit) = self.limit {
            cfg.signature_limit = limit;
        }
        if let Some(c) = self.commitment {
            cfg.commitment = c;
        }
        if self.retry_query_errors {
            cfg.retry_query_errors = true;
        }
        if let Some(secs) = self.request_timeout_secs {
            cfg.request_timeout_secs = secs;
        }
    }
}

/// Load the config file (or defaults), apply flag overrides, and validate.
pub fn load_config(
    path: Option<&Path>,
    overrides: impl FnOnce(&mut ProbeConfig),
) -> anyhow::Result<ProbeConfig> {
    let mut cfg = match path {
        Some(p) => ProbeConfig::load(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => ProbeConfig::default(),
    };
    overrides(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

/// Manifest location: config/flag value, else upward search from cwd.
pub fn manifest_path(cfg: &ProbeConfig) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(probe_core::manifest::discover(cfg.manifest.as_deref(), &cwd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("probe.yaml");
        std::fs::write(
            &path,
            "program: token_vault\nmax_attempts: 10\ninterval_ms: 50\n",
        )
        .unwrap();

        let args = ProbeArgs {
            max_attempts: Some(3),
            commitment: Some(Commitment::Finalized),
            ..Default::default()
        };
        let cfg = load_config(Some(&path), |cfg| args.apply(cfg)).unwrap();

        assert_eq!(cfg.program, "token_vault");
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.interval_ms, 50);
        assert_eq!(cfg.commitment, Commitment::Finalized);
    }

    #[test]
    fn absent_flags_keep_defaults() {
        let cfg = load_config(None, |cfg| ProbeArgs::default().apply(cfg)).unwrap();
        assert_eq!(cfg, ProbeConfig::default());
    }

    #[test]
    fn invalid_override_fails_validation() {
        let args = ProbeArgs {
            limit: Some(0),
            ..Default::default()
        };
        let err = load_config(None, |cfg| args.apply(cfg)).unwrap_err();
        assert!(format!("{err:#}").contains("signature_limit"));
    }

    #[test]
    fn manifest_args_set_program_and_path() {
        let mut cfg = ProbeConfig::default();
        ManifestArgs {
            manifest: Some(PathBuf::from("/tmp/Anchor.toml")),
            program: Some("token_vault".into()),
        }
        .apply(&mut cfg);
        assert_eq!(cfg.program, "token_vault");
        assert_eq!(cfg.manifest.as_deref(), Some(Path::new("/tmp/Anchor.toml")));
    }
}
