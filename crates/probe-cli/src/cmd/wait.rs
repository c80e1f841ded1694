use crate::output::{print_report, print_waiting};
use anyhow::{anyhow, Context};
use probe_core::{manifest, ProbeConfig, ReadinessPoller};
use solana_ledger::RpcClient;

pub fn run(config: &ProbeConfig, json: bool) -> anyhow::Result<()> {
    let manifest_path = super::manifest_path(config)?;
    let program_id = manifest::resolve_from_file(&manifest_path, &config.program)?;

    let client = RpcClient::new(config.rpc_url.clone(), config.request_timeout())
        .context("failed to build RPC client")?;
    tracing::info!(
        rpc = client.url(),
        %program_id,
        max_attempts = config.max_attempts,
        interval_ms = config.interval_ms,
        "starting readiness probe"
    );
    let poller = ReadinessPoller::new(client, config.poll_config());

    print_waiting(&program_id, config, json);

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async {
        tokio::select! {
            res = poller.wait_for_marker(&program_id) => res.map_err(anyhow::Error::from),
            _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
        }
    })?;

    print_report(&report, json)
}
