use crate::output::print_json;
use probe_core::{manifest, ProbeConfig};

pub fn run(config: &ProbeConfig, json: bool) -> anyhow::Result<()> {
    let manifest_path = super::manifest_path(config)?;
    let program_id = manifest::resolve_from_file(&manifest_path, &config.program)?;

    if json {
        print_json(&serde_json::json!({
            "program": config.program,
            "program_id": program_id,
            "manifest": manifest_path,
        }))?;
    } else {
        println!("{program_id}");
    }

    Ok(())
}
