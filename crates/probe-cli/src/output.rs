use probe_core::{ProbeConfig, ProbeReport, ProgramId};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Banner printed before polling starts. Suppressed in JSON mode so stdout
/// stays a single document.
pub fn print_waiting(program_id: &ProgramId, config: &ProbeConfig, json: bool) {
    if !json {
        println!(
            "🔍 Waiting for program {program_id} to emit log: \"{}\"",
            config.marker
        );
    }
}

pub fn print_report(report: &ProbeReport, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(report);
    }
    println!(
        "✅ Found matching log in transaction: {}",
        report.found.signature
    );
    Ok(())
}
